//! In-memory capture of written output.
//!
//! [`SharedBuffer`] is both an [`io::Write`] and a `tracing-subscriber`
//! [`MakeWriter`], so the same buffer can stand in for standard error in a
//! logger and for the writer of a tracing subscriber.

#![expect(clippy::expect_used, reason = "simplify test setup")]

use std::io;
use std::sync::{Arc, Mutex};

use tracing_subscriber::fmt::MakeWriter;

/// Cloneable buffer; clones share the same bytes.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    /// Captured bytes as UTF-8 text.
    pub fn contents(&self) -> String {
        let bytes = self.0.lock().expect("lock capture buffer").clone();
        String::from_utf8(bytes).expect("captured output is valid UTF-8")
    }

    /// Captured output split into lines.
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_owned).collect()
    }

    /// Discard everything captured so far.
    pub fn clear(&self) {
        self.0.lock().expect("lock capture buffer").clear();
    }
}

impl io::Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .expect("lock capture buffer")
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for SharedBuffer {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
