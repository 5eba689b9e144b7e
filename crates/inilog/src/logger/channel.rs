//! Connections to the system log.
//!
//! `openlog(3)` keeps process-wide state, so every [`Syslog`] shares one
//! libc connection. A process-wide [`Owner`] records which connection last
//! called `openlog`: sending through another connection reopens it with that
//! connection's identity, and dropping a connection only calls `closelog(3)`
//! when it is still the owner.

use std::ffi::CString;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::{Mutex, const_mutex};

use super::{Facility, Severity};

static OWNER: Mutex<Owner> = const_mutex(Owner(None));
static NEXT_TOKEN: AtomicU64 = AtomicU64::new(1);

/// Token of the connection that libc's syslog state was last opened for.
#[derive(Debug, Default, PartialEq, Eq)]
struct Owner(Option<u64>);

impl Owner {
    /// Make `token` the owner. Returns whether `openlog` must be called.
    fn claim(&mut self, token: u64) -> bool {
        if self.0 == Some(token) {
            return false;
        }
        self.0 = Some(token);
        true
    }

    /// Give up ownership. Returns whether `closelog` must be called.
    fn release(&mut self, token: u64) -> bool {
        if self.0 != Some(token) {
            return false;
        }
        self.0 = None;
        true
    }
}

/// Text as a C string, with interior NUL bytes removed.
fn c_text(text: &str) -> CString {
    CString::new(text.replace('\0', "")).unwrap_or_default()
}

/// A syslog connection.
#[derive(Debug)]
pub(crate) struct Syslog {
    token: u64,
    // openlog(3) keeps the pointer, so the string must live as long as this
    // connection may be the owner.
    ident: CString,
    options: libc::c_int,
    facility: libc::c_int,
}

impl Syslog {
    /// Open the connection with `LOG_PID | LOG_NDELAY`, adding `LOG_PERROR`
    /// when messages should also be echoed to standard error.
    pub(crate) fn open(ident: &str, facility: Facility, echo_stderr: bool) -> Self {
        let mut options = libc::LOG_PID | libc::LOG_NDELAY;
        if echo_stderr {
            options |= libc::LOG_PERROR;
        }
        let syslog = Self {
            token: NEXT_TOKEN.fetch_add(1, Ordering::Relaxed),
            ident: c_text(ident),
            options,
            facility: facility.code(),
        };
        let mut owner = OWNER.lock();
        if owner.claim(syslog.token) {
            syslog.openlog();
        }
        drop(owner);
        syslog
    }

    fn openlog(&self) {
        // SAFETY: `ident` lives until this connection is dropped, and a
        // dropped connection is never the owner.
        unsafe { libc::openlog(self.ident.as_ptr(), self.options, self.facility) };
    }

    /// Submit one message, reopening first if another connection took over.
    pub(crate) fn send(&self, severity: Severity, message: &str) {
        let message = c_text(message);
        let mut owner = OWNER.lock();
        if owner.claim(self.token) {
            self.openlog();
        }
        // SAFETY: both pointers are valid NUL-terminated strings and the
        // format consumes exactly one string argument.
        unsafe { libc::syslog(severity.code(), c"%s".as_ptr(), message.as_ptr()) };
    }

    /// Identity the connection was opened with.
    pub(crate) fn ident(&self) -> &str {
        self.ident.to_str().unwrap_or_default()
    }
}

impl Drop for Syslog {
    fn drop(&mut self) {
        let mut owner = OWNER.lock();
        if owner.release(self.token) {
            // SAFETY: closing an open connection has no preconditions.
            unsafe { libc::closelog() };
        }
    }
}

/// Format one line for standard error.
pub(crate) fn stderr_line(ident: &str, severity: Severity, message: &str) -> String {
    let mut line = format!("{ident}: {}{message}", severity.label());
    if !line.ends_with('\n') {
        line.push('\n');
    }
    line
}
