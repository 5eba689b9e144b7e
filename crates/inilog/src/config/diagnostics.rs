//! Sink for diagnostics produced while parsing configuration files.

use std::fmt;
use std::sync::Arc;

/// Receives human-readable diagnostics from the INI collaborator.
///
/// The default sink emits them as `tracing` errors. A [`Logger`] can supply
/// its own sink so that parse failures reach syslog at error severity.
///
/// [`Logger`]: crate::logger::Logger
#[derive(Clone)]
pub struct DiagnosticSink(Arc<dyn Fn(&str) + Send + Sync>);

impl DiagnosticSink {
    /// Wrap a reporting function.
    pub fn new<F>(report: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        Self(Arc::new(report))
    }

    /// Report one diagnostic message.
    pub fn report(&self, message: &str) {
        (self.0)(message);
    }
}

impl Default for DiagnosticSink {
    fn default() -> Self {
        Self::new(|message| tracing::error!(target: "inilog::ini", "{message}"))
    }
}

impl fmt::Debug for DiagnosticSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticSink").finish_non_exhaustive()
    }
}
