//! `tracing` integration.
//!
//! inilog reports its own events through `tracing`. This module installs a
//! subscriber for them, either on a plain writer filtered by `RUST_LOG`, or
//! routed into a [`Logger`] so that they reach syslog.

use std::io;

use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{EnvFilter, fmt};

use crate::logger::{Logger, Severity};

/// Initialize the global tracing subscriber on standard error.
///
/// Call `init` before any logging statements to avoid missing logs.
///
/// # Examples
///
/// ```rust,no_run
/// use inilog::logging::init;
///
/// init();
/// tracing::info!("Logging is initialized!");
/// ```
pub fn init() {
    init_with_writer(fmt::writer::BoxMakeWriter::new(io::stderr));
}

/// Initialize logging with a custom writer, filtered by `RUST_LOG`.
///
/// # Examples
///
/// ```rust,no_run
/// use inilog::logging::init_with_writer;
/// use tracing_subscriber::fmt;
///
/// init_with_writer(fmt::writer::BoxMakeWriter::new(std::io::stderr));
/// ```
pub fn init_with_writer<W>(writer: W)
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(writer)
        .init();
}

/// Route tracing events matching `filter` into `logger`.
///
/// # Examples
///
/// ```rust,no_run
/// use inilog::logger::Logger;
/// use inilog::logging::init_with_logger;
///
/// init_with_logger(Logger::new(), "info");
/// tracing::warn!("sent to syslog");
/// ```
pub fn init_with_logger(logger: Logger, filter: &str) {
    fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(LoggerWriter::new(logger))
        .with_ansi(false)
        .without_time()
        .with_level(false)
        .init();
}

/// Map a tracing level onto a syslog severity.
#[must_use]
pub fn severity_for(level: Level) -> Severity {
    match level {
        Level::ERROR => Severity::Err,
        Level::WARN => Severity::Warning,
        Level::INFO => Severity::Info,
        Level::DEBUG | Level::TRACE => Severity::Debug,
    }
}

/// [`MakeWriter`] that forwards each formatted event to a [`Logger`].
#[derive(Debug, Clone)]
pub struct LoggerWriter {
    logger: Logger,
}

impl LoggerWriter {
    /// Wrap `logger`.
    #[must_use]
    pub fn new(logger: Logger) -> Self {
        Self { logger }
    }

    fn event_writer(&self, severity: Severity) -> EventWriter {
        EventWriter {
            logger: self.logger.clone(),
            severity,
            buf: Vec::new(),
        }
    }
}

/// Buffers one event and emits it when dropped.
#[derive(Debug)]
pub struct EventWriter {
    logger: Logger,
    severity: Severity,
    buf: Vec<u8>,
}

impl io::Write for EventWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for EventWriter {
    fn drop(&mut self) {
        let text = String::from_utf8_lossy(&self.buf);
        let text = text.trim();
        if !text.is_empty() {
            self.logger.log(self.severity, format_args!("{text}"));
        }
    }
}

impl<'a> MakeWriter<'a> for LoggerWriter {
    type Writer = EventWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.event_writer(Severity::Info)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        self.event_writer(severity_for(*meta.level()))
    }
}
