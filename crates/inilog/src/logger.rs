//! Logging to syslog or standard error.
//!
//! A [`Logger`] opens its channel lazily on the first message and closes it
//! whenever a setting changes, so the next message reopens it with the new
//! settings. In config mode the settings are read from a [`ConfigStore`]
//! each time the channel opens, using the `log:*` keys.
//!
//! Logger state sits behind a mutex: opening the channel and emitting a
//! message are serialised across threads.

mod channel;
mod facility;
mod severity;

use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Weak};

use inilog_lib::keys;
use parking_lot::Mutex;
use thiserror::Error;

use crate::config::{ConfigStore, DiagnosticSink};
use channel::{Syslog, stderr_line};
pub use facility::{Facility, parse_facility};
pub use severity::{Severity, UnknownSeverity, parse_level};

/// Identity used when none has been set.
pub const DEFAULT_IDENT: &str = "(none)";

/// Errors returned by [`Logger`] setters.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LogError {
    /// Config mode was requested on a logger built without a store.
    #[error("logger has no configuration store to read settings from")]
    NoConfigStore,
}

/// Emit a formatted message through a [`Logger`].
///
/// # Examples
///
/// ```rust,no_run
/// use inilog::emit;
/// use inilog::logger::{Logger, Severity};
///
/// let logger = Logger::new();
/// emit!(logger, Severity::Notice, "listening on port {}", 8080);
/// ```
#[macro_export]
macro_rules! emit {
    ($logger:expr, $severity:expr, $($arg:tt)+) => {
        $logger.log($severity, ::std::format_args!($($arg)+))
    };
}

/// Effective logger settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Echo syslog messages to standard error.
    pub stderr: bool,
    /// Send messages to syslog rather than standard error.
    pub syslog: bool,
    /// Messages with a numerically greater severity are dropped.
    pub threshold: i32,
    /// Syslog facility.
    pub facility: Facility,
    /// Identity string.
    pub ident: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            stderr: false,
            syslog: true,
            threshold: Severity::Notice.code(),
            facility: Facility::Daemon,
            ident: DEFAULT_IDENT.to_owned(),
        }
    }
}

impl Settings {
    fn from_store(store: &ConfigStore) -> Self {
        let text = |key: &str, fallback: &str| {
            store
                .get(key, Some(fallback))
                .unwrap_or_else(|| fallback.to_owned())
        };
        Self {
            stderr: store.get_bool(keys::LOG_STDERR, false),
            syslog: store.get_bool(keys::LOG_SYSLOG, true),
            threshold: parse_level(&text(keys::LOG_LEVEL, "notice")),
            facility: parse_facility(&text(keys::LOG_FACILITY, "user")),
            ident: text(keys::LOG_IDENT, DEFAULT_IDENT),
        }
    }
}

enum Channel {
    Syslog(Syslog),
    Stderr,
}

struct State {
    channel: Option<Channel>,
    use_config: bool,
    settings: Settings,
    writer: Box<dyn Write + Send>,
}

impl State {
    fn open(&mut self, store: Option<&ConfigStore>) {
        self.channel = None;
        if self.use_config {
            if let Some(store) = store {
                self.settings = Settings::from_store(store);
            }
        }
        let settings = &self.settings;
        self.channel = Some(if settings.syslog {
            Channel::Syslog(Syslog::open(
                &settings.ident,
                settings.facility,
                settings.stderr,
            ))
        } else {
            Channel::Stderr
        });
    }

    /// Apply a direct setting: leave config mode and close the channel.
    fn direct(&mut self, update: impl FnOnce(&mut Settings)) {
        self.use_config = false;
        update(&mut self.settings);
        self.channel = None;
    }
}

struct Inner {
    state: Mutex<State>,
    store: Option<ConfigStore>,
}

/// Handle to a logger. Clones share state.
#[derive(Clone)]
pub struct Logger {
    inner: Arc<Inner>,
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("settings", &self.settings())
            .field("open", &self.is_open())
            .finish_non_exhaustive()
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// Create a logger with direct settings and no configuration store.
    #[must_use]
    pub fn new() -> Self {
        Self::build(None)
    }

    /// Create a logger that can read its settings from `store`.
    ///
    /// The logger starts with direct settings; call
    /// [`set_use_config`](Self::set_use_config) to switch.
    #[must_use]
    pub fn with_config(store: ConfigStore) -> Self {
        Self::build(Some(store))
    }

    fn build(store: Option<ConfigStore>) -> Self {
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(State {
                    channel: None,
                    use_config: false,
                    settings: Settings::default(),
                    writer: Box::new(io::stderr()),
                }),
                store,
            }),
        }
    }

    /// Replace standard error as the destination when syslog is disabled.
    #[must_use]
    pub fn with_writer<W>(self, writer: W) -> Self
    where
        W: Write + Send + 'static,
    {
        self.inner.state.lock().writer = Box::new(writer);
        self
    }

    /// Set the identity prefixed to messages.
    pub fn set_ident(&self, ident: &str) {
        self.inner
            .state
            .lock()
            .direct(|s| ident.clone_into(&mut s.ident));
    }

    /// Set the threshold: a [`Severity`] or a raw syslog level.
    pub fn set_level(&self, level: impl Into<i32>) {
        let level = level.into();
        self.inner.state.lock().direct(|s| s.threshold = level);
    }

    /// Set the syslog facility.
    pub fn set_facility(&self, facility: Facility) {
        self.inner.state.lock().direct(|s| s.facility = facility);
    }

    /// Choose syslog (`true`) or standard error (`false`).
    pub fn set_syslog(&self, enabled: bool) {
        self.inner.state.lock().direct(|s| s.syslog = enabled);
    }

    /// Echo syslog messages to standard error.
    pub fn set_stderr(&self, enabled: bool) {
        self.inner.state.lock().direct(|s| s.stderr = enabled);
    }

    /// Read settings from the configuration store whenever the channel
    /// opens. Setting the current value again changes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::NoConfigStore`] when enabling config mode on a
    /// logger created without a store.
    pub fn set_use_config(&self, enabled: bool) -> Result<(), LogError> {
        if enabled && self.inner.store.is_none() {
            return Err(LogError::NoConfigStore);
        }
        let mut state = self.inner.state.lock();
        if state.use_config != enabled {
            state.use_config = enabled;
            state.channel = None;
        }
        Ok(())
    }

    /// Close the channel; the next message reopens it.
    pub fn reset(&self) {
        self.inner.state.lock().channel = None;
    }

    /// Whether the channel is currently open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.inner.state.lock().channel.is_some()
    }

    /// Snapshot of the settings in effect.
    ///
    /// In config mode these are the values read when the channel last
    /// opened.
    #[must_use]
    pub fn settings(&self) -> Settings {
        self.inner.state.lock().settings.clone()
    }

    /// Emit a message if `severity` passes the threshold.
    ///
    /// Write errors on standard error are ignored.
    pub fn log(&self, severity: Severity, args: fmt::Arguments<'_>) {
        let mut state = self.inner.state.lock();
        if state.channel.is_none() {
            state.open(self.inner.store.as_ref());
        }
        if severity.code() > state.settings.threshold {
            return;
        }
        let State {
            channel, writer, settings, ..
        } = &mut *state;
        let message = args.to_string();
        match channel {
            Some(Channel::Syslog(syslog)) => syslog.send(severity, &message),
            Some(Channel::Stderr) | None => {
                let line = stderr_line(&settings.ident, severity, &message);
                let _ = writer.write_all(line.as_bytes());
                let _ = writer.flush();
            }
        }
    }

    /// Identity of the open syslog connection, if one is open.
    #[must_use]
    pub fn syslog_ident(&self) -> Option<String> {
        match &self.inner.state.lock().channel {
            Some(Channel::Syslog(syslog)) => Some(syslog.ident().to_owned()),
            Some(Channel::Stderr) | None => None,
        }
    }

    /// A sink that reports configuration diagnostics at error severity.
    ///
    /// The sink holds a weak reference, so wiring it into the logger's own
    /// store does not keep either alive.
    #[must_use]
    pub fn diagnostic_sink(&self) -> DiagnosticSink {
        let weak: Weak<Inner> = Arc::downgrade(&self.inner);
        DiagnosticSink::new(move |message| match weak.upgrade() {
            Some(inner) => Self { inner }.log(Severity::Err, format_args!("{message}")),
            None => tracing::warn!(%message, "logger dropped; diagnostic discarded"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{Facility, LogError, Logger, Settings, Severity};
    use crate::config::ConfigStore;
    use test_support::SharedBuffer;

    fn stderr_logger(buf: &SharedBuffer) -> Logger {
        let logger = Logger::new().with_writer(buf.clone());
        logger.set_syslog(false);
        logger.set_ident("test");
        logger
    }

    #[test]
    fn defaults_are_direct_settings() {
        let settings = Logger::new().settings();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.threshold, Severity::Notice.code());
        assert_eq!(settings.facility, Facility::Daemon);
        assert!(settings.syslog);
    }

    #[test]
    fn drops_messages_above_threshold() {
        let buf = SharedBuffer::default();
        let logger = stderr_logger(&buf);
        emit!(logger, Severity::Info, "quiet");
        emit!(logger, Severity::Notice, "loud {}", 1);
        assert_eq!(buf.contents(), "test: Notice: loud 1\n");
    }

    #[test]
    fn raw_numeric_level_is_honoured() {
        let buf = SharedBuffer::default();
        let logger = stderr_logger(&buf);
        logger.set_level(3);
        emit!(logger, Severity::Warning, "dropped");
        emit!(logger, Severity::Err, "kept");
        assert_eq!(buf.contents(), "test: Error: kept\n");
    }

    #[test]
    fn setters_close_the_channel() {
        let buf = SharedBuffer::default();
        let logger = stderr_logger(&buf);
        emit!(logger, Severity::Err, "open");
        assert!(logger.is_open());
        logger.set_level(Severity::Debug);
        assert!(!logger.is_open());
        emit!(logger, Severity::Debug, "reopened");
        assert!(logger.is_open());
        logger.reset();
        assert!(!logger.is_open());
    }

    #[test]
    fn use_config_requires_store() {
        let logger = Logger::new();
        assert_eq!(logger.set_use_config(true), Err(LogError::NoConfigStore));
        assert_eq!(logger.set_use_config(false), Ok(()));
    }

    #[test]
    fn unchanged_use_config_keeps_channel_open() {
        let buf = SharedBuffer::default();
        let store = ConfigStore::init();
        store.set_default("log:syslog", "no");
        let logger = Logger::with_config(store).with_writer(buf.clone());
        logger.set_use_config(true).expect("store attached");
        emit!(logger, Severity::Err, "open");
        assert!(logger.is_open());
        logger.set_use_config(true).expect("store attached");
        assert!(logger.is_open());
        logger.set_use_config(false).expect("disable");
        assert!(!logger.is_open());
    }

    #[test]
    fn config_mode_reads_log_keys() {
        let buf = SharedBuffer::default();
        let store = ConfigStore::init();
        store.set_default("log:level", "debug");
        store.set_default("log:syslog", "0");
        store.set_default("log:ident", "svc");
        store.set_default("log:facility", "local2");
        let logger = Logger::with_config(store).with_writer(buf.clone());
        logger.set_use_config(true).expect("store attached");
        emit!(logger, Severity::Debug, "visible");
        assert_eq!(buf.contents(), "svc: [Debug] visible\n");
        let settings = logger.settings();
        assert_eq!(settings.facility, Facility::Local2);
        assert_eq!(settings.threshold, Severity::Debug.code());
    }

    #[test]
    fn config_mode_defaults_apply_without_keys() {
        let buf = SharedBuffer::default();
        let store = ConfigStore::init();
        store.set("log:syslog", "false");
        let logger = Logger::with_config(store).with_writer(buf.clone());
        logger.set_use_config(true).expect("store attached");
        emit!(logger, Severity::Info, "dropped at notice");
        emit!(logger, Severity::Notice, "kept");
        assert_eq!(buf.contents(), "(none): Notice: kept\n");
        assert_eq!(logger.settings().facility, Facility::User);
    }

    #[test]
    fn direct_setter_leaves_config_mode() {
        let buf = SharedBuffer::default();
        let store = ConfigStore::init();
        store.set_default("log:syslog", "0");
        store.set_default("log:ident", "from-config");
        let logger = Logger::with_config(store).with_writer(buf.clone());
        logger.set_use_config(true).expect("store attached");
        emit!(logger, Severity::Err, "one");
        logger.set_ident("direct");
        emit!(logger, Severity::Err, "two");
        assert_eq!(buf.contents(), "from-config: Error: one\ndirect: Error: two\n");
    }

    #[test]
    fn diagnostic_sink_logs_at_error() {
        let buf = SharedBuffer::default();
        let logger = stderr_logger(&buf);
        let store = ConfigStore::init();
        store.set_diagnostics(logger.diagnostic_sink());
        let dir = tempfile::tempdir().expect("tempdir");
        let _ = store.load(dir.path().join("nope.ini"));
        let out = buf.contents();
        assert!(out.starts_with("test: Error: "), "unexpected output: {out}");
        assert!(out.contains("nope.ini"));
    }

    #[test]
    fn diagnostic_sink_outlives_logger() {
        let sink = Logger::new().diagnostic_sink();
        sink.report("nobody is listening");
    }
}
