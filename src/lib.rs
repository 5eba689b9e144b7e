//! Shared types for the inilog project.
//!
//! This library defines the configuration key namespace and the small value
//! types exchanged between the store, the logger and the command line tool.

use serde::{Deserialize, Serialize};

/// Well-known configuration keys consumed by inilog itself.
///
/// Keys take the form `section:name`.
pub mod keys {
    /// Path of the configuration file to load, overriding the default path.
    pub const CONFIG_FILE: &str = "global:configFile";
    /// Whether syslog output is echoed to standard error.
    pub const LOG_STDERR: &str = "log:stderr";
    /// Whether messages are sent to syslog (otherwise standard error).
    pub const LOG_SYSLOG: &str = "log:syslog";
    /// Threshold level name or number.
    pub const LOG_LEVEL: &str = "log:level";
    /// Syslog facility name.
    pub const LOG_FACILITY: &str = "log:facility";
    /// Identity prefixed to every message.
    pub const LOG_IDENT: &str = "log:ident";
}

/// Separator between the section and the name of a key.
pub const SECTION_SEPARATOR: char = ':';

/// A configuration key split into its section and name.
///
/// The section is the text before the first colon. A key without a colon is
/// a bare section name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigKey<'a> {
    /// Portion before the first colon.
    pub section: &'a str,
    /// Portion after the first colon, if any.
    pub name: Option<&'a str>,
}

impl<'a> ConfigKey<'a> {
    /// Split `key` at its first colon.
    ///
    /// # Examples
    ///
    /// ```
    /// use inilog_lib::ConfigKey;
    ///
    /// let key = ConfigKey::parse("log:level");
    /// assert_eq!(key.section, "log");
    /// assert_eq!(key.name, Some("level"));
    /// assert_eq!(ConfigKey::parse("log").name, None);
    /// ```
    #[must_use]
    pub fn parse(key: &'a str) -> Self {
        match key.split_once(SECTION_SEPARATOR) {
            Some((section, name)) => Self {
                section,
                name: Some(name),
            },
            None => Self {
                section: key,
                name: None,
            },
        }
    }

    /// Returns whether this key lives in `section` (compared without regard
    /// to ASCII case).
    #[must_use]
    pub fn in_section(&self, section: &str) -> bool {
        self.name.is_some() && self.section.eq_ignore_ascii_case(section)
    }
}

/// Join a section and a name into a key.
#[must_use]
pub fn join_key(section: &str, name: &str) -> String {
    format!("{section}{SECTION_SEPARATOR}{name}")
}

/// One resolved configuration entry, as exported by the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Entry {
    /// Full `section:name` key.
    pub key: String,
    /// Value; `None` for section markers and keys declared without a value.
    pub value: Option<String>,
}

/// Decision returned by iteration callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    /// Keep iterating.
    Continue,
    /// Stop iterating without reporting a failure.
    Stop,
}
