//! Syslog severities and threshold parsing.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::config::parse_int;

/// Message severity; lower values are more severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// System is unusable.
    Emerg = 0,
    /// Action must be taken immediately.
    Alert = 1,
    /// Critical conditions.
    Crit = 2,
    /// Error conditions.
    Err = 3,
    /// Warning conditions.
    Warning = 4,
    /// Normal but significant condition.
    Notice = 5,
    /// Informational messages.
    Info = 6,
    /// Debug-level messages.
    Debug = 7,
}

/// Name that does not match any severity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown severity: {0}")]
pub struct UnknownSeverity(pub String);

const NAMES: [(&str, Severity); 12] = [
    ("emerg", Severity::Emerg),
    ("emergency", Severity::Emerg),
    ("alert", Severity::Alert),
    ("crit", Severity::Crit),
    ("critical", Severity::Crit),
    ("err", Severity::Err),
    ("error", Severity::Err),
    ("warn", Severity::Warning),
    ("warning", Severity::Warning),
    ("notice", Severity::Notice),
    ("info", Severity::Info),
    ("debug", Severity::Debug),
];

impl Severity {
    /// Numeric syslog priority.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// Prefix used when writing to standard error.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Emerg => "Emergency: ",
            Self::Alert => "Alert: ",
            Self::Crit => "Critical: ",
            Self::Err => "Error: ",
            Self::Warning => "Warning: ",
            Self::Notice => "Notice: ",
            Self::Info => "",
            Self::Debug => "[Debug] ",
        }
    }
}

impl From<Severity> for i32 {
    fn from(value: Severity) -> Self {
        value.code()
    }
}

impl FromStr for Severity {
    type Err = UnknownSeverity;

    fn from_str(s: &str) -> Result<Self, UnknownSeverity> {
        NAMES
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(s))
            .map(|&(_, severity)| severity)
            .ok_or_else(|| UnknownSeverity(s.to_owned()))
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = NAMES
            .iter()
            .find(|&&(_, severity)| severity == *self)
            .map_or("", |(name, _)| name);
        f.write_str(name)
    }
}

/// Parse a threshold level: a severity name, or else a decimal number.
///
/// # Examples
///
/// ```
/// use inilog::logger::parse_level;
///
/// assert_eq!(parse_level("Debug"), 7);
/// assert_eq!(parse_level("4"), 4);
/// assert_eq!(parse_level("loud"), 0);
/// ```
#[must_use]
pub fn parse_level(text: &str) -> i32 {
    text.parse::<Severity>().map_or_else(
        |_| {
            let raw = parse_int(text);
            i32::try_from(raw).unwrap_or(if raw < 0 { i32::MIN } else { i32::MAX })
        },
        Severity::code,
    )
}
