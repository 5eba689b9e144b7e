//! Syslog facilities available on the current platform.

use std::fmt;

/// Syslog facility a message is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Facility {
    /// Security and authorisation messages.
    Auth,
    /// Private security and authorisation messages.
    AuthPriv,
    /// Clock daemon.
    Cron,
    /// System daemons without a facility of their own.
    Daemon,
    /// FTP daemon.
    Ftp,
    /// Kernel messages.
    Kern,
    /// Line printer subsystem.
    Lpr,
    /// Mail subsystem.
    Mail,
    /// Network news subsystem.
    News,
    /// Messages generated by syslogd itself.
    Syslog,
    /// UUCP subsystem.
    Uucp,
    /// Generic user-level messages.
    User,
    /// Reserved for local use (0).
    Local0,
    /// Reserved for local use (1).
    Local1,
    /// Reserved for local use (2).
    Local2,
    /// Reserved for local use (3).
    Local3,
    /// Reserved for local use (4).
    Local4,
    /// Reserved for local use (5).
    Local5,
    /// Reserved for local use (6).
    Local6,
    /// Reserved for local use (7).
    Local7,
    /// Security subsystem.
    #[cfg(target_os = "freebsd")]
    Security,
    /// NTP subsystem.
    #[cfg(target_os = "freebsd")]
    Ntp,
    /// Remote authentication and authorisation.
    #[cfg(target_vendor = "apple")]
    RemoteAuth,
    /// The launchd service manager.
    #[cfg(target_vendor = "apple")]
    Launchd,
}

const NAMES: &[(&str, Facility)] = &[
    ("auth", Facility::Auth),
    ("authpriv", Facility::AuthPriv),
    ("cron", Facility::Cron),
    ("daemon", Facility::Daemon),
    ("ftp", Facility::Ftp),
    ("kern", Facility::Kern),
    ("lpr", Facility::Lpr),
    ("mail", Facility::Mail),
    ("news", Facility::News),
    #[cfg(target_os = "freebsd")]
    ("security", Facility::Security),
    #[cfg(target_os = "freebsd")]
    ("ntp", Facility::Ntp),
    #[cfg(target_vendor = "apple")]
    ("remoteauth", Facility::RemoteAuth),
    #[cfg(target_vendor = "apple")]
    ("launchd", Facility::Launchd),
    ("syslog", Facility::Syslog),
    ("uucp", Facility::Uucp),
    ("user", Facility::User),
    ("local0", Facility::Local0),
    ("local1", Facility::Local1),
    ("local2", Facility::Local2),
    ("local3", Facility::Local3),
    ("local4", Facility::Local4),
    ("local5", Facility::Local5),
    ("local6", Facility::Local6),
    ("local7", Facility::Local7),
];

impl Facility {
    /// The platform's `LOG_*` constant.
    #[must_use]
    pub const fn code(self) -> libc::c_int {
        match self {
            Self::Auth => libc::LOG_AUTH,
            Self::AuthPriv => libc::LOG_AUTHPRIV,
            Self::Cron => libc::LOG_CRON,
            Self::Daemon => libc::LOG_DAEMON,
            Self::Ftp => libc::LOG_FTP,
            Self::Kern => libc::LOG_KERN,
            Self::Lpr => libc::LOG_LPR,
            Self::Mail => libc::LOG_MAIL,
            Self::News => libc::LOG_NEWS,
            Self::Syslog => libc::LOG_SYSLOG,
            Self::Uucp => libc::LOG_UUCP,
            Self::User => libc::LOG_USER,
            Self::Local0 => libc::LOG_LOCAL0,
            Self::Local1 => libc::LOG_LOCAL1,
            Self::Local2 => libc::LOG_LOCAL2,
            Self::Local3 => libc::LOG_LOCAL3,
            Self::Local4 => libc::LOG_LOCAL4,
            Self::Local5 => libc::LOG_LOCAL5,
            Self::Local6 => libc::LOG_LOCAL6,
            Self::Local7 => libc::LOG_LOCAL7,
            #[cfg(target_os = "freebsd")]
            Self::Security => libc::LOG_SECURITY,
            #[cfg(target_os = "freebsd")]
            Self::Ntp => libc::LOG_NTP,
            #[cfg(target_vendor = "apple")]
            Self::RemoteAuth => libc::LOG_REMOTEAUTH,
            #[cfg(target_vendor = "apple")]
            Self::Launchd => libc::LOG_LAUNCHD,
        }
    }

    /// Lower-case facility name.
    #[must_use]
    pub fn name(self) -> &'static str {
        NAMES
            .iter()
            .find(|&&(_, facility)| facility == self)
            .map_or("user", |(name, _)| name)
    }
}

impl fmt::Display for Facility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parse a facility name, ignoring case.
///
/// Names unknown on this platform map to [`Facility::User`].
#[must_use]
pub fn parse_facility(text: &str) -> Facility {
    NAMES
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(text))
        .map_or(Facility::User, |&(_, facility)| facility)
}
