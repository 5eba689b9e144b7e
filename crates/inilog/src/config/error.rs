//! Errors reported by the configuration store.

use std::error::Error as StdError;
use std::path::PathBuf;

use thiserror::Error;

use super::IniError;

/// Errors returned by [`ConfigStore`](super::ConfigStore) operations.
///
/// A key that cannot be found is never an error; lookups fall back to
/// defaults and then to the caller's fallback value.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The callback populating defaults reported a failure.
    #[error("defaults callback failed: {0}")]
    Defaults(#[source] Box<dyn StdError + Send + Sync>),
    /// The configuration file could not be read or parsed.
    #[error("failed to load configuration from {}: {source}", .path.display())]
    Parse {
        /// File that was attempted.
        path: PathBuf,
        /// Collaborator error.
        #[source]
        source: IniError,
    },
    /// A configuration file has already been loaded into this store.
    #[error("configuration already loaded from {}", .path.display())]
    AlreadyLoaded {
        /// File loaded by the earlier call.
        path: PathBuf,
    },
}
