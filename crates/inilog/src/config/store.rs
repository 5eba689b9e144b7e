//! The three-tier configuration store.
//!
//! Values resolve from the loaded file (or, before loading, from pending
//! overrides), then from defaults, then from the caller's fallback. A single
//! readers-writer lock guards all tiers.

use std::error::Error as StdError;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use figment::providers::Env;
use inilog_lib::{ConfigKey, Entry, Visit, keys};
use parking_lot::RwLock;
use tracing::debug;

use super::{ConfigError, DiagnosticSink, Dictionary, ini, parse_bool, parse_int};

/// Lifecycle of the non-default tiers.
#[derive(Debug)]
enum Tier {
    /// No file loaded yet; `set` records overrides to apply at load time.
    Pending { overrides: Dictionary },
    /// A file has been loaded and the overrides merged into it.
    Loaded { config: Dictionary, source: PathBuf },
}

#[derive(Debug)]
struct State {
    defaults: Dictionary,
    tier: Tier,
}

impl State {
    fn primary(&self) -> &Dictionary {
        match &self.tier {
            Tier::Pending { overrides } => overrides,
            Tier::Loaded { config, .. } => config,
        }
    }

    fn primary_mut(&mut self) -> &mut Dictionary {
        match &mut self.tier {
            Tier::Pending { overrides } => overrides,
            Tier::Loaded { config, .. } => config,
        }
    }

    /// A present key shadows lower tiers even when its value is null.
    fn resolve<'a>(&'a self, key: &str, fallback: Option<&'a str>) -> Option<&'a str> {
        self.primary()
            .lookup(key)
            .or_else(|| self.defaults.lookup(key))
            .unwrap_or(fallback)
    }
}

#[derive(Debug)]
struct Shared {
    state: RwLock<State>,
    diagnostics: RwLock<DiagnosticSink>,
}

/// Handle to a configuration store.
///
/// Cloning the handle shares the store. Mutations take the write lock;
/// lookups take the read lock, which may be held recursively so that a
/// [`get_all`](Self::get_all) callback can itself read from the store.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    shared: Arc<Shared>,
}

impl ConfigStore {
    /// Create a store with empty defaults and no pending overrides.
    #[must_use]
    pub fn init() -> Self {
        Self {
            shared: Arc::new(Shared {
                state: RwLock::new(State {
                    defaults: Dictionary::new(),
                    tier: Tier::Pending {
                        overrides: Dictionary::new(),
                    },
                }),
                diagnostics: RwLock::new(DiagnosticSink::default()),
            }),
        }
    }

    /// Create a store and populate its defaults with `populate`.
    ///
    /// The callback runs without any lock held and normally calls
    /// [`set_default`](Self::set_default) repeatedly.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Defaults`] if the callback fails. The
    /// partially populated store is discarded.
    ///
    /// # Examples
    ///
    /// ```
    /// use inilog::config::ConfigStore;
    ///
    /// let store = ConfigStore::init_with(|store| {
    ///     store.set_default("log:level", "info");
    ///     Ok::<_, std::io::Error>(())
    /// })?;
    /// assert_eq!(store.get("log:level", None).as_deref(), Some("info"));
    /// # Ok::<_, inilog::config::ConfigError>(())
    /// ```
    pub fn init_with<F, E>(populate: F) -> Result<Self, ConfigError>
    where
        F: FnOnce(&Self) -> Result<(), E>,
        E: Into<Box<dyn StdError + Send + Sync>>,
    {
        let store = Self::init();
        populate(&store).map_err(|e| ConfigError::Defaults(e.into()))?;
        Ok(store)
    }

    /// Replace the sink that receives parser diagnostics.
    pub fn set_diagnostics(&self, sink: DiagnosticSink) {
        *self.shared.diagnostics.write() = sink;
    }

    /// Load the configuration file.
    ///
    /// The path is the value of `global:configFile` if one resolves, else
    /// `default_path`. On success the pending overrides are applied over the
    /// file's values and discarded; later [`set`](Self::set) calls edit the
    /// loaded configuration directly. Returns the path that was loaded.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the file cannot be read or parsed;
    /// the store then keeps its overrides and defaults. Returns
    /// [`ConfigError::AlreadyLoaded`] if a file was loaded before.
    pub fn load(&self, default_path: impl AsRef<Path>) -> Result<PathBuf, ConfigError> {
        // Events are emitted with no lock held: subscribers and diagnostic
        // sinks may route into a logger that reads this store.
        let path = self.with_value(keys::CONFIG_FILE, None, |file| {
            file.map_or_else(|| default_path.as_ref().to_path_buf(), PathBuf::from)
        });
        debug!(path = %path.display(), "loading configuration file");
        let result = self.install(path);
        if let Err(ConfigError::Parse { path, source }) = &result {
            let sink = self.shared.diagnostics.read().clone();
            sink.report(&format!("{}: {source}", path.display()));
        }
        result
    }

    fn install(&self, path: PathBuf) -> Result<PathBuf, ConfigError> {
        let mut state = self.shared.state.write();
        let overrides = match &state.tier {
            Tier::Pending { overrides } => overrides,
            Tier::Loaded { source, .. } => {
                return Err(ConfigError::AlreadyLoaded {
                    path: source.clone(),
                });
            }
        };
        let mut config = ini::parse_file(&path).map_err(|source| ConfigError::Parse {
            path: path.clone(),
            source,
        })?;
        for (key, value) in overrides.iter() {
            config.insert(key, value.map(str::to_owned));
        }
        state.tier = Tier::Loaded {
            config,
            source: path.clone(),
        };
        Ok(path)
    }

    /// Set a value.
    ///
    /// Before a file is loaded this records an override that wins over the
    /// file; afterwards it edits the loaded configuration.
    pub fn set(&self, key: &str, value: &str) {
        self.shared
            .state
            .write()
            .primary_mut()
            .insert(key, Some(value.to_owned()));
    }

    /// Set the default used when neither the file nor an override supplies
    /// `key`.
    pub fn set_default(&self, key: &str, value: &str) {
        self.shared
            .state
            .write()
            .defaults
            .insert(key, Some(value.to_owned()));
    }

    /// Copy the resolved value into `buf` and return the length it needs.
    ///
    /// The return value is the value's byte length plus one for a trailing
    /// zero, or `0` if the lookup resolves to nothing. With a buffer, at most
    /// `buf.len() - 1` bytes are copied and the remainder is zero-filled.
    /// Passing `None` or an empty buffer only measures.
    ///
    /// # Examples
    ///
    /// ```
    /// use inilog::config::ConfigStore;
    ///
    /// let store = ConfigStore::init();
    /// store.set("app:name", "inilog");
    /// let needed = store.get_buf("app:name", None, None);
    /// let mut buf = vec![0_u8; needed];
    /// store.get_buf("app:name", None, Some(&mut buf));
    /// assert_eq!(&buf, b"inilog\0");
    /// ```
    pub fn get_buf(&self, key: &str, fallback: Option<&str>, buf: Option<&mut [u8]>) -> usize {
        let state = self.shared.state.read_recursive();
        let value = state.resolve(key, fallback);
        if let Some(buf) = buf {
            copy_terminated(value.unwrap_or_default().as_bytes(), buf);
        }
        value.map_or(0, |v| v.len() + 1)
    }

    /// Return an owned copy of the resolved value.
    ///
    /// `None` means the key resolved to a null value, or was not found and
    /// `fallback` is `None`.
    #[must_use]
    pub fn get(&self, key: &str, fallback: Option<&str>) -> Option<String> {
        self.with_value(key, fallback, |v| v.map(str::to_owned))
    }

    /// Run `f` on the resolved value without copying it.
    ///
    /// The read lock is held while `f` runs.
    pub fn with_value<R>(
        &self,
        key: &str,
        fallback: Option<&str>,
        f: impl FnOnce(Option<&str>) -> R,
    ) -> R {
        let state = self.shared.state.read_recursive();
        f(state.resolve(key, fallback))
    }

    /// Return the resolved value parsed as an integer, or `default` when
    /// there is no value. Non-numeric text parses as `0`.
    #[must_use]
    pub fn get_int(&self, key: &str, default: i64) -> i64 {
        self.with_value(key, None, |v| v.map_or(default, parse_int))
    }

    /// Return the resolved value parsed as a boolean, or `default` when there
    /// is no value.
    #[must_use]
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        self.with_value(key, None, |v| v.map_or(default, parse_bool))
    }

    /// Visit the entries of `section`, optionally only those named `key`.
    ///
    /// Entries come from the loaded file, or from the pending overrides
    /// before a file is loaded; defaults are not visited. `section = None`
    /// visits every entry, section markers included. Iteration runs under
    /// the read lock, so `f` must not write to the store.
    ///
    /// Returns the number of times `f` was called. `Ok(Visit::Stop)` ends
    /// iteration early; an `Err` ends it and is returned.
    ///
    /// # Errors
    ///
    /// Propagates the first error returned by `f`.
    pub fn get_all<F, E>(&self, section: Option<&str>, key: Option<&str>, mut f: F) -> Result<usize, E>
    where
        F: FnMut(&str, Option<&str>) -> Result<Visit, E>,
    {
        let state = self.shared.state.read_recursive();
        let mut visited = 0;
        for (entry_key, value) in state.primary().iter() {
            if !selects(entry_key, section, key) {
                continue;
            }
            visited += 1;
            if f(entry_key, value)? == Visit::Stop {
                break;
            }
        }
        Ok(visited)
    }

    /// Record `PREFIX` environment variables as values.
    ///
    /// `PREFIX_SECTION__NAME=value` becomes `section:name`. Variables without
    /// a `__` separator are ignored. Returns the number of values applied.
    pub fn apply_env(&self, prefix: &str) -> usize {
        let mut vars: Vec<(String, String)> = Env::prefixed(prefix)
            .split("__")
            .iter()
            .map(|(key, value)| (key.as_str().replace('.', ":"), value))
            .filter(|(key, _)| ConfigKey::parse(key).name.is_some())
            .collect();
        vars.sort();
        for (key, value) in &vars {
            debug!(key = %key, "applying environment value");
            self.set(key, value);
        }
        vars.len()
    }

    /// Whether a configuration file has been loaded.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        matches!(self.shared.state.read_recursive().tier, Tier::Loaded { .. })
    }

    /// Path of the loaded configuration file, if any.
    #[must_use]
    pub fn source_path(&self) -> Option<PathBuf> {
        match &self.shared.state.read_recursive().tier {
            Tier::Loaded { source, .. } => Some(source.clone()),
            Tier::Pending { .. } => None,
        }
    }

    /// Snapshot of the resolved entries.
    ///
    /// Entries of the loaded file (or pending overrides) come first in
    /// their stored order, followed by defaults they do not shadow.
    #[must_use]
    pub fn entries(&self) -> Vec<Entry> {
        let state = self.shared.state.read_recursive();
        let primary = state.primary();
        primary
            .iter()
            .chain(state.defaults.iter().filter(|(k, _)| !primary.contains(k)))
            .map(|(key, value)| Entry {
                key: key.to_owned(),
                value: value.map(str::to_owned),
            })
            .collect()
    }
}

fn selects(entry_key: &str, section: Option<&str>, key: Option<&str>) -> bool {
    let Some(section) = section else {
        return true;
    };
    let parsed = ConfigKey::parse(entry_key);
    parsed.in_section(section)
        && key.is_none_or(|want| parsed.name.is_some_and(|name| name.eq_ignore_ascii_case(want)))
}

fn copy_terminated(src: &[u8], buf: &mut [u8]) {
    let Some(room) = buf.len().checked_sub(1) else {
        return;
    };
    let len = src.len().min(room);
    let (head, tail) = buf.split_at_mut(len);
    head.copy_from_slice(src.get(..len).unwrap_or_default());
    tail.fill(0);
}
