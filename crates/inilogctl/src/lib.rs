//! Library utilities for the `inilogctl` command.
//!
//! The command builds a [`ConfigStore`] from command line defaults,
//! environment variables, overrides and a configuration file, then queries
//! it or logs through it.

use std::convert::Infallible;
use std::io::{self, Write};
use std::path::PathBuf;
use std::str::FromStr;

use clap::{Parser, Subcommand, ValueEnum};
use inilog::config::{ConfigError, ConfigStore, IniError, parse_bool, parse_int};
use inilog::emit;
use inilog::logger::{LogError, Logger, Severity, UnknownSeverity};
use inilog_lib::Visit;
use thiserror::Error;
use tracing::{debug, warn};

/// Command line arguments for `inilogctl`.
#[derive(Debug, Clone, Parser)]
#[command(name = "inilogctl", about = "Query an INI configuration and log through it")]
pub struct Args {
    /// Configuration file loaded unless `global:configFile` names another.
    #[arg(long, default_value = "/etc/inilog.conf")]
    pub config: PathBuf,

    /// Override a value, as `section:name=value`. Wins over the file.
    #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_assignment)]
    pub overrides: Vec<(String, String)>,

    /// Default a value, as `section:name=value`. Loses to the file.
    #[arg(long = "default", value_name = "KEY=VALUE", value_parser = parse_assignment)]
    pub defaults: Vec<(String, String)>,

    /// Read overrides from `PREFIX<SECTION>__<NAME>` environment variables.
    #[arg(long)]
    pub env_prefix: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print one resolved value.
    Get {
        /// Key in `section:name` form.
        key: String,
        /// Value printed when nothing else resolves.
        #[arg(long)]
        fallback: Option<String>,
        /// How to interpret the value.
        #[arg(long = "as", value_enum, default_value_t = ValueKind::String)]
        kind: ValueKind,
    },
    /// Print the entries of a section.
    Section {
        /// Section name.
        section: String,
        /// Only print entries with this name.
        key: Option<String>,
    },
    /// Print every resolved entry.
    Dump {
        /// Emit JSON instead of `key=value` lines.
        #[arg(long)]
        json: bool,
    },
    /// Send a message through a logger configured by the `log:*` keys.
    Log {
        /// Severity name, such as `err` or `debug`.
        #[arg(long, default_value = "notice")]
        level: String,
        /// Message text.
        message: String,
    },
}

/// Interpretation applied by `get`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ValueKind {
    String,
    Int,
    Bool,
}

fn parse_assignment(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_owned(), value.to_owned()))
        }
        _ => Err(String::from("expected KEY=VALUE with a non-empty key")),
    }
}

/// Errors reported by `inilogctl`.
#[derive(Debug, Error)]
pub enum CtlError {
    /// The store could not be built or loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The requested key resolved to nothing.
    #[error("no value for {key}")]
    NotFound { key: String },
    /// The `--level` argument is not a severity name.
    #[error(transparent)]
    Level(#[from] UnknownSeverity),
    /// The logger rejected its configuration.
    #[error(transparent)]
    Logger(#[from] LogError),
    /// Writing output failed.
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
    /// Serialising entries failed.
    #[error("failed to serialise entries: {0}")]
    Json(#[from] serde_json::Error),
}

/// Build the store described by `args`.
///
/// A configuration file that cannot be read is reported and skipped; one
/// that cannot be parsed is an error.
///
/// # Errors
///
/// Returns [`CtlError::Config`] when the file has a syntax error.
pub fn open_store(args: &Args) -> Result<ConfigStore, CtlError> {
    let store = ConfigStore::init_with(|store| {
        for (key, value) in &args.defaults {
            store.set_default(key, value);
        }
        Ok::<_, Infallible>(())
    })?;
    if let Some(prefix) = &args.env_prefix {
        let applied = store.apply_env(prefix);
        debug!(prefix = %prefix, applied, "environment overrides recorded");
    }
    for (key, value) in &args.overrides {
        store.set(key, value);
    }
    match store.load(&args.config) {
        Ok(path) => debug!(path = %path.display(), "configuration loaded"),
        Err(ConfigError::Parse {
            path,
            source: IniError::Io(err),
        }) => {
            warn!(path = %path.display(), error = %err, "configuration file unavailable; using overrides and defaults");
        }
        Err(err) => return Err(err.into()),
    }
    Ok(store)
}

/// Run the command described by `args`, writing results to `out`.
///
/// # Errors
///
/// See [`CtlError`].
pub fn run<W: Write>(args: &Args, out: &mut W) -> Result<(), CtlError> {
    let store = open_store(args)?;
    let logger = Logger::with_config(store.clone());
    execute(&args.command, &store, &logger, out)
}

/// Run `command` against an existing store and logger.
///
/// # Errors
///
/// See [`CtlError`].
pub fn execute<W: Write>(
    command: &Command,
    store: &ConfigStore,
    logger: &Logger,
    out: &mut W,
) -> Result<(), CtlError> {
    match command {
        Command::Get {
            key,
            fallback,
            kind,
        } => {
            let value = store
                .get(key, fallback.as_deref())
                .ok_or_else(|| CtlError::NotFound { key: key.clone() })?;
            match kind {
                ValueKind::String => writeln!(out, "{value}")?,
                ValueKind::Int => writeln!(out, "{}", parse_int(&value))?,
                ValueKind::Bool => writeln!(out, "{}", parse_bool(&value))?,
            }
        }
        Command::Section { section, key } => {
            store.get_all(Some(section.as_str()), key.as_deref(), |name, value| {
                writeln!(out, "{name}={}", value.unwrap_or_default())?;
                Ok::<_, io::Error>(Visit::Continue)
            })?;
        }
        Command::Dump { json: true } => {
            serde_json::to_writer_pretty(&mut *out, &store.entries())?;
            writeln!(out)?;
        }
        Command::Dump { json: false } => {
            for entry in store.entries() {
                match entry.value {
                    Some(value) => writeln!(out, "{}={value}", entry.key)?,
                    None => writeln!(out, "[{}]", entry.key)?,
                }
            }
        }
        Command::Log { level, message } => {
            let severity = Severity::from_str(level)?;
            logger.set_use_config(true)?;
            emit!(logger, severity, "{message}");
        }
    }
    Ok(())
}
