#![cfg_attr(docsrs, feature(doc_cfg))]

//! Layered INI configuration and a syslog logging shim.
//!
//! # Overview
//! This crate exposes:
//! - [`config::ConfigStore`]: a thread-safe key/value store resolving
//!   values from overrides, a loaded INI file and defaults.
//! - [`logger::Logger`]: level-gated emission to syslog or standard error,
//!   optionally configured from the store's `log:*` keys.
//! - [`logging`]: `tracing` subscribers, including one that routes events
//!   into a [`logger::Logger`].
//!
//! # Examples
//! ```rust,no_run
//! use inilog::config::ConfigStore;
//! use inilog::emit;
//! use inilog::logger::{Logger, Severity};
//!
//! let store = ConfigStore::init_with(|s| {
//!     s.set_default("log:level", "info");
//!     Ok::<_, std::io::Error>(())
//! })
//! .expect("defaults are valid");
//! store.load("/etc/inilog.conf").ok();
//!
//! let logger = Logger::with_config(store.clone());
//! store.set_diagnostics(logger.diagnostic_sink());
//! logger.set_use_config(true).expect("store is attached");
//! emit!(logger, Severity::Info, "started");
//! ```
pub mod config;
pub mod logger;
pub mod logging;
