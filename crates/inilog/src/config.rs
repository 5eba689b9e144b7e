//! Layered key/value configuration backed by an INI file.
//!
//! # Overview
//! - [`ConfigStore`] resolves `section:name` keys from the loaded file (or
//!   pending overrides), then defaults, then a caller fallback.
//! - [`ini`] adapts the `rust-ini` parser.
//! - [`parse_int`] and [`parse_bool`] convert stored strings leniently.

mod diagnostics;
mod dictionary;
mod error;
pub mod ini;
mod parse;
mod store;

pub use diagnostics::DiagnosticSink;
pub use dictionary::Dictionary;
pub use error::ConfigError;
pub use ini::IniError;
pub use parse::{parse_bool, parse_int};
pub use store::ConfigStore;
