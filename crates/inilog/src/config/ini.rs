//! Adapter over the `rust-ini` parser.
//!
//! The parser owns the INI grammar; this module only flattens its output
//! into a [`Dictionary`] of `section:name` keys.

use std::io;
use std::path::Path;

use ini::Ini;
use inilog_lib::join_key;
use thiserror::Error;

use super::Dictionary;

/// Errors reported by the INI collaborator.
#[derive(Debug, Error)]
pub enum IniError {
    /// The file could not be opened or read.
    #[error("cannot read configuration file: {0}")]
    Io(#[from] io::Error),
    /// The file is not valid INI.
    #[error("syntax error at line {line}, column {col}: {msg}")]
    Syntax {
        /// Line of the error as reported by the parser.
        line: usize,
        /// Column of the error as reported by the parser.
        col: usize,
        /// Parser message.
        msg: String,
    },
}

impl From<ini::ParseError> for IniError {
    fn from(value: ini::ParseError) -> Self {
        Self::Syntax {
            line: value.line,
            col: value.col,
            msg: value.msg.to_string(),
        }
    }
}

impl From<ini::Error> for IniError {
    fn from(value: ini::Error) -> Self {
        match value {
            ini::Error::Io(e) => Self::Io(e),
            ini::Error::Parse(e) => e.into(),
        }
    }
}

/// Parse the INI file at `path`.
///
/// Each section contributes a null-valued marker entry named after the
/// section, followed by its properties in file order. Properties that appear
/// before any section header are stored under the empty section (`:name`).
///
/// # Errors
///
/// Returns [`IniError::Io`] if the file cannot be read and
/// [`IniError::Syntax`] if it cannot be parsed.
pub fn parse_file(path: &Path) -> Result<Dictionary, IniError> {
    let ini = Ini::load_from_file(path)?;
    Ok(flatten(&ini))
}

/// Parse INI text held in memory.
///
/// # Errors
///
/// Returns [`IniError::Syntax`] if the text cannot be parsed.
pub fn parse_str(source: &str) -> Result<Dictionary, IniError> {
    let ini = Ini::load_from_str(source)?;
    Ok(flatten(&ini))
}

fn flatten(ini: &Ini) -> Dictionary {
    let mut dict = Dictionary::new();
    for (section, props) in ini.iter() {
        match section {
            Some(name) => dict.insert(name, None),
            None if props.is_empty() => continue,
            None => {}
        }
        let section = section.unwrap_or_default();
        for (name, value) in props.iter() {
            dict.insert(&join_key(section, name), Some(value.to_owned()));
        }
    }
    dict
}

#[cfg(test)]
mod tests {
    use super::{IniError, parse_file, parse_str};
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn flattens_sections_in_file_order() {
        let dict = parse_str("[log]\nlevel = debug\nident = app\n[db]\nurl = x\n")
            .expect("valid ini");
        let entries: Vec<_> = dict.iter().collect();
        assert_eq!(
            entries,
            vec![
                ("log", None),
                ("log:level", Some("debug")),
                ("log:ident", Some("app")),
                ("db", None),
                ("db:url", Some("x")),
            ]
        );
    }

    #[test]
    fn properties_outside_sections_use_empty_section() {
        let dict = parse_str("orphan = 1\n[s]\nk = v\n").expect("valid ini");
        assert_eq!(dict.lookup(":orphan"), Some(Some("1")));
        assert_eq!(dict.lookup("s:k"), Some(Some("v")));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempdir().expect("tempdir");
        let err = parse_file(&dir.path().join("absent.ini")).expect_err("should fail");
        assert!(matches!(err, IniError::Io(_)));
    }

    #[test]
    fn reads_file_from_disk() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("app.ini");
        fs::write(&path, "[Global]\nConfigFile = /etc/other.conf\n").expect("write");
        let dict = parse_file(&path).expect("parse");
        assert_eq!(dict.lookup("global:configfile"), Some(Some("/etc/other.conf")));
    }
}
