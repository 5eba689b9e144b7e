//! Insertion-ordered string dictionary.
//!
//! Keys are case-insensitive and stored in lower case. Values may be null,
//! which is distinct from the key being absent.

use std::collections::HashMap;

/// Ordered mapping from `section:name` keys to optional string values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary {
    entries: Vec<(String, Option<String>)>,
    index: HashMap<String, usize>,
}

fn normalise(key: &str) -> String {
    key.to_ascii_lowercase()
}

impl Dictionary {
    /// Create an empty dictionary.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a value.
    ///
    /// Replacing keeps the entry at its original position.
    pub fn insert(&mut self, key: &str, value: Option<String>) {
        let key = normalise(key);
        if let Some(slot) = self
            .index
            .get(&key)
            .and_then(|&pos| self.entries.get_mut(pos))
        {
            slot.1 = value;
            return;
        }
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, value));
    }

    /// Look up `key`.
    ///
    /// The outer `Option` reports presence; the inner one is the stored
    /// value, which may be null.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<Option<&str>> {
        let pos = *self.index.get(&normalise(key))?;
        self.entries.get(pos).map(|(_, v)| v.as_deref())
    }

    /// Returns whether `key` is present, null or not.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(&normalise(key))
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the dictionary has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> FromIterator<(&'a str, Option<&'a str>)> for Dictionary {
    fn from_iter<I: IntoIterator<Item = (&'a str, Option<&'a str>)>>(iter: I) -> Self {
        let mut dict = Self::new();
        for (k, v) in iter {
            dict.insert(k, v.map(str::to_owned));
        }
        dict
    }
}

#[cfg(test)]
mod tests {
    use super::Dictionary;

    #[test]
    fn replacing_keeps_position() {
        let mut dict = Dictionary::new();
        dict.insert("a:one", Some("1".into()));
        dict.insert("a:two", Some("2".into()));
        dict.insert("a:one", Some("uno".into()));
        let keys: Vec<_> = dict.iter().collect();
        assert_eq!(keys, vec![("a:one", Some("uno")), ("a:two", Some("2"))]);
    }

    #[test]
    fn keys_are_case_insensitive() {
        let mut dict = Dictionary::new();
        dict.insert("Global:ConfigFile", Some("/etc/x.conf".into()));
        assert_eq!(dict.lookup("global:configfile"), Some(Some("/etc/x.conf")));
        assert_eq!(dict.iter().next(), Some(("global:configfile", Some("/etc/x.conf"))));
    }

    #[test]
    fn null_value_is_present() {
        let dict: Dictionary = [("section", None)].into_iter().collect();
        assert!(dict.contains("section"));
        assert_eq!(dict.lookup("section"), Some(None));
        assert_eq!(dict.lookup("other"), None);
        assert_eq!(dict.len(), 1);
        assert!(!dict.is_empty());
    }
}
