//! Scoped environment variables for tests.
//!
//! [`ScopedEnv`] records the previous value of every variable it touches and
//! restores them, in reverse order, when dropped. Tests using it must run
//! serially.

/// Guard over a set of temporarily changed environment variables.
#[derive(Debug, Default)]
pub struct ScopedEnv {
    saved: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    /// Start with no variables changed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to `value` until the guard drops.
    #[must_use]
    pub fn set(mut self, key: &str, value: &str) -> Self {
        self.remember(key);
        // SAFETY: only used from serial tests.
        unsafe { std::env::set_var(key, value) };
        self
    }

    /// Unset `key` until the guard drops.
    #[must_use]
    pub fn remove(mut self, key: &str) -> Self {
        self.remember(key);
        // SAFETY: only used from serial tests.
        unsafe { std::env::remove_var(key) };
        self
    }

    fn remember(&mut self, key: &str) {
        self.saved.push((key.to_owned(), std::env::var(key).ok()));
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (key, original) in self.saved.drain(..).rev() {
            // SAFETY: only used from serial tests.
            match original {
                Some(value) => unsafe { std::env::set_var(&key, value) },
                None => unsafe { std::env::remove_var(&key) },
            }
        }
    }
}
