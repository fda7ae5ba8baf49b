//! Ordered key/value store for page-level data.

use indexmap::IndexMap;

use crate::types::Value;

/// A string-keyed store of [`Value`]s, iterated in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Storage {
    entries: IndexMap<String, Value>,
}

impl Storage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored value, or `default` when the key is absent.
    pub fn get(&self, key: &str, default: impl Into<Value>) -> Value {
        self.entries
            .get(key)
            .cloned()
            .unwrap_or_else(|| default.into())
    }

    /// Store a value, returning the one it replaced.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn has(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Remove a key, keeping the order of the rest.
    pub fn unset(&mut self, key: &str) -> Option<Value> {
        self.entries.shift_remove(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}
