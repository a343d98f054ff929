//! Sink configuration bag
//!
//! A flat string key-value bag handed to sink constructors. The semantics of
//! individual keys belong entirely to each sink. Entries are kept ordered so
//! the bag serializes canonically as part of the registry instance key.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SinkConfig {
    entries: BTreeMap<String, String>,
}

impl SinkConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry, replacing any previous value for the key.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Read a boolean entry; `true`/`1`/`yes` parse as true, `false`/`0`/`no`
    /// as false, anything else as absent.
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.get(key)? {
            "true" | "1" | "yes" => Some(true),
            "false" | "0" | "no" => Some(false),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
