//! Convenience builder for request query parameters.
//!
//! Request descriptors return their query as a unique-keyed mapping; this
//! builder reduces the boilerplate of assembling one from optional values.

use std::collections::BTreeMap;
use std::fmt::Display;

/// Builder assembling the query mapping a request descriptor returns.
#[derive(Debug, Default, Clone)]
pub struct QueryParams {
    entries: BTreeMap<String, String>,
}

impl QueryParams {
    /// Create a new, empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a key/value pair. Setting the same key twice keeps the last value.
    pub fn push<T>(&mut self, key: &str, value: T)
    where
        T: Display,
    {
        self.entries.insert(key.to_string(), value.to_string());
    }

    /// Set a key/value pair when the value is present.
    pub fn push_opt<T>(&mut self, key: &str, value: Option<T>)
    where
        T: Display,
    {
        if let Some(value) = value {
            self.push(key, value);
        }
    }

    /// Returns true if no parameters have been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Return the collected mapping, or `None` when nothing was added.
    #[must_use]
    pub fn into_query(self) -> Option<BTreeMap<String, String>> {
        if self.entries.is_empty() {
            None
        } else {
            Some(self.entries)
        }
    }
}
