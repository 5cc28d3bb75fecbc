//! Audit log of named checks

use crate::outcome::Outcome;
use serde::Serialize;

/// Append-only ordered log of `(name, outcome)` pairs
///
/// Every check invoked by name leaves an entry, in invocation order. The
/// receipt is visible to the caller once the chain has settled; there is no
/// removal API.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Receipt<V> {
    entries: Vec<(String, Outcome<V>)>,
}

impl<V> Receipt<V> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append an entry
    pub fn record(&mut self, name: impl Into<String>, outcome: Outcome<V>) {
        self.entries.push((name.into(), outcome));
    }

    /// Entries in invocation order
    pub fn entries(&self) -> &[(String, Outcome<V>)] {
        &self.entries
    }

    /// Unwrap the entries
    pub fn join(self) -> Vec<(String, Outcome<V>)> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V> Default for Receipt<V> {
    fn default() -> Self {
        Self::new()
    }
}
