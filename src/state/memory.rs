//! In-memory state store.

use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use super::GlobalState;
use crate::error::{Result, UpdaterError};

/// Non-durable [`GlobalState`] for embedding hosts and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryState {
    entries: BTreeMap<String, Value>,
    writes: usize,
    failing: BTreeSet<String>,
}

impl MemoryState {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful `update`/`remove` calls.
    pub fn write_count(&self) -> usize {
        self.writes
    }

    /// Make every later `update` of `key` fail with a state error.
    pub fn fail_writes_to(&mut self, key: &str) {
        self.failing.insert(key.to_string());
    }
}

impl GlobalState for MemoryState {
    fn get(&self, key: &str) -> Option<Value> {
        self.entries.get(key).cloned()
    }

    fn update(&mut self, key: &str, value: Value) -> Result<()> {
        if self.failing.contains(key) {
            return Err(UpdaterError::StateError {
                path: PathBuf::from("<memory>"),
                message: format!("write to '{}' rejected", key),
            });
        }
        self.entries.insert(key.to_string(), value);
        self.writes += 1;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        self.writes += 1;
        Ok(())
    }

    fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_then_get() {
        let mut state = MemoryState::new();
        state.update("a", Value::from(1)).unwrap();
        assert_eq!(state.get("a"), Some(Value::from(1)));
        assert_eq!(state.write_count(), 1);
    }

    #[test]
    fn remove_deletes_key() {
        let mut state = MemoryState::new();
        state.update("a", Value::from(1)).unwrap();
        state.remove("a").unwrap();
        assert!(state.get("a").is_none());
        assert!(state.keys().is_empty());
    }

    #[test]
    fn keys_are_sorted() {
        let mut state = MemoryState::new();
        state.update("b", Value::Null).unwrap();
        state.update("a", Value::Null).unwrap();
        assert_eq!(state.keys(), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn failing_key_rejects_update() {
        let mut state = MemoryState::new();
        state.fail_writes_to("a");
        assert!(state.update("a", Value::from(1)).is_err());
        assert!(state.get("a").is_none());
        assert_eq!(state.write_count(), 0);
        state.update("b", Value::from(2)).unwrap();
    }
}
