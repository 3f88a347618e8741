//! Variable store for the banter interpreter.
//!
//! A flat name → value map. There are no scope frames and no declared
//! types: reassigning a variable to a different variant replaces the old
//! value, and the store exclusively owns every value it holds.

use std::collections::HashMap;

use banter_types::Value;

/// Flat variable store. Keys are identifiers, last write wins.
#[derive(Debug, Default)]
pub struct VarStore {
    vars: HashMap<String, Value>,
}

impl VarStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a variable, replacing any previous value.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.vars.insert(name.into(), value);
    }

    /// Get a variable by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.vars.get(name)
    }

    /// Get a variable for in-place mutation.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.vars.get_mut(name)
    }

    /// Check if a variable exists.
    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    /// Drop every variable.
    pub fn clear(&mut self) {
        self.vars.clear();
    }

    /// All variables as (name, value) pairs, sorted by name.
    pub fn snapshot(&self) -> Vec<(String, Value)> {
        let mut pairs: Vec<_> = self
            .vars
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        pairs.sort_by(|(a, _), (b, _)| a.cmp(b));
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_get_variable() {
        let mut store = VarStore::new();
        store.set("x", Value::Number(42.0));
        assert_eq!(store.get("x"), Some(&Value::Number(42.0)));
    }

    #[test]
    fn get_nonexistent_returns_none() {
        let store = VarStore::new();
        assert_eq!(store.get("missing"), None);
    }

    #[test]
    fn last_write_wins_across_variants() {
        let mut store = VarStore::new();
        store.set("x", Value::Number(1.0));
        store.set("x", Value::Text("now text".into()));
        assert_eq!(store.get("x"), Some(&Value::Text("now text".into())));
    }

    #[test]
    fn contains_finds_variable() {
        let mut store = VarStore::new();
        store.set("exists", Value::Number(0.0));
        assert!(store.contains("exists"));
        assert!(!store.contains("missing"));
    }

    #[test]
    fn clear_drops_everything() {
        let mut store = VarStore::new();
        store.set("a", Value::Number(1.0));
        store.set("b", Value::Number(2.0));
        store.clear();
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn snapshot_is_sorted() {
        let mut store = VarStore::new();
        store.set("z", Value::Number(1.0));
        store.set("a", Value::Number(2.0));
        store.set("m", Value::Number(3.0));
        let names: Vec<_> = store.snapshot().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["a", "m", "z"]);
    }
}
