//! Script variable store.
//!
//! Variables are signed 32-bit integers keyed by user-chosen names.  A
//! variable comes into existence on first `set`; reading one that was never
//! declared is an error at the call site, not an implicit zero.  Nothing ever
//! removes a variable during a run.

use std::collections::HashMap;

/// Name → integer variable store.
#[derive(Debug, Default)]
pub struct VarStore {
    vars: HashMap<String, i32>,
}

impl VarStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare or overwrite a variable.
    pub fn set(&mut self, name: impl Into<String>, value: i32) {
        self.vars.insert(name.into(), value);
    }

    /// Get the value of a variable, `None` if it was never declared.
    pub fn get(&self, name: &str) -> Option<i32> {
        self.vars.get(name).copied()
    }

    /// Returns `true` if the variable has been declared.
    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    /// Iterate over all variables.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &i32)> {
        self.vars.iter()
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
