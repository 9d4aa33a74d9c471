use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::field::FieldElement;

/// Permanent membership set backing the commitment and nullifier registries.
/// Values are never removed for the lifetime of a vault.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpentSet {
    used: HashSet<FieldElement>,
}

impl SpentSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check-and-insert in one step. Returns `true` if `value` was newly
    /// marked, `false` if it was already present.
    pub fn mark(&mut self, value: FieldElement) -> bool {
        self.used.insert(value)
    }

    pub fn contains(&self, value: FieldElement) -> bool {
        self.used.contains(&value)
    }

    pub fn len(&self) -> usize {
        self.used.len()
    }

    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }
}
