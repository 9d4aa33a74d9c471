use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::field::FieldElement;

/// Append-only log of every root the tree has produced, with a bounded
/// lookup window over the most recent `window` entries.
///
/// Recency is positional, not by value: a root that reappears later in the
/// log re-enters the window as a fresh entry, and an old occurrence of the
/// same value expires on its own schedule. Lookup therefore scans the tail
/// of the log instead of maintaining a separate eviction set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootHistoryWindow {
    history: Vec<FieldElement>,
    window: usize,
}

impl RootHistoryWindow {
    /// Seeds the log with the empty-tree root so withdrawals can reference
    /// it before the first deposit.
    pub fn new(window: usize, initial_root: FieldElement) -> Result<Self> {
        if window == 0 {
            return Err(Error::InvalidWindow);
        }
        Ok(Self {
            history: vec![initial_root],
            window,
        })
    }

    pub fn record(&mut self, root: FieldElement) {
        self.history.push(root);
    }

    /// Whether `root` occurs among the last `window` recorded roots.
    pub fn is_known(&self, root: FieldElement) -> bool {
        self.history.iter().rev().take(self.window).any(|r| *r == root)
    }

    /// Total number of roots ever recorded, the seed included.
    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn current(&self) -> FieldElement {
        self.history[self.history.len() - 1]
    }

    pub fn window(&self) -> usize {
        self.window
    }
}
