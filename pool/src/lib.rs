pub mod ds;
pub mod error;
pub mod field;
pub mod hash;

pub use ds::spent_set::SpentSet;
pub use ds::tree::{IncrementalMerkleTree, MerklePath, PathNode};
pub use ds::window::RootHistoryWindow;
pub use error::{Error, Result};
pub use field::FieldElement;
pub use hash::{empty_subtree, hash2};

/// Deepest commitment tree the empty-subtree table covers.
pub const MAX_TREE_DEPTH: usize = 32;

pub const DEFAULT_TREE_DEPTH: usize = 20;

/// Number of recent roots accepted for withdrawal proofs.
pub const DEFAULT_ROOT_WINDOW: usize = 30;
