//! Append-only incremental Merkle tree of fixed depth.
//!
//! Insertion keeps only one pending left sibling per level
//! (`filled_subtrees`), so it costs exactly `depth` hash calls and O(depth)
//! working state regardless of how many leaves precede it. Every node ever
//! written is additionally recorded in a sparse `(level, index)` map so that
//! membership paths for old leaves stay answerable.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::field::FieldElement;
use crate::hash::{empty_subtree, hash2};
use crate::MAX_TREE_DEPTH;

/// One step of a membership path. The payload is the sibling hash; the
/// variant says which side the sibling sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PathNode {
    Left(FieldElement),
    Right(FieldElement),
}

/// Leaf-to-root membership path of length `depth`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerklePath {
    nodes: Vec<PathNode>,
}

impl MerklePath {
    pub fn nodes(&self) -> &[PathNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Folds the path into a candidate root. The withdrawal circuit performs
    /// this exact fold; the two must agree bit for bit.
    pub fn root(&self, leaf: FieldElement) -> FieldElement {
        let mut current = leaf;
        for node in &self.nodes {
            current = match node {
                PathNode::Left(sibling) => hash2(*sibling, current),
                PathNode::Right(sibling) => hash2(current, *sibling),
            };
        }
        current
    }

    /// Sibling hashes, leaf level first.
    pub fn siblings(&self) -> Vec<FieldElement> {
        self.nodes
            .iter()
            .map(|node| match node {
                PathNode::Left(sibling) | PathNode::Right(sibling) => *sibling,
            })
            .collect()
    }

    /// Direction bits, leaf level first: `false` when the proven node is the
    /// left child at that level, `true` when it is the right child.
    pub fn directions(&self) -> Vec<bool> {
        self.nodes
            .iter()
            .map(|node| matches!(node, PathNode::Left(_)))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncrementalMerkleTree {
    depth: usize,
    next_leaf_index: u64,
    filled_subtrees: Vec<FieldElement>,
    current_root: FieldElement,
    nodes: HashMap<(usize, u64), FieldElement>,
}

impl IncrementalMerkleTree {
    pub fn new(depth: usize) -> Result<Self> {
        if depth == 0 || depth > MAX_TREE_DEPTH {
            return Err(Error::InvalidDepth(depth));
        }
        Ok(Self {
            depth,
            next_leaf_index: 0,
            filled_subtrees: (0..depth).map(empty_subtree).collect(),
            current_root: empty_subtree(depth),
            nodes: HashMap::new(),
        })
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn root(&self) -> FieldElement {
        self.current_root
    }

    /// Index the next inserted leaf will occupy; equals the number of leaves
    /// inserted so far.
    pub fn next_leaf_index(&self) -> u64 {
        self.next_leaf_index
    }

    pub fn capacity(&self) -> u64 {
        1u64 << self.depth
    }

    pub fn is_full(&self) -> bool {
        self.next_leaf_index == self.capacity()
    }

    /// Appends `leaf` at the next free index and returns `(index, new_root)`.
    /// The zero element denotes "empty" and is rejected as a leaf.
    pub fn insert(&mut self, leaf: FieldElement) -> Result<(u64, FieldElement)> {
        if leaf.is_zero() {
            return Err(Error::InvalidLeaf);
        }
        if self.is_full() {
            return Err(Error::TreeFull);
        }

        let index = self.next_leaf_index;
        let mut current = leaf;

        for level in 0..self.depth {
            let position = index >> level;
            self.nodes.insert((level, position), current);

            current = if position & 1 == 0 {
                // fresh left child: its right sibling is still empty
                self.filled_subtrees[level] = current;
                hash2(current, empty_subtree(level))
            } else {
                // right child completing the stored left sibling
                hash2(self.filled_subtrees[level], current)
            };
        }

        self.current_root = current;
        self.next_leaf_index += 1;
        Ok((index, current))
    }

    /// Membership path for a previously inserted leaf, valid against the
    /// current root.
    pub fn path(&self, index: u64) -> Result<MerklePath> {
        if index >= self.next_leaf_index {
            return Err(Error::LeafOutOfRange {
                index,
                leaves: self.next_leaf_index,
            });
        }

        let mut nodes = Vec::with_capacity(self.depth);
        for level in 0..self.depth {
            let position = index >> level;
            let sibling = self
                .nodes
                .get(&(level, position ^ 1))
                .copied()
                .unwrap_or_else(|| empty_subtree(level));
            nodes.push(if position & 1 == 0 {
                PathNode::Right(sibling)
            } else {
                PathNode::Left(sibling)
            });
        }
        Ok(MerklePath { nodes })
    }
}
