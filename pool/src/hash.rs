//! Adapter over the circuit-side 2-input Poseidon hash.
//!
//! The permutation itself is the circomlib-compatible instance from
//! `light-poseidon`; the withdrawal circuit computes the identical function,
//! so every value produced here must match it bit for bit.

use ark_bn254::Fr;
use lazy_static::lazy_static;
use light_poseidon::{Poseidon, PoseidonHasher};
use std::cell::RefCell;

use crate::field::FieldElement;
use crate::MAX_TREE_DEPTH;

thread_local! {
    // Parameter generation is the expensive part; keep one width-2 instance
    // per thread instead of rebuilding it on every call.
    static POSEIDON2: RefCell<Poseidon<Fr>> = RefCell::new(
        Poseidon::<Fr>::new_circom(2).expect("the circom parameter set defines width 2"),
    );
}

/// Deterministic 2-input collision-resistant hash over the BN254 scalar
/// field. Parent = `hash2(left, right)` everywhere in the tree.
pub fn hash2(a: FieldElement, b: FieldElement) -> FieldElement {
    POSEIDON2.with(|poseidon| {
        let fr = poseidon
            .borrow_mut()
            .hash(&[a.fr(), b.fr()])
            .expect("a width-2 instance accepts exactly two inputs");
        FieldElement::from_fr(fr)
    })
}

lazy_static! {
    static ref EMPTY_SUBTREES: Vec<FieldElement> = {
        let mut table = Vec::with_capacity(MAX_TREE_DEPTH + 1);
        table.push(FieldElement::zero());
        for level in 1..=MAX_TREE_DEPTH {
            let below = table[level - 1];
            table.push(hash2(below, below));
        }
        table
    };
}

/// Root of an all-empty subtree of height `level`: `empty_subtree(0)` is the
/// reserved zero leaf, `empty_subtree(l) = hash2(empty_subtree(l-1),
/// empty_subtree(l-1))`.
///
/// # Panics
/// If `level > MAX_TREE_DEPTH`.
pub fn empty_subtree(level: usize) -> FieldElement {
    EMPTY_SUBTREES[level]
}

#[cfg(test)]
mod test {
    use super::*;

    // circomlib poseidon(1, 2), shared with the circuit side
    const HASH_1_2: &str = "0x115cc0f5e7d690413df64c6b9662e9cf2a3617f2743245519e19607a4417189a";

    // poseidon(nullifier = 11111111, secret = 22222222), the reference
    // commitment used by the withdrawal flow tests
    const COMMITMENT_VECTOR: &str =
        "0x027d41a203035596e96fda110d73edf92d17ca4c60b28bf72b0f2bc593f226eb";

    #[test]
    fn test_hash2_fixed_vectors() {
        let expected = FieldElement::from_hex(HASH_1_2).unwrap();
        assert_eq!(hash2(FieldElement::from_u64(1), FieldElement::from_u64(2)), expected);

        let expected = FieldElement::from_hex(COMMITMENT_VECTOR).unwrap();
        assert_eq!(
            hash2(FieldElement::from_u64(11111111), FieldElement::from_u64(22222222)),
            expected
        );
    }

    #[test]
    fn test_hash2_is_deterministic_and_order_sensitive() {
        let a = FieldElement::from_u64(7);
        let b = FieldElement::from_u64(8);
        assert_eq!(hash2(a, b), hash2(a, b));
        assert_ne!(hash2(a, b), hash2(b, a));
    }

    #[test]
    fn test_empty_subtree_recurrence() {
        assert!(empty_subtree(0).is_zero());
        for level in 1..=MAX_TREE_DEPTH {
            let below = empty_subtree(level - 1);
            assert_eq!(empty_subtree(level), hash2(below, below));
        }
    }
}
