use pool::{FieldElement, IncrementalMerkleTree};
use proptest::collection::vec;
use proptest::prelude::*;

const DEPTH: usize = 8;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_identical_sequences_produce_identical_root_sequences(
        values in vec(1u64.., 1..32usize),
    ) {
        let mut a = IncrementalMerkleTree::new(DEPTH).unwrap();
        let mut b = IncrementalMerkleTree::new(DEPTH).unwrap();

        for v in &values {
            let leaf = FieldElement::from_u64(*v);
            let (ia, ra) = a.insert(leaf).unwrap();
            let (ib, rb) = b.insert(leaf).unwrap();
            prop_assert_eq!(ia, ib);
            prop_assert_eq!(ra, rb);
        }
    }

    #[test]
    fn prop_indices_are_monotonic_and_roots_change(
        values in vec(1u64.., 1..32usize),
    ) {
        let mut tree = IncrementalMerkleTree::new(DEPTH).unwrap();
        let mut previous_root = tree.root();

        for (expected_index, v) in values.iter().enumerate() {
            let (index, root) = tree.insert(FieldElement::from_u64(*v)).unwrap();
            prop_assert_eq!(index, expected_index as u64);
            prop_assert_ne!(root, previous_root);
            previous_root = root;
        }
    }

    #[test]
    fn prop_every_leaf_round_trips_through_its_path(
        values in vec(1u64.., 1..32usize),
    ) {
        let mut tree = IncrementalMerkleTree::new(DEPTH).unwrap();
        for v in &values {
            tree.insert(FieldElement::from_u64(*v)).unwrap();
        }

        let root = tree.root();
        for (i, v) in values.iter().enumerate() {
            let path = tree.path(i as u64).unwrap();
            prop_assert_eq!(path.root(FieldElement::from_u64(*v)), root);
        }
    }
}
