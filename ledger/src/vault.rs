//! Per-asset pool state machine.
//!
//! A vault owns one commitment tree, one root history window and the two
//! registries; `deposit` and `withdraw` are its only mutations and each is
//! all-or-nothing. Callers serialize access per vault (see
//! [`PoolLedger`](crate::ledger::PoolLedger)).

use tracing::debug;

use pool::{
    FieldElement, IncrementalMerkleTree, MerklePath, RootHistoryWindow, SpentSet,
};

use crate::error::{Error, Result};
use crate::event::{DepositEvent, WithdrawEvent};
use crate::verifier::{ProofVerifier, WithdrawRequest};

#[derive(Debug, Clone)]
pub struct Vault {
    tree: IncrementalMerkleTree,
    roots: RootHistoryWindow,
    commitments: SpentSet,
    nullifiers: SpentSet,
}

impl Vault {
    /// Creates a vault with an empty tree of the given depth; the
    /// empty-tree root is the first entry of the root history.
    pub fn new(depth: usize, window: usize) -> Result<Self> {
        let tree = IncrementalMerkleTree::new(depth)?;
        let roots = RootHistoryWindow::new(window, tree.root())?;
        Ok(Self {
            tree,
            roots,
            commitments: SpentSet::new(),
            nullifiers: SpentSet::new(),
        })
    }

    /// Inserts a fresh commitment and records the new root.
    pub fn deposit(&mut self, commitment: FieldElement) -> Result<DepositEvent> {
        if commitment.is_zero() {
            return Err(Error::InvalidCommitment);
        }
        if self.commitments.contains(commitment) {
            return Err(Error::CommitmentAlreadyUsed);
        }
        // check capacity before marking the commitment, so a full tree
        // rejects without mutating the registry
        if self.tree.is_full() {
            return Err(Error::TreeFull);
        }

        self.commitments.mark(commitment);
        let (leaf_index, root) = self.tree.insert(commitment)?;
        self.roots.record(root);

        debug!(%commitment, leaf_index, %root, "commitment deposited");
        Ok(DepositEvent {
            commitment,
            leaf_index,
            root,
        })
    }

    /// Authorizes a withdrawal: recent root, unspent nullifier, valid proof,
    /// then the nullifier is marked spent. Funds must only move after this
    /// returns `Ok`; the mark-then-pay order is what makes a re-entrant or
    /// racing call observe the nullifier as already spent.
    pub fn withdraw<V: ProofVerifier>(
        &mut self,
        verifier: &V,
        request: &WithdrawRequest,
    ) -> Result<WithdrawEvent> {
        if !self.roots.is_known(request.root) {
            return Err(Error::UnknownMerkleRoot);
        }
        if self.nullifiers.contains(request.nullifier_hash) {
            return Err(Error::NullifierAlreadyUsed);
        }
        if !verifier.verify(&request.proof, &request.public_inputs()) {
            return Err(Error::ProofVerificationFailed);
        }
        // the atomic check-and-insert is the decision to pay; the earlier
        // contains() was only a cheap pre-check
        if !self.nullifiers.mark(request.nullifier_hash) {
            return Err(Error::NullifierAlreadyUsed);
        }

        debug!(
            nullifier = %request.nullifier_hash,
            recipient = %request.recipient,
            fee = request.fee,
            "withdrawal authorized"
        );
        Ok(WithdrawEvent {
            nullifier_hash: request.nullifier_hash,
            recipient: request.recipient,
            relayer: request.relayer,
            fee: request.fee,
        })
    }

    pub fn current_root(&self) -> FieldElement {
        self.tree.root()
    }

    pub fn next_leaf_index(&self) -> u64 {
        self.tree.next_leaf_index()
    }

    pub fn tree_depth(&self) -> usize {
        self.tree.depth()
    }

    pub fn is_known_root(&self, root: FieldElement) -> bool {
        self.roots.is_known(root)
    }

    pub fn is_commitment_used(&self, commitment: FieldElement) -> bool {
        self.commitments.contains(commitment)
    }

    pub fn is_nullifier_used(&self, nullifier_hash: FieldElement) -> bool {
        self.nullifiers.contains(nullifier_hash)
    }

    pub fn root_history_len(&self) -> usize {
        self.roots.len()
    }

    /// Membership path for a previously deposited leaf, valid against the
    /// current root.
    pub fn merkle_path(&self, leaf_index: u64) -> Result<MerklePath> {
        Ok(self.tree.path(leaf_index)?)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    struct StaticVerifier(bool);

    impl ProofVerifier for StaticVerifier {
        fn verify(&self, _proof: &[u8], _public_inputs: &[FieldElement]) -> bool {
            self.0
        }
    }

    fn request(vault: &Vault, nullifier: u64) -> WithdrawRequest {
        WithdrawRequest {
            proof: vec![0xab; 64],
            root: vault.current_root(),
            nullifier_hash: FieldElement::from_u64(nullifier),
            recipient: FieldElement::from_u64(0x1234),
            relayer: FieldElement::zero(),
            fee: 0,
        }
    }

    #[test]
    fn test_deposit_rejects_zero_and_duplicates() {
        let mut vault = Vault::new(4, 5).unwrap();
        assert_eq!(
            vault.deposit(FieldElement::zero()).unwrap_err(),
            Error::InvalidCommitment
        );

        let c = FieldElement::from_u64(5);
        vault.deposit(c).unwrap();
        assert_eq!(vault.deposit(c).unwrap_err(), Error::CommitmentAlreadyUsed);
        assert_eq!(vault.next_leaf_index(), 1);
    }

    #[test]
    fn test_full_tree_rejects_without_marking_commitment() {
        let mut vault = Vault::new(1, 5).unwrap();
        vault.deposit(FieldElement::from_u64(1)).unwrap();
        vault.deposit(FieldElement::from_u64(2)).unwrap();

        let c = FieldElement::from_u64(3);
        assert_eq!(vault.deposit(c).unwrap_err(), Error::TreeFull);
        assert!(!vault.is_commitment_used(c));
    }

    #[test]
    fn test_withdraw_happy_path_then_finality() {
        let mut vault = Vault::new(4, 5).unwrap();
        vault.deposit(FieldElement::from_u64(7)).unwrap();

        let req = request(&vault, 99);
        let event = vault.withdraw(&StaticVerifier(true), &req).unwrap();
        assert_eq!(event.nullifier_hash, req.nullifier_hash);
        assert!(vault.is_nullifier_used(req.nullifier_hash));

        // a second spend of the same nullifier fails even with a valid proof
        assert_eq!(
            vault.withdraw(&StaticVerifier(true), &req).unwrap_err(),
            Error::NullifierAlreadyUsed
        );
    }

    #[test]
    fn test_withdraw_requires_recent_root() {
        let mut vault = Vault::new(4, 5).unwrap();
        vault.deposit(FieldElement::from_u64(7)).unwrap();

        let mut req = request(&vault, 99);
        req.root = FieldElement::from_u64(0xbad);
        assert_eq!(
            vault.withdraw(&StaticVerifier(true), &req).unwrap_err(),
            Error::UnknownMerkleRoot
        );
        assert!(!vault.is_nullifier_used(req.nullifier_hash));
    }

    #[test]
    fn test_failed_proof_never_marks_nullifier() {
        let mut vault = Vault::new(4, 5).unwrap();
        vault.deposit(FieldElement::from_u64(7)).unwrap();

        let req = request(&vault, 99);
        assert_eq!(
            vault.withdraw(&StaticVerifier(false), &req).unwrap_err(),
            Error::ProofVerificationFailed
        );
        assert!(!vault.is_nullifier_used(req.nullifier_hash));

        // the nullifier is still spendable once a valid proof shows up
        vault.withdraw(&StaticVerifier(true), &req).unwrap();
    }

    #[test]
    fn test_stale_root_expires_after_window_slides() {
        let mut vault = Vault::new(4, 2).unwrap();
        let old = vault.deposit(FieldElement::from_u64(1)).unwrap().root;
        vault.deposit(FieldElement::from_u64(2)).unwrap();
        assert!(vault.is_known_root(old));

        vault.deposit(FieldElement::from_u64(3)).unwrap();
        assert!(!vault.is_known_root(old));

        let mut req = request(&vault, 99);
        req.root = old;
        assert_eq!(
            vault.withdraw(&StaticVerifier(true), &req).unwrap_err(),
            Error::UnknownMerkleRoot
        );
    }
}
