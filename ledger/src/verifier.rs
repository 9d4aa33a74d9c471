use pool::FieldElement;
use serde::{Deserialize, Serialize};

/// Number and order of the public inputs bound by a withdrawal proof:
/// `[merkle_root, nullifier_hash, recipient, relayer, fee]`.
pub const WITHDRAW_PUBLIC_INPUTS: usize = 5;

/// Seam to the external proof system. Implementations must never fail for
/// malformed proofs; anything unverifiable is simply `false`.
pub trait ProofVerifier {
    fn verify(&self, proof: &[u8], public_inputs: &[FieldElement]) -> bool;
}

/// A withdrawal attempt as presented by the caller. The proof claims
/// knowledge of a secret/nullifier pair whose commitment sits under `root`,
/// without revealing which commitment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawRequest {
    pub proof: Vec<u8>,
    pub root: FieldElement,
    pub nullifier_hash: FieldElement,
    /// Field-encoded recipient address.
    pub recipient: FieldElement,
    /// Field-encoded relayer address; zero when the caller relays itself.
    pub relayer: FieldElement,
    pub fee: u64,
}

impl WithdrawRequest {
    /// Public inputs in the fixed order the circuit expects.
    pub fn public_inputs(&self) -> [FieldElement; WITHDRAW_PUBLIC_INPUTS] {
        [
            self.root,
            self.nullifier_hash,
            self.recipient,
            self.relayer,
            FieldElement::from_u64(self.fee),
        ]
    }
}
