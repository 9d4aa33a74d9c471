use pool::FieldElement;
use serde::{Deserialize, Serialize};

/// Emitted on every successful deposit. This is the only channel by which a
/// depositor's tooling learns the leaf index it needs to reconstruct its own
/// membership path later; the ledger keeps no reverse index from commitment
/// to leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositEvent {
    pub commitment: FieldElement,
    pub leaf_index: u64,
    pub root: FieldElement,
}

/// Emitted once a withdrawal is authorized, after its nullifier has been
/// marked spent. Fund custody past this point is the caller's concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawEvent {
    pub nullifier_hash: FieldElement,
    pub recipient: FieldElement,
    pub relayer: FieldElement,
    pub fee: u64,
}
