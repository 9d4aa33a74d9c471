pub mod error;
pub mod event;
pub mod ledger;
pub mod vault;
pub mod verifier;

pub use error::{Error, Result};
pub use event::{DepositEvent, WithdrawEvent};
pub use ledger::{AssetId, PoolLedger};
pub use vault::Vault;
pub use verifier::{ProofVerifier, WithdrawRequest, WITHDRAW_PUBLIC_INPUTS};
