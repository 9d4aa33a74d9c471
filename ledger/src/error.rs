use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

/// Closed set of precondition failures. Each is fatal to the current
/// operation only; no operation leaves partial state behind on failure.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("commitment must be a nonzero field element")]
    InvalidCommitment,
    #[error("commitment was already deposited in this vault")]
    CommitmentAlreadyUsed,
    #[error("commitment tree is full")]
    TreeFull,
    #[error("the zero field element is reserved for empty leaves")]
    InvalidLeaf,
    #[error("merkle root is not in the recent root history")]
    UnknownMerkleRoot,
    #[error("nullifier has already been spent")]
    NullifierAlreadyUsed,
    #[error("withdrawal proof failed verification")]
    ProofVerificationFailed,
    #[error("no vault registered for this asset")]
    UnknownVault,
    #[error("a vault already exists for this asset")]
    VaultAlreadyExists,
    #[error("tree depth must be between 1 and 32, got {0}")]
    InvalidDepth(usize),
    #[error("root window size must be at least 1")]
    InvalidWindow,
    #[error("leaf index {index} is out of range, tree has {leaves} leaves")]
    LeafOutOfRange { index: u64, leaves: u64 },
    #[error("encoding is not a canonical field element")]
    InvalidEncoding,
}

impl From<pool::Error> for Error {
    fn from(err: pool::Error) -> Self {
        match err {
            pool::Error::InvalidDepth(depth) => Error::InvalidDepth(depth),
            pool::Error::InvalidWindow => Error::InvalidWindow,
            pool::Error::InvalidLeaf => Error::InvalidLeaf,
            pool::Error::TreeFull => Error::TreeFull,
            pool::Error::LeafOutOfRange { index, leaves } => {
                Error::LeafOutOfRange { index, leaves }
            }
            pool::Error::InvalidEncoding => Error::InvalidEncoding,
        }
    }
}
