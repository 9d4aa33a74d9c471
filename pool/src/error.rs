use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("tree depth must be between 1 and 32, got {0}")]
    InvalidDepth(usize),
    #[error("root window size must be at least 1")]
    InvalidWindow,
    #[error("the zero field element is reserved for empty leaves")]
    InvalidLeaf,
    #[error("commitment tree is full")]
    TreeFull,
    #[error("leaf index {index} is out of range, tree has {leaves} leaves")]
    LeafOutOfRange { index: u64, leaves: u64 },
    #[error("encoding is not a canonical field element")]
    InvalidEncoding,
}
