use thiserror::Error;

use crate::types::{AccountId, Key};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnvError {
    #[error("[{key}] Failed to decode the storage cell: {err}")]
    Decode { key: Key, err: String },
    #[error("The contract {account} does not exist.")]
    ContractNotFound { account: AccountId },
    #[error("Parsing hex string {input} failed.")]
    InvalidHex { input: String },
    #[error("The length of the bytes should be {expected}, but {actual} found.")]
    InvalidLength { expected: usize, actual: usize },
}
