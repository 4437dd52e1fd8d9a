use crate::types::AccountId;

pub const HASH_LENGTH: usize = 32;

/// The callee of a fresh engine before any contract has been instantiated.
pub const DEFAULT_CALLEE: AccountId = AccountId::new([0xff; 32]);

/// Milliseconds between two blocks unless configured otherwise.
pub const DEFAULT_BLOCK_TIME: u64 = 6_000;
