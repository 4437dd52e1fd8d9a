use primitive_types::U256;

use crate::error::EnvError;
use crate::hash::blake2b_256;

pub type Balance = u128;
pub type BlockNumber = u32;
pub type Timestamp = u64;

gen_fixed_bytes!(
    /// The address of an account, either a user or an instantiated contract.
    AccountId,
    32
);

gen_fixed_bytes!(
    /// The output of the 256-bit hash functions, also used for event topics.
    Hash,
    32
);

gen_fixed_bytes!(
    /// The address of a single cell of contract storage.
    Key,
    32
);

gen_fixed_bytes!(
    /// The first 4 bytes of the BLAKE2b-256 hash of a constructor or message name.
    Selector,
    4
);

impl Key {
    /// Returns the key `offset` cells after `self`.
    ///
    /// The key is treated as a 256-bit big-endian integer, the addition wraps around.
    pub fn add_u64(&self, offset: u64) -> Key {
        let (sum, _) = U256::from_big_endian(&self.0).overflowing_add(U256::from(offset));
        let mut bytes = [0u8; 32];
        sum.to_big_endian(&mut bytes);
        Key(bytes)
    }
}

impl Selector {
    pub fn from_name(name: &str) -> Self {
        let hash = blake2b_256(name.as_bytes());
        Selector([hash[0], hash[1], hash[2], hash[3]])
    }
}

pub fn hex_to_bytes(input: &str) -> Result<Vec<u8>, EnvError> {
    let trimmed = input.strip_prefix("0x").unwrap_or(input);
    hex::decode(trimmed).map_err(|_| EnvError::InvalidHex {
        input: input.to_string(),
    })
}
