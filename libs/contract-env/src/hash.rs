use blake2b_ref::{Blake2b, Blake2bBuilder};
use codec::Encode;

use crate::constants::HASH_LENGTH;

/// A hash function usable to derive storage keys and topics.
pub trait Hasher {
    type Output: AsRef<[u8]> + Copy + Default;

    fn hash(input: &[u8]) -> Self::Output;
}

/// BLAKE2b with a 256-bit output and no personalization.
#[derive(Debug, Clone, Copy)]
pub enum Blake2x256 {}

impl Hasher for Blake2x256 {
    type Output = [u8; HASH_LENGTH];

    fn hash(input: &[u8]) -> Self::Output {
        blake2b_256(input)
    }
}

pub fn new_blake2b() -> Blake2b {
    Blake2bBuilder::new(HASH_LENGTH).build()
}

pub fn blake2b_256<T: AsRef<[u8]>>(s: T) -> [u8; HASH_LENGTH] {
    let mut result = [0u8; HASH_LENGTH];
    let mut blake2b = new_blake2b();
    blake2b.update(s.as_ref());
    blake2b.finalize(&mut result);
    result
}

/// Hashes the SCALE encoding of `input` without allocating an intermediate buffer twice.
pub fn hash_encoded<H: Hasher, T: Encode + ?Sized>(input: &T) -> H::Output {
    input.using_encoded(H::hash)
}
