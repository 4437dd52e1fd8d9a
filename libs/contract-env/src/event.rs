use codec::Encode;

use crate::constants::HASH_LENGTH;
use crate::hash::blake2b_256;
use crate::types::Hash;

/// Implemented by events to expose the topics a node would index them by.
pub trait Topics {
    fn topics(&self) -> Vec<Hash>;
}

/// The topic identifying an event type, e.g. `signature_topic("Erc20::Transfer")`.
pub fn signature_topic(path: &str) -> Hash {
    Hash::from(blake2b_256(path.as_bytes()))
}

/// The topic of a single event field.
///
/// Encodings that fit into a hash are zero padded, longer ones are hashed.
pub fn topic_of<T: Encode + ?Sized>(value: &T) -> Hash {
    value.using_encoded(|encoded| {
        if encoded.len() <= HASH_LENGTH {
            let mut topic = [0u8; HASH_LENGTH];
            topic[..encoded.len()].copy_from_slice(encoded);
            Hash::from(topic)
        } else {
            Hash::from(blake2b_256(encoded))
        }
    })
}
