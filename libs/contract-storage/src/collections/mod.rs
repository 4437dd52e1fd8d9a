//! High-level collections operating on contract storage.

pub mod hashmap;
pub mod stash;

pub use self::hashmap::HashMap;
pub use self::stash::Stash;
