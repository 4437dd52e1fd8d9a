//! Low-level lazily loaded storage abstractions.

mod entry;
mod lazy_hashmap;

pub(crate) use self::entry::{EntryState, StorageEntry};
pub use self::lazy_hashmap::LazyHashMap;
