//! Storage primitives for contracts running on the off-chain engine.
//!
//! Contract state is laid out over storage cells through [`SpreadLayout`].
//! Plain values are packed into a single cell while the collections spread
//! their entries over many cells and only load what is actually accessed.

pub mod collections;
pub mod executor;
pub mod lazy;
pub mod traits;

pub use collections::{HashMap, Stash};
pub use lazy::LazyHashMap;
pub use traits::{KeyPtr, PackedLayout, SpreadLayout};
