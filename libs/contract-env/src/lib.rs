//! The off-chain execution environment of the contracts.
//!
//! [`Engine`] plays the role of the chain: it owns the storage of every
//! instantiated contract, the execution context and the recorded events.
//! Contracts never touch the engine directly, they go through the cheap
//! [`Env`] handle instead.

#[macro_use]
mod macros;

pub mod accounts;
pub mod constants;
pub mod engine;
pub mod env;
pub mod error;
pub mod event;
pub mod hash;
pub mod types;

pub use accounts::DefaultAccounts;
pub use engine::{EmittedEvent, Engine, EngineConfig};
pub use env::{Env, Frame};
pub use error::EnvError;
pub use event::Topics;
pub use hash::{Blake2x256, Hasher};
pub use types::{AccountId, Balance, BlockNumber, Hash, Key, Selector, Timestamp};
