//! An ERC20 token contract.
//!
//! The contract keeps the total supply, the balance of every holder and the
//! allowances granted between holders. It is deployed and called through the
//! selector based entry points in [`entry`], or directly through the
//! executor of `contract-storage`.

pub mod contract;
pub mod entry;
pub mod error;
pub mod events;
pub mod metadata;

pub use contract::Erc20;
pub use entry::{deploy, dispatch, Constructor, ConstructorKind, DispatchError, Message, MessageKind};
pub use error::{Error, Result};
pub use events::{Approval, Event, Transfer};
