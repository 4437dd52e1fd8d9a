//! Scripted sessions against ERC20 tokens on the off-chain engine.
//!
//! A [`Scenario`] replays what a user would do by hand against a node:
//! deploy a token with an initial supply, query balances, transfer, approve
//! and spend an allowance as another account.

pub mod error;
pub mod runner;
pub mod scenario;
pub mod util;

pub use error::ScenarioError;
pub use runner::{Report, Runner, StepOutcome};
pub use scenario::{Expect, Scenario, Step};
