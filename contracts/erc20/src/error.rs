use codec::{Decode, Encode};
use num_enum::{IntoPrimitive, TryFromPrimitive};
use strum::{EnumString, IntoStaticStr};
use thiserror::Error;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Encode, Decode, Error, TryFromPrimitive, IntoPrimitive, EnumString, IntoStaticStr,
)]
#[repr(u8)]
pub enum Error {
    #[error("the balance of the sender is too low")]
    InsufficientBalance = 1,
    #[error("the allowance granted to the caller is too low")]
    InsufficientAllowance = 2,
}

pub type Result<T> = core::result::Result<T, Error>;
