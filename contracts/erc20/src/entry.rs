//! Selector based entry points, the way a node hands raw input to a contract.
//!
//! The input of every call is the 4 byte selector of the constructor or
//! message followed by its SCALE encoded arguments.

use codec::{DecodeAll, Encode, Output};
use contract_env::{AccountId, Balance, Env, EnvError, Selector};
use contract_storage::executor::{call, call_mut, instantiate};
use log::debug;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};
use thiserror::Error;

use crate::contract::Erc20;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DispatchError {
    #[error("input of {len} bytes does not start with a selector")]
    MissingSelector { len: usize },
    #[error("no {target} has the selector {selector}")]
    UnknownSelector { target: &'static str, selector: Selector },
    #[error("invalid arguments for {name}: {err}")]
    InvalidArgs { name: &'static str, err: String },
    #[error(transparent)]
    Env(#[from] EnvError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumString, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ConstructorKind {
    New,
    Default,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumString, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum MessageKind {
    TotalSupply,
    BalanceOf,
    Allowance,
    Transfer,
    Approve,
    TransferFrom,
}

macro_rules! impl_selector_lookup {
    ($kind:ident, $target:expr) => {
        impl $kind {
            pub fn name(self) -> &'static str {
                self.into()
            }

            pub fn selector(self) -> Selector {
                Selector::from_name(self.name())
            }

            pub fn from_selector(selector: &Selector) -> Result<Self, DispatchError> {
                Self::iter()
                    .find(|kind| kind.selector() == *selector)
                    .ok_or(DispatchError::UnknownSelector {
                        target: $target,
                        selector: *selector,
                    })
            }
        }
    };
}

impl_selector_lookup!(ConstructorKind, "constructor");
impl_selector_lookup!(MessageKind, "message");

impl MessageKind {
    /// Whether the message may change the contract state.
    pub fn is_mutable(self) -> bool {
        matches!(self, MessageKind::Transfer | MessageKind::Approve | MessageKind::TransferFrom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constructor {
    New { init_supply: Balance },
    Default,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    TotalSupply,
    BalanceOf { owner: AccountId },
    Allowance { owner: AccountId, spender: AccountId },
    Transfer { to: AccountId, value: Balance },
    Approve { spender: AccountId, value: Balance },
    TransferFrom { from: AccountId, to: AccountId, value: Balance },
}

fn split_selector(input: &[u8]) -> Result<(Selector, &[u8]), DispatchError> {
    if input.len() < Selector::LENGTH {
        return Err(DispatchError::MissingSelector { len: input.len() });
    }
    let (selector, args) = input.split_at(Selector::LENGTH);
    let mut bytes = [0u8; Selector::LENGTH];
    bytes.copy_from_slice(selector);
    Ok((Selector::from(bytes), args))
}

fn decode_args<T: DecodeAll>(name: &'static str, mut args: &[u8]) -> Result<T, DispatchError> {
    T::decode_all(&mut args).map_err(|err| DispatchError::InvalidArgs {
        name,
        err: err.to_string(),
    })
}

impl Constructor {
    pub fn kind(&self) -> ConstructorKind {
        match self {
            Constructor::New { .. } => ConstructorKind::New,
            Constructor::Default => ConstructorKind::Default,
        }
    }

    pub fn from_input(input: &[u8]) -> Result<Self, DispatchError> {
        let (selector, args) = split_selector(input)?;
        let kind = ConstructorKind::from_selector(&selector)?;
        let name = kind.name();
        let constructor = match kind {
            ConstructorKind::New => Constructor::New {
                init_supply: decode_args(name, args)?,
            },
            ConstructorKind::Default => {
                decode_args::<()>(name, args)?;
                Constructor::Default
            }
        };
        Ok(constructor)
    }
}

impl Encode for Constructor {
    fn encode_to<T: Output + ?Sized>(&self, dest: &mut T) {
        self.kind().selector().encode_to(dest);
        if let Constructor::New { init_supply } = self {
            init_supply.encode_to(dest);
        }
    }
}

impl Message {
    pub fn kind(&self) -> MessageKind {
        match self {
            Message::TotalSupply => MessageKind::TotalSupply,
            Message::BalanceOf { .. } => MessageKind::BalanceOf,
            Message::Allowance { .. } => MessageKind::Allowance,
            Message::Transfer { .. } => MessageKind::Transfer,
            Message::Approve { .. } => MessageKind::Approve,
            Message::TransferFrom { .. } => MessageKind::TransferFrom,
        }
    }

    pub fn from_input(input: &[u8]) -> Result<Self, DispatchError> {
        let (selector, args) = split_selector(input)?;
        let kind = MessageKind::from_selector(&selector)?;
        let name = kind.name();
        let message = match kind {
            MessageKind::TotalSupply => {
                decode_args::<()>(name, args)?;
                Message::TotalSupply
            }
            MessageKind::BalanceOf => Message::BalanceOf {
                owner: decode_args(name, args)?,
            },
            MessageKind::Allowance => {
                let (owner, spender) = decode_args(name, args)?;
                Message::Allowance { owner, spender }
            }
            MessageKind::Transfer => {
                let (to, value) = decode_args(name, args)?;
                Message::Transfer { to, value }
            }
            MessageKind::Approve => {
                let (spender, value) = decode_args(name, args)?;
                Message::Approve { spender, value }
            }
            MessageKind::TransferFrom => {
                let (from, to, value) = decode_args(name, args)?;
                Message::TransferFrom { from, to, value }
            }
        };
        Ok(message)
    }
}

impl Encode for Message {
    fn encode_to<T: Output + ?Sized>(&self, dest: &mut T) {
        self.kind().selector().encode_to(dest);
        match self {
            Message::TotalSupply => {}
            Message::BalanceOf { owner } => owner.encode_to(dest),
            Message::Allowance { owner, spender } => (owner, spender).encode_to(dest),
            Message::Transfer { to, value } => (to, value).encode_to(dest),
            Message::Approve { spender, value } => (spender, value).encode_to(dest),
            Message::TransferFrom { from, to, value } => (from, to, value).encode_to(dest),
        }
    }
}

/// Instantiates a new token from constructor input on behalf of the current caller.
pub fn deploy(env: &Env, input: &[u8]) -> Result<AccountId, DispatchError> {
    let constructor = Constructor::from_input(input)?;
    debug!("Deploying erc20 with {:?}", constructor);

    let account = instantiate(env, |env| match constructor {
        Constructor::New { init_supply } => Erc20::new(env, init_supply),
        Constructor::Default => Erc20::default(env),
    });
    Ok(account)
}

/// Calls the token at `callee` with message input and returns the SCALE encoded output.
///
/// Mutating messages return an encoded `Result<(), Error>`, their effects are
/// discarded when the result is an error.
pub fn dispatch(env: &Env, callee: AccountId, input: &[u8]) -> Result<Vec<u8>, DispatchError> {
    let message = Message::from_input(input)?;
    debug!("Dispatching {:?} to {}", message, callee);

    let output = match message {
        Message::TotalSupply => call(env, callee, |token: &Erc20| token.total_supply())?.encode(),
        Message::BalanceOf { owner } => call(env, callee, |token: &Erc20| token.balance_of(owner))?.encode(),
        Message::Allowance { owner, spender } => {
            call(env, callee, |token: &Erc20| token.allowance(owner, spender))?.encode()
        }
        Message::Transfer { to, value } => call_mut(env, callee, |token: &mut Erc20| token.transfer(to, value))?.encode(),
        Message::Approve { spender, value } => {
            call_mut(env, callee, |token: &mut Erc20| token.approve(spender, value))?.encode()
        }
        Message::TransferFrom { from, to, value } => {
            call_mut(env, callee, |token: &mut Erc20| token.transfer_from(from, to, value))?.encode()
        }
    };
    Ok(output)
}
