//! A manifest of the items the token exposes, grouped by item kind.

use std::collections::BTreeMap;

use serde::Serialize;
use strum::{Display, EnumIter, IntoEnumIterator};

use crate::entry::{ConstructorKind, MessageKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Display, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ItemKind {
    Enum,
    Fn,
    Struct,
    Trait,
}

/// An item name with its one line description.
pub type Item = (&'static str, &'static str);

pub type Manifest = BTreeMap<ItemKind, Vec<Item>>;

impl ConstructorKind {
    pub fn docs(self) -> &'static str {
        match self {
            ConstructorKind::New => "Creates a token and mints the initial supply to the caller.",
            ConstructorKind::Default => "Creates a token with an empty supply.",
        }
    }
}

impl MessageKind {
    pub fn docs(self) -> &'static str {
        match self {
            MessageKind::TotalSupply => "Returns the total token supply.",
            MessageKind::BalanceOf => "Returns the balance of an account, 0 when it holds nothing.",
            MessageKind::Allowance => "Returns the amount a spender may still withdraw from an owner.",
            MessageKind::Transfer => "Moves tokens from the caller to another account.",
            MessageKind::Approve => "Sets the amount a spender may withdraw from the caller.",
            MessageKind::TransferFrom => "Moves tokens between accounts out of the allowance of the caller.",
        }
    }
}

fn items_of(kind: ItemKind) -> Vec<Item> {
    match kind {
        ItemKind::Enum => vec![
            ("Constructor", "A decoded constructor call."),
            ("Error", "The errors a message can fail with."),
            ("Event", "The events emitted by the token."),
            ("Message", "A decoded message call."),
        ],
        ItemKind::Fn => ConstructorKind::iter()
            .map(|kind| (kind.name(), kind.docs()))
            .chain(MessageKind::iter().map(|kind| (kind.name(), kind.docs())))
            .collect(),
        ItemKind::Struct => vec![
            ("Approval", "Emitted when an allowance is set."),
            ("Erc20", "The storage of the token."),
            ("Transfer", "Emitted when tokens move or are minted."),
        ],
        ItemKind::Trait => vec![
            ("SpreadLayout", "Loads the token from and stores it to contract storage."),
            ("Topics", "Lists the topics an event is indexed by."),
        ],
    }
}

/// Every item kind is present, even when it has no items.
pub fn manifest() -> Manifest {
    ItemKind::iter().map(|kind| (kind, items_of(kind))).collect()
}
