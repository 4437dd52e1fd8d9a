use codec::{Decode, Encode};
use contract_env::event::{signature_topic, topic_of};
use contract_env::{AccountId, Balance, Hash, Topics};

/// Emitted whenever tokens move, `from` is `None` when they are minted.
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct Transfer {
    pub from: Option<AccountId>,
    pub to: Option<AccountId>,
    pub value: Balance,
}

/// Emitted whenever an allowance is set with `approve`.
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct Approval {
    pub owner: Option<AccountId>,
    pub spender: Option<AccountId>,
    pub value: Balance,
}

#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub enum Event {
    Transfer(Transfer),
    Approval(Approval),
}

impl Topics for Event {
    fn topics(&self) -> Vec<Hash> {
        match self {
            Event::Transfer(Transfer { from, to, .. }) => {
                vec![signature_topic("Erc20::Transfer"), topic_of(from), topic_of(to)]
            }
            Event::Approval(Approval { owner, spender, .. }) => {
                vec![signature_topic("Erc20::Approval"), topic_of(owner), topic_of(spender)]
            }
        }
    }
}

impl From<Transfer> for Event {
    fn from(event: Transfer) -> Self {
        Event::Transfer(event)
    }
}

impl From<Approval> for Event {
    fn from(event: Approval) -> Self {
        Event::Approval(event)
    }
}
