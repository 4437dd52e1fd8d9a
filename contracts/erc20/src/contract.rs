use contract_env::{AccountId, Balance, Env};
use contract_storage::traits::{KeyPtr, SpreadLayout};
use contract_storage::HashMap;
use log::debug;

use crate::error::{Error, Result};
use crate::events::{Approval, Event, Transfer};

/// The storage of the ERC20 token.
#[derive(Debug)]
pub struct Erc20 {
    env: Env,
    total_supply: Balance,
    balances: HashMap<AccountId, Balance>,
    /// Balances that are spendable by non-owners: (owner, spender) -> allowed
    allowances: HashMap<(AccountId, AccountId), Balance>,
}

impl Erc20 {
    /// Mints `init_supply` tokens to the caller.
    pub fn new(env: &Env, init_supply: Balance) -> Self {
        let caller = env.caller();
        let mut balances = HashMap::new();
        balances.insert(caller, init_supply);

        env.emit_event(Event::from(Transfer {
            from: None,
            to: Some(caller),
            value: init_supply,
        }));
        debug!("Minted {} tokens to {}", init_supply, caller);

        Erc20 {
            env: env.clone(),
            total_supply: init_supply,
            balances,
            allowances: HashMap::new(),
        }
    }

    /// A token with an empty supply.
    pub fn default(env: &Env) -> Self {
        Self::new(env, 0)
    }

    pub fn total_supply(&self) -> Balance {
        self.total_supply
    }

    pub fn balance_of(&self, owner: AccountId) -> Balance {
        self.balance_of_or_zero(&owner)
    }

    /// The amount `spender` may still withdraw from `owner`.
    pub fn allowance(&self, owner: AccountId, spender: AccountId) -> Balance {
        self.allowance_of_or_zero(&owner, &spender)
    }

    /// Moves `value` tokens from the caller to `to`.
    pub fn transfer(&mut self, to: AccountId, value: Balance) -> Result<()> {
        let from = self.env.caller();
        self.transfer_from_to(from, to, value)
    }

    /// Allows `spender` to withdraw up to `value` tokens from the caller, replacing any previous allowance.
    pub fn approve(&mut self, spender: AccountId, value: Balance) -> Result<()> {
        let owner = self.env.caller();
        self.allowances.insert((owner, spender), value);

        self.env.emit_event(Event::from(Approval {
            owner: Some(owner),
            spender: Some(spender),
            value,
        }));

        Ok(())
    }

    /// Moves `value` tokens from `from` to `to` out of the allowance granted to the caller.
    ///
    /// Nothing changes when either the allowance or the balance of `from` is
    /// too low, the allowance is checked first.
    pub fn transfer_from(&mut self, from: AccountId, to: AccountId, value: Balance) -> Result<()> {
        let caller = self.env.caller();
        let allowance = self.allowance_of_or_zero(&from, &caller);
        if allowance < value {
            self.env.debug_message(&format!(
                "{} may spend {} of {}, requested {}",
                caller, allowance, from, value
            ));
            return Err(Error::InsufficientAllowance);
        }
        if self.balance_of_or_zero(&from) < value {
            return Err(Error::InsufficientBalance);
        }

        self.allowances.insert((from, caller), allowance - value);
        self.transfer_from_to(from, to, value)
    }

    fn transfer_from_to(&mut self, from: AccountId, to: AccountId, value: Balance) -> Result<()> {
        let from_balance = self.balance_of_or_zero(&from);
        if from_balance < value {
            self.env
                .debug_message(&format!("{} holds {}, requested {}", from, from_balance, value));
            return Err(Error::InsufficientBalance);
        }

        self.balances.insert(from, from_balance - value);
        // Read after the debit so that a transfer to oneself is a no-op.
        let to_balance = self.balance_of_or_zero(&to);
        self.balances.insert(to, to_balance + value);

        self.env.emit_event(Event::from(Transfer {
            from: Some(from),
            to: Some(to),
            value,
        }));
        debug!("Transferred {} from {} to {}", value, from, to);

        Ok(())
    }

    fn balance_of_or_zero(&self, owner: &AccountId) -> Balance {
        self.balances.get(owner).unwrap_or(0)
    }

    fn allowance_of_or_zero(&self, owner: &AccountId, spender: &AccountId) -> Balance {
        self.allowances.get(&(*owner, *spender)).unwrap_or(0)
    }
}

impl SpreadLayout for Erc20 {
    const FOOTPRINT: u64 = <Balance as SpreadLayout>::FOOTPRINT
        + <HashMap<AccountId, Balance> as SpreadLayout>::FOOTPRINT
        + <HashMap<(AccountId, AccountId), Balance> as SpreadLayout>::FOOTPRINT;

    fn pull_spread(ptr: &mut KeyPtr, env: &Env) -> Self {
        Erc20 {
            env: env.clone(),
            total_supply: SpreadLayout::pull_spread(ptr, env),
            balances: SpreadLayout::pull_spread(ptr, env),
            allowances: SpreadLayout::pull_spread(ptr, env),
        }
    }

    fn push_spread(&self, ptr: &mut KeyPtr, env: &Env) {
        self.total_supply.push_spread(ptr, env);
        self.balances.push_spread(ptr, env);
        self.allowances.push_spread(ptr, env);
    }

    fn clear_spread(&self, ptr: &mut KeyPtr, env: &Env) {
        self.total_supply.clear_spread(ptr, env);
        self.balances.clear_spread(ptr, env);
        self.allowances.clear_spread(ptr, env);
    }
}
