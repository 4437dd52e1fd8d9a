use contract_env::{AccountId, Balance, Env};
use contract_storage::executor::{call, call_mut, instantiate};
use erc20::{Erc20, Error, Event};

/// A fresh engine with a token whose whole supply belongs to alice.
pub fn init(init_supply: Balance) -> (Env, AccountId) {
    let env = Env::default();
    env.set_caller(env.default_accounts().alice);
    let token = instantiate(&env, |env| Erc20::new(env, init_supply));
    (env, token)
}

pub fn total_supply(env: &Env, token: AccountId) -> Balance {
    call(env, token, |token: &Erc20| token.total_supply()).expect("The token should exist.")
}

pub fn allowance(env: &Env, token: AccountId, owner: AccountId, spender: AccountId) -> Balance {
    call(env, token, |token: &Erc20| token.allowance(owner, spender)).expect("The token should exist.")
}

pub fn transfer(env: &Env, token: AccountId, caller: AccountId, to: AccountId, value: Balance) -> Result<(), Error> {
    env.set_caller(caller);
    call_mut(env, token, |token: &mut Erc20| token.transfer(to, value)).expect("The token should exist.")
}

pub fn approve(env: &Env, token: AccountId, caller: AccountId, spender: AccountId, value: Balance) -> Result<(), Error> {
    env.set_caller(caller);
    call_mut(env, token, |token: &mut Erc20| token.approve(spender, value)).expect("The token should exist.")
}

pub fn transfer_from(
    env: &Env,
    token: AccountId,
    caller: AccountId,
    from: AccountId,
    to: AccountId,
    value: Balance,
) -> Result<(), Error> {
    env.set_caller(caller);
    call_mut(env, token, |token: &mut Erc20| token.transfer_from(from, to, value)).expect("The token should exist.")
}

pub fn events(env: &Env) -> Vec<Event> {
    env.recorded_events()
        .iter()
        .map(|event| event.decode::<Event>().expect("Every event should be an erc20 event."))
        .collect()
}
