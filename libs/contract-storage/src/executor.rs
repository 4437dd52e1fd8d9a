//! Runs constructors and messages of a contract against its storage.

use core::fmt::Debug;

use contract_env::{AccountId, Env, EnvError, Key};
use log::{debug, warn};

use crate::traits::{KeyPtr, SpreadLayout};

/// The key the root of every contract storage is laid out from.
pub const CONTRACT_ROOT_KEY: Key = Key::new([0u8; 32]);

fn root_ptr() -> KeyPtr {
    KeyPtr::from(CONTRACT_ROOT_KEY)
}

/// Deploys a new contract on behalf of the current caller and returns its account.
pub fn instantiate<C, F>(env: &Env, constructor: F) -> AccountId
where
    C: SpreadLayout,
    F: FnOnce(&Env) -> C,
{
    let deployer = env.caller();
    let account = env.allocate_contract(deployer);
    let _frame = env.enter_frame(deployer, account);

    let contract = constructor(env);
    contract.push_spread(&mut root_ptr(), env);
    debug!("Instantiated contract {} by {}", account, deployer);

    account
}

/// Runs a read-only message, nothing is written back to storage.
pub fn call<C, R, F>(env: &Env, callee: AccountId, f: F) -> Result<R, EnvError>
where
    C: SpreadLayout,
    F: FnOnce(&C) -> R,
{
    env.ensure_contract(&callee)?;
    let result = env.with_frame(env.caller(), callee, |env| {
        let contract = C::pull_spread(&mut root_ptr(), env);
        f(&contract)
    });
    Ok(result)
}

/// Runs a mutating message.
///
/// The contract state is pushed only if the message returns `Ok`, on `Err`
/// the events emitted by the message are dropped as well.
pub fn call_mut<C, T, E, F>(env: &Env, callee: AccountId, f: F) -> Result<Result<T, E>, EnvError>
where
    C: SpreadLayout,
    E: Debug,
    F: FnOnce(&mut C) -> Result<T, E>,
{
    env.ensure_contract(&callee)?;
    let frame = env.enter_frame(env.caller(), callee);

    let mut contract = C::pull_spread(&mut root_ptr(), env);
    let result = f(&mut contract);
    match &result {
        Ok(_) => contract.push_spread(&mut root_ptr(), env),
        Err(err) => {
            warn!("Call to {} reverted: {:?}", callee, err);
            frame.revert();
        }
    }

    Ok(result)
}
