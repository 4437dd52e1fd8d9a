use contract_env::{AccountId, Env};
use contract_storage::collections::HashMap;
use contract_storage::executor::{call, call_mut, instantiate};
use erc20::{Erc20, Error};

use crate::util::accounts::*;
use crate::util::constants::*;

fn deploy(env: &Env) -> AccountId {
    env.set_caller(ACCOUNTS.alice);
    instantiate(env, |env| Erc20::new(env, INIT_SUPPLY))
}

#[test]
fn test_deploy_writes_only_occupied_cells() {
    let env = Env::default();
    let token = deploy(&env);

    // The supply, two map headers, and alice's key and balance.
    assert_eq!(env.count_used_storage_cells(&token), 5);
    assert_eq!(env.count_writes(&token), 5);
    assert_eq!(env.count_reads(&token), 0);
}

#[test]
fn test_query_reads_lazily() {
    let env = Env::default();
    let token = deploy(&env);

    let reads_before = env.count_reads(&token);
    assert_eq!(
        call(&env, token, |token: &Erc20| token.balance_of(ACCOUNTS.alice)),
        Ok(INIT_SUPPLY)
    );
    // Three root cells are pulled and a single balance is loaded.
    assert_eq!(env.count_reads(&token) - reads_before, 4);

    let writes_before = env.count_writes(&token);
    call(&env, token, |token: &Erc20| token.allowance(ACCOUNTS.alice, ACCOUNTS.bob)).unwrap();
    assert_eq!(env.count_writes(&token), writes_before);
}

#[test]
fn test_transfer_grows_storage() {
    let env = Env::default();
    let token = deploy(&env);

    call_mut(&env, token, |token: &mut Erc20| token.transfer(ACCOUNTS.bob, TRANSFER_VALUE))
        .unwrap()
        .unwrap();
    assert_eq!(env.count_used_storage_cells(&token), 7);

    // Paying bob again only rewrites existing cells.
    call_mut(&env, token, |token: &mut Erc20| token.transfer(ACCOUNTS.bob, TRANSFER_VALUE))
        .unwrap()
        .unwrap();
    assert_eq!(env.count_used_storage_cells(&token), 7);
}

#[test]
fn challenge_failed_message_writes_nothing() {
    let env = Env::default();
    let token = deploy(&env);
    let writes_before = env.count_writes(&token);
    let events_before = env.recorded_events().len();

    env.set_caller(ACCOUNTS.bob);
    let result = call_mut(&env, token, |token: &mut Erc20| {
        token.approve(ACCOUNTS.charlie, ALLOWANCE)?;
        token.transfer(ACCOUNTS.charlie, 1)
    });

    assert_eq!(result, Ok(Err(Error::InsufficientBalance)));
    assert_eq!(env.count_writes(&token), writes_before);
    // The approval emitted before the failure is dropped with it.
    assert_eq!(env.recorded_events().len(), events_before);
    assert_eq!(
        call(&env, token, |token: &Erc20| token.allowance(ACCOUNTS.bob, ACCOUNTS.charlie)),
        Ok(0)
    );
}

#[test]
fn test_contracts_keep_separate_storage() {
    let env = Env::default();
    let first = deploy(&env);
    let second = deploy(&env);

    call_mut(&env, first, |token: &mut Erc20| token.transfer(ACCOUNTS.bob, TRANSFER_VALUE))
        .unwrap()
        .unwrap();

    assert_eq!(env.count_used_storage_cells(&first), 7);
    assert_eq!(env.count_used_storage_cells(&second), 5);
    assert_balance!(&env, second, ACCOUNTS.alice, INIT_SUPPLY);
}

#[test]
fn test_standalone_map_under_executor() {
    let env = Env::default();
    let counter = instantiate(&env, |_| {
        let mut map = HashMap::<AccountId, u32>::new();
        map.insert(ACCOUNTS.alice, 1);
        map
    });

    call_mut(&env, counter, |map: &mut HashMap<AccountId, u32>| -> Result<(), ()> {
        *map.entry(ACCOUNTS.alice).or_insert(0) += 1;
        map.insert(ACCOUNTS.bob, 7);
        Ok(())
    })
    .unwrap()
    .unwrap();

    let snapshot = call(&env, counter, |map: &HashMap<AccountId, u32>| {
        map.iter().collect::<Vec<_>>()
    })
    .unwrap();
    assert_eq!(snapshot, vec![(ACCOUNTS.alice, 2), (ACCOUNTS.bob, 7)]);
}
