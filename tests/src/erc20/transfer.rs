use erc20::{Error, Event, Transfer};

use super::common::*;
use crate::util::accounts::*;
use crate::util::constants::*;

#[test]
fn test_erc20_new_mints_to_caller() {
    let (env, token) = init(INIT_SUPPLY);

    assert_eq!(total_supply(&env, token), INIT_SUPPLY);
    assert_balance!(&env, token, ACCOUNTS.alice, INIT_SUPPLY);
    assert_balance!(&env, token, ACCOUNTS.bob, 0);
    assert_eq!(
        events(&env),
        vec![Event::Transfer(Transfer {
            from: None,
            to: Some(ACCOUNTS.alice),
            value: INIT_SUPPLY,
        })]
    );
}

#[test]
fn test_erc20_transfer() {
    let (env, token) = init(INIT_SUPPLY);

    assert_eq!(transfer(&env, token, ACCOUNTS.alice, ACCOUNTS.bob, TRANSFER_VALUE), Ok(()));
    assert_balance!(&env, token, ACCOUNTS.alice, INIT_SUPPLY - TRANSFER_VALUE);
    assert_balance!(&env, token, ACCOUNTS.bob, TRANSFER_VALUE);

    // The receiver can pass the tokens on.
    assert_eq!(transfer(&env, token, ACCOUNTS.bob, ACCOUNTS.charlie, TRANSFER_VALUE), Ok(()));
    assert_balance!(&env, token, ACCOUNTS.bob, 0);
    assert_balance!(&env, token, ACCOUNTS.charlie, TRANSFER_VALUE);
    assert_eq!(total_supply(&env, token), INIT_SUPPLY);

    assert_eq!(
        events(&env).last(),
        Some(&Event::Transfer(Transfer {
            from: Some(ACCOUNTS.bob),
            to: Some(ACCOUNTS.charlie),
            value: TRANSFER_VALUE,
        }))
    );
}

#[test]
fn test_erc20_transfer_whole_balance_and_zero() {
    let (env, token) = init(INIT_SUPPLY);

    assert_eq!(transfer(&env, token, ACCOUNTS.alice, ACCOUNTS.bob, INIT_SUPPLY), Ok(()));
    assert_balance!(&env, token, ACCOUNTS.alice, 0);

    assert_eq!(transfer(&env, token, ACCOUNTS.alice, ACCOUNTS.bob, 0), Ok(()));
    assert_balance!(&env, token, ACCOUNTS.bob, INIT_SUPPLY);
    assert_eq!(events(&env).len(), 3);
}

#[test]
fn test_erc20_transfer_to_self() {
    let (env, token) = init(INIT_SUPPLY);

    assert_eq!(transfer(&env, token, ACCOUNTS.alice, ACCOUNTS.alice, TRANSFER_VALUE), Ok(()));
    assert_balance!(&env, token, ACCOUNTS.alice, INIT_SUPPLY);
}

#[test]
fn challenge_erc20_transfer_insufficient_balance() {
    let (env, token) = init(INIT_SUPPLY);

    assert_eq!(
        transfer(&env, token, ACCOUNTS.alice, ACCOUNTS.bob, INIT_SUPPLY + 1),
        Err(Error::InsufficientBalance)
    );
    assert_balance!(&env, token, ACCOUNTS.alice, INIT_SUPPLY);
    assert_balance!(&env, token, ACCOUNTS.bob, 0);
    // Only the mint is left, the failed call emitted nothing.
    assert_eq!(events(&env).len(), 1);
}

#[test]
fn challenge_erc20_transfer_from_empty_account() {
    let (env, token) = init(INIT_SUPPLY);

    assert_eq!(
        transfer(&env, token, ACCOUNTS.eve, ACCOUNTS.alice, 1),
        Err(Error::InsufficientBalance)
    );
}
