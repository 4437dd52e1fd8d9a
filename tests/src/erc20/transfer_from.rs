use erc20::Error;

use super::common::*;
use crate::util::accounts::*;
use crate::util::constants::*;

fn before_each() -> (contract_env::Env, contract_env::AccountId) {
    let (env, token) = init(INIT_SUPPLY);
    approve(&env, token, ACCOUNTS.alice, ACCOUNTS.bob, ALLOWANCE).unwrap();
    (env, token)
}

#[test]
fn test_erc20_transfer_from() {
    let (env, token) = before_each();

    assert_eq!(
        transfer_from(&env, token, ACCOUNTS.bob, ACCOUNTS.alice, ACCOUNTS.charlie, 200),
        Ok(())
    );
    assert_balance!(&env, token, ACCOUNTS.alice, INIT_SUPPLY - 200);
    assert_balance!(&env, token, ACCOUNTS.charlie, 200);
    assert_balance!(&env, token, ACCOUNTS.bob, 0);
    assert_eq!(allowance(&env, token, ACCOUNTS.alice, ACCOUNTS.bob), ALLOWANCE - 200);
}

#[test]
fn test_erc20_transfer_from_whole_allowance() {
    let (env, token) = before_each();

    assert_eq!(
        transfer_from(&env, token, ACCOUNTS.bob, ACCOUNTS.alice, ACCOUNTS.bob, ALLOWANCE),
        Ok(())
    );
    assert_eq!(allowance(&env, token, ACCOUNTS.alice, ACCOUNTS.bob), 0);
    assert_eq!(
        transfer_from(&env, token, ACCOUNTS.bob, ACCOUNTS.alice, ACCOUNTS.bob, 1),
        Err(Error::InsufficientAllowance)
    );
}

#[test]
fn challenge_erc20_transfer_from_beyond_allowance() {
    let (env, token) = before_each();

    assert_eq!(
        transfer_from(&env, token, ACCOUNTS.bob, ACCOUNTS.alice, ACCOUNTS.charlie, ALLOWANCE + 1),
        Err(Error::InsufficientAllowance)
    );
    assert_eq!(allowance(&env, token, ACCOUNTS.alice, ACCOUNTS.bob), ALLOWANCE);
    assert_balance!(&env, token, ACCOUNTS.charlie, 0);
}

#[test]
fn challenge_erc20_transfer_from_without_approval() {
    let (env, token) = before_each();

    // Only bob has been approved.
    assert_eq!(
        transfer_from(&env, token, ACCOUNTS.charlie, ACCOUNTS.alice, ACCOUNTS.charlie, 1),
        Err(Error::InsufficientAllowance)
    );
}

#[test]
fn challenge_erc20_transfer_from_beyond_balance() {
    let (env, token) = init(INIT_SUPPLY);
    approve(&env, token, ACCOUNTS.eve, ACCOUNTS.bob, ALLOWANCE).unwrap();

    // Eve holds nothing, the allowance is kept as it was.
    assert_eq!(
        transfer_from(&env, token, ACCOUNTS.bob, ACCOUNTS.eve, ACCOUNTS.bob, 1),
        Err(Error::InsufficientBalance)
    );
    assert_eq!(allowance(&env, token, ACCOUNTS.eve, ACCOUNTS.bob), ALLOWANCE);
}

#[test]
fn challenge_erc20_allowance_is_checked_before_balance() {
    let (env, token) = init(INIT_SUPPLY);

    assert_eq!(
        transfer_from(&env, token, ACCOUNTS.bob, ACCOUNTS.eve, ACCOUNTS.bob, 1),
        Err(Error::InsufficientAllowance)
    );
}
