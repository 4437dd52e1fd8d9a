use codec::{Decode, Encode};
use contract_env::{Balance, Env};
use erc20::{deploy, dispatch, Constructor, DispatchError, Error, Message, MessageKind};

use crate::util::accounts::*;
use crate::util::constants::*;

fn query(env: &Env, token: contract_env::AccountId, message: Message) -> Balance {
    let output = dispatch(env, token, &message.encode()).expect("The query should be dispatched.");
    Balance::decode(&mut output.as_slice()).expect("A query should return a balance.")
}

fn execute(env: &Env, token: contract_env::AccountId, message: Message) -> Result<(), Error> {
    let output = dispatch(env, token, &message.encode()).expect("The message should be dispatched.");
    <Result<(), Error>>::decode(&mut output.as_slice()).expect("A message should return a result.")
}

#[test]
fn test_erc20_dispatch_flow() {
    let env = Env::default();
    env.set_caller(ACCOUNTS.alice);
    let token = deploy(&env, &Constructor::New { init_supply: INIT_SUPPLY }.encode()).unwrap();

    assert_eq!(query(&env, token, Message::TotalSupply), INIT_SUPPLY);
    assert_eq!(
        execute(&env, token, Message::Transfer { to: ACCOUNTS.bob, value: TRANSFER_VALUE }),
        Ok(())
    );
    assert_eq!(
        execute(&env, token, Message::Approve { spender: ACCOUNTS.bob, value: ALLOWANCE }),
        Ok(())
    );

    env.set_caller(ACCOUNTS.bob);
    assert_eq!(
        execute(
            &env,
            token,
            Message::TransferFrom {
                from: ACCOUNTS.alice,
                to: ACCOUNTS.charlie,
                value: ALLOWANCE + 1,
            }
        ),
        Err(Error::InsufficientAllowance)
    );
    assert_eq!(
        execute(
            &env,
            token,
            Message::TransferFrom {
                from: ACCOUNTS.alice,
                to: ACCOUNTS.charlie,
                value: ALLOWANCE,
            }
        ),
        Ok(())
    );

    assert_eq!(query(&env, token, Message::BalanceOf { owner: ACCOUNTS.alice }), INIT_SUPPLY - TRANSFER_VALUE - ALLOWANCE);
    assert_eq!(query(&env, token, Message::BalanceOf { owner: ACCOUNTS.charlie }), ALLOWANCE);
    assert_eq!(
        query(&env, token, Message::Allowance { owner: ACCOUNTS.alice, spender: ACCOUNTS.bob }),
        0
    );
}

#[test]
fn test_erc20_dispatch_default_constructor() {
    let env = Env::default();
    let token = deploy(&env, &Constructor::Default.encode()).unwrap();

    assert_eq!(query(&env, token, Message::TotalSupply), 0);
    assert_eq!(
        execute(&env, token, Message::Transfer { to: ACCOUNTS.bob, value: 1 }),
        Err(Error::InsufficientBalance)
    );
}

#[test]
fn test_erc20_tokens_are_isolated() {
    let env = Env::default();
    env.set_caller(ACCOUNTS.alice);
    let first = deploy(&env, &Constructor::New { init_supply: INIT_SUPPLY }.encode()).unwrap();
    let second = deploy(&env, &Constructor::New { init_supply: 1 }.encode()).unwrap();
    assert_ne!(first, second);

    execute(&env, first, Message::Transfer { to: ACCOUNTS.bob, value: TRANSFER_VALUE }).unwrap();

    assert_eq!(query(&env, first, Message::BalanceOf { owner: ACCOUNTS.bob }), TRANSFER_VALUE);
    assert_eq!(query(&env, second, Message::BalanceOf { owner: ACCOUNTS.bob }), 0);
    assert_eq!(query(&env, second, Message::TotalSupply), 1);
}

#[test]
fn challenge_erc20_dispatch_malformed_input() {
    let env = Env::default();
    let token = deploy(&env, &Constructor::Default.encode()).unwrap();

    assert!(matches!(
        dispatch(&env, token, &[0x01, 0x02]),
        Err(DispatchError::MissingSelector { len: 2 })
    ));
    assert!(matches!(
        dispatch(&env, token, &[0xde, 0xad, 0xbe, 0xef]),
        Err(DispatchError::UnknownSelector { .. })
    ));

    // The selector is right but the account is cut short.
    let mut input = MessageKind::BalanceOf.selector().as_ref().to_vec();
    input.extend_from_slice(&[0x01; 16]);
    assert!(matches!(
        dispatch(&env, token, &input),
        Err(DispatchError::InvalidArgs { .. })
    ));

    // Trailing bytes are rejected too.
    let mut input = Message::TotalSupply.encode();
    input.push(0x00);
    assert!(matches!(
        dispatch(&env, token, &input),
        Err(DispatchError::InvalidArgs { .. })
    ));
}

#[test]
fn challenge_erc20_dispatch_to_unknown_contract() {
    let env = Env::default();

    assert!(matches!(
        dispatch(&env, ACCOUNTS.django, &Message::TotalSupply.encode()),
        Err(DispatchError::Env(contract_env::EnvError::ContractNotFound { .. }))
    ));
}
