use std::str::FromStr;

use contract_env::{AccountId, Balance, BlockNumber, DefaultAccounts};
use serde_json::{json, Value};

use crate::error::ScenarioError;

macro_rules! gen_json_to_uint_fn {
    ($name:ident, $u_type:ty) => {
        pub fn $name(step: usize, key: &str, obj: &Value) -> Result<$u_type, ScenarioError> {
            let value_error = |val: String| ScenarioError::JsonValueError {
                step,
                key: key.to_string(),
                val,
            };

            if let Some(val) = obj.as_u64() {
                <$u_type>::try_from(val).map_err(|_| value_error(format!("{}, but got {}", stringify!($u_type), val)))
            } else if let Some(val) = obj.as_str() {
                // Support string format uint, for example 1_000_000_000
                let number_str = val.replace('_', "");
                number_str
                    .parse::<$u_type>()
                    .map_err(|_| value_error(format!("{}, but got {}", stringify!($u_type), val)))
            } else {
                Err(value_error(String::from(stringify!($u_type))))
            }
        }
    };
}

gen_json_to_uint_fn!(json_to_balance, Balance);
gen_json_to_uint_fn!(json_to_block_number, BlockNumber);

/// Resolves an account from a well known name like `alice` or a hex account id.
pub fn json_to_account(
    step: usize,
    key: &str,
    obj: &Value,
    accounts: &DefaultAccounts,
) -> Result<AccountId, ScenarioError> {
    let val = obj.as_str().ok_or_else(|| ScenarioError::JsonValueError {
        step,
        key: key.to_string(),
        val: String::from("an account name or a hex account id"),
    })?;

    match accounts.by_name(val) {
        Some(account) => Ok(account),
        None => AccountId::from_str(val).map_err(|_| ScenarioError::InvalidAccount {
            step,
            key: key.to_string(),
            val: val.to_string(),
        }),
    }
}

/// Prints well known accounts by name, everything else as hex.
pub fn account_to_json(account: &AccountId, accounts: &DefaultAccounts) -> Value {
    match accounts.name_of(account) {
        Some(name) => json!(name),
        None => json!(account.to_hex()),
    }
}

/// Balances beyond `u64::MAX` are printed as strings.
pub fn balance_to_json(balance: Balance) -> Value {
    match u64::try_from(balance) {
        Ok(val) => json!(val),
        Err(_) => json!(balance.to_string()),
    }
}
