use contract_env::Balance;

pub const INIT_SUPPLY: Balance = 1_000_000;
pub const TRANSFER_VALUE: Balance = 1_000;
pub const ALLOWANCE: Balance = 500;

// The scenario files shared with the playground.
pub const SCENARIO_DIR: &str = "../tools/playground/scenarios";
