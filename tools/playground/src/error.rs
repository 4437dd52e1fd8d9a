use erc20::DispatchError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScenarioError {
    #[error("[step {step}] {source}")]
    Dispatch { step: usize, source: DispatchError },
    #[error("[step {step}] The message {name} is undefined")]
    UnknownMessage { step: usize, name: String },
    #[error("[step {step}] The constructor {name} is undefined")]
    UnknownConstructor { step: usize, name: String },
    #[error("[step {step}] The error {name} is undefined")]
    UnknownError { step: usize, name: String },
    #[error("[step {step}] No contract is labeled {name}")]
    UnknownContract { step: usize, name: String },
    #[error("[step {step}] No contract has been deployed yet")]
    NoContractDeployed { step: usize },
    #[error("[step {step}] The argument {key} is missing")]
    MissingArg { step: usize, key: String },
    #[error("[step {step}] The {key} should be {val}")]
    JsonValueError { step: usize, key: String, val: String },
    #[error("[step {step}] The {key} {val} is neither a known account name nor a hex account id")]
    InvalidAccount { step: usize, key: String, val: String },
    #[error("[step {step}] Decoding the output failed: {err}")]
    OutputDecodingError { step: usize, err: String },
    #[error("[step {step}] Expected {expected}, but got {actual}")]
    ExpectationFailed {
        step: usize,
        expected: String,
        actual: String,
    },
}
