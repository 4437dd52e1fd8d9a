use erc20_playground::ScenarioError;
use serde_json::json;

use crate::util::accounts::*;
use crate::util::constants::*;
use crate::util::template::*;

test_with_scenario!(test_erc20_tutorial, "tutorial.json");

#[test]
fn test_erc20_scenario_transfer() {
    let mut template = init(json!("1_000_000"));
    template.push_call_expecting(
        OWNER,
        "transfer",
        json!({ "to": RECEIVER, "value": TRANSFER_VALUE as u64 }),
        json!("ok"),
    );
    template.push_call_expecting(
        OWNER,
        "balance_of",
        json!({ "owner": OWNER }),
        json!({ "value": (INIT_SUPPLY - TRANSFER_VALUE) as u64 }),
    );
    template.push_call_expecting(
        RECEIVER,
        "balance_of",
        json!({ "owner": RECEIVER }),
        json!({ "value": TRANSFER_VALUE as u64 }),
    );

    let report = test_scenario(template.as_json());
    assert_eq!(report.steps.len(), 4);
    assert_eq!(report.steps[1].output, json!("ok"));
    assert_eq!(
        report.steps[1].events,
        vec![json!({
            "event": "Transfer",
            "from": OWNER,
            "to": RECEIVER,
            "value": TRANSFER_VALUE as u64,
        })]
    );
    assert_eq!(report.steps[3].output, json!(TRANSFER_VALUE as u64));
}

#[test]
fn test_erc20_scenario_failed_call_keeps_going() {
    let mut template = init(json!(10));
    template.push_call_expecting(
        RECEIVER,
        "transfer",
        json!({ "to": OWNER, "value": 1 }),
        json!({ "error": "InsufficientBalance" }),
    );
    template.push_call_expecting(OWNER, "total_supply", json!({}), json!({ "value": 10 }));

    let report = test_scenario(template.as_json());
    assert_eq!(report.steps[1].output, json!({ "error": "InsufficientBalance" }));
    assert!(report.steps[1].events.is_empty());
    assert!(!report.debug_messages.is_empty());
}

#[test]
fn test_erc20_scenario_allowance() {
    let mut template = init(json!(INIT_SUPPLY as u64));
    template.push_call_expecting(
        OWNER,
        "approve",
        json!({ "spender": SPENDER, "value": ALLOWANCE as u64 }),
        json!("ok"),
    );
    template.push_advance_block(2);
    template.push_call_expecting(
        SPENDER,
        "transfer_from",
        json!({ "from": OWNER, "to": THIRD_PARTY, "value": "400" }),
        json!("ok"),
    );
    template.push_call_expecting(
        THIRD_PARTY,
        "allowance",
        json!({ "owner": OWNER, "spender": SPENDER }),
        json!({ "value": 100 }),
    );

    let report = test_scenario(template.as_json());
    assert_eq!(report.steps[2].output["block_number"], json!(2));
}

#[test]
fn challenge_erc20_scenario_wrong_expectation() {
    let mut template = init(json!(INIT_SUPPLY as u64));
    template.push_call_expecting(
        OWNER,
        "transfer",
        json!({ "to": RECEIVER, "value": (INIT_SUPPLY + 1) as u64 }),
        json!("ok"),
    );

    let err = challenge_scenario(template.as_json());
    assert!(matches!(err, ScenarioError::ExpectationFailed { step: 1, .. }));
}

#[test]
fn challenge_erc20_scenario_unknown_names() {
    let mut template = init(json!(1));
    template.push_call(OWNER, "mint", json!({}));
    let err = challenge_scenario(template.as_json());
    assert!(matches!(err, ScenarioError::UnknownMessage { step: 1, .. }));

    let mut template = init(json!(1));
    template.push_call(OWNER, "transfer", json!({ "to": "mallory", "value": 1 }));
    let err = challenge_scenario(template.as_json());
    assert!(matches!(err, ScenarioError::InvalidAccount { step: 1, .. }));

    let mut template = init(json!(1));
    template.push_call(OWNER, "total_supply", json!({}));
    template.push_call(OWNER, "transfer", json!({ "to": RECEIVER, "value": "lots" }));
    let err = challenge_scenario(template.as_json());
    assert!(matches!(err, ScenarioError::JsonValueError { step: 2, ref key, .. } if key == "value"));

    let mut template = init(json!(1));
    template.push_call(OWNER, "approve", json!({ "spender": SPENDER }));
    let err = challenge_scenario(template.as_json());
    assert!(matches!(err, ScenarioError::MissingArg { step: 1, .. }));
}

#[test]
fn challenge_erc20_scenario_without_deploy() {
    let mut template = ScenarioTemplate::new();
    template.push_call(OWNER, "total_supply", json!({}));

    let err = challenge_scenario(template.as_json());
    assert!(matches!(err, ScenarioError::NoContractDeployed { step: 0 }));
}
