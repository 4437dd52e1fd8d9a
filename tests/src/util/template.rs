use erc20_playground::{Report, Runner, Scenario, ScenarioError};
use serde_json::{json, Value};

use super::accounts::OWNER;

/// Builds scenario JSON step by step, the same format the playground reads from files.
pub struct ScenarioTemplate {
    config: Value,
    steps: Vec<Value>,
}

impl ScenarioTemplate {
    pub fn new() -> Self {
        ScenarioTemplate {
            config: json!({}),
            steps: Vec::new(),
        }
    }

    pub fn set_config(&mut self, config: Value) {
        self.config = config;
    }

    pub fn push_deploy(&mut self, caller: &str, init_supply: Value) {
        self.steps.push(json!({
            "action": "deploy",
            "caller": caller,
            "args": { "init_supply": init_supply },
        }));
    }

    pub fn push_call(&mut self, caller: &str, message: &str, args: Value) {
        self.steps.push(json!({
            "action": "call",
            "caller": caller,
            "message": message,
            "args": args,
        }));
    }

    pub fn push_call_expecting(&mut self, caller: &str, message: &str, args: Value, expect: Value) {
        self.push_call(caller, message, args);
        if let Some(step) = self.steps.last_mut() {
            step["expect"] = expect;
        }
    }

    pub fn push_advance_block(&mut self, blocks: u32) {
        self.steps.push(json!({ "action": "advance_block", "blocks": blocks }));
    }

    pub fn as_json(&self) -> Value {
        json!({
            "config": self.config,
            "steps": self.steps,
        })
    }
}

/// A template with a token deployed by the owner.
pub fn init(init_supply: Value) -> ScenarioTemplate {
    let mut template = ScenarioTemplate::new();
    template.push_deploy(OWNER, init_supply);
    template
}

fn run(scenario_json: Value) -> Result<Report, ScenarioError> {
    let scenario: Scenario = serde_json::from_value(scenario_json).expect("Scenario should be valid JSON.");
    Runner::run(&scenario)
}

pub fn test_scenario(scenario_json: Value) -> Report {
    match run(scenario_json) {
        Ok(report) => report,
        Err(err) => panic!("Scenario should pass, but failed: {}", err),
    }
}

pub fn challenge_scenario(scenario_json: Value) -> ScenarioError {
    match run(scenario_json) {
        Ok(report) => panic!("Scenario should fail, but passed {} steps.", report.steps.len()),
        Err(err) => err,
    }
}
