use contract_env::{BlockNumber, EngineConfig, Timestamp};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A scripted session against a fresh engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub config: EngineConfig,
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    /// Instantiates a token, later calls may refer to it by `label`.
    Deploy {
        caller: String,
        #[serde(default = "default_constructor")]
        constructor: String,
        #[serde(default)]
        args: Value,
        #[serde(default)]
        label: Option<String>,
    },
    /// Calls a message, `contract` defaults to the most recently deployed token.
    Call {
        caller: String,
        #[serde(default)]
        contract: Option<String>,
        message: String,
        #[serde(default)]
        args: Value,
        #[serde(default)]
        expect: Option<Expect>,
    },
    AdvanceBlock {
        #[serde(default = "default_blocks")]
        blocks: Value,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expect {
    Ok,
    Value(Value),
    Error(String),
}

fn default_constructor() -> String {
    String::from("new")
}

fn default_blocks() -> Value {
    Value::from(1)
}

impl Scenario {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Replaces the engine config of the scenario, then applies the single field overrides on top.
    pub fn apply_overrides(
        &mut self,
        config: Option<EngineConfig>,
        block_number: Option<BlockNumber>,
        block_time: Option<Timestamp>,
    ) {
        if let Some(config) = config {
            self.config = config;
        }
        if let Some(block_number) = block_number {
            self.config.block_number = block_number;
        }
        if let Some(block_time) = block_time {
            self.config.block_time = block_time;
        }
    }
}
