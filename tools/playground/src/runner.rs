use std::collections::BTreeMap;
use std::str::FromStr;

use codec::{Decode, Encode};
use contract_env::{AccountId, Balance, DefaultAccounts, EngineConfig, Env};
use erc20::{Constructor, ConstructorKind, Error, Event, Message, MessageKind};
use log::{debug, info};
use serde::Serialize;
use serde_json::{json, Value};

use crate::error::ScenarioError;
use crate::scenario::{Expect, Scenario, Step};
use crate::util::{account_to_json, balance_to_json, json_to_account, json_to_balance, json_to_block_number};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepOutcome {
    pub step: usize,
    pub action: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caller: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    pub output: Value,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub steps: Vec<StepOutcome>,
    pub contracts: BTreeMap<String, String>,
    pub debug_messages: Vec<String>,
}

/// The decoded return value of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Output {
    Value(Balance),
    Done(Result<(), Error>),
}

/// Drives tokens deployed on an engine step by step.
pub struct Runner {
    env: Env,
    accounts: DefaultAccounts,
    contracts: BTreeMap<String, AccountId>,
    last_deployed: Option<AccountId>,
}

impl Runner {
    pub fn new(config: EngineConfig) -> Self {
        let env = Env::new(config);
        let accounts = env.default_accounts();
        Runner {
            env,
            accounts,
            contracts: BTreeMap::new(),
            last_deployed: None,
        }
    }

    /// Runs every step of `scenario` on a fresh engine, stopping at the first failing step.
    pub fn run(scenario: &Scenario) -> Result<Report, ScenarioError> {
        let mut runner = Runner::new(scenario.config.clone());
        let mut steps = Vec::with_capacity(scenario.steps.len());
        for (index, step) in scenario.steps.iter().enumerate() {
            steps.push(runner.run_step(index, step)?);
        }
        info!("Scenario finished after {} steps", steps.len());

        Ok(runner.report(steps))
    }

    pub fn env(&self) -> &Env {
        &self.env
    }

    pub fn contract(&self, label: &str) -> Option<AccountId> {
        self.contracts.get(label).copied()
    }

    pub fn report(&self, steps: Vec<StepOutcome>) -> Report {
        Report {
            steps,
            contracts: self
                .contracts
                .iter()
                .map(|(label, account)| (label.clone(), account.to_hex()))
                .collect(),
            debug_messages: self.env.debug_messages(),
        }
    }

    pub fn run_step(&mut self, step: usize, action: &Step) -> Result<StepOutcome, ScenarioError> {
        let events_before = self.env.recorded_events().len();
        let mut outcome = match action {
            Step::Deploy {
                caller,
                constructor,
                args,
                label,
            } => self.deploy(step, caller, constructor, args, label.as_deref())?,
            Step::Call {
                caller,
                contract,
                message,
                args,
                expect,
            } => self.call(step, caller, contract.as_deref(), message, args, expect.as_ref())?,
            Step::AdvanceBlock { blocks } => {
                let blocks = json_to_block_number(step, "blocks", blocks)?;
                self.env.advance_blocks(blocks);
                StepOutcome {
                    step,
                    action: "advance_block",
                    caller: None,
                    target: None,
                    output: json!({
                        "block_number": self.env.block_number(),
                        "block_timestamp": self.env.block_timestamp(),
                    }),
                    events: Vec::new(),
                }
            }
        };

        outcome.events = self.env.recorded_events()[events_before..]
            .iter()
            .map(|event| match event.decode::<Event>() {
                Ok(event) => self.event_to_json(&event),
                Err(err) => json!({ "undecodable": err.to_string() }),
            })
            .collect();
        debug!("Step {} done: {}", step, outcome.output);

        Ok(outcome)
    }

    fn deploy(
        &mut self,
        step: usize,
        caller: &str,
        constructor: &str,
        args: &Value,
        label: Option<&str>,
    ) -> Result<StepOutcome, ScenarioError> {
        let caller = json_to_account(step, "caller", &json!(caller), &self.accounts)?;
        let kind = ConstructorKind::from_str(constructor).map_err(|_| ScenarioError::UnknownConstructor {
            step,
            name: constructor.to_string(),
        })?;
        let constructor = match kind {
            ConstructorKind::New => Constructor::New {
                init_supply: json_to_balance(step, "init_supply", arg(step, args, "init_supply")?)?,
            },
            ConstructorKind::Default => Constructor::Default,
        };

        self.env.set_caller(caller);
        let account =
            erc20::deploy(&self.env, &constructor.encode()).map_err(|source| ScenarioError::Dispatch { step, source })?;
        let label = label.map(String::from).unwrap_or_else(|| format!("erc20-{}", self.contracts.len()));
        self.contracts.insert(label.clone(), account);
        self.last_deployed = Some(account);

        Ok(StepOutcome {
            step,
            action: "deploy",
            caller: Some(account_to_json(&caller, &self.accounts)),
            target: Some(label),
            output: json!(account.to_hex()),
            events: Vec::new(),
        })
    }

    fn call(
        &mut self,
        step: usize,
        caller: &str,
        contract: Option<&str>,
        message: &str,
        args: &Value,
        expect: Option<&Expect>,
    ) -> Result<StepOutcome, ScenarioError> {
        let caller = json_to_account(step, "caller", &json!(caller), &self.accounts)?;
        let callee = self.resolve_contract(step, contract)?;
        let message = self.parse_message(step, message, args)?;
        let kind = message.kind();

        self.env.set_caller(caller);
        let raw = erc20::dispatch(&self.env, callee, &message.encode())
            .map_err(|source| ScenarioError::Dispatch { step, source })?;
        let output = decode_output(step, kind, &raw)?;
        if let Some(expect) = expect {
            check_expectation(step, expect, &output)?;
        }

        Ok(StepOutcome {
            step,
            action: "call",
            caller: Some(account_to_json(&caller, &self.accounts)),
            target: Some(kind.name().to_string()),
            output: output_to_json(&output),
            events: Vec::new(),
        })
    }

    fn resolve_contract(&self, step: usize, contract: Option<&str>) -> Result<AccountId, ScenarioError> {
        match contract {
            None => self.last_deployed.ok_or(ScenarioError::NoContractDeployed { step }),
            Some(name) => match self.contracts.get(name) {
                Some(account) => Ok(*account),
                None => AccountId::from_str(name).map_err(|_| ScenarioError::UnknownContract {
                    step,
                    name: name.to_string(),
                }),
            },
        }
    }

    fn parse_message(&self, step: usize, name: &str, args: &Value) -> Result<Message, ScenarioError> {
        let kind = MessageKind::from_str(name).map_err(|_| ScenarioError::UnknownMessage {
            step,
            name: name.to_string(),
        })?;

        let account = |key: &str| json_to_account(step, key, arg(step, args, key)?, &self.accounts);
        let balance = |key: &str| json_to_balance(step, key, arg(step, args, key)?);

        let message = match kind {
            MessageKind::TotalSupply => Message::TotalSupply,
            MessageKind::BalanceOf => Message::BalanceOf {
                owner: account("owner")?,
            },
            MessageKind::Allowance => Message::Allowance {
                owner: account("owner")?,
                spender: account("spender")?,
            },
            MessageKind::Transfer => Message::Transfer {
                to: account("to")?,
                value: balance("value")?,
            },
            MessageKind::Approve => Message::Approve {
                spender: account("spender")?,
                value: balance("value")?,
            },
            MessageKind::TransferFrom => Message::TransferFrom {
                from: account("from")?,
                to: account("to")?,
                value: balance("value")?,
            },
        };
        Ok(message)
    }

    fn event_to_json(&self, event: &Event) -> Value {
        let party = |account: &Option<AccountId>| match account {
            Some(account) => account_to_json(account, &self.accounts),
            None => Value::Null,
        };
        match event {
            Event::Transfer(transfer) => json!({
                "event": "Transfer",
                "from": party(&transfer.from),
                "to": party(&transfer.to),
                "value": balance_to_json(transfer.value),
            }),
            Event::Approval(approval) => json!({
                "event": "Approval",
                "owner": party(&approval.owner),
                "spender": party(&approval.spender),
                "value": balance_to_json(approval.value),
            }),
        }
    }
}

fn arg<'a>(step: usize, args: &'a Value, key: &str) -> Result<&'a Value, ScenarioError> {
    args.get(key).ok_or_else(|| ScenarioError::MissingArg {
        step,
        key: key.to_string(),
    })
}

fn decode_output(step: usize, kind: MessageKind, mut raw: &[u8]) -> Result<Output, ScenarioError> {
    let decoded = if kind.is_mutable() {
        <Result<(), Error>>::decode(&mut raw).map(Output::Done)
    } else {
        Balance::decode(&mut raw).map(Output::Value)
    };
    decoded.map_err(|err| ScenarioError::OutputDecodingError {
        step,
        err: err.to_string(),
    })
}

fn output_to_json(output: &Output) -> Value {
    match output {
        Output::Value(value) => balance_to_json(*value),
        Output::Done(Ok(())) => json!("ok"),
        Output::Done(Err(err)) => {
            let name: &'static str = err.into();
            json!({ "error": name })
        }
    }
}

fn check_expectation(step: usize, expect: &Expect, output: &Output) -> Result<(), ScenarioError> {
    let matched = match expect {
        Expect::Ok => !matches!(output, Output::Done(Err(_))),
        Expect::Value(value) => *output == Output::Value(json_to_balance(step, "expect", value)?),
        Expect::Error(name) => {
            let error = Error::from_str(name).map_err(|_| ScenarioError::UnknownError {
                step,
                name: name.to_string(),
            })?;
            *output == Output::Done(Err(error))
        }
    };

    if matched {
        Ok(())
    } else {
        Err(ScenarioError::ExpectationFailed {
            step,
            expected: serde_json::to_string(expect).unwrap_or_default(),
            actual: output_to_json(output).to_string(),
        })
    }
}
