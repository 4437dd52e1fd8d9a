use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use contract_env::{BlockNumber, EngineConfig, Timestamp};
use erc20_playground::{Runner, Scenario};

#[derive(Parser, Debug)]
#[command(name = "erc20-playground", version, about = "Deploy and drive ERC20 tokens on an off-chain engine.")]
struct Options {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a scenario file and print the report as JSON.
    Run {
        /// The scenario file.
        scenario: PathBuf,
        /// An engine config file, it replaces the config of the scenario.
        #[arg(long)]
        config: Option<PathBuf>,
        /// The block number the engine starts at.
        #[arg(long)]
        block_number: Option<BlockNumber>,
        /// Milliseconds between two blocks.
        #[arg(long)]
        block_time: Option<Timestamp>,
    },
    /// Print the items of the contract grouped by kind.
    Describe,
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path).with_context(|| format!("Read {} failed.", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Parse {} failed.", path.display()))
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let options = Options::parse();
    match options.command {
        Command::Run {
            scenario,
            config,
            block_number,
            block_time,
        } => {
            let mut scenario: Scenario = read_json(&scenario)?;
            let config = match config {
                Some(path) => Some(read_json::<EngineConfig>(&path)?),
                None => None,
            };
            scenario.apply_overrides(config, block_number, block_time);

            let report = Runner::run(&scenario).context("Scenario failed.")?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::Describe => {
            println!("{}", serde_json::to_string_pretty(&erc20::metadata::manifest())?);
        }
    }

    Ok(())
}
