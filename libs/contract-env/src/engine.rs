use std::collections::{BTreeMap, BTreeSet};

use codec::{Decode, Encode};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::accounts::DefaultAccounts;
use crate::constants::{DEFAULT_BLOCK_TIME, DEFAULT_CALLEE};
use crate::hash::blake2b_256;
use crate::types::{AccountId, BlockNumber, Hash, Key, Timestamp};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub block_number: BlockNumber,
    pub block_timestamp: Timestamp,
    /// Milliseconds added to the timestamp on every new block.
    pub block_time: Timestamp,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            block_number: 0,
            block_timestamp: 0,
            block_time: DEFAULT_BLOCK_TIME,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedEvent {
    pub emitter: AccountId,
    pub topics: Vec<Hash>,
    pub data: Vec<u8>,
}

impl EmittedEvent {
    pub fn decode<E: Decode>(&self) -> Result<E, codec::Error> {
        E::decode(&mut &self.data[..])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecContext {
    pub caller: AccountId,
    pub callee: AccountId,
}

#[derive(Debug, Default, Clone)]
pub struct ContractStorage {
    cells: BTreeMap<Key, Vec<u8>>,
    reads: usize,
    writes: usize,
}

impl ContractStorage {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn reads(&self) -> usize {
        self.reads
    }

    pub fn writes(&self) -> usize {
        self.writes
    }
}

/// The chain as seen by the contracts.
#[derive(Debug)]
pub struct Engine {
    config: EngineConfig,
    accounts: DefaultAccounts,
    context: ExecContext,
    block_number: BlockNumber,
    block_timestamp: Timestamp,
    contracts: BTreeSet<AccountId>,
    storages: BTreeMap<AccountId, ContractStorage>,
    events: Vec<EmittedEvent>,
    debug_messages: Vec<String>,
    nonce: u64,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        let accounts = DefaultAccounts::new();
        Engine {
            accounts,
            context: ExecContext {
                caller: accounts.alice,
                callee: DEFAULT_CALLEE,
            },
            block_number: config.block_number,
            block_timestamp: config.block_timestamp,
            contracts: BTreeSet::new(),
            storages: BTreeMap::new(),
            events: Vec::new(),
            debug_messages: Vec::new(),
            nonce: 0,
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn accounts(&self) -> DefaultAccounts {
        self.accounts
    }

    pub fn context(&self) -> ExecContext {
        self.context
    }

    pub fn set_context(&mut self, context: ExecContext) {
        self.context = context;
    }

    pub fn set_caller(&mut self, caller: AccountId) {
        self.context.caller = caller;
    }

    pub fn set_callee(&mut self, callee: AccountId) {
        self.context.callee = callee;
    }

    pub fn block_number(&self) -> BlockNumber {
        self.block_number
    }

    pub fn block_timestamp(&self) -> Timestamp {
        self.block_timestamp
    }

    pub fn advance_block(&mut self) {
        self.advance_blocks(1);
    }

    /// Moves `blocks` blocks ahead at once, saturating at the numeric limits.
    pub fn advance_blocks(&mut self, blocks: BlockNumber) {
        self.block_number = self.block_number.saturating_add(blocks);
        self.block_timestamp = self
            .block_timestamp
            .saturating_add(self.config.block_time.saturating_mul(Timestamp::from(blocks)));
        debug!("Advanced to block {} at {}", self.block_number, self.block_timestamp);
    }

    /// Creates an empty storage for a new contract account deployed by `deployer`.
    pub fn allocate_contract(&mut self, deployer: AccountId) -> AccountId {
        let mut preimage = deployer.as_bytes().to_vec();
        self.nonce.encode_to(&mut preimage);
        self.nonce += 1;

        let account = AccountId::from(blake2b_256(&preimage));
        self.contracts.insert(account);
        self.storages.entry(account).or_default();
        debug!("Allocated contract account {} for deployer {}", account, deployer);

        account
    }

    pub fn contract_exists(&self, account: &AccountId) -> bool {
        self.contracts.contains(account)
    }

    pub fn contract_storage(&self, account: &AccountId) -> Option<&ContractStorage> {
        self.storages.get(account)
    }

    /// Reads a cell of the current callee.
    pub fn get_storage(&mut self, key: &Key) -> Option<Vec<u8>> {
        let storage = self.storages.get_mut(&self.context.callee)?;
        storage.reads += 1;
        storage.cells.get(key).cloned()
    }

    /// Writes a cell of the current callee, the callee does not become a contract by this.
    pub fn set_storage(&mut self, key: Key, value: Vec<u8>) {
        let storage = self.storages.entry(self.context.callee).or_default();
        storage.writes += 1;
        debug!("[{}] set {} ({} bytes)", self.context.callee, key, value.len());
        storage.cells.insert(key, value);
    }

    pub fn clear_storage(&mut self, key: &Key) {
        let Some(storage) = self.storages.get_mut(&self.context.callee) else {
            return;
        };
        storage.writes += 1;
        if storage.cells.remove(key).is_some() {
            debug!("[{}] cleared {}", self.context.callee, key);
        }
    }

    pub fn deposit_event(&mut self, topics: Vec<Hash>, data: Vec<u8>) {
        debug!(
            "[{}] event with {} topics and {} bytes of data",
            self.context.callee,
            topics.len(),
            data.len()
        );
        self.events.push(EmittedEvent {
            emitter: self.context.callee,
            topics,
            data,
        });
    }

    pub fn events(&self) -> &[EmittedEvent] {
        &self.events
    }

    pub fn truncate_events(&mut self, len: usize) {
        self.events.truncate(len);
    }

    pub fn debug_message(&mut self, message: String) {
        debug!("[{}] {}", self.context.callee, message);
        self.debug_messages.push(message);
    }

    pub fn debug_messages(&self) -> &[String] {
        &self.debug_messages
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
