use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use codec::{Decode, Encode};
use log::debug;

use crate::accounts::DefaultAccounts;
use crate::engine::{EmittedEvent, Engine, EngineConfig, ExecContext};
use crate::error::EnvError;
use crate::event::Topics;
use crate::types::{AccountId, BlockNumber, Key, Timestamp};

/// A handle on the engine shared by the contracts and their storage.
///
/// Cloning the handle is cheap, all clones observe the same engine.
#[derive(Clone)]
pub struct Env {
    engine: Rc<RefCell<Engine>>,
}

impl Env {
    pub fn new(config: EngineConfig) -> Self {
        Env {
            engine: Rc::new(RefCell::new(Engine::new(config))),
        }
    }

    /// Runs `f` with shared access to the underlying engine.
    pub fn inspect<R>(&self, f: impl FnOnce(&Engine) -> R) -> R {
        f(&self.engine.borrow())
    }

    pub fn caller(&self) -> AccountId {
        self.engine.borrow().context().caller
    }

    /// The account of the currently executing contract.
    pub fn account_id(&self) -> AccountId {
        self.engine.borrow().context().callee
    }

    pub fn block_number(&self) -> BlockNumber {
        self.engine.borrow().block_number()
    }

    pub fn block_timestamp(&self) -> Timestamp {
        self.engine.borrow().block_timestamp()
    }

    pub fn get_contract_storage<T: Decode>(&self, key: &Key) -> Result<Option<T>, EnvError> {
        let raw = self.engine.borrow_mut().get_storage(key);
        match raw {
            Some(bytes) => T::decode(&mut &bytes[..]).map(Some).map_err(|err| EnvError::Decode {
                key: *key,
                err: err.to_string(),
            }),
            None => Ok(None),
        }
    }

    pub fn set_contract_storage<T: Encode + ?Sized>(&self, key: &Key, value: &T) {
        self.engine.borrow_mut().set_storage(*key, value.encode());
    }

    pub fn clear_contract_storage(&self, key: &Key) {
        self.engine.borrow_mut().clear_storage(key);
    }

    pub fn emit_event<E: Topics + Encode>(&self, event: E) {
        let topics = event.topics();
        self.engine.borrow_mut().deposit_event(topics, event.encode());
    }

    pub fn debug_message(&self, message: &str) {
        self.engine.borrow_mut().debug_message(message.to_string());
    }

    pub fn set_caller(&self, caller: AccountId) {
        self.engine.borrow_mut().set_caller(caller);
    }

    pub fn set_callee(&self, callee: AccountId) {
        self.engine.borrow_mut().set_callee(callee);
    }

    pub fn default_accounts(&self) -> DefaultAccounts {
        self.engine.borrow().accounts()
    }

    pub fn recorded_events(&self) -> Vec<EmittedEvent> {
        self.engine.borrow().events().to_vec()
    }

    pub fn debug_messages(&self) -> Vec<String> {
        self.engine.borrow().debug_messages().to_vec()
    }

    pub fn count_reads(&self, account: &AccountId) -> usize {
        self.engine
            .borrow()
            .contract_storage(account)
            .map(|storage| storage.reads())
            .unwrap_or(0)
    }

    pub fn count_writes(&self, account: &AccountId) -> usize {
        self.engine
            .borrow()
            .contract_storage(account)
            .map(|storage| storage.writes())
            .unwrap_or(0)
    }

    pub fn count_used_storage_cells(&self, account: &AccountId) -> usize {
        self.engine
            .borrow()
            .contract_storage(account)
            .map(|storage| storage.len())
            .unwrap_or(0)
    }

    pub fn advance_block(&self) {
        self.engine.borrow_mut().advance_block();
    }

    pub fn advance_blocks(&self, blocks: BlockNumber) {
        self.engine.borrow_mut().advance_blocks(blocks);
    }

    pub fn allocate_contract(&self, deployer: AccountId) -> AccountId {
        self.engine.borrow_mut().allocate_contract(deployer)
    }

    pub fn ensure_contract(&self, account: &AccountId) -> Result<(), EnvError> {
        if self.engine.borrow().contract_exists(account) {
            Ok(())
        } else {
            Err(EnvError::ContractNotFound { account: *account })
        }
    }

    /// Switches the execution context until the returned [`Frame`] is dropped.
    pub fn enter_frame(&self, caller: AccountId, callee: AccountId) -> Frame {
        let mut engine = self.engine.borrow_mut();
        let previous = engine.context();
        let events_len = engine.events().len();
        engine.set_context(ExecContext { caller, callee });
        debug!("Enter frame: caller {} callee {}", caller, callee);

        Frame {
            env: self.clone(),
            previous,
            events_len,
        }
    }

    /// Runs `f` inside a frame of `caller` calling `callee`.
    pub fn with_frame<R>(&self, caller: AccountId, callee: AccountId, f: impl FnOnce(&Env) -> R) -> R {
        let _frame = self.enter_frame(caller, callee);
        f(self)
    }
}

impl Default for Env {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl fmt::Debug for Env {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let context = self.engine.borrow().context();
        f.debug_struct("Env")
            .field("caller", &context.caller)
            .field("callee", &context.callee)
            .finish_non_exhaustive()
    }
}

/// An execution frame, the previous context is restored on drop.
#[must_use]
pub struct Frame {
    env: Env,
    previous: ExecContext,
    events_len: usize,
}

impl Frame {
    /// Drops every event emitted inside this frame.
    pub fn revert(self) {
        self.env.engine.borrow_mut().truncate_events(self.events_len);
        debug!("Reverted frame, events truncated to {}", self.events_len);
    }
}

impl Drop for Frame {
    fn drop(&mut self) {
        self.env.engine.borrow_mut().set_context(self.previous);
    }
}
