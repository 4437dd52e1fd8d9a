use core::cell::Cell;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryState {
    /// The entry differs from what is in contract storage.
    Mutated,
    /// The entry mirrors contract storage.
    Preserved,
}

/// A cached storage cell.
///
/// `None` means the cell is empty, or is going to be cleared on the next push.
#[derive(Debug)]
pub struct StorageEntry<V> {
    value: Option<V>,
    state: Cell<EntryState>,
}

impl<V> StorageEntry<V> {
    pub fn new(value: Option<V>, state: EntryState) -> Self {
        StorageEntry {
            value,
            state: Cell::new(state),
        }
    }

    pub fn value(&self) -> Option<&V> {
        self.value.as_ref()
    }

    /// Grants mutable access, which marks the entry as mutated if it is occupied.
    pub fn value_mut(&mut self) -> Option<&mut V> {
        if self.value.is_some() {
            self.state.set(EntryState::Mutated);
        }
        self.value.as_mut()
    }

    /// Replaces the value and returns the old one.
    pub fn put(&mut self, new_value: Option<V>) -> Option<V> {
        self.state.set(EntryState::Mutated);
        core::mem::replace(&mut self.value, new_value)
    }

    /// Stores `new_value` and hands out a reference to it.
    pub fn insert(&mut self, new_value: V) -> &mut V {
        self.state.set(EntryState::Mutated);
        self.value.insert(new_value)
    }

    pub fn is_mutated(&self) -> bool {
        self.state.get() == EntryState::Mutated
    }

    pub fn mark_preserved(&self) {
        self.state.set(EntryState::Preserved);
    }
}
