use core::borrow::Borrow;
use core::cell::RefCell;
use core::marker::PhantomData;
use std::collections::btree_map::{self, BTreeMap};

use codec::Encode;
use contract_env::{Blake2x256, Env, Hasher, Key};

use super::{EntryState, StorageEntry};
use crate::traits::{pull_packed_root_opt, KeyPtr, PackedLayout, SpreadLayout};

/// The storage location a pulled map reads its entries from.
#[derive(Debug, Clone)]
struct StorageRoot {
    key: Key,
    env: Env,
}

/// A map whose entries are loaded from contract storage on first access.
///
/// The cell of the entry at `key` is located at `H(root ++ encode(key))`.
/// A map created with [`LazyHashMap::new`] has no root yet and only lives in
/// its cache until it is pushed.
#[derive(Debug)]
pub struct LazyHashMap<K, V, H = Blake2x256> {
    root: Option<StorageRoot>,
    cached_entries: RefCell<BTreeMap<K, StorageEntry<V>>>,
    hasher: PhantomData<fn() -> H>,
}

impl<K, V, H> LazyHashMap<K, V, H>
where
    K: Ord,
{
    pub fn new() -> Self {
        LazyHashMap {
            root: None,
            cached_entries: RefCell::new(BTreeMap::new()),
            hasher: PhantomData,
        }
    }

    /// The root key, `None` when the map has never been pulled from storage.
    pub fn key(&self) -> Option<&Key> {
        self.root.as_ref().map(|root| &root.key)
    }

    /// Iterates over every cached entry, including the vacant ones.
    pub(crate) fn cached_entries_mut(&mut self) -> btree_map::IterMut<'_, K, StorageEntry<V>> {
        self.cached_entries.get_mut().iter_mut()
    }
}

impl<K, V, H> Default for LazyHashMap<K, V, H>
where
    K: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, H> LazyHashMap<K, V, H>
where
    K: Ord + Encode,
    V: PackedLayout,
    H: Hasher,
    Key: From<H::Output>,
{
    fn cell_key<Q>(root: &Key, key: &Q) -> Key
    where
        Q: Encode + ?Sized,
    {
        let mut preimage = root.as_ref().to_vec();
        key.encode_to(&mut preimage);
        Key::from(H::hash(&preimage))
    }

    fn pull_entry<Q>(root: Option<&StorageRoot>, key: &Q) -> StorageEntry<V>
    where
        Q: Encode + ?Sized,
    {
        let value = root.and_then(|root| pull_packed_root_opt::<V>(&Self::cell_key(&root.key, key), &root.env));
        StorageEntry::new(value, EntryState::Preserved)
    }

    /// Makes sure the entry at `key` is cached, loading it from storage if required.
    pub(crate) fn load<Q>(&self, key: &Q)
    where
        K: Borrow<Q>,
        Q: Ord + Encode + ToOwned<Owned = K> + ?Sized,
    {
        if self.cached_entries.borrow().contains_key(key) {
            return;
        }
        let entry = Self::pull_entry(self.root.as_ref(), key);
        self.cached_entries.borrow_mut().insert(key.to_owned(), entry);
    }

    fn entry_mut<Q>(&mut self, key: &Q) -> &mut StorageEntry<V>
    where
        K: Borrow<Q>,
        Q: Ord + Encode + ToOwned<Owned = K> + ?Sized,
    {
        let Self {
            root, cached_entries, ..
        } = self;
        cached_entries
            .get_mut()
            .entry(key.to_owned())
            .or_insert_with(|| Self::pull_entry(root.as_ref(), key))
    }

    /// Runs `f` on the value at `key` without cloning it.
    pub fn peek<Q, R, F>(&self, key: &Q, f: F) -> Option<R>
    where
        K: Borrow<Q>,
        Q: Ord + Encode + ToOwned<Owned = K> + ?Sized,
        F: FnOnce(&V) -> R,
    {
        self.load(key);
        self.cached_entries
            .borrow()
            .get(key)
            .and_then(StorageEntry::value)
            .map(f)
    }

    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + Encode + ToOwned<Owned = K> + ?Sized,
        V: Clone,
    {
        self.peek(key, V::clone)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + Encode + ToOwned<Owned = K> + ?Sized,
    {
        self.entry_mut(key).value_mut()
    }

    /// Overwrites the entry at `key` without loading its previous value.
    pub fn put(&mut self, key: K, new_value: Option<V>) {
        self.cached_entries
            .get_mut()
            .insert(key, StorageEntry::new(new_value, EntryState::Mutated));
    }

    /// Overwrites the entry at `key` and returns its previous value.
    pub fn put_get<Q>(&mut self, key: &Q, new_value: Option<V>) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + Encode + ToOwned<Owned = K> + ?Sized,
    {
        self.entry_mut(key).put(new_value)
    }

    /// Stores `value` at `key` and returns a reference to the stored value.
    pub fn insert_mut(&mut self, key: K, value: V) -> &mut V {
        self.cached_entries
            .get_mut()
            .entry(key)
            .or_insert_with(|| StorageEntry::new(None, EntryState::Mutated))
            .insert(value)
    }

    /// Clears the storage cell of `key` right away, bypassing the cache.
    pub fn clear_packed_at<Q>(&self, key: &Q)
    where
        Q: Encode + ?Sized,
    {
        if let Some(root) = &self.root {
            root.env.clear_contract_storage(&Self::cell_key(&root.key, key));
        }
    }
}

impl<K, V, H> SpreadLayout for LazyHashMap<K, V, H>
where
    K: Ord + Encode,
    V: PackedLayout,
    H: Hasher,
    Key: From<H::Output>,
{
    const FOOTPRINT: u64 = 1;

    fn pull_spread(ptr: &mut KeyPtr, env: &Env) -> Self {
        LazyHashMap {
            root: Some(StorageRoot {
                key: ptr.next_for::<Self>(),
                env: env.clone(),
            }),
            cached_entries: RefCell::new(BTreeMap::new()),
            hasher: PhantomData,
        }
    }

    fn push_spread(&self, ptr: &mut KeyPtr, env: &Env) {
        let root = ptr.next_for::<Self>();
        for (key, entry) in self.cached_entries.borrow().iter() {
            if !entry.is_mutated() {
                continue;
            }
            let cell = Self::cell_key(&root, key);
            match entry.value() {
                Some(value) => env.set_contract_storage(&cell, value),
                None => env.clear_contract_storage(&cell),
            }
            entry.mark_preserved();
        }
    }

    /// Clears the cells of the cached entries, entries never loaded are left untouched.
    fn clear_spread(&self, ptr: &mut KeyPtr, env: &Env) {
        let root = ptr.next_for::<Self>();
        for key in self.cached_entries.borrow().keys() {
            env.clear_contract_storage(&Self::cell_key(&root, key));
        }
    }
}
