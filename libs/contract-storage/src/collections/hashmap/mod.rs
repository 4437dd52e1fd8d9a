//! A storage hash map that allows to associate keys with values.
//!
//! Keys are tracked in a [`Stash`] so the map can be iterated and cleared,
//! values live in a [`LazyHashMap`] next to the index of their key.

mod entry;
mod iter;


pub use self::entry::{Entry, OccupiedEntry, VacantEntry};
pub use self::iter::{Iter, IterMut, Keys, Values, ValuesMut};

use core::borrow::Borrow;

use codec::{Decode, Encode};
use contract_env::{Blake2x256, Env, Hasher, Key};

use crate::collections::Stash;
use crate::lazy::LazyHashMap;
use crate::traits::{KeyPtr, PackedLayout, SpreadLayout};

type KeyIndex = u32;

#[derive(Debug)]
pub struct HashMap<K, V, H = Blake2x256> {
    keys: Stash<K, H>,
    values: LazyHashMap<K, ValueEntry<V>, H>,
}

/// A value together with the stash index of its key.
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct ValueEntry<V> {
    value: V,
    key_index: KeyIndex,
}

impl<V: PackedLayout> PackedLayout for ValueEntry<V> {}

impl<K, V, H> HashMap<K, V, H>
where
    K: Ord,
{
    pub fn new() -> Self {
        HashMap {
            keys: Stash::new(),
            values: LazyHashMap::new(),
        }
    }

    pub fn len(&self) -> u32 {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl<K, V, H> Default for HashMap<K, V, H>
where
    K: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, H> HashMap<K, V, H>
where
    K: Ord + Clone + PackedLayout,
    V: PackedLayout,
    H: Hasher,
    Key: From<H::Output>,
{
    /// Inserts a key-value pair, returning the previous value of `key`.
    pub fn insert(&mut self, key: K, new_value: V) -> Option<V> {
        if let Some(occupied) = self.values.get_mut(&key) {
            return Some(core::mem::replace(&mut occupied.value, new_value));
        }
        let key_index = self.keys.put(key.clone());
        self.values.put(
            key,
            Some(ValueEntry {
                value: new_value,
                key_index,
            }),
        );
        None
    }

    /// Removes `key` from the map, returning its value if it was present.
    pub fn take<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + Encode + ToOwned<Owned = K> + ?Sized,
    {
        if !self.contains_key(key) {
            return None;
        }
        let entry = self.values.put_get(key, None)?;
        self.keys.take(entry.key_index);
        Some(entry.value)
    }

    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + Encode + ToOwned<Owned = K> + ?Sized,
        V: Clone,
    {
        self.values.peek(key, |entry| entry.value.clone())
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + Encode + ToOwned<Owned = K> + ?Sized,
    {
        self.values.get_mut(key).map(|entry| &mut entry.value)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + Encode + ToOwned<Owned = K> + ?Sized,
    {
        self.values.peek(key, |_| ()).is_some()
    }

    /// Defragments the key storage, see [`Stash::defrag`].
    pub fn defrag(&mut self, max_iterations: Option<u32>) -> u32 {
        let Self { keys, values } = self;
        keys.defrag(max_iterations, |_, to, key| {
            if let Some(entry) = values.get_mut(key) {
                entry.key_index = to;
            }
        })
    }

    pub fn entry(&mut self, key: K) -> Entry<'_, K, V, H> {
        if self.contains_key(&key) {
            Entry::Occupied(OccupiedEntry::new(key, self))
        } else {
            Entry::Vacant(VacantEntry::new(key, self))
        }
    }

    /// Iterates over the pairs in insertion order, slots freed by removals are reused.
    pub fn iter(&self) -> Iter<'_, K, V, H>
    where
        V: Clone,
    {
        Iter::new(self.keys.iter(), &self.values)
    }

    /// Iterates mutably over the pairs in ascending key order.
    ///
    /// Every value is loaded from storage up front.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        for key in self.keys.iter() {
            self.values.load(&key);
        }
        IterMut::new(self.values.cached_entries_mut())
    }

    pub fn keys(&self) -> Keys<'_, K, H> {
        Keys::new(self.keys.iter())
    }

    pub fn values(&self) -> Values<'_, K, V, H>
    where
        V: Clone,
    {
        Values::new(self.iter())
    }

    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut::new(self.iter_mut())
    }

    fn value_entry_mut(&mut self, key: &K) -> &mut ValueEntry<V> {
        match self.values.get_mut(key) {
            Some(entry) => entry,
            None => panic!("an occupied entry must have a value"),
        }
    }
}

impl<K, V, H> SpreadLayout for HashMap<K, V, H>
where
    K: Ord + Clone + PackedLayout,
    V: PackedLayout,
    H: Hasher,
    Key: From<H::Output>,
{
    const FOOTPRINT: u64 =
        <Stash<K, H> as SpreadLayout>::FOOTPRINT + <LazyHashMap<K, ValueEntry<V>, H> as SpreadLayout>::FOOTPRINT;

    fn pull_spread(ptr: &mut KeyPtr, env: &Env) -> Self {
        let keys = SpreadLayout::pull_spread(ptr, env);
        let values = SpreadLayout::pull_spread(ptr, env);
        HashMap { keys, values }
    }

    fn push_spread(&self, ptr: &mut KeyPtr, env: &Env) {
        self.keys.push_spread(ptr, env);
        self.values.push_spread(ptr, env);
    }

    fn clear_spread(&self, ptr: &mut KeyPtr, env: &Env) {
        for key in self.keys.iter() {
            self.values.clear_packed_at(&key);
        }
        self.keys.clear_spread(ptr, env);
        self.values.clear_spread(ptr, env);
    }
}
