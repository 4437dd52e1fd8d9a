use contract_env::{Hasher, Key};

use super::{HashMap, ValueEntry};
use crate::traits::PackedLayout;

/// A view into a single entry of a [`HashMap`], which is either vacant or occupied.
pub enum Entry<'a, K, V, H> {
    Occupied(OccupiedEntry<'a, K, V, H>),
    Vacant(VacantEntry<'a, K, V, H>),
}

pub struct OccupiedEntry<'a, K, V, H> {
    key: K,
    map: &'a mut HashMap<K, V, H>,
}

pub struct VacantEntry<'a, K, V, H> {
    key: K,
    map: &'a mut HashMap<K, V, H>,
}

impl<'a, K, V, H> Entry<'a, K, V, H>
where
    K: Ord + Clone + PackedLayout,
    V: PackedLayout,
    H: Hasher,
    Key: From<H::Output>,
{
    pub fn key(&self) -> &K {
        match self {
            Entry::Occupied(entry) => entry.key(),
            Entry::Vacant(entry) => entry.key(),
        }
    }

    pub fn or_insert(self, default: V) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default),
        }
    }

    pub fn or_insert_with<F>(self, default: F) -> &'a mut V
    where
        F: FnOnce() -> V,
    {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default()),
        }
    }

    pub fn or_insert_with_key<F>(self, default: F) -> &'a mut V
    where
        F: FnOnce(&K) -> V,
    {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let value = default(entry.key());
                entry.insert(value)
            }
        }
    }

    pub fn or_default(self) -> &'a mut V
    where
        V: Default,
    {
        self.or_insert_with(V::default)
    }

    /// Runs `f` on the value of an occupied entry before any insertion.
    pub fn and_modify<F>(self, f: F) -> Self
    where
        F: FnOnce(&mut V),
    {
        match self {
            Entry::Occupied(mut entry) => {
                f(entry.get_mut());
                Entry::Occupied(entry)
            }
            Entry::Vacant(entry) => Entry::Vacant(entry),
        }
    }
}

impl<'a, K, V, H> OccupiedEntry<'a, K, V, H>
where
    K: Ord + Clone + PackedLayout,
    V: PackedLayout,
    H: Hasher,
    Key: From<H::Output>,
{
    pub(super) fn new(key: K, map: &'a mut HashMap<K, V, H>) -> Self {
        OccupiedEntry { key, map }
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn get(&self) -> V
    where
        V: Clone,
    {
        match self.map.get(&self.key) {
            Some(value) => value,
            None => panic!("an occupied entry must have a value"),
        }
    }

    pub fn get_mut(&mut self) -> &mut V {
        &mut self.map.value_entry_mut(&self.key).value
    }

    pub fn into_mut(self) -> &'a mut V {
        &mut self.map.value_entry_mut(&self.key).value
    }

    /// Replaces the value of the entry, returning the old one.
    pub fn insert(&mut self, new_value: V) -> V {
        core::mem::replace(self.get_mut(), new_value)
    }

    /// Takes the entry out of the map, returning the key and its value.
    pub fn remove_entry(self) -> (K, V) {
        match self.map.take(&self.key) {
            Some(value) => (self.key, value),
            None => panic!("an occupied entry must have a value"),
        }
    }

    pub fn remove(self) -> V {
        self.remove_entry().1
    }
}

impl<'a, K, V, H> VacantEntry<'a, K, V, H>
where
    K: Ord + Clone + PackedLayout,
    V: PackedLayout,
    H: Hasher,
    Key: From<H::Output>,
{
    pub(super) fn new(key: K, map: &'a mut HashMap<K, V, H>) -> Self {
        VacantEntry { key, map }
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn into_key(self) -> K {
        self.key
    }

    /// Sets the value of the entry, returning a reference to it.
    pub fn insert(self, value: V) -> &'a mut V {
        let key_index = self.map.keys.put(self.key.clone());
        &mut self.map.values.insert_mut(self.key, ValueEntry { value, key_index }).value
    }
}
