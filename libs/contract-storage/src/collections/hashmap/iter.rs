use std::collections::btree_map;

use contract_env::{Hasher, Key};

use super::ValueEntry;
use crate::collections::stash;
use crate::lazy::{LazyHashMap, StorageEntry};
use crate::traits::PackedLayout;

/// An iterator over the pairs of a hash map, values are cloned out of the cache.
pub struct Iter<'a, K, V, H> {
    keys: stash::Iter<'a, K, H>,
    values: &'a LazyHashMap<K, ValueEntry<V>, H>,
}

impl<'a, K, V, H> Iter<'a, K, V, H> {
    pub(super) fn new(keys: stash::Iter<'a, K, H>, values: &'a LazyHashMap<K, ValueEntry<V>, H>) -> Self {
        Iter { keys, values }
    }
}

impl<'a, K, V, H> Iterator for Iter<'a, K, V, H>
where
    K: Ord + Clone + PackedLayout,
    V: PackedLayout + Clone,
    H: Hasher,
    Key: From<H::Output>,
{
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.keys.next()?;
        match self.values.peek(&key, |entry| entry.value.clone()) {
            Some(value) => Some((key, value)),
            None => panic!("a stored key must have a value"),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.keys.size_hint()
    }
}

impl<'a, K, V, H> ExactSizeIterator for Iter<'a, K, V, H>
where
    K: Ord + Clone + PackedLayout,
    V: PackedLayout + Clone,
    H: Hasher,
    Key: From<H::Output>,
{
}

pub struct IterMut<'a, K, V> {
    entries: btree_map::IterMut<'a, K, StorageEntry<ValueEntry<V>>>,
}

impl<'a, K, V> IterMut<'a, K, V> {
    pub(super) fn new(entries: btree_map::IterMut<'a, K, StorageEntry<ValueEntry<V>>>) -> Self {
        IterMut { entries }
    }
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        for (key, entry) in self.entries.by_ref() {
            if let Some(occupied) = entry.value_mut() {
                return Some((key, &mut occupied.value));
            }
        }
        None
    }
}

pub struct Keys<'a, K, H> {
    keys: stash::Iter<'a, K, H>,
}

impl<'a, K, H> Keys<'a, K, H> {
    pub(super) fn new(keys: stash::Iter<'a, K, H>) -> Self {
        Keys { keys }
    }
}

impl<'a, K, H> Iterator for Keys<'a, K, H>
where
    K: PackedLayout + Clone,
    H: Hasher,
    Key: From<H::Output>,
{
    type Item = K;

    fn next(&mut self) -> Option<Self::Item> {
        self.keys.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.keys.size_hint()
    }
}

pub struct Values<'a, K, V, H> {
    iter: Iter<'a, K, V, H>,
}

impl<'a, K, V, H> Values<'a, K, V, H> {
    pub(super) fn new(iter: Iter<'a, K, V, H>) -> Self {
        Values { iter }
    }
}

impl<'a, K, V, H> Iterator for Values<'a, K, V, H>
where
    K: Ord + Clone + PackedLayout,
    V: PackedLayout + Clone,
    H: Hasher,
    Key: From<H::Output>,
{
    type Item = V;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

pub struct ValuesMut<'a, K, V> {
    iter: IterMut<'a, K, V>,
}

impl<'a, K, V> ValuesMut<'a, K, V> {
    pub(super) fn new(iter: IterMut<'a, K, V>) -> Self {
        ValuesMut { iter }
    }
}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|(_, value)| value)
    }
}
