//! A storage stash allowing to store indexed elements efficiently.

mod iter;


pub use self::iter::Iter;

use codec::{Decode, Encode};
use contract_env::{Blake2x256, Env, Hasher, Key};
use log::debug;

use crate::lazy::LazyHashMap;
use crate::traits::{clear_packed_root, pull_packed_root, push_packed_root, KeyPtr, PackedLayout, SpreadLayout};

/// An index into the stash.
type Index = u32;

/// A stash data structure operating on contract storage.
///
/// Elements keep their index for as long as they are stored, removing an
/// element leaves a vacant slot that a later `put` reuses.
#[derive(Debug)]
pub struct Stash<T, H = Blake2x256> {
    header: Header,
    entries: LazyHashMap<Index, Entry<T>, H>,
}

/// Stores general commonly required information about the storage stash.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Encode, Decode)]
struct Header {
    /// The most recently vacated entry, the head of the vacant list.
    last_vacant: Option<Index>,
    /// The number of occupied entries.
    len: u32,
    /// The number of entries, occupied or vacant.
    len_entries: u32,
}

/// A vacant entry linking to its neighbours in the circular vacant list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode)]
pub struct VacantEntry {
    next: Index,
    prev: Index,
}

#[derive(Debug, PartialEq, Eq, Encode, Decode)]
pub enum Entry<T> {
    Vacant(VacantEntry),
    Occupied(T),
}

impl<T: PackedLayout> PackedLayout for Entry<T> {}

impl<T, H> Stash<T, H> {
    pub fn new() -> Self {
        Stash {
            header: Header::default(),
            entries: LazyHashMap::new(),
        }
    }

    /// The number of stored elements.
    pub fn len(&self) -> u32 {
        self.header.len
    }

    /// The number of entries, including vacant ones.
    pub fn capacity(&self) -> u32 {
        self.header.len_entries
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn last_vacant_index(&self) -> Option<Index> {
        self.header.last_vacant
    }
}

impl<T, H> Default for Stash<T, H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, H> Stash<T, H>
where
    T: PackedLayout,
    H: Hasher,
    Key: From<H::Output>,
{
    pub fn iter(&self) -> Iter<'_, T, H>
    where
        T: Clone,
    {
        Iter::new(self)
    }

    pub fn get(&self, at: Index) -> Option<T>
    where
        T: Clone,
    {
        if at >= self.header.len_entries {
            return None;
        }
        self.entries
            .peek(&at, |entry| match entry {
                Entry::Occupied(value) => Some(value.clone()),
                Entry::Vacant(_) => None,
            })
            .flatten()
    }

    pub fn get_mut(&mut self, at: Index) -> Option<&mut T> {
        if at >= self.header.len_entries || !self.is_occupied(at) {
            return None;
        }
        match self.entries.get_mut(&at) {
            Some(Entry::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    fn is_occupied(&self, at: Index) -> bool {
        self.entries
            .peek(&at, |entry| matches!(entry, Entry::Occupied(_)))
            .unwrap_or(false)
    }

    fn vacant_mut(&mut self, at: Index) -> &mut VacantEntry {
        match self.entries.get_mut(&at) {
            Some(Entry::Vacant(vacant)) => vacant,
            _ => panic!("stash entry {} must be a vacant entry", at),
        }
    }

    /// Links the entry at `at` into the vacant list and makes it the list head.
    fn link_vacant(&mut self, at: Index) {
        let vacant = match self.header.last_vacant {
            None => VacantEntry { next: at, prev: at },
            Some(head) => {
                let prev = self.vacant_mut(head).prev;
                self.vacant_mut(prev).next = at;
                self.vacant_mut(head).prev = at;
                VacantEntry { next: head, prev }
            }
        };
        self.entries.put(at, Some(Entry::Vacant(vacant)));
        self.header.last_vacant = Some(at);
    }

    /// Removes the vacant entry at `at` from the vacant list.
    fn unlink_vacant(&mut self, at: Index) {
        let VacantEntry { next, prev } = *self.vacant_mut(at);
        if next == at {
            self.header.last_vacant = None;
            return;
        }
        self.vacant_mut(prev).next = next;
        self.vacant_mut(next).prev = prev;
        if self.header.last_vacant == Some(at) {
            self.header.last_vacant = Some(next);
        }
    }

    /// Stores `value` and returns its index.
    ///
    /// The most recently vacated slot is reused before the stash grows.
    pub fn put(&mut self, value: T) -> Index {
        let at = match self.header.last_vacant {
            Some(at) => {
                self.unlink_vacant(at);
                at
            }
            None => {
                let at = self.header.len_entries;
                self.header.len_entries += 1;
                at
            }
        };
        self.entries.put(at, Some(Entry::Occupied(value)));
        self.header.len += 1;
        at
    }

    /// Removes the element at `at` and returns it, if any.
    pub fn take(&mut self, at: Index) -> Option<T> {
        if at >= self.header.len_entries || !self.is_occupied(at) {
            return None;
        }
        let taken = self.entries.put_get(&at, None);
        self.link_vacant(at);
        self.header.len -= 1;
        match taken {
            Some(Entry::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    /// Defragments the stash so that it can free up storage cells.
    ///
    /// Returns the number of storage cells freed. `callback` is invoked with
    /// the old index, the new index and the element for every moved element.
    ///
    /// A `max_iterations` of `None` removes every vacant entry.
    pub fn defrag<C>(&mut self, max_iterations: Option<u32>, mut callback: C) -> u32
    where
        C: FnMut(Index, Index, &T),
    {
        let max_iterations = max_iterations.unwrap_or(self.header.len_entries);
        let mut freed = 0;
        while freed < max_iterations {
            let head = match self.header.last_vacant {
                Some(head) => head,
                None => break,
            };
            let last = self.header.len_entries - 1;
            if self.is_occupied(last) {
                self.unlink_vacant(head);
                let value = match self.entries.put_get(&last, None) {
                    Some(Entry::Occupied(value)) => value,
                    _ => panic!("stash entry {} must be occupied", last),
                };
                callback(last, head, &value);
                self.entries.put(head, Some(Entry::Occupied(value)));
            } else {
                self.unlink_vacant(last);
                self.entries.put(last, None);
            }
            self.header.len_entries -= 1;
            freed += 1;
        }
        debug!("Stash defrag freed {} cells", freed);
        freed
    }
}

impl<T, H> SpreadLayout for Stash<T, H>
where
    T: PackedLayout,
    H: Hasher,
    Key: From<H::Output>,
{
    const FOOTPRINT: u64 = 1 + <LazyHashMap<Index, Entry<T>, H> as SpreadLayout>::FOOTPRINT;

    fn pull_spread(ptr: &mut KeyPtr, env: &Env) -> Self {
        let header = pull_packed_root::<Header>(&ptr.advance_by(1), env);
        let entries = SpreadLayout::pull_spread(ptr, env);
        Stash { header, entries }
    }

    fn push_spread(&self, ptr: &mut KeyPtr, env: &Env) {
        push_packed_root(&self.header, &ptr.advance_by(1), env);
        self.entries.push_spread(ptr, env);
    }

    fn clear_spread(&self, ptr: &mut KeyPtr, env: &Env) {
        for at in 0..self.header.len_entries {
            self.entries.clear_packed_at(&at);
        }
        clear_packed_root(&ptr.advance_by(1), env);
        self.entries.clear_spread(ptr, env);
    }
}

impl PackedLayout for Header {}
