use contract_env::{Hasher, Key};

use super::{Index, Stash};
use crate::traits::PackedLayout;

/// An iterator over the occupied entries of a stash in ascending index order.
#[derive(Debug)]
pub struct Iter<'a, T, H> {
    stash: &'a Stash<T, H>,
    begin: Index,
    end: Index,
    yielded: u32,
}

impl<'a, T, H> Iter<'a, T, H> {
    pub(super) fn new(stash: &'a Stash<T, H>) -> Self {
        Iter {
            stash,
            begin: 0,
            end: stash.capacity(),
            yielded: 0,
        }
    }
}

impl<'a, T, H> Iterator for Iter<'a, T, H>
where
    T: PackedLayout + Clone,
    H: Hasher,
    Key: From<H::Output>,
{
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        while self.begin < self.end {
            let at = self.begin;
            self.begin += 1;
            if let Some(value) = self.stash.get(at) {
                self.yielded += 1;
                return Some(value);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.stash.len().saturating_sub(self.yielded) as usize;
        (remaining, Some(remaining))
    }
}

impl<'a, T, H> ExactSizeIterator for Iter<'a, T, H>
where
    T: PackedLayout + Clone,
    H: Hasher,
    Key: From<H::Output>,
{
}
