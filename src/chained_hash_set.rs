//! ChainedHashSet: unique values in chained buckets, with checked cursors.

use crate::bucket_table::{BucketTable, DEFAULT_CAPACITY};
use crate::cursor::{Cursor, Position};
use crate::entry_arena::{EntryArena, EntryKey};
use crate::epoch::{Epoch, SetId};
use crate::reentrancy::ProbeGuard;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::iter::FusedIterator;
use std::collections::hash_map::RandomState;

/// An unordered set of unique values stored in chained hash buckets.
///
/// The bucket count starts at 32 (or the length given to `with_capacity`) and
/// doubles whenever a new value arrives while `len() == capacity()`.
pub struct ChainedHashSet<T, S = RandomState> {
    hasher: S,
    table: BucketTable,
    arena: EntryArena<T>,
    id: SetId,
    epoch: Epoch,
    guard: ProbeGuard,
}

impl<T> ChainedHashSet<T>
where
    T: Eq + Hash,
{
    pub fn new() -> Self {
        Self::with_hasher(Default::default())
    }

    /// Start with `capacity` buckets. Zero is treated as one.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, Default::default())
    }
}

impl<T> Default for ChainedHashSet<T>
where
    T: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, S> ChainedHashSet<T, S> {
    pub fn with_hasher(hasher: S) -> Self {
        Self::with_capacity_and_hasher(DEFAULT_CAPACITY, hasher)
    }

    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Self {
        Self {
            hasher,
            table: BucketTable::with_capacity(capacity),
            arena: EntryArena::with_capacity(capacity),
            id: SetId::fresh(),
            epoch: Epoch::default(),
            guard: ProbeGuard::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.len() == 0
    }

    /// Current number of buckets.
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    pub fn hasher(&self) -> &S {
        &self.hasher
    }

    /// Drop every value. The bucket count is kept.
    pub fn clear(&mut self) {
        self.table.clear();
        self.arena.clear();
        self.epoch.bump();
    }

    /// Exchange contents (values, buckets and hasher) with `other`.
    ///
    /// Each set keeps its own identity, and both epochs move, so cursors taken
    /// from either side before the swap no longer resolve.
    pub fn swap(&mut self, other: &mut Self) {
        core::mem::swap(&mut self.hasher, &mut other.hasher);
        core::mem::swap(&mut self.table, &mut other.table);
        core::mem::swap(&mut self.arena, &mut other.arena);
        self.epoch.bump();
        other.epoch.bump();
    }

    /// Cursor to the first value in slot order, or `end()` when empty.
    pub fn begin(&self) -> Cursor {
        match self.table.first_occupied(0) {
            Some(key) => self.cursor_at(key),
            None => self.end(),
        }
    }

    pub fn end(&self) -> Cursor {
        Cursor::new(self.id, self.epoch, Position::End)
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            table: &self.table,
            arena: &self.arena,
            next: self.table.first_occupied(0),
            remaining: self.arena.len(),
        }
    }

    fn cursor_at(&self, key: EntryKey) -> Cursor {
        Cursor::new(self.id, self.epoch, Position::At(key))
    }

    pub(crate) fn cursor_stamp(&self) -> (SetId, Epoch) {
        (self.id, self.epoch)
    }

    pub(crate) fn cursor_value(&self, key: EntryKey) -> Option<&T> {
        self.arena.value(key)
    }

    pub(crate) fn cursor_successor(&self, key: EntryKey) -> Option<EntryKey> {
        self.table.successor(&self.arena, key)
    }

    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        self.table.assert_consistent(&self.arena);
    }

    #[cfg(test)]
    pub(crate) fn slot_head(&self, slot: usize) -> Option<&T> {
        self.table.head(slot).and_then(|k| self.arena.value(k))
    }
}

impl<T, S> ChainedHashSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
    /// Add `value` unless an equal one is present.
    ///
    /// Returns a cursor to the stored value and whether it was newly inserted.
    /// A duplicate leaves the set untouched (outstanding cursors stay valid) and
    /// drops the offered value.
    pub fn insert(&mut self, value: T) -> (Cursor, bool) {
        let _g = self.guard.enter();
        let hash = self.hasher.hash_one(&value);
        let slot = self.table.slot_of(hash);
        if let Some(key) = self
            .table
            .find(&self.arena, slot, |e| e.hash == hash && e.value == value)
        {
            return (Cursor::new(self.id, self.epoch, Position::At(key)), false);
        }

        if self.arena.len() == self.table.capacity() {
            let grown = self
                .table
                .capacity()
                .checked_mul(2)
                .expect("capacity overflow");
            self.table = self.table.rebuild(&mut self.arena, grown);
        }

        let slot = self.table.slot_of(hash);
        let tail = self.table.tail(&self.arena, slot);
        let key = self.arena.alloc(value, hash);
        self.table.link_after(&mut self.arena, slot, tail, key);
        self.epoch.bump();
        (Cursor::new(self.id, self.epoch, Position::At(key)), true)
    }

    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _g = self.guard.enter();
        self.locate(value).is_some()
    }

    /// Cursor to the value equal to `value`, or `end()` if there is none.
    pub fn find<Q>(&self, value: &Q) -> Cursor
    where
        T: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _g = self.guard.enter();
        let position = match self.locate(value) {
            Some((_, key)) => Position::At(key),
            None => Position::End,
        };
        Cursor::new(self.id, self.epoch, position)
    }

    pub fn get<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _g = self.guard.enter();
        let (_, key) = self.locate(value)?;
        self.arena.value(key)
    }

    /// Remove the value equal to `value`, if any.
    pub fn erase<Q>(&mut self, value: &Q)
    where
        T: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _ = self.take(value);
    }

    /// Like `erase`, reporting whether a value was removed.
    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.take(value).is_some()
    }

    /// Remove and return the stored value equal to `value`.
    ///
    /// The entry is unlinked before the value is handed back, so dropping it
    /// may use the set again.
    pub fn take<Q>(&mut self, value: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let entry = {
            let _g = self.guard.enter();
            let (slot, key) = self.locate(value)?;
            self.table.unlink(&mut self.arena, slot, key);
            self.epoch.bump();
            self.arena.free(key)?
        };
        Some(entry.value)
    }

    fn locate<Q>(&self, value: &Q) -> Option<(usize, EntryKey)>
    where
        T: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let hash = self.hasher.hash_one(value);
        let slot = self.table.slot_of(hash);
        self.table
            .find(&self.arena, slot, |e| e.hash == hash && e.value.borrow() == value)
            .map(|key| (slot, key))
    }
}

impl<T, S> Clone for ChainedHashSet<T, S>
where
    T: Clone,
    S: Clone,
{
    /// The clone is a distinct set: cursors of `self` do not resolve against it.
    fn clone(&self) -> Self {
        Self {
            hasher: self.hasher.clone(),
            table: self.table.clone(),
            arena: self.arena.clone(),
            id: SetId::fresh(),
            epoch: Epoch::default(),
            guard: ProbeGuard::new(),
        }
    }
}

impl<T, S> fmt::Debug for ChainedHashSet<T, S>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T, S> PartialEq for ChainedHashSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|v| other.contains(v))
    }
}

impl<T, S> Eq for ChainedHashSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
}

impl<T, S> Extend<T> for ChainedHashSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T, S> FromIterator<T> for ChainedHashSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::with_hasher(S::default());
        set.extend(iter);
        set
    }
}

/// Borrowing iterator over a set, in the same order a cursor walks.
pub struct Iter<'a, T> {
    table: &'a BucketTable,
    arena: &'a EntryArena<T>,
    next: Option<EntryKey>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let key = self.next?;
        self.next = self.table.successor(self.arena, key);
        self.remaining -= 1;
        self.arena.value(key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            table: self.table,
            arena: self.arena,
            next: self.next,
            remaining: self.remaining,
        }
    }
}

impl<'a, T, S> IntoIterator for &'a ChainedHashSet<T, S> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Owning iterator; yields values in slot order.
pub struct IntoIter<T> {
    order: std::vec::IntoIter<EntryKey>,
    arena: EntryArena<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let key = self.order.next()?;
        self.arena.detach(key);
        self.arena.free(key).map(|e| e.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.order.size_hint()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}

impl<T, S> IntoIterator for ChainedHashSet<T, S> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        let order = self.table.keys_in_order(&self.arena);
        IntoIter {
            order: order.into_iter(),
            arena: self.arena,
        }
    }
}
