//! BucketTable: one chain per slot, chains threaded through the entry arena.
//!
//! The table only stores the key of each slot's chain head. Everything else
//! (neighbors, cached hash) lives in the `EntryArena`, so relinking never moves
//! a value.

use crate::entry_arena::{Entry, EntryArena, EntryKey};

/// Bucket count used by `ChainedHashSet::new`.
pub(crate) const DEFAULT_CAPACITY: usize = 32;

#[derive(Debug, Clone)]
pub(crate) struct BucketTable {
    heads: Vec<Option<EntryKey>>,
}

impl BucketTable {
    /// A zero request degenerates to a single chain.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            heads: vec![None; capacity.max(1)],
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.heads.len()
    }

    pub(crate) fn slot_of(&self, hash: u64) -> usize {
        (hash % self.heads.len() as u64) as usize
    }

    pub(crate) fn head(&self, slot: usize) -> Option<EntryKey> {
        self.heads.get(slot).copied().flatten()
    }

    /// Walk the chain at `slot` and return the first entry accepted by `is_match`.
    pub(crate) fn find<T, F>(
        &self,
        arena: &EntryArena<T>,
        slot: usize,
        mut is_match: F,
    ) -> Option<EntryKey>
    where
        F: FnMut(&Entry<T>) -> bool,
    {
        let mut cur = self.head(slot);
        while let Some(key) = cur {
            let entry = arena.get(key)?;
            if is_match(entry) {
                return Some(key);
            }
            cur = entry.next;
        }
        None
    }

    /// Last entry of the chain at `slot`. Walks until the successor link is empty,
    /// so the result is always the true tail.
    pub(crate) fn tail<T>(&self, arena: &EntryArena<T>, slot: usize) -> Option<EntryKey> {
        let mut cur = self.head(slot)?;
        while let Some(next) = arena.next(cur) {
            cur = next;
        }
        Some(cur)
    }

    /// Link a detached entry after `tail`, or as the slot head when `tail` is None.
    pub(crate) fn link_after<T>(
        &mut self,
        arena: &mut EntryArena<T>,
        slot: usize,
        tail: Option<EntryKey>,
        key: EntryKey,
    ) {
        match tail {
            None => {
                debug_assert!(self.heads[slot].is_none(), "slot already has a head");
                self.heads[slot] = Some(key);
                arena.set_prev(key, None);
            }
            Some(t) => {
                debug_assert!(arena.next(t).is_none(), "appending after a non-tail entry");
                arena.set_next(t, Some(key));
                arena.set_prev(key, Some(t));
            }
        }
        arena.set_next(key, None);
    }

    /// Remove `key` from the chain at `slot`, splicing its neighbors together.
    /// The entry itself is left detached in the arena.
    pub(crate) fn unlink<T>(&mut self, arena: &mut EntryArena<T>, slot: usize, key: EntryKey) {
        let Some(entry) = arena.get(key) else {
            return;
        };
        let (prev, next) = (entry.prev, entry.next);
        match (prev, next) {
            // Sole entry.
            (None, None) => self.heads[slot] = None,
            // Tail of a longer chain.
            (Some(p), None) => arena.set_next(p, None),
            // Head of a longer chain: the second entry takes over.
            (None, Some(n)) => {
                self.heads[slot] = Some(n);
                arena.set_prev(n, None);
            }
            // Interior.
            (Some(p), Some(n)) => {
                arena.set_next(p, Some(n));
                arena.set_prev(n, Some(p));
            }
        }
        arena.detach(key);
    }

    /// Lowest-indexed non-empty slot at or after `from`.
    pub(crate) fn first_occupied(&self, from: usize) -> Option<EntryKey> {
        self.heads.get(from..)?.iter().find_map(|h| *h)
    }

    /// Entry that follows `key` in slot order, or None past the last entry.
    pub(crate) fn successor<T>(&self, arena: &EntryArena<T>, key: EntryKey) -> Option<EntryKey> {
        let entry = arena.get(key)?;
        if entry.next.is_some() {
            return entry.next;
        }
        self.first_occupied(self.slot_of(entry.hash) + 1)
    }

    /// Every live entry in slot order, head to tail within a slot.
    pub(crate) fn keys_in_order<T>(&self, arena: &EntryArena<T>) -> Vec<EntryKey> {
        let mut out = Vec::with_capacity(arena.len());
        for head in self.heads.iter().flatten() {
            let mut cur = Some(*head);
            while let Some(key) = cur {
                out.push(key);
                cur = arena.next(key);
            }
        }
        out
    }

    /// Build a table of `capacity` slots holding every entry of `self`.
    ///
    /// Entries are visited in the current slot order and appended to the tail of
    /// their new slot using the cached hash, so user `Hash` never runs here.
    pub(crate) fn rebuild<T>(&self, arena: &mut EntryArena<T>, capacity: usize) -> BucketTable {
        let order = self.keys_in_order(arena);
        let mut fresh = BucketTable::with_capacity(capacity);
        let mut tails: Vec<Option<EntryKey>> = vec![None; fresh.capacity()];
        for key in order {
            let Some(hash) = arena.hash(key) else {
                continue;
            };
            let slot = fresh.slot_of(hash);
            arena.detach(key);
            fresh.link_after(arena, slot, tails[slot], key);
            tails[slot] = Some(key);
        }
        fresh
    }

    pub(crate) fn clear(&mut self) {
        self.heads.fill(None);
    }

    /// Panics if any chain link, slot assignment or the entry count is off.
    #[cfg(test)]
    pub(crate) fn assert_consistent<T>(&self, arena: &EntryArena<T>) {
        let mut seen = 0usize;
        for (slot, head) in self.heads.iter().enumerate() {
            let mut prev: Option<EntryKey> = None;
            let mut cur = *head;
            while let Some(key) = cur {
                let entry = arena.get(key).expect("chain references a freed entry");
                assert_eq!(entry.prev, prev, "prev link mismatch in slot {}", slot);
                assert_eq!(self.slot_of(entry.hash), slot, "entry chained in the wrong slot");
                seen += 1;
                assert!(seen <= arena.len(), "cycle in chain at slot {}", slot);
                prev = Some(key);
                cur = entry.next;
            }
        }
        assert_eq!(seen, arena.len(), "unreachable entries in arena");
        let reachable = self.keys_in_order(arena);
        for key in arena.keys() {
            assert!(reachable.contains(&key), "arena entry not reachable from any slot");
        }
    }
}
