//! EntryArena: generational storage for chain entries.
//!
//! Entries never own each other. A slot or a neighbor refers to an entry by
//! its `EntryKey`; freeing an entry drops that entry alone.

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Stable, generational address of an entry.
    pub(crate) struct EntryKey;
}

#[derive(Debug, Clone)]
pub(crate) struct Entry<T> {
    pub(crate) value: T,
    pub(crate) hash: u64,
    pub(crate) prev: Option<EntryKey>, // None at the chain head
    pub(crate) next: Option<EntryKey>, // None at the chain tail
}

#[derive(Debug, Clone)]
pub(crate) struct EntryArena<T> {
    entries: SlotMap<EntryKey, Entry<T>>,
}

impl<T> EntryArena<T> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: SlotMap::with_capacity_and_key(capacity),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Store a detached entry (no neighbors yet).
    pub(crate) fn alloc(&mut self, value: T, hash: u64) -> EntryKey {
        self.entries.insert(Entry {
            value,
            hash,
            prev: None,
            next: None,
        })
    }

    /// Drop a single entry. Callers unlink it from its chain first.
    pub(crate) fn free(&mut self, key: EntryKey) -> Option<Entry<T>> {
        let entry = self.entries.remove(key)?;
        debug_assert!(
            entry.prev.is_none() && entry.next.is_none(),
            "freed entry still linked"
        );
        Some(entry)
    }

    pub(crate) fn get(&self, key: EntryKey) -> Option<&Entry<T>> {
        self.entries.get(key)
    }

    pub(crate) fn value(&self, key: EntryKey) -> Option<&T> {
        self.entries.get(key).map(|e| &e.value)
    }

    pub(crate) fn hash(&self, key: EntryKey) -> Option<u64> {
        self.entries.get(key).map(|e| e.hash)
    }

    pub(crate) fn next(&self, key: EntryKey) -> Option<EntryKey> {
        self.entries.get(key).and_then(|e| e.next)
    }

    pub(crate) fn set_next(&mut self, key: EntryKey, next: Option<EntryKey>) {
        if let Some(e) = self.entries.get_mut(key) {
            e.next = next;
        }
    }

    pub(crate) fn set_prev(&mut self, key: EntryKey, prev: Option<EntryKey>) {
        if let Some(e) = self.entries.get_mut(key) {
            e.prev = prev;
        }
    }

    pub(crate) fn detach(&mut self, key: EntryKey) {
        if let Some(e) = self.entries.get_mut(key) {
            e.prev = None;
            e.next = None;
        }
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    #[cfg(test)]
    pub(crate) fn keys(&self) -> impl Iterator<Item = EntryKey> + '_ {
        self.entries.keys()
    }
}
