//! chained-hashset: a single-threaded hash set with chained buckets and
//! checked cursors.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a separate-chaining hash set whose chains never own each other,
//!   so erase, clear and growth can be reasoned about one entry at a time.
//! - Layers:
//!   - EntryArena<T>: `slotmap` storage for entries (value, cached hash,
//!     prev/next keys). Freeing an entry drops that entry only.
//!   - BucketTable: one head key per slot; walks, appends to the true tail,
//!     unlinks (sole/head/interior/tail) and rebuilds into a doubled table.
//!   - ChainedHashSet<T, S>: public API; hashes with `S: BuildHasher`,
//!     decides when to grow, stamps cursors with owner id and epoch.
//!
//! Constraints
//! - Single-threaded: `!Send`/`!Sync` by design (no atomics on the hot path).
//! - Bucket count starts at 32 or the constructor argument and only ever
//!   doubles, when a new value arrives while `len() == capacity()`.
//! - Each entry caches its `u64` hash; growth relinks entries with it and
//!   never calls `T: Hash` again.
//! - Chains are appended at their real tail; insertion never cuts a chain.
//!
//! Cursors and invalidation
//! - `Cursor` is a plain value (no borrow of the set). It carries the set's
//!   identity and epoch; every successful insert, erase, growth, clear and
//!   swap bumps the epoch, and a cursor from an older epoch reports
//!   `CursorError::Stale` rather than reading the table.
//! - `iter()` is the borrowing alternative; the borrow checker keeps the set
//!   frozen while it runs.
//!
//! Reentrancy policy
//! - Chain probes run user `Hash`/`Eq`. A debug-only guard panics if that
//!   code re-enters the same set. `take` unlinks before handing back the
//!   value, so `Drop` for `T` may use the set freely.
//!
//! Notes and non-goals
//! - No shrinking, no load-factor tuning, no custom allocators.

mod bucket_table;
mod chained_hash_set;
mod chained_hash_set_proptest;
mod cursor;
mod entry_arena;
mod epoch;
mod reentrancy;

// Public surface
pub use chained_hash_set::{ChainedHashSet, IntoIter, Iter};
pub use cursor::{Cursor, CursorError};
