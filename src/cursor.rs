//! Cursor: a detached, checked position inside a `ChainedHashSet`.
//!
//! A cursor does not borrow the set. It records which set produced it and the
//! set's epoch at that moment; every access re-validates both, so a cursor
//! kept across an insert, erase, growth, clear or swap reports `Stale`
//! instead of reading a rebuilt table.

use crate::chained_hash_set::ChainedHashSet;
use crate::entry_arena::EntryKey;
use crate::epoch::{Epoch, SetId};
use core::fmt;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub(crate) enum Position {
    At(EntryKey),
    End,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Cursor {
    owner: SetId,
    epoch: Epoch,
    position: Position,
}

/// Why a cursor could not be used against a set.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum CursorError {
    /// The cursor came from a different set.
    WrongSet,
    /// The set was structurally modified after the cursor was created.
    Stale,
    /// The cursor is the end sentinel and has no value.
    End,
}

impl fmt::Display for CursorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CursorError::WrongSet => f.write_str("cursor belongs to a different set"),
            CursorError::Stale => f.write_str("cursor invalidated by a structural mutation"),
            CursorError::End => f.write_str("cursor is at the end of the set"),
        }
    }
}

impl std::error::Error for CursorError {}

impl Cursor {
    pub(crate) fn new(owner: SetId, epoch: Epoch, position: Position) -> Self {
        Self {
            owner,
            epoch,
            position,
        }
    }

    /// True for the end sentinel.
    pub fn is_end(&self) -> bool {
        self.position == Position::End
    }

    /// True if `set` produced this cursor and has not changed shape since.
    pub fn is_valid_for<T, S>(&self, set: &ChainedHashSet<T, S>) -> bool {
        self.check(set).is_ok()
    }

    /// Borrow the value under the cursor.
    pub fn value<'a, T, S>(&self, set: &'a ChainedHashSet<T, S>) -> Result<&'a T, CursorError> {
        match self.check(set)? {
            Position::At(key) => set.cursor_value(key).ok_or(CursorError::Stale),
            Position::End => Err(CursorError::End),
        }
    }

    /// Step to the next value in slot order. Advancing the end cursor keeps it at end.
    pub fn advance<T, S>(&mut self, set: &ChainedHashSet<T, S>) -> Result<(), CursorError> {
        if let Position::At(key) = self.check(set)? {
            self.position = match set.cursor_successor(key) {
                Some(next) => Position::At(next),
                None => Position::End,
            };
        }
        Ok(())
    }

    fn check<T, S>(&self, set: &ChainedHashSet<T, S>) -> Result<Position, CursorError> {
        let (owner, epoch) = set.cursor_stamp();
        if owner != self.owner {
            return Err(CursorError::WrongSet);
        }
        if epoch != self.epoch {
            return Err(CursorError::Stale);
        }
        Ok(self.position)
    }
}
