//! Owner identity and structural epochs used to validate cursors.

use core::sync::atomic::{AtomicU64, Ordering};

static NEXT_SET_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of one set instance. Survives moves; a clone gets a new one.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub(crate) struct SetId(u64);

impl SetId {
    pub(crate) fn fresh() -> Self {
        SetId(NEXT_SET_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Counter bumped on every structural mutation of a set.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub(crate) struct Epoch(u64);

impl Epoch {
    #[inline]
    pub(crate) fn bump(&mut self) {
        self.0 = self.0.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        let a = SetId::fresh();
        let b = SetId::fresh();
        assert_ne!(a, b);
    }

    #[test]
    fn bump_changes_epoch() {
        let mut e = Epoch::default();
        let before = e;
        e.bump();
        assert_ne!(before, e);
    }
}
