//! Debug-only guard against re-entering a set from user `Hash`/`Eq`.
//!
//! While a chain is being probed or relinked, the only foreign code that runs
//! is the element's `Hash` and `Eq`. If one of those reaches back into the same
//! set the links may be half-updated, so debug builds panic on the nested
//! entry. Release builds compile the check away.

#[cfg(debug_assertions)]
use core::cell::Cell;
use core::marker::PhantomData;

#[derive(Debug)]
pub(crate) struct ProbeGuard {
    #[cfg(debug_assertions)]
    active: Cell<bool>,
    // Single-threaded container: keep the owner !Send + !Sync.
    _nosend: PhantomData<*mut ()>,
}

impl ProbeGuard {
    pub(crate) const fn new() -> Self {
        Self {
            #[cfg(debug_assertions)]
            active: Cell::new(false),
            _nosend: PhantomData,
        }
    }

    /// Mark the owner busy until the returned token drops.
    #[inline]
    pub(crate) fn enter(&self) -> Probing<'_> {
        #[cfg(debug_assertions)]
        {
            assert!(
                !self.active.replace(true),
                "reentrancy detected: set accessed from Hash/Eq while probing"
            );
            return Probing { owner: self };
        }

        #[cfg(not(debug_assertions))]
        {
            return Probing { _owner: PhantomData };
        }
    }
}

impl Default for ProbeGuard {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) struct Probing<'a> {
    #[cfg(debug_assertions)]
    owner: &'a ProbeGuard,
    #[cfg(not(debug_assertions))]
    _owner: PhantomData<&'a ()>,
}

impl Drop for Probing<'_> {
    fn drop(&mut self) {
        #[cfg(debug_assertions)]
        self.owner.active.set(false);
    }
}
