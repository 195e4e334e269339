//! Scoped interrupt suspension around the transmit length update.
//!
//! Masking interrupts keeps ISRs from touching the TX channel while a running
//! transfer is extended. It does not stop the DMA engine, which can still
//! finish the transfer and clear the enable flag at any point. The coalescer
//! handles that by writing the length first and reading the flag after.
//!
//! The guard wraps `critical_section::acquire`/`release`. Dropping it restores
//! whatever interrupt state was in effect when it was taken, so nesting inside
//! an outer critical section (or an ISR) leaves interrupts masked.

use core::marker::PhantomData;

use critical_section::RestoreState;

/// RAII critical section.
///
/// Not `Send`: the restore state belongs to the context that acquired it.
#[must_use = "the critical section ends when the guard is dropped"]
pub struct CompletionGuard {
    restore: RestoreState,
    _not_send: PhantomData<*mut ()>,
}

impl CompletionGuard {
    /// Enter a critical section.
    #[inline]
    pub fn acquire() -> Self {
        // SAFETY: the matching release happens exactly once, in Drop.
        let restore = unsafe { critical_section::acquire() };
        Self {
            restore,
            _not_send: PhantomData,
        }
    }
}

impl Drop for CompletionGuard {
    #[inline]
    fn drop(&mut self) {
        // SAFETY: `restore` came from the acquire in `CompletionGuard::acquire`
        // and is released once.
        unsafe { critical_section::release(self.restore) }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
