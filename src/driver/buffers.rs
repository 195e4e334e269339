//! Statically allocated transport buffers.

use core::sync::atomic::{AtomicBool, Ordering};

use super::error::{ConfigError, ConfigResult};
use crate::internal::constants::MAX_TRANSFER_LENGTH;
use crate::internal::dma::WordSlot;

/// Receive ring and transmit buffer storage, claimable once.
///
/// Place this in a `static` and hand it to
/// [`UartDma::initialize`](crate::UartDma::initialize). The DMA engine holds
/// raw addresses into both arrays, so they must not move while a channel is
/// running; a `static` guarantees that.
///
/// # Type Parameters
/// * `RX` - Receive ring capacity in slots (one byte per slot)
/// * `TX` - Transmit buffer capacity in slots
///
/// # Example
///
/// ```ignore
/// static BUFFERS: DmaBuffers<256, 512> = DmaBuffers::new();
/// ```
pub struct DmaBuffers<const RX: usize, const TX: usize> {
    rx: [WordSlot; RX],
    tx: [WordSlot; TX],
    claimed: AtomicBool,
}

impl<const RX: usize, const TX: usize> DmaBuffers<RX, TX> {
    const VALID: () = {
        assert!(RX > 0 && TX > 0, "transport buffers must not be empty");
        assert!(
            RX <= MAX_TRANSFER_LENGTH && TX <= MAX_TRANSFER_LENGTH,
            "transport buffer exceeds the DMA transfer length field"
        );
    };

    /// Create zeroed, unclaimed storage. Const-compatible.
    #[must_use]
    #[allow(clippy::let_unit_value)]
    pub const fn new() -> Self {
        let () = Self::VALID;
        Self {
            rx: [const { WordSlot::new() }; RX],
            tx: [const { WordSlot::new() }; TX],
            claimed: AtomicBool::new(false),
        }
    }

    /// Take the receive ring and transmit buffer.
    ///
    /// # Errors
    /// - `AlreadyInitialized` - an earlier call already claimed them
    pub fn claim(&self) -> ConfigResult<(&[WordSlot; RX], &[WordSlot; TX])> {
        if self.claimed.swap(true, Ordering::AcqRel) {
            return Err(ConfigError::AlreadyInitialized);
        }
        Ok((&self.rx, &self.tx))
    }

    /// Whether [`claim`](Self::claim) has succeeded
    #[inline]
    pub fn is_claimed(&self) -> bool {
        self.claimed.load(Ordering::Acquire)
    }
}

impl<const RX: usize, const TX: usize> Default for DmaBuffers<RX, TX> {
    fn default() -> Self {
        Self::new()
    }
}
