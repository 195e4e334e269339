//! Linear transmit buffer with in-flight coalescing.
//!
//! While the TX channel is running, new data is appended after the bytes it
//! is still sending and the transfer length is bumped. Once the channel has
//! gone idle, data is copied to the start of the buffer and a fresh transfer
//! is started.
//!
//! The DMA engine clears the enable flag on its own when a transfer ends, so
//! the length is written first and the flag read afterwards. A channel that
//! is still enabled after the write will send the appended bytes. One that
//! stopped may or may not have picked up the new length, so the data is sent
//! again in a fresh transfer. Appended bytes can be repeated but never lost.
//!
//! The channel's enable flag is the active flag and its CTRL1 length is the
//! fill length. Neither is cached in software.

use super::slot::{WordSlot, base_addr, store_bytes};
use crate::driver::error::{DmaError, DmaResult};
use crate::hal::critical::CompletionGuard;
use crate::hal::dma::{ChannelConfig, DmaChannel, Transfer};

/// Transmit coalescer over `N` word slots.
pub struct TxBuffer<'a, const N: usize> {
    slots: &'a [WordSlot; N],
    /// UART transmit data register, the channel's fixed destination
    dest_addr: usize,
}

impl<'a, const N: usize> TxBuffer<'a, N> {
    /// Create a coalescer over a claimed buffer, feeding the data register at `dest_addr`.
    #[must_use]
    pub const fn new(slots: &'a [WordSlot; N], dest_addr: usize) -> Self {
        Self { slots, dest_addr }
    }

    /// Buffer capacity in slots
    #[inline(always)]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Bus address of slot 0
    #[inline(always)]
    pub fn base_addr(&self) -> usize {
        base_addr(self.slots)
    }

    /// Bytes queued in the active transfer, `0` when idle
    pub fn len<C: DmaChannel + ?Sized>(&self, channel: &C) -> usize {
        if channel.is_enabled() {
            channel.transfer_length()
        } else {
            0
        }
    }

    /// Queue `data` for transmission.
    ///
    /// Appends to the active transfer when there is one, otherwise starts a
    /// new transfer from the buffer base. An empty `data` is a no-op.
    ///
    /// # Errors
    /// - `Overflow` - `data` does not fit after the active transfer's bytes,
    ///   or exceeds the buffer when idle. Nothing is copied and the channel
    ///   is left alone.
    pub fn enqueue<C: DmaChannel + ?Sized>(
        &mut self,
        channel: &mut C,
        data: &[u8],
    ) -> DmaResult<()> {
        if data.is_empty() {
            return Ok(());
        }

        if channel.is_enabled() {
            let len = channel.transfer_length();
            let Some(end) = len.checked_add(data.len()).filter(|&end| end <= N) else {
                #[cfg(feature = "defmt")]
                defmt::warn!("tx overflow: {} queued + {} new > {}", len, data.len(), N);
                return Err(DmaError::Overflow);
            };

            store_bytes(&self.slots[len..end], data);

            let guard = CompletionGuard::acquire();
            channel.set_transfer_length(end);
            let still_running = channel.is_enabled();
            drop(guard);
            if still_running {
                return Ok(());
            }

            #[cfg(feature = "defmt")]
            defmt::debug!("tx completed during append, restarting with {} bytes", data.len());
        }

        self.start(channel, data)
    }

    /// Copy `data` to the buffer base and start a fresh transfer
    fn start<C: DmaChannel + ?Sized>(&mut self, channel: &mut C, data: &[u8]) -> DmaResult<()> {
        if data.len() > N {
            #[cfg(feature = "defmt")]
            defmt::warn!("tx overflow: {} bytes > {}", data.len(), N);
            return Err(DmaError::Overflow);
        }

        store_bytes(&self.slots[..data.len()], data);

        channel.configure(&Transfer {
            config: ChannelConfig::uart_tx(),
            length: data.len(),
            src_addr: self.base_addr(),
            dest_addr: self.dest_addr,
        });
        channel.enable();
        channel.clear_status();
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
