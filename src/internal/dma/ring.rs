//! Circular receive ring filled by the DMA engine.
//!
//! The RX channel runs in circular mode over the ring and never stops. The
//! hardware owns the write cursor (`NEXT_DEST_ADDR`); software owns the read
//! cursor. Unread data is the circular distance from read to write.
//!
//! A full lap looks the same as an empty ring, so at most `N - 1` bytes can be
//! outstanding between two drains. Overruns are not detected.

use super::slot::{WordSlot, base_addr, load_bytes};
use crate::driver::error::{IoError, IoResult};
use crate::hal::dma::DmaChannel;
use crate::internal::constants::WORD_SIZE;

/// Receive tracker over `N` word slots.
pub struct RxRing<'a, const N: usize> {
    slots: &'a [WordSlot; N],
    /// Read cursor; `None` until the channel reports its first cycle started
    read: Option<usize>,
}

impl<'a, const N: usize> RxRing<'a, N> {
    /// Create a tracker over a claimed ring. The read cursor starts unseeded.
    #[must_use]
    pub const fn new(slots: &'a [WordSlot; N]) -> Self {
        Self { slots, read: None }
    }

    /// Ring capacity in slots
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

    /// Whether the read cursor has been seeded
    #[inline(always)]
    pub const fn is_seeded(&self) -> bool {
        self.read.is_some()
    }

    /// Current read index, if seeded
    #[cfg(test)]
    pub const fn read_index(&self) -> Option<usize> {
        self.read
    }

    /// Slot index hardware will write next.
    ///
    /// This is the only place the hardware cursor is read.
    #[inline]
    pub fn write_cursor<C: DmaChannel + ?Sized>(&self, channel: &C) -> usize {
        let offset = channel.next_dest_addr().wrapping_sub(channel.dest_base_addr());
        (offset / WORD_SIZE) % N
    }

    /// Read cursor to use for this call, seeding it if the channel has started
    fn cursor<C: DmaChannel + ?Sized>(&self, channel: &C) -> Option<usize> {
        match self.read {
            Some(read) => Some(read),
            None if channel.status().started => Some(0),
            None => None,
        }
    }

    /// Circular distance from `read` to `write`
    #[inline(always)]
    const fn distance(read: usize, write: usize) -> usize {
        if write >= read { write - read } else { N - read + write }
    }

    /// Number of unread bytes, without consuming them
    pub fn pending<C: DmaChannel + ?Sized>(&self, channel: &C) -> usize {
        match self.cursor(channel) {
            Some(read) => Self::distance(read, self.write_cursor(channel)),
            None => 0,
        }
    }

    /// Copy every byte received since the last drain into `dest`.
    ///
    /// Returns the number of bytes copied, `0` when nothing arrived or the
    /// channel has not started yet. The read cursor moves to the write cursor
    /// sampled at the start of the call.
    ///
    /// # Errors
    /// - `BufferTooSmall` - `dest` is shorter than the unread data. Nothing
    ///   is copied and the data stays unread.
    pub fn drain<C: DmaChannel + ?Sized>(
        &mut self,
        channel: &C,
        dest: &mut [u8],
    ) -> IoResult<usize> {
        let Some(read) = self.cursor(channel) else {
            return Ok(0);
        };
        if !self.is_seeded() {
            #[cfg(feature = "defmt")]
            defmt::debug!("rx ring seeded at {:#010x}", self.base_addr());
            self.read = Some(read);
        }

        let write = self.write_cursor(channel);
        if read == write {
            return Ok(0);
        }

        let count = Self::distance(read, write);
        if dest.len() < count {
            return Err(IoError::BufferTooSmall);
        }

        if read < write {
            load_bytes(&self.slots[read..write], &mut dest[..count]);
        } else {
            let (head, tail) = dest[..count].split_at_mut(N - read);
            load_bytes(&self.slots[read..], head);
            load_bytes(&self.slots[..write], tail);
        }

        self.read = Some(write);
        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
