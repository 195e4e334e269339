//! DMA Controller Register Definitions
//!
//! The RSL10 DMA block has eight channels. Each register below is an array
//! of eight words, one per channel, so channel `n` of a register lives at
//! `DMA_BASE + OFFSET + n * 4`.

// Full register map; the transport only uses part of it.
#![allow(dead_code)]

use super::{CHANNEL_STRIDE, DMA_BASE, chan_reg_ro, chan_reg_rw, modify_reg};
use crate::driver::status::ChannelStatus;
use crate::hal::dma::{DmaChannel, Transfer};
use crate::internal::constants::DMA_CHANNEL_COUNT;

// =============================================================================
// Register Offsets
// =============================================================================

/// Channel control register array offset
pub const DMA_CTRL0_OFFSET: usize = 0x00;
/// Source base address register array offset
pub const DMA_SRC_BASE_ADDR_OFFSET: usize = 0x20;
/// Destination base address register array offset
pub const DMA_DEST_BASE_ADDR_OFFSET: usize = 0x40;
/// Transfer length / counter interrupt register array offset
pub const DMA_CTRL1_OFFSET: usize = 0x60;
/// Next source address register array offset (read-only)
pub const DMA_NEXT_SRC_ADDR_OFFSET: usize = 0x80;
/// Next destination address register array offset (read-only)
pub const DMA_NEXT_DEST_ADDR_OFFSET: usize = 0xA0;
/// Word count register array offset (read-only)
pub const DMA_WORD_CNT_OFFSET: usize = 0xC0;
/// Channel status register array offset
pub const DMA_STATUS_OFFSET: usize = 0xE0;

// =============================================================================
// CTRL0 Bits
// =============================================================================

/// Channel enable
pub const CTRL0_ENABLE: u32 = 1 << 0;
/// Circular addressing: wrap to the base address after `length` words
pub const CTRL0_ADDR_CIRC: u32 = 1 << 1;
/// Transfer direction shift
pub const CTRL0_TRANSFER_SHIFT: u32 = 2;
/// Transfer direction mask
pub const CTRL0_TRANSFER_MASK: u32 = 0x3 << 2;
/// Channel priority shift
pub const CTRL0_PRIORITY_SHIFT: u32 = 4;
/// Channel priority mask
pub const CTRL0_PRIORITY_MASK: u32 = 0x3 << 4;
/// Source peripheral select shift
pub const CTRL0_SRC_SELECT_SHIFT: u32 = 6;
/// Source peripheral select mask
pub const CTRL0_SRC_SELECT_MASK: u32 = 0xF << 6;
/// Destination peripheral select shift
pub const CTRL0_DEST_SELECT_SHIFT: u32 = 10;
/// Destination peripheral select mask
pub const CTRL0_DEST_SELECT_MASK: u32 = 0xF << 10;
/// Increment the source address after each word
pub const CTRL0_SRC_ADDR_INC: u32 = 1 << 14;
/// Source address step shift
pub const CTRL0_SRC_STEP_SHIFT: u32 = 15;
/// Increment the destination address after each word
pub const CTRL0_DEST_ADDR_INC: u32 = 1 << 17;
/// Destination address step shift
pub const CTRL0_DEST_STEP_SHIFT: u32 = 18;
/// Source word size shift
pub const CTRL0_SRC_WORD_SHIFT: u32 = 20;
/// Destination word size shift
pub const CTRL0_DEST_WORD_SHIFT: u32 = 22;
/// Start interrupt enable
pub const CTRL0_START_INT_ENABLE: u32 = 1 << 24;
/// Counter interrupt enable
pub const CTRL0_COUNTER_INT_ENABLE: u32 = 1 << 25;
/// Complete interrupt enable
pub const CTRL0_COMPLETE_INT_ENABLE: u32 = 1 << 26;
/// Error interrupt enable
pub const CTRL0_ERROR_INT_ENABLE: u32 = 1 << 27;
/// Disable interrupt enable
pub const CTRL0_DISABLE_INT_ENABLE: u32 = 1 << 28;
/// Big-endian byte order (little-endian when clear)
pub const CTRL0_BIG_ENDIAN: u32 = 1 << 29;

/// Transfer direction field values
pub mod transfer {
    /// Memory to memory
    pub const M_TO_M: u32 = 0;
    /// Peripheral to memory
    pub const P_TO_M: u32 = 1;
    /// Memory to peripheral
    pub const M_TO_P: u32 = 2;
    /// Peripheral to peripheral
    pub const P_TO_P: u32 = 3;
}

/// Peripheral select field values
pub mod select {
    /// Memory (no peripheral handshake)
    pub const MEMORY: u32 = 0;
    /// UART data register
    pub const UART: u32 = 3;
}

/// Word size field values
pub mod word {
    /// 8-bit words
    pub const BITS_8: u32 = 0;
    /// 16-bit words
    pub const BITS_16: u32 = 1;
    /// 32-bit words
    pub const BITS_32: u32 = 2;
}

// =============================================================================
// CTRL1 Fields
// =============================================================================

/// Transfer length mask (low half-word)
pub const CTRL1_TRANSFER_LENGTH_MASK: u32 = 0xFFFF;
/// Counter interrupt value shift (high half-word)
pub const CTRL1_COUNTER_INT_SHIFT: u32 = 16;

// =============================================================================
// STATUS Bits
// =============================================================================

/// Channel state mask
pub const STATUS_STATE_MASK: u32 = 0x7;
/// Error interrupt status
pub const STATUS_ERROR_INT: u32 = 1 << 3;
/// Complete interrupt status
pub const STATUS_COMPLETE_INT: u32 = 1 << 4;
/// Counter interrupt status
pub const STATUS_COUNTER_INT: u32 = 1 << 5;
/// Start interrupt status
pub const STATUS_START_INT: u32 = 1 << 6;
/// Disable interrupt status
pub const STATUS_DISABLE_INT: u32 = 1 << 7;

/// All interrupt status bits (write-1-to-clear)
pub const STATUS_ALL_INTERRUPTS: u32 = STATUS_ERROR_INT
    | STATUS_COMPLETE_INT
    | STATUS_COUNTER_INT
    | STATUS_START_INT
    | STATUS_DISABLE_INT;

// =============================================================================
// Channel Register Access
// =============================================================================

/// Register view of one DMA channel.
///
/// Zero-sized; the channel number is part of the type so the RX and TX
/// channels cannot be mixed up.
#[cfg(feature = "rsl10")]
pub struct DmaChannelRegs<const N: usize> {
    _private: (),
}

#[cfg(feature = "rsl10")]
impl<const N: usize> DmaChannelRegs<N> {
    const VALID: () = assert!(N < DMA_CHANNEL_COUNT, "DMA channel out of range");

    /// Take the register view of channel `N`.
    ///
    /// # Safety
    ///
    /// The caller must be the only owner of channel `N`. Two live views of
    /// the same channel let two drivers reprogram it behind each other's back.
    #[allow(clippy::let_unit_value)]
    pub const unsafe fn steal() -> Self {
        let () = Self::VALID;
        Self { _private: () }
    }

    /// Channel number
    #[inline(always)]
    pub const fn number(&self) -> usize {
        N
    }

    #[inline(always)]
    const fn addr(offset: usize) -> usize {
        DMA_BASE + offset + N * CHANNEL_STRIDE
    }

    chan_reg_rw!(ctrl0, set_ctrl0, DMA_CTRL0_OFFSET, "CTRL0 register");
    chan_reg_rw!(ctrl1, set_ctrl1, DMA_CTRL1_OFFSET, "CTRL1 register");
    chan_reg_rw!(src_base_addr, set_src_base_addr, DMA_SRC_BASE_ADDR_OFFSET, "source base address");
    chan_reg_rw!(dest_base_addr_raw, set_dest_base_addr, DMA_DEST_BASE_ADDR_OFFSET, "destination base address");
    chan_reg_rw!(status_raw, write_status, DMA_STATUS_OFFSET, "status register");

    chan_reg_ro!(next_src_addr, DMA_NEXT_SRC_ADDR_OFFSET, "next source address");
    chan_reg_ro!(next_dest_addr_raw, DMA_NEXT_DEST_ADDR_OFFSET, "next destination address");
    chan_reg_ro!(word_count, DMA_WORD_CNT_OFFSET, "transferred word count");
}

#[cfg(feature = "rsl10")]
impl<const N: usize> DmaChannel for DmaChannelRegs<N> {
    fn configure(&mut self, transfer: &Transfer) {
        self.set_src_base_addr(transfer.src_addr as u32);
        self.set_dest_base_addr(transfer.dest_addr as u32);
        self.set_ctrl1(transfer.length as u32 & CTRL1_TRANSFER_LENGTH_MASK);
        self.set_ctrl0(transfer.config.to_raw());
    }

    fn enable(&mut self) {
        // SAFETY: address derived from the validated channel number
        unsafe { modify_reg(Self::addr(DMA_CTRL0_OFFSET), |v| v | CTRL0_ENABLE) }
    }

    fn disable(&mut self) {
        // SAFETY: address derived from the validated channel number
        unsafe { modify_reg(Self::addr(DMA_CTRL0_OFFSET), |v| v & !CTRL0_ENABLE) }
    }

    fn is_enabled(&self) -> bool {
        (self.ctrl0() & CTRL0_ENABLE) != 0
    }

    fn status(&self) -> ChannelStatus {
        ChannelStatus::from_raw(self.status_raw())
    }

    fn clear_status(&mut self) {
        self.write_status(STATUS_ALL_INTERRUPTS);
    }

    fn transfer_length(&self) -> usize {
        (self.ctrl1() & CTRL1_TRANSFER_LENGTH_MASK) as usize
    }

    fn set_transfer_length(&mut self, len: usize) {
        // Only the length half-word changes; the counter interrupt value stays.
        // SAFETY: address derived from the validated channel number
        unsafe {
            modify_reg(Self::addr(DMA_CTRL1_OFFSET), |v| {
                (v & !CTRL1_TRANSFER_LENGTH_MASK) | (len as u32 & CTRL1_TRANSFER_LENGTH_MASK)
            });
        }
    }

    fn dest_base_addr(&self) -> usize {
        self.dest_base_addr_raw() as usize
    }

    fn next_dest_addr(&self) -> usize {
        self.next_dest_addr_raw() as usize
    }
}
