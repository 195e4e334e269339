//! DMA channel abstraction
//!
//! The transport never touches DMA registers directly. Everything it needs
//! from the DMA engine goes through [`DmaChannel`], which keeps the receive
//! tracker and the transmit coalescer testable on the host.
//!
//! Addresses are `usize` so the same code runs against host memory in
//! tests; the RSL10 implementation truncates them to its 32-bit bus.

use crate::driver::status::ChannelStatus;
use crate::internal::register::dma::{
    CTRL0_ADDR_CIRC, CTRL0_BIG_ENDIAN, CTRL0_COMPLETE_INT_ENABLE, CTRL0_COUNTER_INT_ENABLE,
    CTRL0_DEST_ADDR_INC, CTRL0_DEST_SELECT_SHIFT, CTRL0_DEST_WORD_SHIFT,
    CTRL0_DISABLE_INT_ENABLE, CTRL0_ERROR_INT_ENABLE, CTRL0_PRIORITY_SHIFT, CTRL0_SRC_ADDR_INC,
    CTRL0_SRC_SELECT_SHIFT, CTRL0_SRC_WORD_SHIFT, CTRL0_START_INT_ENABLE,
    CTRL0_TRANSFER_SHIFT, select, transfer, word,
};

// =============================================================================
// Channel Configuration
// =============================================================================

/// Transfer direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Memory to memory
    MemoryToMemory,
    /// Peripheral to memory
    PeripheralToMemory,
    /// Memory to peripheral
    MemoryToPeripheral,
    /// Peripheral to peripheral
    PeripheralToPeripheral,
}

impl Direction {
    const fn to_bits(self) -> u32 {
        match self {
            Direction::MemoryToMemory => transfer::M_TO_M,
            Direction::PeripheralToMemory => transfer::P_TO_M,
            Direction::MemoryToPeripheral => transfer::M_TO_P,
            Direction::PeripheralToPeripheral => transfer::P_TO_P,
        }
    }
}

/// Address sequencing once `length` words have been moved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AddressMode {
    /// Stop after `length` words
    Linear,
    /// Wrap back to the base addresses and keep going
    Circular,
}

/// Word width on one side of a transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WordSize {
    /// 8-bit
    Bits8,
    /// 16-bit
    Bits16,
    /// 32-bit
    Bits32,
}

impl WordSize {
    const fn to_bits(self) -> u32 {
        match self {
            WordSize::Bits8 => word::BITS_8,
            WordSize::Bits16 => word::BITS_16,
            WordSize::Bits32 => word::BITS_32,
        }
    }
}

/// One side (source or destination) of a transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Endpoint {
    /// Plain memory; the address is stepped after each word when `increment` is set
    Memory {
        /// Advance the address after each word
        increment: bool,
    },
    /// UART data register; the address never moves
    Uart,
}

impl Endpoint {
    const fn select(self) -> u32 {
        match self {
            Endpoint::Memory { .. } => select::MEMORY,
            Endpoint::Uart => select::UART,
        }
    }

    const fn increments(self) -> bool {
        matches!(self, Endpoint::Memory { increment: true })
    }
}

/// Channel interrupt enables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelInterrupts {
    /// Raise on transfer start
    pub start: bool,
    /// Raise when the counter value is reached
    pub counter: bool,
    /// Raise on transfer completion
    pub complete: bool,
    /// Raise on bus error
    pub error: bool,
    /// Raise when the channel is disabled
    pub disable: bool,
}

/// Typed description of a channel's CTRL0 word (minus the enable bit)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelConfig {
    /// Transfer direction
    pub direction: Direction,
    /// Linear or circular addressing
    pub address_mode: AddressMode,
    /// Channel priority (0 highest, 3 lowest)
    pub priority: u8,
    /// Source endpoint
    pub source: Endpoint,
    /// Destination endpoint
    pub destination: Endpoint,
    /// Source word width
    pub src_word: WordSize,
    /// Destination word width
    pub dest_word: WordSize,
    /// Interrupt enables
    pub interrupts: ChannelInterrupts,
    /// Big-endian byte order
    pub big_endian: bool,
}

impl ChannelConfig {
    /// UART receive: circular peripheral-to-memory over the receive ring,
    /// 32-bit words on both sides, start interrupt enabled so software can
    /// see that the first cycle has begun.
    #[must_use]
    pub const fn uart_rx() -> Self {
        Self {
            direction: Direction::PeripheralToMemory,
            address_mode: AddressMode::Circular,
            priority: 0,
            source: Endpoint::Uart,
            destination: Endpoint::Memory { increment: true },
            src_word: WordSize::Bits32,
            dest_word: WordSize::Bits32,
            interrupts: ChannelInterrupts {
                start: true,
                counter: false,
                complete: false,
                error: false,
                disable: false,
            },
            big_endian: false,
        }
    }

    /// UART transmit: linear memory-to-peripheral from the transmit buffer,
    /// 32-bit words on both sides, all interrupts disabled.
    #[must_use]
    pub const fn uart_tx() -> Self {
        Self {
            direction: Direction::MemoryToPeripheral,
            address_mode: AddressMode::Linear,
            priority: 0,
            source: Endpoint::Memory { increment: true },
            destination: Endpoint::Uart,
            src_word: WordSize::Bits32,
            dest_word: WordSize::Bits32,
            interrupts: ChannelInterrupts {
                start: false,
                counter: false,
                complete: false,
                error: false,
                disable: false,
            },
            big_endian: false,
        }
    }

    /// Encode as a CTRL0 register value. The enable bit is left clear.
    #[must_use]
    pub const fn to_raw(&self) -> u32 {
        let mut raw = 0u32;

        if matches!(self.address_mode, AddressMode::Circular) {
            raw |= CTRL0_ADDR_CIRC;
        }
        raw |= self.direction.to_bits() << CTRL0_TRANSFER_SHIFT;
        raw |= ((self.priority & 0x3) as u32) << CTRL0_PRIORITY_SHIFT;
        raw |= self.source.select() << CTRL0_SRC_SELECT_SHIFT;
        raw |= self.destination.select() << CTRL0_DEST_SELECT_SHIFT;

        // Step fields stay 0: one word per beat.
        if self.source.increments() {
            raw |= CTRL0_SRC_ADDR_INC;
        }
        if self.destination.increments() {
            raw |= CTRL0_DEST_ADDR_INC;
        }

        raw |= self.src_word.to_bits() << CTRL0_SRC_WORD_SHIFT;
        raw |= self.dest_word.to_bits() << CTRL0_DEST_WORD_SHIFT;

        if self.interrupts.start {
            raw |= CTRL0_START_INT_ENABLE;
        }
        if self.interrupts.counter {
            raw |= CTRL0_COUNTER_INT_ENABLE;
        }
        if self.interrupts.complete {
            raw |= CTRL0_COMPLETE_INT_ENABLE;
        }
        if self.interrupts.error {
            raw |= CTRL0_ERROR_INT_ENABLE;
        }
        if self.interrupts.disable {
            raw |= CTRL0_DISABLE_INT_ENABLE;
        }
        if self.big_endian {
            raw |= CTRL0_BIG_ENDIAN;
        }

        raw
    }
}

/// A complete channel programming request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Transfer {
    /// CTRL0 settings
    pub config: ChannelConfig,
    /// Number of words to move (per lap, for circular transfers)
    pub length: usize,
    /// Source base address
    pub src_addr: usize,
    /// Destination base address
    pub dest_addr: usize,
}

// =============================================================================
// Channel Trait
// =============================================================================

/// Minimal view of one hardware DMA channel.
///
/// Implemented by `DmaChannelRegs` on the RSL10 (`rsl10` feature) and by
/// mocks in host tests.
pub trait DmaChannel {
    /// Program addresses, length and CTRL0 settings. Does not enable the channel.
    fn configure(&mut self, transfer: &Transfer);

    /// Enable the channel, starting the programmed transfer
    fn enable(&mut self);

    /// Disable the channel
    fn disable(&mut self);

    /// True while a transfer is in progress.
    ///
    /// Hardware clears this on its own when a linear transfer completes.
    fn is_enabled(&self) -> bool;

    /// Current status flags
    fn status(&self) -> ChannelStatus;

    /// Clear all latched status flags
    fn clear_status(&mut self);

    /// Programmed transfer length in words
    fn transfer_length(&self) -> usize;

    /// Rewrite the transfer length of the programmed (possibly running) transfer
    fn set_transfer_length(&mut self, len: usize);

    /// Destination base address as programmed
    fn dest_base_addr(&self) -> usize;

    /// Address hardware will write next. Advanced only by hardware.
    fn next_dest_addr(&self) -> usize;
}

// =============================================================================
// Tests
// =============================================================================
