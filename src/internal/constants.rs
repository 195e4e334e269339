//! Centralized Constants
//!
//! This module provides a single source of truth for the buffer sizes, pin
//! assignments and timing values used throughout the UART DMA transport.
//!
//! # Organization
//!
//! Constants are grouped by category:
//! - **Buffer sizes**: Ring and linear buffer capacities (in word slots)
//! - **Pins and clocks**: Default DIO routing, baud rate, system clock
//! - **DMA channels**: Channel numbers used for RX and TX
//! - **Timing**: Flush polling interval
//!
//! # Note
//!
//! Hardware register bit definitions remain in `register/dma.rs` as they are
//! specific to that hardware block.

// =============================================================================
// Buffer Sizes
// =============================================================================

/// Default receive ring capacity in word slots
pub const DEFAULT_RX_BUFFER_SIZE: usize = 0x100;

/// Default transmit buffer capacity in word slots
pub const DEFAULT_TX_BUFFER_SIZE: usize = 0x200;

/// Width of one DMA transfer word in bytes.
///
/// The UART DMA path only supports 32-bit transfers, so every logical byte
/// occupies one full word slot.
pub const WORD_SIZE: usize = 4;

/// Largest transfer length the CTRL1 length field can hold
pub const MAX_TRANSFER_LENGTH: usize = 0xFFFF;

// =============================================================================
// Pins and Clocks
// =============================================================================

/// Default UART transmit DIO
pub const DEFAULT_TX_PIN: u8 = 5;

/// Default UART receive DIO
pub const DEFAULT_RX_PIN: u8 = 4;

/// Number of DIO pads on the RSL10
pub const DIO_COUNT: u8 = 16;

/// Default UART baud rate
pub const DEFAULT_BAUD_RATE: u32 = 115_200;

/// Default system clock (48 MHz crystal divided by 6)
pub const DEFAULT_SYSCLK_HZ: u32 = 8_000_000;

/// The UART needs at least this many system clock cycles per bit
pub const MIN_CLOCKS_PER_BIT: u32 = 4;

// =============================================================================
// DMA Channels
// =============================================================================

/// DMA channel carrying memory-to-UART traffic
pub const DMA_TX_CHANNEL: usize = 0;

/// DMA channel carrying UART-to-memory traffic
pub const DMA_RX_CHANNEL: usize = 1;

/// Number of DMA channels in the RSL10 DMA block
pub const DMA_CHANNEL_COUNT: usize = 8;

// =============================================================================
// Timing
// =============================================================================

/// Flush poll interval in microseconds
pub const FLUSH_POLL_INTERVAL_US: u32 = 10;

/// Default flush timeout in microseconds (a full TX buffer at 9600 baud)
pub const DEFAULT_FLUSH_TIMEOUT_US: u32 = 600_000;
