//! DMA channel status flags.
//!
//! [`ChannelStatus`] is the parsed form of a channel's STATUS register. The
//! receive path only needs `started`; the rest is exposed for diagnostics.

use crate::internal::register::dma::{
    STATUS_COMPLETE_INT, STATUS_COUNTER_INT, STATUS_DISABLE_INT, STATUS_ERROR_INT,
    STATUS_START_INT, STATUS_STATE_MASK,
};

// =============================================================================
// Channel Status
// =============================================================================

/// Status flags parsed from a DMA channel status register.
///
/// # Example
///
/// ```ignore
/// let status = uart.rx_channel_status();
/// if status.started {
///     // receive ring is live
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelStatus {
    /// Transfer has started (first word moved)
    pub started: bool,
    /// Transfer completed
    pub completed: bool,
    /// Counter interrupt value reached
    pub counter_reached: bool,
    /// Channel was disabled
    pub disabled: bool,
    /// Bus error
    pub error: bool,
    /// Raw channel state field
    pub state: u8,
}

impl ChannelStatus {
    /// Create from raw status register value
    #[inline]
    pub const fn from_raw(status: u32) -> Self {
        Self {
            started: (status & STATUS_START_INT) != 0,
            completed: (status & STATUS_COMPLETE_INT) != 0,
            counter_reached: (status & STATUS_COUNTER_INT) != 0,
            disabled: (status & STATUS_DISABLE_INT) != 0,
            error: (status & STATUS_ERROR_INT) != 0,
            state: (status & STATUS_STATE_MASK) as u8,
        }
    }

    /// Convert to raw value for clearing (write-1-to-clear).
    ///
    /// The state field is read-only and never included.
    #[inline]
    pub const fn to_raw(&self) -> u32 {
        let mut val = 0u32;
        if self.started {
            val |= STATUS_START_INT;
        }
        if self.completed {
            val |= STATUS_COMPLETE_INT;
        }
        if self.counter_reached {
            val |= STATUS_COUNTER_INT;
        }
        if self.disabled {
            val |= STATUS_DISABLE_INT;
        }
        if self.error {
            val |= STATUS_ERROR_INT;
        }
        val
    }

    /// Check if any flag is latched
    #[inline]
    pub const fn any(&self) -> bool {
        self.started || self.completed || self.counter_reached || self.disabled || self.error
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
