//! Configuration types for the UART DMA transport

use super::error::{ConfigError, ConfigResult};
use crate::internal::constants::{
    DEFAULT_BAUD_RATE, DEFAULT_RX_PIN, DEFAULT_SYSCLK_HZ, DEFAULT_TX_PIN, DIO_COUNT,
    MIN_CLOCKS_PER_BIT,
};

/// DIO output drive strength
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriveStrength {
    /// Regular drive
    X2,
    /// 3x drive
    X3,
    /// 5x drive
    X5,
    /// 6x drive
    #[default]
    X6,
}

/// DIO pull resistor selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pull {
    /// No pull resistor
    None,
    /// Weak pull-up (idle-high UART line)
    #[default]
    WeakUp,
    /// Strong pull-up
    StrongUp,
    /// Weak pull-down
    WeakDown,
}

/// Pad configuration handed to the [`UartPeripheral`](crate::hal::UartPeripheral)
/// collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinConfig {
    /// Transmit DIO
    pub tx_pin: u8,
    /// Receive DIO
    pub rx_pin: u8,
    /// Output drive strength
    pub drive: DriveStrength,
    /// Pull resistor
    pub pull: Pull,
    /// Input low-pass filter
    pub low_pass_filter: bool,
}

/// Complete transport configuration
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UartConfig {
    /// UART baud rate
    pub baud_rate: u32,
    /// System clock feeding the UART, in Hz
    pub sysclk_hz: u32,
    /// Transmit DIO
    pub tx_pin: u8,
    /// Receive DIO
    pub rx_pin: u8,
    /// Output drive strength on both pads
    pub drive: DriveStrength,
    /// Pull resistor on both pads
    pub pull: Pull,
    /// Enable the input low-pass filter
    pub low_pass_filter: bool,
}

impl Default for UartConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl UartConfig {
    /// Create a new configuration with defaults: 115200 baud on an 8 MHz
    /// system clock, TX on DIO5, RX on DIO4, 6x drive, weak pull-up and the
    /// low-pass filter enabled.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            baud_rate: DEFAULT_BAUD_RATE,
            sysclk_hz: DEFAULT_SYSCLK_HZ,
            tx_pin: DEFAULT_TX_PIN,
            rx_pin: DEFAULT_RX_PIN,
            drive: DriveStrength::X6,
            pull: Pull::WeakUp,
            low_pass_filter: true,
        }
    }

    // =========================================================================
    // Builder Methods
    // =========================================================================

    /// Set the baud rate
    #[must_use]
    pub const fn with_baud_rate(mut self, baud_rate: u32) -> Self {
        self.baud_rate = baud_rate;
        self
    }

    /// Set the system clock frequency
    #[must_use]
    pub const fn with_sysclk_hz(mut self, sysclk_hz: u32) -> Self {
        self.sysclk_hz = sysclk_hz;
        self
    }

    /// Set the transmit pin
    #[must_use]
    pub const fn with_tx_pin(mut self, pin: u8) -> Self {
        self.tx_pin = pin;
        self
    }

    /// Set the receive pin
    #[must_use]
    pub const fn with_rx_pin(mut self, pin: u8) -> Self {
        self.rx_pin = pin;
        self
    }

    /// Set the output drive strength
    #[must_use]
    pub const fn with_drive(mut self, drive: DriveStrength) -> Self {
        self.drive = drive;
        self
    }

    /// Set the pull resistor
    #[must_use]
    pub const fn with_pull(mut self, pull: Pull) -> Self {
        self.pull = pull;
        self
    }

    /// Enable or disable the input low-pass filter
    #[must_use]
    pub const fn with_low_pass_filter(mut self, enabled: bool) -> Self {
        self.low_pass_filter = enabled;
        self
    }

    // =========================================================================
    // Validation
    // =========================================================================

    /// Check the configuration before any hardware is touched.
    ///
    /// # Errors
    /// - `InvalidClock` - system clock is zero
    /// - `InvalidBaudRate` - baud rate is zero or above `sysclk / 4`
    /// - `InvalidPin` - a pin is outside the DIO range
    /// - `PinConflict` - TX and RX use the same DIO
    pub const fn validate(&self) -> ConfigResult<()> {
        if self.sysclk_hz == 0 {
            return Err(ConfigError::InvalidClock);
        }
        if self.baud_rate == 0 || self.baud_rate > self.sysclk_hz / MIN_CLOCKS_PER_BIT {
            return Err(ConfigError::InvalidBaudRate);
        }
        if self.tx_pin >= DIO_COUNT || self.rx_pin >= DIO_COUNT {
            return Err(ConfigError::InvalidPin);
        }
        if self.tx_pin == self.rx_pin {
            return Err(ConfigError::PinConflict);
        }
        Ok(())
    }

    /// Pad configuration for the peripheral collaborator
    #[must_use]
    pub const fn pins(&self) -> PinConfig {
        PinConfig {
            tx_pin: self.tx_pin,
            rx_pin: self.rx_pin,
            drive: self.drive,
            pull: self.pull,
            low_pass_filter: self.low_pass_filter,
        }
    }
}

/// Transport state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TxState {
    /// No transmit transfer in progress
    #[default]
    Idle,
    /// Transmit transfer of the given length in progress
    Active(usize),
}

// =============================================================================
// Unit Tests
// =============================================================================
