//! Error types for the UART DMA transport
//!
//! Errors are organized by domain for better diagnostics:
//! - [`ConfigError`]: Initialization and configuration failures
//! - [`DmaError`]: Transmit buffer capacity issues
//! - [`IoError`]: Runtime receive/flush failures
//!
//! The unified [`Error`] enum wraps all domain errors.

// =============================================================================
// Configuration Errors
// =============================================================================

/// Configuration and initialization errors
///
/// These errors occur while validating [`UartConfig`](super::config::UartConfig)
/// or claiming the transport buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Transport buffers were already claimed by an earlier initialization
    AlreadyInitialized,
    /// Baud rate is zero or too fast for the system clock
    InvalidBaudRate,
    /// System clock frequency is zero
    InvalidClock,
    /// Pin number outside the DIO range
    InvalidPin,
    /// TX and RX are routed to the same pin
    PinConflict,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ConfigError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ConfigError::AlreadyInitialized => "already initialized",
            ConfigError::InvalidBaudRate => "invalid baud rate",
            ConfigError::InvalidClock => "invalid system clock",
            ConfigError::InvalidPin => "invalid DIO pin",
            ConfigError::PinConflict => "TX and RX share a pin",
        }
    }
}

// =============================================================================
// DMA Errors
// =============================================================================

/// Transmit buffer errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DmaError {
    /// Data does not fit in the transmit buffer (alone or appended to the
    /// active transfer). Nothing was copied.
    Overflow,
}

impl core::fmt::Display for DmaError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl DmaError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            DmaError::Overflow => "transmit buffer overflow",
        }
    }
}

// =============================================================================
// I/O Errors
// =============================================================================

/// Runtime receive and flush errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IoError {
    /// Destination buffer is smaller than the unread data. Nothing was consumed.
    BufferTooSmall,
    /// Operation timed out
    Timeout,
}

impl core::fmt::Display for IoError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl IoError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            IoError::BufferTooSmall => "buffer too small for unread data",
            IoError::Timeout => "operation timed out",
        }
    }
}

// =============================================================================
// Unified Error Type
// =============================================================================

/// This enum wraps all domain-specific errors for unified error handling.
///
/// ```ignore
/// match result {
///     Err(Error::Config(ConfigError::PinConflict)) => { /* ... */ }
///     Err(Error::Dma(DmaError::Overflow)) => { /* ... */ }
///     Err(Error::Io(IoError::BufferTooSmall)) => { /* ... */ }
///     _ => {}
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Configuration error
    Config(ConfigError),
    /// DMA error
    Dma(DmaError),
    /// I/O error
    Io(IoError),
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Config(e) => write!(f, "config: {}", e.as_str()),
            Error::Dma(e) => write!(f, "dma: {}", e.as_str()),
            Error::Io(e) => write!(f, "io: {}", e.as_str()),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<DmaError> for Error {
    fn from(e: DmaError) -> Self {
        Error::Dma(e)
    }
}

impl From<IoError> for Error {
    fn from(e: IoError) -> Self {
        Error::Io(e)
    }
}

/// Result type alias for transport operations
pub type Result<T> = core::result::Result<T, Error>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = core::result::Result<T, ConfigError>;

/// Result type alias for transmit operations
pub type DmaResult<T> = core::result::Result<T, DmaError>;

/// Result type alias for receive operations
pub type IoResult<T> = core::result::Result<T, IoError>;

// =============================================================================
// Unit Tests
// =============================================================================
