//! Core components of the UART DMA transport.
//!
//! - [`config`] - Configuration types and builder patterns
//! - [`error`] - Error types and result aliases
//! - [`buffers`] - Claim-once static buffer storage
//! - [`status`] - Parsed DMA channel status flags
//! - [`uart`] - The transport itself
//!
//! # Example
//!
//! ```ignore
//! use ph_uart_dma::driver::{UartConfig, Pull};
//!
//! let config = UartConfig::new()
//!     .with_baud_rate(57_600)
//!     .with_pull(Pull::StrongUp);
//! ```

// Submodules
pub mod buffers;
pub mod config;
pub mod error;
pub mod status;
pub mod uart;

// Re-exports for convenience
pub use buffers::DmaBuffers;
pub use config::{DriveStrength, PinConfig, Pull, TxState, UartConfig};
pub use error::{ConfigError, ConfigResult, DmaError, DmaResult, Error, IoError, IoResult, Result};
pub use status::ChannelStatus;
pub use uart::UartDma;
