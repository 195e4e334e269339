//! Hardware Abstraction Layer
//!
//! The seams between the transport and the chip:
//!
//! - [`dma`]: DMA channel trait, channel configuration and transfer requests
//! - [`peripheral`]: UART pad and clock setup collaborator
//! - [`critical`]: scoped interrupt suspension
//!
//! # Delay Integration
//!
//! `flush` takes `embedded_hal::delay::DelayNs` directly. Pass any delay
//! implementation from your HAL.

pub mod critical;
pub mod dma;
pub mod peripheral;

// Re-export commonly used types
pub use critical::CompletionGuard;
pub use dma::{
    AddressMode, ChannelConfig, ChannelInterrupts, DmaChannel, Direction, Endpoint, Transfer,
    WordSize,
};
pub use peripheral::UartPeripheral;
