//! Synchronization Support
//!
//! ISR-safe access to the transport:
//!
//! - [`CriticalSectionCell`] - critical-section protected interior mutability
//! - [`SharedUart`] - static holder for an initialized transport
//!
//! # Example
//!
//! ```ignore
//! use ph_uart_dma::sync::SharedRsl10Uart;
//!
//! static UART: SharedRsl10Uart = SharedRsl10Uart::new();
//!
//! fn main() {
//!     UART.install(uart);
//!     loop {
//!         UART.with(|uart| {
//!             let n = uart.drain(&mut buf).unwrap_or(0);
//!             uart.enqueue(&buf[..n]).ok();
//!         });
//!     }
//! }
//! ```

mod primitives;
mod shared;

pub use primitives::CriticalSectionCell;
#[cfg(feature = "rsl10")]
pub use shared::SharedRsl10Uart;
pub use shared::SharedUart;
