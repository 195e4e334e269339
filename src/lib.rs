//! RSL10 UART DMA Transport
//!
//! A `no_std`, `no_alloc` non-blocking serial transport that moves bytes
//! between the CPU and the UART through the DMA engine, in both directions,
//! without the CPU touching the transfer loop.
//!
//! # Architecture
//!
//! The crate is organized into three layers:
//!
//! 1. **Transport** ([`driver::uart`]): [`UartDma`], created once by
//!    [`UartDma::initialize`], with non-blocking `drain` and `enqueue`
//! 2. **Buffer engine** (internal): a circular receive ring reconciling the
//!    hardware write cursor with a software read cursor, and a linear transmit
//!    buffer that coalesces appends into the running transfer
//! 3. **HAL** ([`hal`]): the [`DmaChannel`] and [`UartPeripheral`] seams plus
//!    the [`CompletionGuard`] critical section
//!
//! The RSL10 register implementation of [`DmaChannel`] lives in
//! `unsafe_registers` (`rsl10` feature). Everything above it runs on the
//! host against mocks.
//!
//! # Receive
//!
//! The RX channel runs in circular mode forever. `drain` copies everything
//! received since the last call. A full lap between two drains is
//! indistinguishable from no data, so at most `RX - 1` bytes may be
//! outstanding; overruns are not detected.
//!
//! # Transmit
//!
//! `enqueue` appends to the running transfer by bumping its length inside a
//! critical section, or starts a new transfer once the previous one finished.
//! It never waits; a full buffer yields [`DmaError::Overflow`].
//!
//! # Features
//!
//! - `rsl10` (default): RSL10 DMA register layer and type aliases
//! - `defmt`: Enable defmt formatting and log output
//!
//! # Example
//!
//! ```ignore
//! use ph_uart_dma::{Rsl10DmaBuffers, Rsl10UartDma, RxChannel, TxChannel, UartConfig, UartDma};
//!
//! static BUFFERS: Rsl10DmaBuffers = Rsl10DmaBuffers::new();
//!
//! // SAFETY: channels 0 and 1 are not used anywhere else
//! let (rx, tx) = unsafe { (RxChannel::steal(), TxChannel::steal()) };
//!
//! let mut uart: Rsl10UartDma<'static> =
//!     UartDma::initialize(&BUFFERS, rx, tx, &mut board_uart, &UartConfig::new())?;
//!
//! let mut buf = [0u8; 256];
//! loop {
//!     let n = uart.drain(&mut buf)?;
//!     if n > 0 {
//!         uart.enqueue(&buf[..n]).ok();
//!     }
//! }
//! ```
//!
//! # Memory Requirements
//!
//! Every byte occupies a 32-bit word. With the default sizes (256 RX,
//! 512 TX) the buffers take 3 KB of SRAM.

#![no_std]
#![deny(missing_docs)]
#![allow(unsafe_code)]
#![deny(unsafe_op_in_unsafe_fn)]
// Clippy lint levels live here and in Cargo.toml's [lints] table.
#![deny(clippy::correctness)]
#![warn(
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::cloned_instead_of_copied,
    clippy::explicit_iter_loop,
    clippy::implicit_clone,
    clippy::inconsistent_struct_constructor,
    clippy::manual_assert,
    clippy::manual_let_else,
    clippy::match_same_arms,
    clippy::needless_pass_by_value,
    clippy::semicolon_if_nothing_returned,
    clippy::uninlined_format_args,
    clippy::unnested_or_patterns,
    clippy::std_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::alloc_instead_of_core
)]
#![allow(
    clippy::mod_module_files,
    clippy::self_named_module_files,
    clippy::similar_names,
    clippy::too_many_arguments,
    clippy::struct_excessive_bools,
    clippy::fn_params_excessive_bools,
    clippy::type_complexity,
    clippy::must_use_candidate,
    clippy::assertions_on_constants,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::cast_lossless,
    clippy::panic_in_result_fn,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::module_name_repetitions,
    clippy::wildcard_imports,
    clippy::items_after_statements
)]

// =============================================================================
// Modules
// =============================================================================

pub mod driver;
pub mod hal;
pub mod sync;

// Internal implementation details (pub(crate) only)
mod internal;

// Test utilities (only available during testing)
#[cfg(test)]
pub mod testing;

// =============================================================================
// Re-exports
// =============================================================================

pub use driver::buffers::DmaBuffers;
pub use driver::config::{DriveStrength, PinConfig, Pull, TxState, UartConfig};
pub use driver::error::{
    ConfigError, ConfigResult, DmaError, DmaResult, Error, IoError, IoResult, Result,
};
pub use driver::status::ChannelStatus;
pub use driver::uart::UartDma;
pub use hal::{ChannelConfig, CompletionGuard, DmaChannel, Transfer, UartPeripheral};
pub use internal::dma::WordSlot;
pub use sync::{CriticalSectionCell, SharedUart};

/// Low-level register accessors for advanced use.
///
/// These are intentionally separated from the primary facade. Most users should
/// go through [`UartDma`] instead of touching registers directly.
///
/// # Safety
///
/// Direct register access bypasses driver invariants. Reprogramming a channel
/// the transport owns corrupts its cursors.
#[cfg(feature = "rsl10")]
#[cfg_attr(docsrs, doc(cfg(feature = "rsl10")))]
pub mod unsafe_registers {
    pub use crate::internal::register::dma::DmaChannelRegs;
    pub use crate::internal::register::{CHANNEL_STRIDE, DMA_BASE};
}

/// RSL10 DMA channel carrying UART receive traffic
#[cfg(feature = "rsl10")]
pub type RxChannel =
    internal::register::dma::DmaChannelRegs<{ internal::constants::DMA_RX_CHANNEL }>;

/// RSL10 DMA channel carrying UART transmit traffic
#[cfg(feature = "rsl10")]
pub type TxChannel =
    internal::register::dma::DmaChannelRegs<{ internal::constants::DMA_TX_CHANNEL }>;

/// Default buffer storage (256-byte receive ring, 512-byte transmit buffer)
pub type Rsl10DmaBuffers = DmaBuffers<
    { internal::constants::DEFAULT_RX_BUFFER_SIZE },
    { internal::constants::DEFAULT_TX_BUFFER_SIZE },
>;

/// RSL10 transport on the default channels with the default buffer sizes
#[cfg(feature = "rsl10")]
pub type Rsl10UartDma<'a> = UartDma<
    'a,
    RxChannel,
    TxChannel,
    { internal::constants::DEFAULT_RX_BUFFER_SIZE },
    { internal::constants::DEFAULT_TX_BUFFER_SIZE },
>;

#[cfg(feature = "rsl10")]
pub use sync::SharedRsl10Uart;

/// Shared transport constants.
///
/// These are grouped into a dedicated module to keep the top-level facade
/// focused on transport types.
pub mod constants {
    pub use crate::internal::constants::{
        DEFAULT_BAUD_RATE, DEFAULT_FLUSH_TIMEOUT_US, DEFAULT_RX_BUFFER_SIZE, DEFAULT_RX_PIN,
        DEFAULT_SYSCLK_HZ, DEFAULT_TX_BUFFER_SIZE, DEFAULT_TX_PIN, DIO_COUNT, DMA_CHANNEL_COUNT,
        DMA_RX_CHANNEL, DMA_TX_CHANNEL, FLUSH_POLL_INTERVAL_US, MAX_TRANSFER_LENGTH,
        MIN_CLOCKS_PER_BIT, WORD_SIZE,
    };
}
