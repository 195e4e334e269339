//! DMA buffer engine
//!
//! Both directions move one byte per 32-bit word:
//! - [`RxRing`]: circular receive tracker over a ring the RX channel fills
//! - [`TxBuffer`]: linear transmit buffer that coalesces appends into the
//!   running transfer
//! - [`WordSlot`]: the shared word-stride storage element
//!
//! Storage is statically allocated by [`DmaBuffers`](crate::DmaBuffers) and
//! borrowed here.

mod linear;
mod ring;
mod slot;

pub use linear::TxBuffer;
pub use ring::RxRing;
pub use slot::WordSlot;
