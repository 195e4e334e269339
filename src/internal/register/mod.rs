//! Memory-mapped register definitions for the RSL10 DMA block
//!
//! This module provides type-safe access to the DMA channel registers.
//! All register access is volatile to ensure proper hardware interaction.

pub mod dma;

/// DMA register block base address
pub const DMA_BASE: usize = 0x4000_0200;

/// Stride between consecutive per-channel registers in one register array
pub const CHANNEL_STRIDE: usize = 4;

/// Read a 32-bit register at the given address
///
/// # Safety
/// The caller must ensure the address is valid and properly aligned.
#[inline(always)]
pub unsafe fn read_reg(addr: usize) -> u32 {
    unsafe { core::ptr::read_volatile(addr as *const u32) }
}

/// Write a 32-bit value to a register at the given address
///
/// # Safety
/// The caller must ensure the address is valid and properly aligned.
#[inline(always)]
pub unsafe fn write_reg(addr: usize, value: u32) {
    unsafe { core::ptr::write_volatile(addr as *mut u32, value) }
}

/// Modify a register using a read-modify-write operation
///
/// # Safety
/// The caller must ensure the address is valid and properly aligned.
#[inline(always)]
pub unsafe fn modify_reg<F>(addr: usize, f: F)
where
    F: FnOnce(u32) -> u32,
{
    // SAFETY: caller guarantees address validity
    let value = unsafe { read_reg(addr) };
    unsafe { write_reg(addr, f(value)) }
}

// =============================================================================
// Register Access Macros
// =============================================================================

/// Generate read/write accessor methods for a per-channel register array.
///
/// The generated methods index the array with the channel number `N` of the
/// implementing type.
///
/// # Example
/// ```ignore
/// impl<const N: usize> DmaChannelRegs<N> {
///     chan_reg_rw!(ctrl0, set_ctrl0, DMA_CTRL0_OFFSET, "CTRL0 register");
/// }
/// ```
macro_rules! chan_reg_rw {
    ($read_fn:ident, $write_fn:ident, $offset:expr, $doc:expr) => {
        #[doc = concat!("Read ", $doc)]
        #[inline(always)]
        pub fn $read_fn(&self) -> u32 {
            unsafe { $crate::internal::register::read_reg(Self::addr($offset)) }
        }

        #[doc = concat!("Write ", $doc)]
        #[inline(always)]
        pub fn $write_fn(&self, value: u32) {
            unsafe { $crate::internal::register::write_reg(Self::addr($offset), value) }
        }
    };
}

/// Generate a read-only accessor method for a per-channel register array.
macro_rules! chan_reg_ro {
    ($read_fn:ident, $offset:expr, $doc:expr) => {
        #[doc = concat!("Read ", $doc)]
        #[inline(always)]
        pub fn $read_fn(&self) -> u32 {
            unsafe { $crate::internal::register::read_reg(Self::addr($offset)) }
        }
    };
}

pub(crate) use chan_reg_ro;
pub(crate) use chan_reg_rw;
