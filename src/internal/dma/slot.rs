//! Word-stride byte slots shared with the DMA engine.
//!
//! The UART DMA path moves 32-bit words, so each byte on the wire occupies a
//! whole word in memory. Only the low byte is meaningful: stores write the
//! byte zero-extended and loads ignore the upper 24 bits.

use core::cell::UnsafeCell;

/// One 32-bit DMA word carrying a single byte.
///
/// Hardware reads and writes these outside the compiler's view, so every
/// access is volatile.
#[repr(transparent)]
pub struct WordSlot(UnsafeCell<u32>);

// SAFETY: slots are only touched by the single software owner of a claimed
// buffer and by the DMA engine. All software access is volatile word-sized.
unsafe impl Sync for WordSlot {}

impl WordSlot {
    /// Create a zeroed slot. Const-compatible.
    #[must_use]
    pub const fn new() -> Self {
        Self(UnsafeCell::new(0))
    }

    /// Low byte of the slot
    #[inline(always)]
    pub fn load(&self) -> u8 {
        // SAFETY: the pointer comes from a live UnsafeCell and is aligned.
        let word = unsafe { core::ptr::read_volatile(self.0.get()) };
        (word & 0xFF) as u8
    }

    /// Store `byte` zero-extended to a full word
    #[inline(always)]
    pub fn store(&self, byte: u8) {
        // SAFETY: the pointer comes from a live UnsafeCell and is aligned.
        unsafe { core::ptr::write_volatile(self.0.get(), u32::from(byte)) }
    }

    /// Raw word, including the ignored upper bits
    #[inline(always)]
    pub fn raw(&self) -> u32 {
        // SAFETY: as in `load`.
        unsafe { core::ptr::read_volatile(self.0.get()) }
    }

    /// Bus address of the slot
    #[inline(always)]
    pub fn addr(&self) -> usize {
        self.0.get() as usize
    }
}

impl Default for WordSlot {
    fn default() -> Self {
        Self::new()
    }
}

/// Bus address of the first slot in `slots`
#[inline(always)]
pub fn base_addr(slots: &[WordSlot]) -> usize {
    slots.as_ptr() as usize
}

/// Store `data` into consecutive slots starting at `slots[0]`.
///
/// `slots` must be at least `data.len()` long.
#[inline]
pub fn store_bytes(slots: &[WordSlot], data: &[u8]) {
    for (slot, &byte) in slots.iter().zip(data) {
        slot.store(byte);
    }
}

/// Load `dest.len()` bytes from consecutive slots starting at `slots[0]`.
#[inline]
pub fn load_bytes(slots: &[WordSlot], dest: &mut [u8]) {
    for (byte, slot) in dest.iter_mut().zip(slots) {
        *byte = slot.load();
    }
}
