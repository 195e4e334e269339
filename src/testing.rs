//! Testing utilities and mock implementations
//!
//! This module provides mock implementations for testing the UART DMA
//! transport on the host without hardware access.
//!
//! Only available when running `cargo test`.

// Note: The #[cfg(test)] attribute is applied in lib.rs where this module is declared
#![allow(missing_docs)]
#![allow(clippy::std_instead_of_core, clippy::std_instead_of_alloc)]

extern crate std;

use core::cell::{Cell, RefCell};
use std::vec::Vec;

use crate::driver::config::PinConfig;
use crate::driver::status::ChannelStatus;
use crate::hal::dma::{DmaChannel, Transfer};
use crate::hal::peripheral::UartPeripheral;
use crate::internal::constants::WORD_SIZE;
use crate::internal::register::dma::{STATUS_COMPLETE_INT, STATUS_START_INT};

// =============================================================================
// Mock DMA Channel
// =============================================================================

/// Register-changing operation recorded by [`MockDmaChannel`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelOp {
    Configure,
    Enable,
    Disable,
    ClearStatus,
    SetLength(usize),
}

/// Mock DMA channel for testing the ring and coalescer without hardware
///
/// Acts as both the register file and the DMA engine: `receive` writes bytes
/// into the configured destination the way the RX channel would, and
/// `transmitted` reads back what the TX channel would send.
///
/// # Example
///
/// ```ignore
/// let mut channel = MockDmaChannel::new();
/// channel.configure(&rx_transfer);
/// channel.enable();
///
/// channel.receive(b"hello");
/// assert_eq!(ring.drain(&channel, &mut buf), Ok(5));
/// ```
#[derive(Debug, Default)]
pub struct MockDmaChannel {
    transfer: Cell<Option<Transfer>>,
    enabled: Cell<bool>,
    length: Cell<usize>,
    status: Cell<u32>,
    next_dest: Cell<usize>,
    enable_reads: Cell<usize>,
    complete_on_read: Cell<Option<usize>>,
    complete_on_length: Cell<bool>,
    ops: RefCell<Vec<ChannelOp>>,
}

impl MockDmaChannel {
    /// Create a new idle, unconfigured mock channel
    pub fn new() -> Self {
        Self::default()
    }

    /// Last programmed transfer
    pub fn transfer(&self) -> Option<Transfer> {
        self.transfer.get()
    }

    /// All recorded register-changing operations
    pub fn ops(&self) -> Vec<ChannelOp> {
        self.ops.borrow().clone()
    }

    /// Clear the operation log
    pub fn clear_ops(&self) {
        self.ops.borrow_mut().clear();
    }

    /// Raw status word
    pub fn raw_status(&self) -> u32 {
        self.status.get()
    }

    /// Overwrite the raw status word
    pub fn set_raw_status(&self, raw: u32) {
        self.status.set(raw);
    }

    /// Latch the start flag without moving data
    pub fn signal_start(&self) {
        self.status.set(self.status.get() | STATUS_START_INT);
    }

    /// Simulate the hardware finishing the transfer
    pub fn complete(&self) {
        self.enabled.set(false);
        self.status.set(self.status.get() | STATUS_COMPLETE_INT);
    }

    /// Make the `n`-th `is_enabled` read from now (1-based) observe completion.
    ///
    /// Used to land a completion between the coalescer's check and its
    /// guarded re-check.
    pub fn complete_on_enable_read(&self, n: usize) {
        self.enable_reads.set(0);
        self.complete_on_read.set(Some(n));
    }

    /// Make the next `set_transfer_length` land after the transfer completed.
    pub fn complete_on_set_length(&self) {
        self.complete_on_length.set(true);
    }

    /// Simulate the RX channel writing `bytes` from the UART.
    ///
    /// Writes one zero-extended word per byte at the write cursor and wraps
    /// at the end of the configured ring. Sets the start flag.
    ///
    /// # Panics
    /// If the channel is not configured.
    pub fn receive(&self, bytes: &[u8]) {
        let transfer = self.transfer.get().expect("channel not configured");
        let base = transfer.dest_addr;
        let end = base + transfer.length * WORD_SIZE;

        self.signal_start();
        for &byte in bytes {
            let addr = self.next_dest.get();
            // SAFETY: tests configure `dest_addr` to a live ring of `length` slots.
            unsafe { core::ptr::write_volatile(addr as *mut u32, u32::from(byte)) };
            let next = addr + WORD_SIZE;
            self.next_dest.set(if next >= end { base } else { next });
        }
    }

    /// Bytes the TX channel would send: `length` slots from the source address
    ///
    /// # Panics
    /// If the channel is not configured.
    pub fn transmitted(&self) -> Vec<u8> {
        let transfer = self.transfer.get().expect("channel not configured");
        (0..self.length.get())
            .map(|i| {
                let addr = transfer.src_addr + i * WORD_SIZE;
                // SAFETY: tests configure `src_addr` to a live buffer of at
                // least `length` slots.
                let word = unsafe { core::ptr::read_volatile(addr as *const u32) };
                (word & 0xFF) as u8
            })
            .collect()
    }

    fn record(&self, op: ChannelOp) {
        self.ops.borrow_mut().push(op);
    }
}

// Implemented on `&MockDmaChannel` so a test can hand the transport a
// channel and keep inspecting it.
impl DmaChannel for &MockDmaChannel {
    fn configure(&mut self, transfer: &Transfer) {
        self.transfer.set(Some(*transfer));
        self.length.set(transfer.length);
        self.next_dest.set(transfer.dest_addr);
        self.record(ChannelOp::Configure);
    }

    fn enable(&mut self) {
        self.enabled.set(true);
        self.record(ChannelOp::Enable);
    }

    fn disable(&mut self) {
        self.enabled.set(false);
        self.record(ChannelOp::Disable);
    }

    fn is_enabled(&self) -> bool {
        let reads = self.enable_reads.get() + 1;
        self.enable_reads.set(reads);
        if self.complete_on_read.get().is_some_and(|n| reads >= n) {
            self.complete_on_read.set(None);
            self.complete();
        }
        self.enabled.get()
    }

    fn status(&self) -> ChannelStatus {
        ChannelStatus::from_raw(self.status.get())
    }

    fn clear_status(&mut self) {
        self.status.set(0);
        self.record(ChannelOp::ClearStatus);
    }

    fn transfer_length(&self) -> usize {
        self.length.get()
    }

    fn set_transfer_length(&mut self, len: usize) {
        if self.complete_on_length.replace(false) {
            self.complete();
        }
        self.length.set(len);
        self.record(ChannelOp::SetLength(len));
    }

    fn dest_base_addr(&self) -> usize {
        self.transfer.get().map_or(0, |t| t.dest_addr)
    }

    fn next_dest_addr(&self) -> usize {
        self.next_dest.get()
    }
}

impl DmaChannel for MockDmaChannel {
    fn configure(&mut self, transfer: &Transfer) {
        (&*self).configure(transfer);
    }

    fn enable(&mut self) {
        (&*self).enable();
    }

    fn disable(&mut self) {
        (&*self).disable();
    }

    fn is_enabled(&self) -> bool {
        (&self).is_enabled()
    }

    fn status(&self) -> ChannelStatus {
        (&self).status()
    }

    fn clear_status(&mut self) {
        (&*self).clear_status();
    }

    fn transfer_length(&self) -> usize {
        (&self).transfer_length()
    }

    fn set_transfer_length(&mut self, len: usize) {
        (&*self).set_transfer_length(len);
    }

    fn dest_base_addr(&self) -> usize {
        (&self).dest_base_addr()
    }

    fn next_dest_addr(&self) -> usize {
        (&self).next_dest_addr()
    }
}

// =============================================================================
// Mock UART Peripheral
// =============================================================================

/// Fake UART receive data register address
pub const MOCK_UART_RX_DATA: usize = 0x4000_0704;

/// Fake UART transmit data register address
pub const MOCK_UART_TX_DATA: usize = 0x4000_0708;

/// Mock UART peripheral recording what the transport asked for
#[derive(Debug, Default)]
pub struct MockUartPeripheral {
    pins: Cell<Option<PinConfig>>,
    /// (sysclk_hz, baud_rate) of the last enable
    enabled_with: Cell<Option<(u32, u32)>>,
    enable_count: Cell<usize>,
}

impl MockUartPeripheral {
    /// Create a new mock peripheral
    pub fn new() -> Self {
        Self::default()
    }

    /// Pins passed to the last `configure_pins`
    pub fn pins(&self) -> Option<PinConfig> {
        self.pins.get()
    }

    /// Clock and baud rate passed to the last `enable`
    pub fn enabled_with(&self) -> Option<(u32, u32)> {
        self.enabled_with.get()
    }

    /// Number of `enable` calls
    pub fn enable_count(&self) -> usize {
        self.enable_count.get()
    }
}

impl UartPeripheral for MockUartPeripheral {
    fn configure_pins(&mut self, pins: &PinConfig) {
        self.pins.set(Some(*pins));
    }

    fn enable(&mut self, sysclk_hz: u32, baud_rate: u32) {
        self.enabled_with.set(Some((sysclk_hz, baud_rate)));
        self.enable_count.set(self.enable_count.get() + 1);
    }

    fn rx_data_addr(&self) -> usize {
        MOCK_UART_RX_DATA
    }

    fn tx_data_addr(&self) -> usize {
        MOCK_UART_TX_DATA
    }
}

// =============================================================================
// Mock Delay
// =============================================================================

/// Mock delay for testing without actual timing
///
/// Records delays for verification without actually waiting. Can optionally
/// run a callback on every delay to let simulated hardware make progress.
#[derive(Default)]
pub struct MockDelay<'a> {
    /// Total nanoseconds delayed
    total_ns: RefCell<u64>,
    on_delay: Option<&'a dyn Fn(u64)>,
}

impl<'a> MockDelay<'a> {
    /// Create a new mock delay
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock delay that calls `f` with the running total after each delay
    pub fn with_callback(f: &'a dyn Fn(u64)) -> Self {
        Self {
            total_ns: RefCell::new(0),
            on_delay: Some(f),
        }
    }

    /// Get total nanoseconds that were "delayed"
    pub fn total_ns(&self) -> u64 {
        *self.total_ns.borrow()
    }

    /// Get total microseconds that were "delayed"
    pub fn total_us(&self) -> u64 {
        self.total_ns() / 1_000
    }

    /// Reset the delay counter
    pub fn reset(&self) {
        *self.total_ns.borrow_mut() = 0;
    }
}

impl embedded_hal::delay::DelayNs for MockDelay<'_> {
    fn delay_ns(&mut self, ns: u32) {
        let total = {
            let mut total = self.total_ns.borrow_mut();
            *total += u64::from(ns);
            *total
        };
        if let Some(f) = self.on_delay {
            f(total);
        }
    }
}

// =============================================================================
// Critical Section Check
// =============================================================================

/// Whether another thread can enter a critical section within a second.
///
/// The host `critical-section` implementation allows nesting on the thread
/// that holds it, so a leaked guard only shows up from a second thread.
pub fn critical_section_free() -> bool {
    let (done, wait) = std::sync::mpsc::channel();
    std::thread::spawn(move || {
        critical_section::with(|_| {
            done.send(()).ok();
        });
    });
    wait.recv_timeout(std::time::Duration::from_secs(1)).is_ok()
}

// =============================================================================
// Tests for the mocks themselves
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::dma::ChannelConfig;
    use embedded_hal::delay::DelayNs;
    use std::vec;

    #[test]
    fn mock_channel_records_ops() {
        let mut channel = MockDmaChannel::new();
        channel.enable();
        channel.set_transfer_length(3);
        channel.disable();

        assert_eq!(
            channel.ops(),
            vec![ChannelOp::Enable, ChannelOp::SetLength(3), ChannelOp::Disable]
        );
        channel.clear_ops();
        assert!(channel.ops().is_empty());
    }

    #[test]
    fn mock_channel_receive_wraps() {
        let mut ring = [0u32; 4];
        let base = ring.as_mut_ptr() as usize;
        let mut channel = MockDmaChannel::new();
        channel.configure(&Transfer {
            config: ChannelConfig::uart_rx(),
            length: 4,
            src_addr: MOCK_UART_RX_DATA,
            dest_addr: base,
        });

        channel.receive(&[1, 2, 3, 4, 5]);

        assert!(channel.status().started);
        assert_eq!(channel.next_dest_addr(), base + WORD_SIZE);
        // SAFETY: reading back the local array the mock wrote into.
        let first = unsafe { core::ptr::read_volatile(base as *const u32) };
        assert_eq!(first, 5);
    }

    #[test]
    fn mock_channel_completes_on_requested_read() {
        let mut channel = MockDmaChannel::new();
        channel.enable();
        channel.complete_on_enable_read(2);

        assert!(channel.is_enabled());
        assert!(!channel.is_enabled());
        assert!(channel.status().completed);
    }

    #[test]
    fn mock_channel_completes_before_length_write() {
        let mut channel = MockDmaChannel::new();
        channel.enable();
        channel.complete_on_set_length();
        channel.set_transfer_length(6);

        assert!(!channel.is_enabled());
        assert_eq!(channel.transfer_length(), 6);

        channel.enable();
        channel.set_transfer_length(7);
        assert!(channel.is_enabled());
    }

    #[test]
    fn mock_delay_accumulates() {
        let mut delay = MockDelay::new();
        delay.delay_us(10);
        delay.delay_ns(500);
        assert_eq!(delay.total_ns(), 10_500);
        assert_eq!(delay.total_us(), 10);
        delay.reset();
        assert_eq!(delay.total_ns(), 0);
    }

    #[test]
    fn mock_peripheral_records_setup() {
        let mut uart = MockUartPeripheral::new();
        uart.enable(8_000_000, 115_200);
        assert_eq!(uart.enabled_with(), Some((8_000_000, 115_200)));
        assert_eq!(uart.enable_count(), 1);
        assert_eq!(uart.pins(), None);
    }
}
