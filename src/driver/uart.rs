//! UART DMA transport
//!
//! [`UartDma`] is the single context object for the transport. It owns both
//! DMA channels and borrows the claimed buffers for as long as it lives.
//!
//! # Example
//!
//! ```ignore
//! use ph_uart_dma::{DmaBuffers, Rsl10UartDma, RxChannel, TxChannel, UartConfig};
//!
//! static BUFFERS: DmaBuffers<256, 512> = DmaBuffers::new();
//!
//! let (rx, tx) = unsafe { (RxChannel::steal(), TxChannel::steal()) };
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

use embedded_hal::delay::DelayNs;

use super::buffers::DmaBuffers;
use super::config::{TxState, UartConfig};
use super::error::{DmaResult, IoError, IoResult, Result};
use super::status::ChannelStatus;
use crate::hal::dma::{ChannelConfig, DmaChannel, Transfer};
use crate::hal::peripheral::UartPeripheral;
use crate::internal::constants::FLUSH_POLL_INTERVAL_US;
use crate::internal::dma::{RxRing, TxBuffer};

/// DMA-backed UART transport.
///
/// # Type Parameters
/// * `R` - Receive DMA channel
/// * `T` - Transmit DMA channel
/// * `RX` - Receive ring capacity in bytes
/// * `TX` - Transmit buffer capacity in bytes
pub struct UartDma<'a, R, T, const RX: usize, const TX: usize>
where
    R: DmaChannel,
    T: DmaChannel,
{
    rx_channel: R,
    tx_channel: T,
    rx: RxRing<'a, RX>,
    tx: TxBuffer<'a, TX>,
}

impl<'a, R, T, const RX: usize, const TX: usize> UartDma<'a, R, T, RX, TX>
where
    R: DmaChannel,
    T: DmaChannel,
{
    // =========================================================================
    // Initialization
    // =========================================================================

    /// Bring up the transport.
    ///
    /// Validates `config`, claims `buffers`, disables both channels, has the
    /// peripheral configure its pads and enable the UART in DMA mode, then
    /// starts the RX channel in circular mode over the receive ring.
    ///
    /// # Errors
    /// - `Config(..)` - invalid configuration, or `buffers` already claimed.
    ///   Hardware is untouched in both cases.
    pub fn initialize<P: UartPeripheral + ?Sized>(
        buffers: &'a DmaBuffers<RX, TX>,
        mut rx_channel: R,
        mut tx_channel: T,
        peripheral: &mut P,
        config: &UartConfig,
    ) -> Result<Self> {
        config.validate()?;
        let (rx_slots, tx_slots) = buffers.claim()?;

        tx_channel.disable();
        rx_channel.disable();

        peripheral.configure_pins(&config.pins());
        peripheral.enable(config.sysclk_hz, config.baud_rate);

        let rx = RxRing::new(rx_slots);
        let tx = TxBuffer::new(tx_slots, peripheral.tx_data_addr());

        rx_channel.clear_status();
        rx_channel.configure(&Transfer {
            config: ChannelConfig::uart_rx(),
            length: RX,
            src_addr: peripheral.rx_data_addr(),
            dest_addr: rx.base_addr(),
        });
        rx_channel.enable();

        #[cfg(feature = "defmt")]
        defmt::info!(
            "uart dma up: {} baud, rx ring {} @ {:#010x}, tx buffer {} @ {:#010x}",
            config.baud_rate,
            RX,
            rx.base_addr(),
            TX,
            tx.base_addr()
        );

        Ok(Self {
            rx_channel,
            tx_channel,
            rx,
            tx,
        })
    }

    // =========================================================================
    // Receive
    // =========================================================================

    /// Copy everything received since the last call into `dest`.
    ///
    /// Returns the number of bytes copied; `0` when nothing new arrived or the
    /// RX channel has not started its first cycle yet. Never blocks.
    ///
    /// # Errors
    /// - `BufferTooSmall` - `dest` cannot hold all unread bytes. Nothing is
    ///   consumed; retry with a larger buffer (see [`rx_pending`](Self::rx_pending)).
    #[inline]
    pub fn drain(&mut self, dest: &mut [u8]) -> IoResult<usize> {
        self.rx.drain(&self.rx_channel, dest)
    }

    /// Unread bytes waiting in the receive ring
    #[inline]
    pub fn rx_pending(&self) -> usize {
        self.rx.pending(&self.rx_channel)
    }

    /// Receive ring capacity in bytes. At most `RX - 1` can be unread at once.
    #[inline(always)]
    pub const fn rx_capacity(&self) -> usize {
        self.rx.capacity()
    }

    /// Status flags of the RX channel
    #[inline]
    pub fn rx_channel_status(&self) -> ChannelStatus {
        self.rx_channel.status()
    }

    // =========================================================================
    // Transmit
    // =========================================================================

    /// Queue `data` for transmission without waiting.
    ///
    /// Appends to the running transfer when possible, otherwise starts a new
    /// one. An empty slice is accepted and does nothing.
    ///
    /// # Errors
    /// - `Overflow` - `data` does not fit. Nothing was queued; the caller
    ///   decides whether to retry later.
    #[inline]
    pub fn enqueue(&mut self, data: &[u8]) -> DmaResult<()> {
        self.tx.enqueue(&mut self.tx_channel, data)
    }

    /// Whether a transmit transfer is in progress
    #[inline]
    pub fn is_tx_active(&self) -> bool {
        self.tx_channel.is_enabled()
    }

    /// Bytes in the running transmit transfer, `0` when idle
    #[inline]
    pub fn tx_len(&self) -> usize {
        self.tx.len(&self.tx_channel)
    }

    /// Bytes an [`enqueue`](Self::enqueue) can accept right now
    #[inline]
    pub fn tx_free(&self) -> usize {
        TX.saturating_sub(self.tx_len())
    }

    /// Transmit buffer capacity in bytes
    #[inline(always)]
    pub const fn tx_capacity(&self) -> usize {
        self.tx.capacity()
    }

    /// Current transmit state
    pub fn tx_state(&self) -> TxState {
        match self.tx_len() {
            0 => TxState::Idle,
            len => TxState::Active(len),
        }
    }

    /// Status flags of the TX channel
    #[inline]
    pub fn tx_channel_status(&self) -> ChannelStatus {
        self.tx_channel.status()
    }

    /// Wait until the transmit channel goes idle.
    ///
    /// Polls every few microseconds using `delay`.
    ///
    /// # Errors
    /// - `Timeout` - still transmitting after `timeout_us`
    pub fn flush<D: DelayNs>(&self, delay: &mut D, timeout_us: u32) -> IoResult<()> {
        let mut waited = 0u32;
        while self.tx_channel.is_enabled() {
            if waited >= timeout_us {
                #[cfg(feature = "defmt")]
                defmt::warn!("tx flush timed out with {} bytes queued", self.tx_len());
                return Err(IoError::Timeout);
            }
            delay.delay_us(FLUSH_POLL_INTERVAL_US);
            waited = waited.saturating_add(FLUSH_POLL_INTERVAL_US);
        }
        Ok(())
    }

    // =========================================================================
    // Channel Access
    // =========================================================================

    /// The RX channel
    #[inline(always)]
    pub fn rx_channel(&self) -> &R {
        &self.rx_channel
    }

    /// The TX channel
    #[inline(always)]
    pub fn tx_channel(&self) -> &T {
        &self.tx_channel
    }
}

impl<R, T, const RX: usize, const TX: usize> core::fmt::Write for UartDma<'_, R, T, RX, TX>
where
    R: DmaChannel,
    T: DmaChannel,
{
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        self.enqueue(s.as_bytes()).map_err(|_| core::fmt::Error)
    }
}

impl<R, T, const RX: usize, const TX: usize> Drop for UartDma<'_, R, T, RX, TX>
where
    R: DmaChannel,
    T: DmaChannel,
{
    /// Stop both channels so the hardware never writes into or reads from
    /// buffers it no longer owns.
    fn drop(&mut self) {
        self.rx_channel.disable();
        self.tx_channel.disable();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    extern crate std;
    use core::fmt::Write;
    use std::vec;

    use super::*;
    use crate::driver::config::Pull;
    use crate::driver::error::{ConfigError, DmaError, Error};
    use crate::hal::dma::AddressMode;
    use crate::testing::{
        ChannelOp, MOCK_UART_RX_DATA, MOCK_UART_TX_DATA, MockDelay, MockDmaChannel,
        MockUartPeripheral,
    };

    type TestUart<'a> = UartDma<'a, &'a MockDmaChannel, &'a MockDmaChannel, 8, 16>;

    fn bring_up<'a>(
        buffers: &'a DmaBuffers<8, 16>,
        rx: &'a MockDmaChannel,
        tx: &'a MockDmaChannel,
    ) -> TestUart<'a> {
        let mut peripheral = MockUartPeripheral::new();
        UartDma::initialize(buffers, rx, tx, &mut peripheral, &UartConfig::new()).unwrap()
    }

    #[test]
    fn initialize_programs_rx_channel() {
        let buffers = DmaBuffers::<8, 16>::new();
        let rx = MockDmaChannel::new();
        let tx = MockDmaChannel::new();
        let mut peripheral = MockUartPeripheral::new();
        let config = UartConfig::new().with_baud_rate(9_600).with_pull(Pull::None);

        let uart: TestUart<'_> =
            UartDma::initialize(&buffers, &rx, &tx, &mut peripheral, &config).unwrap();

        assert_eq!(
            rx.ops(),
            vec![
                ChannelOp::Disable,
                ChannelOp::ClearStatus,
                ChannelOp::Configure,
                ChannelOp::Enable
            ]
        );
        assert_eq!(tx.ops(), vec![ChannelOp::Disable]);

        let transfer = rx.transfer().unwrap();
        assert_eq!(transfer.length, 8);
        assert_eq!(transfer.src_addr, MOCK_UART_RX_DATA);
        assert_eq!(transfer.config.address_mode, AddressMode::Circular);
        assert_eq!(transfer.dest_addr, rx.dest_base_addr());

        assert_eq!(peripheral.enabled_with(), Some((8_000_000, 9_600)));
        let pins = peripheral.pins().unwrap();
        assert_eq!(pins.tx_pin, 5);
        assert_eq!(pins.rx_pin, 4);
        assert_eq!(pins.pull, Pull::None);

        assert!(!uart.is_tx_active());
        assert_eq!(uart.rx_capacity(), 8);
        assert_eq!(uart.tx_capacity(), 16);
    }

    #[test]
    fn initialize_rejects_invalid_config_without_touching_hardware() {
        let buffers = DmaBuffers::<8, 16>::new();
        let rx = MockDmaChannel::new();
        let tx = MockDmaChannel::new();
        let mut peripheral = MockUartPeripheral::new();
        let config = UartConfig::new().with_tx_pin(4);

        let result: Result<TestUart<'_>> =
            UartDma::initialize(&buffers, &rx, &tx, &mut peripheral, &config);

        assert_eq!(result.err(), Some(Error::Config(ConfigError::PinConflict)));
        assert!(rx.ops().is_empty());
        assert!(tx.ops().is_empty());
        assert_eq!(peripheral.enable_count(), 0);
        assert!(!buffers.is_claimed());
    }

    #[test]
    fn initialize_twice_is_rejected() {
        let buffers = DmaBuffers::<8, 16>::new();
        let rx = MockDmaChannel::new();
        let tx = MockDmaChannel::new();
        let _uart = bring_up(&buffers, &rx, &tx);

        let rx2 = MockDmaChannel::new();
        let tx2 = MockDmaChannel::new();
        let mut peripheral = MockUartPeripheral::new();
        let result: Result<TestUart<'_>> =
            UartDma::initialize(&buffers, &rx2, &tx2, &mut peripheral, &UartConfig::new());

        assert_eq!(
            result.err(),
            Some(Error::Config(ConfigError::AlreadyInitialized))
        );
        assert!(rx2.ops().is_empty());
    }

    #[test]
    fn echo_received_bytes() {
        let buffers = DmaBuffers::<8, 16>::new();
        let rx = MockDmaChannel::new();
        let tx = MockDmaChannel::new();
        let mut uart = bring_up(&buffers, &rx, &tx);

        let mut buf = [0u8; 8];
        assert_eq!(uart.drain(&mut buf), Ok(0));

        uart.rx_channel().receive(b"ping");
        assert_eq!(uart.rx_pending(), 4);
        assert!(uart.rx_channel_status().started);

        let n = uart.drain(&mut buf).unwrap();
        assert_eq!(&buf[..n], b"ping");
        uart.enqueue(&buf[..n]).unwrap();

        assert!(uart.is_tx_active());
        assert_eq!(tx.transmitted(), b"ping");
        assert_eq!(tx.transfer().unwrap().dest_addr, MOCK_UART_TX_DATA);
    }

    #[test]
    fn coalesces_back_to_back_enqueues() {
        let buffers = DmaBuffers::<8, 16>::new();
        let rx = MockDmaChannel::new();
        let tx = MockDmaChannel::new();
        let mut uart = bring_up(&buffers, &rx, &tx);

        uart.enqueue(b"AB").unwrap();
        uart.enqueue(b"CD").unwrap();

        assert_eq!(uart.tx_len(), 4);
        assert_eq!(uart.tx_free(), 12);
        assert_eq!(uart.tx_state(), TxState::Active(4));
        assert_eq!(tx.transmitted(), b"ABCD");
    }

    #[test]
    fn overflow_is_reported() {
        let buffers = DmaBuffers::<8, 16>::new();
        let rx = MockDmaChannel::new();
        let tx = MockDmaChannel::new();
        let mut uart = bring_up(&buffers, &rx, &tx);

        assert_eq!(uart.enqueue(&[0u8; 17]), Err(DmaError::Overflow));
        assert_eq!(uart.tx_state(), TxState::Idle);
        assert_eq!(uart.tx_free(), 16);
    }

    #[test]
    fn tx_free_saturates_on_oversized_length_register() {
        let buffers = DmaBuffers::<8, 16>::new();
        let rx = MockDmaChannel::new();
        let tx = MockDmaChannel::new();
        let mut uart = bring_up(&buffers, &rx, &tx);

        uart.enqueue(b"AB").unwrap();
        DmaChannel::set_transfer_length(&mut &tx, 40);

        assert_eq!(uart.tx_free(), 0);
        assert_eq!(uart.enqueue(b"C"), Err(DmaError::Overflow));
    }

    #[test]
    fn drain_into_small_buffer_keeps_data() {
        let buffers = DmaBuffers::<8, 16>::new();
        let rx = MockDmaChannel::new();
        let tx = MockDmaChannel::new();
        let mut uart = bring_up(&buffers, &rx, &tx);

        uart.rx_channel().receive(b"hello");
        let mut small = [0u8; 2];
        assert_eq!(uart.drain(&mut small), Err(IoError::BufferTooSmall));

        let mut buf = [0u8; 8];
        assert_eq!(uart.drain(&mut buf), Ok(5));
        assert_eq!(&buf[..5], b"hello");
    }

    #[test]
    fn fmt_write_enqueues() {
        let buffers = DmaBuffers::<8, 16>::new();
        let rx = MockDmaChannel::new();
        let tx = MockDmaChannel::new();
        let mut uart = bring_up(&buffers, &rx, &tx);

        write!(uart, "n={}", 42).unwrap();
        assert_eq!(tx.transmitted(), b"n=42");

        assert!(write!(uart, "{}", "twenty bytes of text").is_err());
    }

    #[test]
    fn flush_returns_when_idle() {
        let buffers = DmaBuffers::<8, 16>::new();
        let rx = MockDmaChannel::new();
        let tx = MockDmaChannel::new();
        let uart = bring_up(&buffers, &rx, &tx);

        let mut delay = MockDelay::new();
        assert_eq!(uart.flush(&mut delay, 100), Ok(()));
        assert_eq!(delay.total_ns(), 0);
    }

    #[test]
    fn flush_waits_for_completion() {
        let buffers = DmaBuffers::<8, 16>::new();
        let rx = MockDmaChannel::new();
        let tx = MockDmaChannel::new();
        let mut uart = bring_up(&buffers, &rx, &tx);
        uart.enqueue(b"data").unwrap();

        let finish = |total_ns: u64| {
            if total_ns >= 30_000 {
                tx.complete();
            }
        };
        let mut delay = MockDelay::with_callback(&finish);

        assert_eq!(uart.flush(&mut delay, 1_000), Ok(()));
        assert_eq!(delay.total_us(), 30);
        assert!(uart.tx_channel_status().completed);
    }

    #[test]
    fn flush_times_out() {
        let buffers = DmaBuffers::<8, 16>::new();
        let rx = MockDmaChannel::new();
        let tx = MockDmaChannel::new();
        let mut uart = bring_up(&buffers, &rx, &tx);
        uart.enqueue(b"stuck").unwrap();

        let mut delay = MockDelay::new();
        assert_eq!(uart.flush(&mut delay, 50), Err(IoError::Timeout));
        assert_eq!(delay.total_us(), 50);
    }

    #[test]
    fn drop_disables_both_channels() {
        let buffers = DmaBuffers::<8, 16>::new();
        let rx = MockDmaChannel::new();
        let tx = MockDmaChannel::new();
        let mut uart = bring_up(&buffers, &rx, &tx);
        uart.enqueue(b"bye").unwrap();
        rx.clear_ops();
        tx.clear_ops();

        drop(uart);

        assert_eq!(rx.ops(), vec![ChannelOp::Disable]);
        assert_eq!(tx.ops(), vec![ChannelOp::Disable]);
        assert!(!rx.is_enabled());
        assert!(!tx.is_enabled());
    }
}
