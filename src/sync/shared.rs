//! ISR-safe transport wrapper using critical sections.

use super::primitives::CriticalSectionCell;
use crate::driver::uart::UartDma;
use crate::hal::dma::DmaChannel;

/// ISR-safe holder for an initialized [`UartDma`].
///
/// The transport is created at runtime by `initialize`, so the static starts
/// empty and is filled with [`install`](Self::install). All access goes
/// through `critical_section::with()`, disabling interrupts for the duration
/// of the closure.
///
/// # Example
///
/// ```ignore
/// static BUFFERS: DmaBuffers<256, 512> = DmaBuffers::new();
/// static UART: SharedUart<RxChannel, TxChannel, 256, 512> = SharedUart::new();
///
/// let uart = UartDma::initialize(&BUFFERS, rx, tx, &mut board_uart, &config)?;
/// UART.install(uart);
///
/// #[interrupt]
/// fn TIMER0() {
///     UART.with(|uart| uart.enqueue(b"tick\r\n").ok());
/// }
/// ```
pub struct SharedUart<Rx, Tx, const RX: usize, const TX: usize>
where
    Rx: DmaChannel,
    Tx: DmaChannel,
{
    inner: CriticalSectionCell<Option<UartDma<'static, Rx, Tx, RX, TX>>>,
}

impl<Rx, Tx, const RX: usize, const TX: usize> SharedUart<Rx, Tx, RX, TX>
where
    Rx: DmaChannel,
    Tx: DmaChannel,
{
    /// Create an empty holder (const, suitable for static initialization).
    pub const fn new() -> Self {
        Self {
            inner: CriticalSectionCell::new(None),
        }
    }

    /// Store the transport, returning any previously installed one.
    pub fn install(
        &self,
        uart: UartDma<'static, Rx, Tx, RX, TX>,
    ) -> Option<UartDma<'static, Rx, Tx, RX, TX>> {
        self.inner.with(|slot| slot.replace(uart))
    }

    /// Remove the transport.
    pub fn take(&self) -> Option<UartDma<'static, Rx, Tx, RX, TX>> {
        self.inner.with(Option::take)
    }

    /// Whether a transport is installed
    pub fn is_installed(&self) -> bool {
        self.inner.with_ref(Option::is_some)
    }

    /// Execute a closure with exclusive access to the transport.
    ///
    /// Returns `None` if nothing is installed. Interrupts are disabled for
    /// the duration of the closure.
    #[inline]
    pub fn with<R, F>(&self, f: F) -> Option<R>
    where
        F: FnOnce(&mut UartDma<'static, Rx, Tx, RX, TX>) -> R,
    {
        self.inner.with(|slot| slot.as_mut().map(f))
    }

    /// Try to execute a closure, returning `None` if already borrowed or
    /// nothing is installed.
    #[inline]
    pub fn try_with<R, F>(&self, f: F) -> Option<R>
    where
        F: FnOnce(&mut UartDma<'static, Rx, Tx, RX, TX>) -> R,
    {
        self.inner.try_with(|slot| slot.as_mut().map(f)).flatten()
    }
}

impl<Rx, Tx, const RX: usize, const TX: usize> Default for SharedUart<Rx, Tx, RX, TX>
where
    Rx: DmaChannel,
    Tx: DmaChannel,
{
    fn default() -> Self {
        Self::new()
    }
}

/// RSL10 shared transport with the default buffer sizes.
#[cfg(feature = "rsl10")]
pub type SharedRsl10Uart = SharedUart<
    crate::RxChannel,
    crate::TxChannel,
    { crate::internal::constants::DEFAULT_RX_BUFFER_SIZE },
    { crate::internal::constants::DEFAULT_TX_BUFFER_SIZE },
>;
