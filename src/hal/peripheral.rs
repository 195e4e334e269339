//! UART peripheral collaborator.
//!
//! Pad muxing, clock dividers and the UART control register are outside the
//! transport. The transport only tells the board what it needs and asks
//! where the data registers are.

use crate::driver::config::PinConfig;

/// Board-side UART setup used by [`UartDma::initialize`](crate::UartDma::initialize).
///
/// # Example
///
/// ```ignore
/// struct BoardUart;
///
/// impl UartPeripheral for BoardUart {
///     fn configure_pins(&mut self, pins: &PinConfig) {
///         // route pins.tx_pin / pins.rx_pin to the UART
///     }
///     fn enable(&mut self, sysclk_hz: u32, baud_rate: u32) {
///         // Sys_UART_Enable(sysclk_hz, baud_rate, UART_DMA_MODE_ENABLE)
///     }
///     fn rx_data_addr(&self) -> usize { UART_RX_DATA_ADDR }
///     fn tx_data_addr(&self) -> usize { UART_TX_DATA_ADDR }
/// }
/// ```
pub trait UartPeripheral {
    /// Route and configure the TX and RX pads
    fn configure_pins(&mut self, pins: &PinConfig);

    /// Enable the UART at `baud_rate` with DMA request mode on
    fn enable(&mut self, sysclk_hz: u32, baud_rate: u32);

    /// Address of the receive data register (RX channel source)
    fn rx_data_addr(&self) -> usize;

    /// Address of the transmit data register (TX channel destination)
    fn tx_data_addr(&self) -> usize;
}
