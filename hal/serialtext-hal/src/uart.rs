//! UART serial communication abstractions
//!
//! The serial core is interrupt driven: it never polls the UART from the
//! main loop. These traits expose the register-level operations the
//! receive and transmit interrupt handlers need.

/// One received character as reported by the hardware
///
/// Byte and parity status are captured together. Reading them separately
/// races against the next character arriving in the receive FIFO.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RxFrame {
    /// Received data byte
    pub byte: u8,
    /// False if the byte failed the parity check
    pub parity_ok: bool,
}

impl RxFrame {
    /// A frame that passed the parity check
    pub const fn valid(byte: u8) -> Self {
        Self {
            byte,
            parity_ok: true,
        }
    }

    /// A frame that failed the parity check
    pub const fn parity_error(byte: u8) -> Self {
        Self {
            byte,
            parity_ok: false,
        }
    }
}

/// UART transmit data register
///
/// Used from two contexts: the transmit interrupt handler writes bytes and
/// disables the interrupt source, the main loop re-enables it.
pub trait TransmitRegister {
    /// True if the register can accept another byte
    fn is_ready(&self) -> bool;

    /// Write one byte to the register
    fn write_byte(&mut self, byte: u8);

    /// Enable or disable the "register empty" interrupt source
    fn set_empty_interrupt(&mut self, enabled: bool);
}

/// UART receive data register
pub trait ReceiveRegister {
    /// Check and clear the hardware overrun flag
    ///
    /// True if the hardware dropped a character because software did not
    /// read the previous one in time.
    fn take_overrun(&mut self) -> bool;

    /// Read the next pending character, or `None` if the receive FIFO is empty
    fn read_frame(&mut self) -> Option<RxFrame>;
}

/// UART configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UartConfig {
    /// Baud rate in bits per second
    pub baudrate: u32,
    /// Number of data bits (typically 8)
    pub data_bits: DataBits,
    /// Parity mode
    pub parity: Parity,
    /// Number of stop bits
    pub stop_bits: StopBits,
}

impl Default for UartConfig {
    fn default() -> Self {
        Self {
            baudrate: 57_600,
            data_bits: DataBits::Eight,
            parity: Parity::Even,
            stop_bits: StopBits::One,
        }
    }
}

/// Number of data bits per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataBits {
    Five,
    Six,
    Seven,
    Eight,
}

/// Parity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Parity {
    None,
    Even,
    Odd,
}

/// Number of stop bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StopBits {
    One,
    Two,
}
