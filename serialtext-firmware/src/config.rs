//! Board configuration
//!
//! The values come from board.toml, validated and turned into constants by
//! the build script.

use embassy_rp::uart;
use serialtext_hal::uart::{DataBits, Parity, StopBits, UartConfig};

include!(concat!(env!("OUT_DIR"), "/board_config.rs"));

/// Translate the board serial settings into the embassy UART config
pub fn uart_config(config: &UartConfig) -> uart::Config {
    let mut cfg = uart::Config::default();
    cfg.baudrate = config.baudrate;
    cfg.data_bits = match config.data_bits {
        DataBits::Five => uart::DataBits::DataBits5,
        DataBits::Six => uart::DataBits::DataBits6,
        DataBits::Seven => uart::DataBits::DataBits7,
        DataBits::Eight => uart::DataBits::DataBits8,
    };
    cfg.parity = match config.parity {
        Parity::None => uart::Parity::ParityNone,
        Parity::Even => uart::Parity::ParityEven,
        Parity::Odd => uart::Parity::ParityOdd,
    };
    cfg.stop_bits = match config.stop_bits {
        StopBits::One => uart::StopBits::STOP1,
        StopBits::Two => uart::StopBits::STOP2,
    };
    cfg
}

/// SysTick reload value for one tick at the given core clock
pub fn systick_reload(sys_clk_hz: u32) -> u32 {
    sys_clk_hz / 1000 * TICK_MS - 1
}
