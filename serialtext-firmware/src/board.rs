//! RP2040 register access for the serial core
//!
//! The embassy blocking UART driver sets up pins, baud rate and frame
//! format. After that the interrupt handlers own the data path and talk to
//! UART0 through the PAC.

use embassy_rp::gpio::Output;
use embassy_rp::interrupt::{self, InterruptExt};
use embassy_rp::pac;
use serialtext_hal::{EventWait, OutputPin, ReceiveRegister, RxFrame, TransmitRegister};

/// Unmask the receive and receive-timeout interrupt sources
pub fn enable_receive_interrupt() {
    critical_section::with(|_| {
        pac::UART0.uartimsc().modify(|w| {
            w.set_rxim(true);
            w.set_rtim(true);
        });
    });
}

/// True while the transmit interrupt source is unmasked
pub fn transmit_interrupt_enabled() -> bool {
    pac::UART0.uartimsc().read().txim()
}

/// UART0 transmit side
pub struct Uart0Tx;

impl TransmitRegister for Uart0Tx {
    fn is_ready(&self) -> bool {
        !pac::UART0.uartfr().read().txff()
    }

    fn write_byte(&mut self, byte: u8) {
        pac::UART0.uartdr().write(|w| w.set_data(byte));
    }

    fn set_empty_interrupt(&mut self, enabled: bool) {
        critical_section::with(|_| {
            pac::UART0.uartimsc().modify(|w| w.set_txim(enabled));
        });
        // The PL011 raises TXINTR on a FIFO level crossing, not on a level.
        // Pend the handler so an idle transmitter gets primed.
        if enabled {
            interrupt::UART0_IRQ.pend();
        }
    }
}

/// UART0 receive side
pub struct Uart0Rx;

impl ReceiveRegister for Uart0Rx {
    fn take_overrun(&mut self) -> bool {
        let overrun = pac::UART0.uartris().read().oeris();
        if overrun {
            pac::UART0.uarticr().write(|w| w.set_oeic(true));
        }
        overrun
    }

    fn read_frame(&mut self) -> Option<RxFrame> {
        if pac::UART0.uartfr().read().rxfe() {
            return None;
        }
        // Data and error flags come from the same read
        let dr = pac::UART0.uartdr().read();
        Some(RxFrame {
            byte: dr.data(),
            parity_ok: !dr.pe(),
        })
    }
}

/// On-board LED used as the message indicator
pub struct Indicator(Output<'static>);

impl Indicator {
    pub fn new(pin: Output<'static>) -> Self {
        Self(pin)
    }
}

impl OutputPin for Indicator {
    fn set_high(&mut self) {
        self.0.set_high();
    }

    fn set_low(&mut self) {
        self.0.set_low();
    }

    fn toggle(&mut self) {
        self.0.toggle();
    }

    fn is_set_high(&self) -> bool {
        self.0.is_set_high()
    }
}

/// Sleep until the next interrupt
pub struct Wfi;

impl EventWait for Wfi {
    fn wait_for_event(&mut self) {
        cortex_m::asm::wfi();
    }
}
