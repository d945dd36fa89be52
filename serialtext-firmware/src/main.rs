//! Serialtext - Serial Text Messaging Firmware
//!
//! Main firmware binary for RP2040-based boards. Receives CR-terminated
//! text messages on UART0, echoes them back, toggles the on-board LED on
//! `LED` and reports link statistics once per heartbeat.

#![no_std]
#![no_main]

use cortex_m::peripheral::syst::SystClkSource;
use cortex_m_rt::{entry, exception};
use defmt::*;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::interrupt;
use embassy_rp::interrupt::InterruptExt;
use embassy_rp::uart::Uart;
use serialtext_hal::TransmitRegister;
use {defmt_rtt as _, panic_probe as _};

use serialtext_core::{Dispatcher, EventSource, SerialContext, TickDivider};

mod board;
mod config;

use crate::board::{Indicator, Uart0Rx, Uart0Tx, Wfi};

/// Serial state shared between the interrupt handlers and the main loop
static SERIAL: SerialContext = SerialContext::new();

/// Main entry point
#[entry]
fn main() -> ! {
    info!("Serialtext firmware starting...");

    let p = embassy_rp::init(Default::default());
    let mut core = unwrap!(cortex_m::Peripherals::take());

    // LED off until the serial link is up
    let led = Output::new(p.PIN_25, Level::Low);

    // UART0 on GPIO0 (TX) / GPIO1 (RX)
    let uart_config = config::uart_config(&config::SERIAL);
    let _uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    info!(
        "UART0 configured: {} baud, {:?} data bits, {:?} parity",
        config::SERIAL.baudrate,
        config::SERIAL.data_bits,
        config::SERIAL.parity
    );
    board::enable_receive_interrupt();
    unwrap!(SERIAL.register(EventSource::ReceiveComplete));
    unwrap!(SERIAL.register(EventSource::TransmitEmpty));

    // Heartbeat tick from SysTick
    let reload = config::systick_reload(embassy_rp::clocks::clk_sys_freq());
    core.SYST.set_clock_source(SystClkSource::Core);
    core.SYST.set_reload(reload);
    core.SYST.clear_current();
    unwrap!(SERIAL.register(EventSource::Tick));
    info!(
        "Heartbeat: {} ms tick, {} ms period",
        config::TICK_MS,
        config::HEARTBEAT_PERIOD_MS
    );

    let serial = unwrap!(SERIAL.activate());

    // Handlers are live from here on
    interrupt::UART0_IRQ.unpend();
    unsafe { interrupt::UART0_IRQ.enable() };
    core.SYST.enable_interrupt();
    core.SYST.enable_counter();

    let mut dispatcher = Dispatcher::new(serial, Uart0Tx, Wfi, Indicator::new(led));
    dispatcher.start();
    info!("Serial link active");

    let mut last_errors = serial.errors();
    loop {
        let activity = dispatcher.run_once();

        if activity.echoed > 0 {
            debug!(
                "Echoed {} message(s), {} LED toggle(s)",
                activity.echoed, activity.toggles
            );
        }
        if activity.truncated > 0 {
            warn!("{} oversized message(s) truncated", activity.truncated);
        }
        if let Some(status) = activity.status {
            trace!("Status: {:?}", status);
            let errors = serial.errors();
            if errors != last_errors {
                warn!(
                    "Link errors: parity={} overrun={} overflow={}",
                    errors.parity, errors.overrun, errors.overflow
                );
                last_errors = errors;
            }
        }
    }
}

/// UART0 interrupt: receive, receive timeout and transmit FIFO level
#[interrupt]
fn UART0_IRQ() {
    let Some(serial) = SERIAL.serial() else {
        return;
    };

    serial.on_receive(&mut Uart0Rx);

    let mut tx = Uart0Tx;
    while board::transmit_interrupt_enabled() && tx.is_ready() {
        serial.on_transmit_empty(&mut tx);
    }
}

/// SysTick: one hardware tick, divided down to the heartbeat period
#[exception]
fn SysTick() {
    static mut DIVIDER: TickDivider =
        TickDivider::from_millis(config::TICK_MS, config::HEARTBEAT_PERIOD_MS);

    if DIVIDER.tick() {
        if let Some(serial) = SERIAL.serial() {
            serial.on_tick();
        }
    }
}
