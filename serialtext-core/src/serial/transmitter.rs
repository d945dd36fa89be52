//! Transmit side: interrupt handler and blocking send
//!
//! The main loop is the only producer of the output buffer, the
//! transmit-empty handler the only consumer. The handler turns its own
//! interrupt source off when the buffer runs dry; [`Serial::send`] turns it
//! back on.

use serialtext_hal::{EventWait, TransmitRegister};

use super::context::Serial;

impl<'a> Serial<'a> {
    /// Transmit-register-empty interrupt handler
    ///
    /// Moves at most one byte to the hardware. Disables the interrupt
    /// source once nothing is left to send.
    pub fn on_transmit_empty<T: TransmitRegister>(&self, tx: &mut T) {
        self.ctx.output.lock(|output| {
            let mut output = output.borrow_mut();
            if tx.is_ready() {
                if let Some(byte) = output.pop() {
                    tx.write_byte(byte);
                }
            }
            if output.is_empty() {
                tx.set_empty_interrupt(false);
            }
        });
    }

    /// Queue `bytes` for transmission, waiting for room as needed
    ///
    /// Returns once the last byte is in the output buffer, not once it
    /// is on the wire. Sleeps in `wait` whenever the buffer is full; any
    /// interrupt ends the sleep, so the push is simply retried.
    pub fn send<T, W>(&self, tx: &mut T, wait: &mut W, bytes: &[u8])
    where
        T: TransmitRegister,
        W: EventWait,
    {
        for &byte in bytes {
            while !self.ctx.output.lock(|output| output.borrow_mut().try_push(byte)) {
                tx.set_empty_interrupt(true);
                wait.wait_for_event();
            }
        }
        // The handler may have drained the buffer and disabled itself
        // between our last push and here.
        tx.set_empty_interrupt(true);
    }
}
