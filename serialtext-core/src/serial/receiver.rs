//! Receive side: interrupt handler and message reader
//!
//! The handler is the only producer of the input buffer, the reader the
//! only consumer. A terminator is always admitted while the buffer has a
//! free slot, so a message can be closed even when data bytes are already
//! being dropped.

use portable_atomic::Ordering;
use serialtext_hal::ReceiveRegister;
use serialtext_protocol::{Assembly, Message, MessageAssembler, TERMINATOR};

use super::context::Serial;
use super::counters::ErrorKind;
use crate::buffer::RingBuffer;

/// Slots kept free for terminators once data bytes stop being accepted
pub const INPUT_HEADROOM: usize = 2;

/// Admission rule for received bytes
fn admits<const N: usize>(input: &RingBuffer<N>, byte: u8) -> bool {
    if byte == TERMINATOR {
        !input.is_full()
    } else {
        input.len() < N - INPUT_HEADROOM
    }
}

impl<'a> Serial<'a> {
    /// Receive-complete interrupt handler
    ///
    /// Drains every character the hardware has pending, so a burst costs
    /// one interrupt.
    pub fn on_receive<R: ReceiveRegister>(&self, rx: &mut R) {
        if rx.take_overrun() {
            self.ctx.errors.record(ErrorKind::HardwareOverrun);
        }

        while let Some(frame) = rx.read_frame() {
            if !frame.parity_ok {
                self.ctx.errors.record(ErrorKind::Parity);
                continue;
            }

            let byte = frame.byte;
            let stored = self.ctx.input.lock(|input| {
                let mut input = input.borrow_mut();
                if admits(&input, byte) {
                    input.force_push(byte);
                    true
                } else {
                    false
                }
            });

            if !stored {
                self.ctx.errors.record(ErrorKind::SoftwareOverflow);
            } else if byte == TERMINATOR {
                self.ctx.pending.fetch_add(1, Ordering::AcqRel);
            }
        }
    }

    /// Read the oldest complete message
    ///
    /// Returns `None` without touching the buffer if no message is
    /// complete. Content beyond `N` bytes is dropped and counted as
    /// [`ErrorKind::OversizedMessage`]; the terminator is consumed either way.
    pub fn read_message<const N: usize>(&self) -> Option<Message<N>> {
        if self.pending_messages() == 0 {
            return None;
        }

        let mut assembler = MessageAssembler::<N>::new();
        while let Some(byte) = self.ctx.input.lock(|input| input.borrow_mut().pop()) {
            if assembler.feed(byte) == Assembly::Complete {
                self.ctx.pending.fetch_sub(1, Ordering::AcqRel);
                break;
            }
        }

        let message = assembler.finish();
        if message.is_truncated() {
            self.ctx.errors.record(ErrorKind::OversizedMessage);
        }
        Some(message)
    }
}
