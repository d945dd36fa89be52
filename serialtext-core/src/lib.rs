//! Board-agnostic core of the serial text firmware
//!
//! This crate contains everything that does not touch chip registers:
//!
//! - Fixed-capacity byte ring buffers
//! - Shared serial context with explicit handler registration
//! - Receive / transmit / tick interrupt handlers
//! - Blocking send and non-blocking message read
//! - Heartbeat tick divider
//! - Priority-ordered dispatch loop
//!
//! The firmware binary owns a `static` [`SerialContext`], forwards its
//! interrupts to the handlers on [`Serial`] and runs a [`Dispatcher`].

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod buffer;
pub mod dispatch;
pub mod heartbeat;
pub mod serial;

#[cfg(test)]
mod sim;

pub use buffer::{RingBuffer, BUFFER_CAPACITY};
pub use dispatch::{Activity, DispatchState, Dispatcher};
pub use heartbeat::TickDivider;
pub use serial::{
    ContextError, ErrorCounters, ErrorKind, ErrorSnapshot, EventSource, Serial, SerialContext,
};
