//! Byte queues shared between interrupt handlers and the main loop

pub mod ring;

pub use ring::{RingBuffer, BUFFER_CAPACITY};
