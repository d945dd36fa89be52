//! Interrupt-driven serial link
//!
//! [`SerialContext`] holds all state shared between the interrupt handlers
//! and the main loop. It is built once as a `static`, has its handlers
//! registered, and is then activated. Only the [`Serial`] handle returned
//! by activation gives access to the buffers.

pub mod context;
pub mod counters;
pub mod receiver;
pub mod transmitter;

pub use context::{ContextError, EventSource, Serial, SerialContext};
pub use counters::{ErrorCounters, ErrorKind, ErrorSnapshot};
pub use receiver::INPUT_HEADROOM;
