//! Main dispatch loop
//!
//! One loop owns the application side of the serial link. It sleeps until
//! any interrupt, then services work in fixed priority order:
//!
//! 1. Complete messages: echo each one, act on commands
//! 2. Heartbeat: one status line per new heartbeat value

pub mod machine;

pub use machine::{Activity, DispatchState, Dispatcher};
