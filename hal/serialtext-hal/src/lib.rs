//! Serialtext Hardware Abstraction Layer
//!
//! This crate defines the hardware collaborators the serial text core talks
//! to. A chip-specific binary implements them on top of its peripheral
//! access crate; the core crate and its host tests only see the traits.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  serialtext-firmware (interrupts, loop) │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  serialtext-core (buffers, handlers)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  serialtext-hal (this crate - traits)   │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`uart::TransmitRegister`] - byte-wide transmit register with a
//!   "register empty" interrupt source
//! - [`uart::ReceiveRegister`] - byte-wide receive register read as one
//!   [`uart::RxFrame`] (byte plus parity flag)
//! - [`gpio::OutputPin`] - the indicator output
//! - [`power::EventWait`] - low-power wait for the next interrupt

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod gpio;
pub mod power;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use gpio::OutputPin;
pub use power::EventWait;
pub use uart::{ReceiveRegister, RxFrame, TransmitRegister, UartConfig};
