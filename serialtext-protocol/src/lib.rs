//! Serial Text Message Protocol
//!
//! Messages are plain text lines exchanged over an 8E1 serial link.
//!
//! # Protocol Overview
//!
//! ```text
//! peer → device:   <content bytes> CR
//! device → peer:   Hello CR LF                      (once, at startup)
//!                  ECHO> <content> CR LF            (once per message)
//!                  STAT> sec: N msg.wait: N parity.err: N over.err: N CR LF
//! ```
//!
//! Carriage return is the only terminator and never part of the content.
//! Control characters in the content are dropped when the message is read.
//! The content `LED` is a command that toggles the indicator; it is echoed
//! like any other message.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod frame;
pub mod messages;

pub use frame::{
    is_content_byte, Assembly, Message, MessageAssembler, MAX_MESSAGE_LEN, TERMINATOR,
};
pub use messages::{Command, StatusLine, ECHO_PREFIX, HELLO, LINE_END};
