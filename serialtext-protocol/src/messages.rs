//! Output templates and the in-band command
//!
//! Everything the device sends is one of three line types:
//! - `Hello` once after reset
//! - `ECHO> ` followed by the received content
//! - `STAT> ` heartbeat with diagnostic counters

use core::fmt::{self, Write};
use heapless::String;

/// Startup greeting
pub const HELLO: &[u8] = b"Hello\r\n";

/// Prefix of every echo line
pub const ECHO_PREFIX: &[u8] = b"ECHO> ";

/// Line ending of every output line
pub const LINE_END: &[u8] = b"\r\n";

/// Content that toggles the indicator
const LED_COMMAND: &[u8] = b"LED";

/// Longest possible status line
pub const MAX_STATUS_LEN: usize = 64;

/// Commands recognised in message content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Toggle the indicator output
    ToggleIndicator,
}

impl Command {
    /// Match message content against the known commands
    ///
    /// Only an exact match counts; `led` or `LED ` are ordinary messages.
    pub fn parse(content: &[u8]) -> Option<Self> {
        match content {
            LED_COMMAND => Some(Command::ToggleIndicator),
            _ => None,
        }
    }
}

/// Counter values reported by one heartbeat line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatusLine {
    /// Heartbeat counter (seconds, modulo 256)
    pub seconds: u8,
    /// Complete messages waiting in the receive buffer
    pub waiting: u16,
    /// Parity errors
    pub parity_errors: u8,
    /// Hardware overruns plus software overflows
    pub overrun_errors: u8,
}

impl StatusLine {
    /// Format the line, including the trailing CR LF
    pub fn render(&self) -> String<MAX_STATUS_LEN> {
        let mut line = String::new();
        // Cannot fail: the longest rendering is 62 bytes
        let _ = write!(line, "{}", self);
        line
    }
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "STAT> sec: {} msg.wait: {} parity.err: {} over.err: {}\r\n",
            self.seconds, self.waiting, self.parity_errors, self.overrun_errors
        )
    }
}
