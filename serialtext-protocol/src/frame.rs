//! Message framing for the serial text protocol.
//!
//! A message is every byte up to a carriage return. While a message is
//! read out of the receive buffer it passes through a [`MessageAssembler`]:
//! - control characters (below 0x20) and DEL (0x7F) are dropped
//! - content beyond the destination capacity is dropped, but reading
//!   continues so that the terminator is still consumed

use heapless::Vec;

/// End of message marker (carriage return)
pub const TERMINATOR: u8 = b'\r';

/// DEL control character
pub const DELETE: u8 = 0x7F;

/// First printable character
const FIRST_PRINTABLE: u8 = 0x20;

/// Maximum message content kept by a read
pub const MAX_MESSAGE_LEN: usize = 254;

/// Check whether a received byte belongs in message content
///
/// The terminator is a control character and therefore not content either.
pub const fn is_content_byte(byte: u8) -> bool {
    byte >= FIRST_PRINTABLE && byte != DELETE
}

/// A message read from the receive buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message<const N: usize = MAX_MESSAGE_LEN> {
    content: Vec<u8, N>,
    truncated: bool,
}

impl<const N: usize> Message<N> {
    /// Message content without terminator or control characters
    pub fn as_bytes(&self) -> &[u8] {
        &self.content
    }

    /// Content length in bytes
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// True for a message that was just a terminator
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// True if content was dropped because it did not fit
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }
}

/// Result of feeding one byte to a [`MessageAssembler`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Assembly {
    /// Byte copied into the content
    Stored,
    /// Control character, not copied
    Skipped,
    /// Content is full, byte dropped
    Dropped,
    /// Terminator seen, message complete
    Complete,
}

/// Collects the content of one message byte by byte
#[derive(Debug, Clone)]
pub struct MessageAssembler<const N: usize = MAX_MESSAGE_LEN> {
    content: Vec<u8, N>,
    truncated: bool,
}

impl<const N: usize> Default for MessageAssembler<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> MessageAssembler<N> {
    /// Create an empty assembler
    pub const fn new() -> Self {
        Self {
            content: Vec::new(),
            truncated: false,
        }
    }

    /// Feed the next byte of the message
    pub fn feed(&mut self, byte: u8) -> Assembly {
        if byte == TERMINATOR {
            return Assembly::Complete;
        }
        if !is_content_byte(byte) {
            return Assembly::Skipped;
        }
        match self.content.push(byte) {
            Ok(()) => Assembly::Stored,
            Err(_) => {
                self.truncated = true;
                Assembly::Dropped
            }
        }
    }

    /// Hand out the collected message
    pub fn finish(self) -> Message<N> {
        Message {
            content: self.content,
            truncated: self.truncated,
        }
    }
}
