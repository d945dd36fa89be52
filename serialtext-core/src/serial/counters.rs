//! Diagnostic error counters
//!
//! Each counter is written by one producer and read by the status report.
//! They are 8 bits wide and wrap; nothing ever branches on their value.

use portable_atomic::{AtomicU8, Ordering};

/// Conditions that are counted rather than handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ErrorKind {
    /// Received byte failed the parity check and was discarded
    Parity,
    /// No room in the receive buffer for a data byte
    SoftwareOverflow,
    /// Hardware receive FIFO lost data before it was read
    HardwareOverrun,
    /// Message content did not fit the read destination
    OversizedMessage,
}

/// Free-running error counters
#[derive(Debug, Default)]
pub struct ErrorCounters {
    parity: AtomicU8,
    overflow: AtomicU8,
    overrun: AtomicU8,
    truncated: AtomicU8,
}

impl ErrorCounters {
    pub const fn new() -> Self {
        Self {
            parity: AtomicU8::new(0),
            overflow: AtomicU8::new(0),
            overrun: AtomicU8::new(0),
            truncated: AtomicU8::new(0),
        }
    }

    /// Count one occurrence of `kind`
    pub fn record(&self, kind: ErrorKind) {
        self.counter(kind).fetch_add(1, Ordering::Relaxed);
    }

    /// Current value of one counter
    pub fn get(&self, kind: ErrorKind) -> u8 {
        self.counter(kind).load(Ordering::Relaxed)
    }

    /// Read all counters
    ///
    /// Counters are read one at a time; a handler may bump one in between.
    pub fn snapshot(&self) -> ErrorSnapshot {
        ErrorSnapshot {
            parity: self.get(ErrorKind::Parity),
            overflow: self.get(ErrorKind::SoftwareOverflow),
            overrun: self.get(ErrorKind::HardwareOverrun),
            truncated: self.get(ErrorKind::OversizedMessage),
        }
    }

    fn counter(&self, kind: ErrorKind) -> &AtomicU8 {
        match kind {
            ErrorKind::Parity => &self.parity,
            ErrorKind::SoftwareOverflow => &self.overflow,
            ErrorKind::HardwareOverrun => &self.overrun,
            ErrorKind::OversizedMessage => &self.truncated,
        }
    }
}

/// Point-in-time copy of the error counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ErrorSnapshot {
    pub parity: u8,
    pub overflow: u8,
    pub overrun: u8,
    pub truncated: u8,
}

impl ErrorSnapshot {
    /// Hardware overruns plus software overflows, as shown in the status line
    pub fn lost_bytes(&self) -> u8 {
        self.overrun.wrapping_add(self.overflow)
    }
}
