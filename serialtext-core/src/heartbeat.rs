//! Heartbeat timing
//!
//! The heartbeat counter itself lives in the serial context and is bumped
//! by [`Serial::on_tick`](crate::serial::Serial::on_tick). Hardware timers
//! often cannot fire as slowly as one heartbeat period, so the tick
//! interrupt runs faster and divides down with a [`TickDivider`].

/// Counts hardware ticks and reports every `ticks_per_period`-th
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickDivider {
    ticks_per_period: u16,
    elapsed: u16,
}

impl TickDivider {
    /// Create a divider; a period of zero ticks is treated as one
    pub const fn new(ticks_per_period: u16) -> Self {
        Self {
            ticks_per_period: if ticks_per_period == 0 {
                1
            } else {
                ticks_per_period
            },
            elapsed: 0,
        }
    }

    /// Divider for a tick interval and heartbeat period given in milliseconds
    pub const fn from_millis(tick_ms: u32, period_ms: u32) -> Self {
        let ticks = if tick_ms == 0 { 1 } else { period_ms / tick_ms };
        let ticks = if ticks > u16::MAX as u32 {
            u16::MAX
        } else {
            ticks as u16
        };
        Self::new(ticks)
    }

    /// Count one hardware tick; true when a heartbeat period has elapsed
    pub fn tick(&mut self) -> bool {
        self.elapsed += 1;
        if self.elapsed >= self.ticks_per_period {
            self.elapsed = 0;
            true
        } else {
            false
        }
    }

    pub fn ticks_per_period(&self) -> u16 {
        self.ticks_per_period
    }
}
