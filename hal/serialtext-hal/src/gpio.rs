//! GPIO pin abstractions
//!
//! The firmware drives a single indicator output; this is the interface it
//! needs from the chip HAL.

/// Indicator output
///
/// Drives an LED or similar. The main loop owns the pin; interrupt
/// handlers never touch it.
pub trait OutputPin {
    /// Indicator on
    fn set_high(&mut self);

    /// Indicator off
    fn set_low(&mut self);

    /// Invert the current output level
    fn toggle(&mut self);

    /// Output level last written, not the level read back from the pad
    fn is_set_high(&self) -> bool;
}
