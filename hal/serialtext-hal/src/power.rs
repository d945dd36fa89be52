//! Low-power wait primitive

/// Suspends the caller until the next interrupt of any kind.
///
/// Returning says nothing about which event occurred. Callers re-check
/// the condition they are waiting for and wait again if it still holds.
pub trait EventWait {
    /// Sleep until any enabled interrupt fires
    fn wait_for_event(&mut self);
}
