//! Shared serial state and its lifecycle
//!
//! ```text
//!   SerialContext::new()  ──register(source) x3──▶  activate()  ──▶  Serial<'_>
//!        (Setup)                                                    (Active)
//! ```
//!
//! Buffers are guarded by a critical-section mutex: a cursor and the count
//! always change together with interrupts masked. Single-value counters
//! are atomics.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use portable_atomic::{AtomicBool, AtomicU16, AtomicU8, Ordering};
use serialtext_protocol::StatusLine;

use super::counters::{ErrorCounters, ErrorSnapshot};
use crate::buffer::RingBuffer;

pub(crate) type SharedBuffer = Mutex<CriticalSectionRawMutex, RefCell<RingBuffer>>;

/// Hardware event sources that drive the serial core
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EventSource {
    /// Receive register has data
    ReceiveComplete,
    /// Transmit register can take another byte
    TransmitEmpty,
    /// Periodic heartbeat tick
    Tick,
}

impl EventSource {
    /// Every source that must be registered before activation
    pub const ALL: [EventSource; 3] = [
        EventSource::ReceiveComplete,
        EventSource::TransmitEmpty,
        EventSource::Tick,
    ];

    const fn mask(self) -> u8 {
        match self {
            EventSource::ReceiveComplete => 1 << 0,
            EventSource::TransmitEmpty => 1 << 1,
            EventSource::Tick => 1 << 2,
        }
    }
}

/// Errors in the context lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ContextError {
    /// A handler for this source was already registered
    AlreadyRegistered(EventSource),
    /// Activation attempted without a handler for this source
    MissingHandler(EventSource),
    /// The context is already active
    AlreadyActive,
}

/// All state shared between interrupt handlers and the main loop
pub struct SerialContext {
    pub(crate) input: SharedBuffer,
    pub(crate) output: SharedBuffer,
    /// Terminators resident in `input`
    pub(crate) pending: AtomicU16,
    pub(crate) errors: ErrorCounters,
    pub(crate) heartbeat: AtomicU8,
    registered: AtomicU8,
    active: AtomicBool,
}

impl Default for SerialContext {
    fn default() -> Self {
        Self::new()
    }
}

impl SerialContext {
    /// Create the context with empty buffers and zeroed counters
    pub const fn new() -> Self {
        Self {
            input: Mutex::new(RefCell::new(RingBuffer::new())),
            output: Mutex::new(RefCell::new(RingBuffer::new())),
            pending: AtomicU16::new(0),
            errors: ErrorCounters::new(),
            heartbeat: AtomicU8::new(0),
            registered: AtomicU8::new(0),
            active: AtomicBool::new(false),
        }
    }

    /// Record that the handler for `source` is bound to its interrupt
    pub fn register(&self, source: EventSource) -> Result<(), ContextError> {
        if self.is_active() {
            return Err(ContextError::AlreadyActive);
        }
        let previous = self.registered.fetch_or(source.mask(), Ordering::AcqRel);
        if previous & source.mask() != 0 {
            return Err(ContextError::AlreadyRegistered(source));
        }
        Ok(())
    }

    /// Check whether a handler for `source` has been registered
    pub fn is_registered(&self, source: EventSource) -> bool {
        self.registered.load(Ordering::Acquire) & source.mask() != 0
    }

    /// Switch to the active phase
    ///
    /// Every [`EventSource`] must be registered first.
    pub fn activate(&self) -> Result<Serial<'_>, ContextError> {
        if let Some(missing) = EventSource::ALL
            .into_iter()
            .find(|&source| !self.is_registered(source))
        {
            return Err(ContextError::MissingHandler(missing));
        }
        if self.active.swap(true, Ordering::AcqRel) {
            return Err(ContextError::AlreadyActive);
        }
        Ok(Serial { ctx: self })
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Handle for interrupt handlers
    ///
    /// `None` until [`activate`](Self::activate) has succeeded, so an
    /// interrupt that fires early touches nothing.
    pub fn serial(&self) -> Option<Serial<'_>> {
        self.is_active().then_some(Serial { ctx: self })
    }
}

/// Access to an active [`SerialContext`]
///
/// Cheap to copy; interrupt handlers and the main loop each hold one.
#[derive(Clone, Copy)]
pub struct Serial<'a> {
    pub(crate) ctx: &'a SerialContext,
}

impl<'a> Serial<'a> {
    /// Number of complete messages waiting to be read
    pub fn pending_messages(&self) -> u16 {
        self.ctx.pending.load(Ordering::Acquire)
    }

    /// Current heartbeat counter
    pub fn heartbeat(&self) -> u8 {
        self.ctx.heartbeat.load(Ordering::Acquire)
    }

    /// Heartbeat tick handler: one increment per period
    pub fn on_tick(&self) {
        self.ctx.heartbeat.fetch_add(1, Ordering::AcqRel);
    }

    /// Current error counters
    pub fn errors(&self) -> ErrorSnapshot {
        self.ctx.errors.snapshot()
    }

    /// Bytes currently queued for transmission
    pub fn queued_output(&self) -> usize {
        self.ctx.output.lock(|output| output.borrow().len())
    }

    /// Bytes currently held in the receive buffer
    pub fn queued_input(&self) -> usize {
        self.ctx.input.lock(|input| input.borrow().len())
    }

    /// Counter values for the heartbeat line
    pub fn status(&self) -> StatusLine {
        let errors = self.errors();
        StatusLine {
            seconds: self.heartbeat(),
            waiting: self.pending_messages(),
            parity_errors: errors.parity,
            overrun_errors: errors.lost_bytes(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register_all(ctx: &SerialContext) {
        for source in EventSource::ALL {
            ctx.register(source).unwrap();
        }
    }

    #[test]
    fn test_inactive_until_activated() {
        let ctx = SerialContext::new();
        assert!(!ctx.is_active());
        assert!(ctx.serial().is_none());

        register_all(&ctx);
        assert!(ctx.serial().is_none());

        ctx.activate().unwrap();
        assert!(ctx.serial().is_some());
    }

    #[test]
    fn test_activate_requires_all_handlers() {
        let ctx = SerialContext::new();
        ctx.register(EventSource::ReceiveComplete).unwrap();
        ctx.register(EventSource::Tick).unwrap();

        assert_eq!(
            ctx.activate().err(),
            Some(ContextError::MissingHandler(EventSource::TransmitEmpty))
        );
        assert!(!ctx.is_active());
    }

    #[test]
    fn test_double_registration_rejected() {
        let ctx = SerialContext::new();
        ctx.register(EventSource::Tick).unwrap();
        assert_eq!(
            ctx.register(EventSource::Tick),
            Err(ContextError::AlreadyRegistered(EventSource::Tick))
        );
    }

    #[test]
    fn test_no_registration_after_activation() {
        let ctx = SerialContext::new();
        register_all(&ctx);
        ctx.activate().unwrap();

        assert_eq!(
            ctx.register(EventSource::Tick),
            Err(ContextError::AlreadyActive)
        );
        assert_eq!(ctx.activate().err(), Some(ContextError::AlreadyActive));
    }

    #[test]
    fn test_fresh_context_status_is_zero() {
        let ctx = SerialContext::new();
        register_all(&ctx);
        let serial = ctx.activate().unwrap();

        assert_eq!(serial.status(), StatusLine::default());
        assert_eq!(serial.queued_input(), 0);
        assert_eq!(serial.queued_output(), 0);
    }

    #[test]
    fn test_tick_increments_and_wraps() {
        let ctx = SerialContext::new();
        register_all(&ctx);
        let serial = ctx.activate().unwrap();

        serial.on_tick();
        assert_eq!(serial.heartbeat(), 1);
        for _ in 0..255 {
            serial.on_tick();
        }
        assert_eq!(serial.heartbeat(), 0);
    }
}
