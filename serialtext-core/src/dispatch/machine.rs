//! Dispatch loop state machine
//!
//! ```text
//!          wake                 no message left        reported / nothing new
//!  Idle ─────────▶ Draining ─────────────────▶ Reporting ─────────────────▶ Idle
//!                   │    ▲
//!                   └────┘ message echoed
//! ```

use serialtext_hal::{EventWait, OutputPin, TransmitRegister};
use serialtext_protocol::{
    Command, Message, StatusLine, ECHO_PREFIX, HELLO, LINE_END, MAX_MESSAGE_LEN,
};

use crate::serial::Serial;

/// Where the dispatch loop currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DispatchState {
    /// Sleeping until the next interrupt
    Idle,
    /// Echoing complete messages
    Draining,
    /// Emitting the heartbeat status line
    Reporting,
}

/// What one pass through the loop did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Activity {
    /// Messages read and echoed
    pub echoed: u16,
    /// Indicator toggles caused by commands
    pub toggles: u16,
    /// Messages that were cut to fit the read buffer
    pub truncated: u16,
    /// Status line sent in this pass, if any
    pub status: Option<StatusLine>,
}

impl Activity {
    /// True if the pass neither echoed nor reported anything
    pub fn is_idle(&self) -> bool {
        self.echoed == 0 && self.status.is_none()
    }
}

/// Application side of the serial link
pub struct Dispatcher<'a, T, W, P> {
    serial: Serial<'a>,
    tx: T,
    wait: W,
    indicator: P,
    state: DispatchState,
    last_reported: u8,
}

impl<'a, T, W, P> Dispatcher<'a, T, W, P>
where
    T: TransmitRegister,
    W: EventWait,
    P: OutputPin,
{
    pub fn new(serial: Serial<'a>, tx: T, wait: W, indicator: P) -> Self {
        let last_reported = serial.heartbeat();
        Self {
            serial,
            tx,
            wait,
            indicator,
            state: DispatchState::Idle,
            last_reported,
        }
    }

    /// Current state
    pub fn state(&self) -> DispatchState {
        self.state
    }

    /// Give the startup life signal: indicator on, greeting sent
    ///
    /// The heartbeat value at this point counts as already reported.
    pub fn start(&mut self) {
        self.indicator.set_high();
        self.send(HELLO);
        self.last_reported = self.serial.heartbeat();
    }

    /// Run one pass: sleep, drain all messages, report if a period passed
    pub fn run_once(&mut self) -> Activity {
        let mut activity = Activity::default();

        loop {
            match self.state {
                DispatchState::Idle => {
                    self.wait.wait_for_event();
                    self.state = DispatchState::Draining;
                }
                DispatchState::Draining => match self.serial.read_message::<MAX_MESSAGE_LEN>() {
                    Some(message) => self.handle_message(&message, &mut activity),
                    None => self.state = DispatchState::Reporting,
                },
                DispatchState::Reporting => {
                    let now = self.serial.heartbeat();
                    if now != self.last_reported {
                        let status = self.serial.status();
                        self.send(status.render().as_bytes());
                        self.last_reported = now;
                        activity.status = Some(status);
                    }
                    self.state = DispatchState::Idle;
                    return activity;
                }
            }
        }
    }

    fn handle_message(&mut self, message: &Message, activity: &mut Activity) {
        if let Some(Command::ToggleIndicator) = Command::parse(message.as_bytes()) {
            self.indicator.toggle();
            activity.toggles = activity.toggles.wrapping_add(1);
        }
        if message.is_truncated() {
            activity.truncated = activity.truncated.wrapping_add(1);
        }

        self.send(ECHO_PREFIX);
        self.send(message.as_bytes());
        self.send(LINE_END);
        activity.echoed = activity.echoed.wrapping_add(1);
    }

    fn send(&mut self, bytes: &[u8]) {
        self.serial.send(&mut self.tx, &mut self.wait, bytes);
    }
}
