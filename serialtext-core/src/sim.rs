//! Simulated board for host tests
//!
//! Register handles share one [`Hardware`] state, the way zero-sized
//! register handles share the real peripheral. The low-power wait plays the
//! interrupt controller: each call delivers exactly one pending event to
//! the serial handlers.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use serialtext_hal::{EventWait, OutputPin, ReceiveRegister, RxFrame, TransmitRegister};

use crate::serial::{EventSource, Serial, SerialContext};

/// A context with every handler registered and the active phase entered
pub fn active_context() -> SerialContext {
    let ctx = SerialContext::new();
    for source in EventSource::ALL {
        ctx.register(source).unwrap();
    }
    ctx.activate().unwrap();
    ctx
}

#[derive(Debug)]
struct Hardware {
    /// Receive FIFO contents visible to the handler
    rx_fifo: VecDeque<RxFrame>,
    /// Receive bursts that each raise one receive interrupt
    rx_bursts: VecDeque<Vec<RxFrame>>,
    overrun: bool,
    tx_ready: bool,
    tx_interrupt: bool,
    /// Every byte written to the transmit register
    wire: Vec<u8>,
    pending_ticks: usize,
    waits: usize,
    indicator: bool,
    toggles: usize,
}

#[derive(Debug, Clone)]
pub struct SimBoard(Rc<RefCell<Hardware>>);

impl SimBoard {
    pub fn new() -> Self {
        Self(Rc::new(RefCell::new(Hardware {
            rx_fifo: VecDeque::new(),
            rx_bursts: VecDeque::new(),
            overrun: false,
            tx_ready: true,
            tx_interrupt: false,
            wire: Vec::new(),
            pending_ticks: 0,
            waits: 0,
            indicator: false,
            toggles: 0,
        })))
    }

    /// Place bytes directly in the receive FIFO
    pub fn put_rx(&self, bytes: &[u8]) {
        let mut hw = self.0.borrow_mut();
        hw.rx_fifo.extend(bytes.iter().map(|&b| RxFrame::valid(b)));
    }

    /// Place a byte with bad parity in the receive FIFO
    pub fn put_rx_parity_error(&self, byte: u8) {
        self.0.borrow_mut().rx_fifo.push_back(RxFrame::parity_error(byte));
    }

    /// Schedule bytes to arrive as one receive interrupt during a wait
    pub fn queue_rx(&self, bytes: &[u8]) {
        let burst = bytes.iter().map(|&b| RxFrame::valid(b)).collect();
        self.0.borrow_mut().rx_bursts.push_back(burst);
    }

    pub fn set_overrun(&self) {
        self.0.borrow_mut().overrun = true;
    }

    pub fn set_tx_ready(&self, ready: bool) {
        self.0.borrow_mut().tx_ready = ready;
    }

    /// Schedule heartbeat ticks to be delivered during waits
    pub fn queue_ticks(&self, ticks: usize) {
        self.0.borrow_mut().pending_ticks += ticks;
    }

    pub fn tx_interrupt_enabled(&self) -> bool {
        self.0.borrow().tx_interrupt
    }

    pub fn wire(&self) -> Vec<u8> {
        self.0.borrow().wire.clone()
    }

    /// Forget what has been transmitted so far
    pub fn clear_wire(&self) {
        self.0.borrow_mut().wire.clear();
    }

    pub fn waits(&self) -> usize {
        self.0.borrow().waits
    }

    pub fn toggles(&self) -> usize {
        self.0.borrow().toggles
    }

    pub fn indicator_on(&self) -> bool {
        self.0.borrow().indicator
    }

    pub fn tx(&self) -> SimTx {
        SimTx(self.clone())
    }

    pub fn rx(&self) -> SimRx {
        SimRx(self.clone())
    }

    pub fn indicator(&self) -> SimPin {
        SimPin(self.clone())
    }

    pub fn waiter<'a>(&self, serial: Serial<'a>) -> SimWait<'a> {
        SimWait {
            board: self.clone(),
            serial,
        }
    }

    /// Run the transmit interrupt until it disables itself
    pub fn drain_tx(&self, serial: Serial<'_>) {
        let mut tx = self.tx();
        while self.tx_interrupt_enabled() {
            serial.on_transmit_empty(&mut tx);
        }
    }
}

pub struct SimTx(SimBoard);

impl TransmitRegister for SimTx {
    fn is_ready(&self) -> bool {
        (self.0).0.borrow().tx_ready
    }

    fn write_byte(&mut self, byte: u8) {
        (self.0).0.borrow_mut().wire.push(byte);
    }

    fn set_empty_interrupt(&mut self, enabled: bool) {
        (self.0).0.borrow_mut().tx_interrupt = enabled;
    }
}

pub struct SimRx(SimBoard);

impl ReceiveRegister for SimRx {
    fn take_overrun(&mut self) -> bool {
        core::mem::take(&mut (self.0).0.borrow_mut().overrun)
    }

    fn read_frame(&mut self) -> Option<RxFrame> {
        (self.0).0.borrow_mut().rx_fifo.pop_front()
    }
}

pub struct SimPin(SimBoard);

impl OutputPin for SimPin {
    fn set_high(&mut self) {
        (self.0).0.borrow_mut().indicator = true;
    }

    fn set_low(&mut self) {
        (self.0).0.borrow_mut().indicator = false;
    }

    fn toggle(&mut self) {
        let mut hw = (self.0).0.borrow_mut();
        hw.indicator = !hw.indicator;
        hw.toggles += 1;
    }

    fn is_set_high(&self) -> bool {
        (self.0).0.borrow().indicator
    }
}

pub struct SimWait<'a> {
    board: SimBoard,
    serial: Serial<'a>,
}

enum SimEvent {
    Receive,
    Tick,
    TransmitEmpty,
}

impl SimWait<'_> {
    fn next_event(&self) -> SimEvent {
        let mut hw = self.board.0.borrow_mut();
        hw.waits += 1;
        if let Some(burst) = hw.rx_bursts.pop_front() {
            hw.rx_fifo.extend(burst);
            return SimEvent::Receive;
        }
        if hw.pending_ticks > 0 {
            hw.pending_ticks -= 1;
            return SimEvent::Tick;
        }
        if hw.tx_interrupt && hw.tx_ready {
            return SimEvent::TransmitEmpty;
        }
        // Nothing else pending: the periodic timer always fires eventually
        SimEvent::Tick
    }
}

impl EventWait for SimWait<'_> {
    fn wait_for_event(&mut self) {
        match self.next_event() {
            SimEvent::Receive => self.serial.on_receive(&mut self.board.rx()),
            SimEvent::Tick => self.serial.on_tick(),
            SimEvent::TransmitEmpty => self.serial.on_transmit_empty(&mut self.board.tx()),
        }
    }
}
