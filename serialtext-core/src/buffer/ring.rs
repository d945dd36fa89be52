//! Fixed-capacity byte ring buffer
//!
//! Storage is allocated inline; read and write cursors wrap modulo the
//! capacity. The buffer does no locking of its own. Each instance has one
//! producer and one consumer, and the owner serialises their access (see
//! [`crate::serial::SerialContext`]).

/// Capacity of the receive and transmit buffers
pub const BUFFER_CAPACITY: usize = 256;

/// Byte FIFO with wrap-around cursors
#[derive(Debug, Clone)]
pub struct RingBuffer<const N: usize = BUFFER_CAPACITY> {
    data: [u8; N],
    /// Next byte to pop
    read: usize,
    /// Next free slot
    write: usize,
    /// Number of buffered bytes
    count: usize,
}

impl<const N: usize> Default for RingBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> RingBuffer<N> {
    /// Create an empty buffer
    pub const fn new() -> Self {
        Self {
            data: [0; N],
            read: 0,
            write: 0,
            count: 0,
        }
    }

    /// Maximum number of buffered bytes
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Number of buffered bytes
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn is_full(&self) -> bool {
        self.count == N
    }

    /// Push a byte if there is room
    ///
    /// Returns false (and leaves the buffer unchanged) when full.
    pub fn try_push(&mut self, byte: u8) -> bool {
        if self.is_full() {
            return false;
        }
        self.force_push(byte);
        true
    }

    /// Push a byte without an admission check
    ///
    /// For producers that apply their own admission rule (the receive
    /// handler keeps headroom for terminators). Those rules never admit a
    /// byte into a full buffer; if one does, the byte is dropped rather
    /// than overwriting unread data.
    pub fn force_push(&mut self, byte: u8) {
        debug_assert!(!self.is_full(), "force_push into a full ring buffer");
        if self.is_full() {
            return;
        }
        self.data[self.write] = byte;
        self.write = Self::advance(self.write);
        self.count += 1;
    }

    /// Pop the oldest byte, or `None` if empty
    pub fn pop(&mut self) -> Option<u8> {
        if self.is_empty() {
            return None;
        }
        let byte = self.data[self.read];
        self.read = Self::advance(self.read);
        self.count -= 1;
        Some(byte)
    }

    /// Next cursor position
    ///
    /// For N = 256 this is the same as a wrapping u8 increment.
    const fn advance(index: usize) -> usize {
        (index + 1) % N
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_new_buffer_is_empty() {
        let mut buffer: RingBuffer = RingBuffer::new();
        assert!(buffer.is_empty());
        assert!(!buffer.is_full());
        assert_eq!(buffer.len(), 0);
        assert_eq!(buffer.capacity(), BUFFER_CAPACITY);
        assert_eq!(buffer.pop(), None);
    }

    #[test]
    fn test_fifo_order() {
        let mut buffer: RingBuffer<8> = RingBuffer::new();
        for byte in b"abc" {
            assert!(buffer.try_push(*byte));
        }
        assert_eq!(buffer.len(), 3);
        assert_eq!(buffer.pop(), Some(b'a'));
        assert_eq!(buffer.pop(), Some(b'b'));
        assert_eq!(buffer.pop(), Some(b'c'));
        assert_eq!(buffer.pop(), None);
    }

    #[test]
    fn test_try_push_rejects_when_full() {
        let mut buffer: RingBuffer<4> = RingBuffer::new();
        for byte in 0..4 {
            assert!(buffer.try_push(byte));
        }
        assert!(buffer.is_full());
        assert!(!buffer.try_push(99));
        assert_eq!(buffer.len(), 4);
        assert_eq!(buffer.pop(), Some(0));
    }

    #[test]
    fn test_cursor_wraps_around() {
        let mut buffer: RingBuffer<4> = RingBuffer::new();
        // Walk the cursors past the end several times
        for round in 0u8..10 {
            assert!(buffer.try_push(round));
            assert!(buffer.try_push(round.wrapping_add(100)));
            assert_eq!(buffer.pop(), Some(round));
            assert_eq!(buffer.pop(), Some(round.wrapping_add(100)));
        }
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_full_capacity_256() {
        let mut buffer: RingBuffer = RingBuffer::new();
        for i in 0..BUFFER_CAPACITY {
            assert!(buffer.try_push(i as u8));
        }
        assert!(buffer.is_full());
        for i in 0..BUFFER_CAPACITY {
            assert_eq!(buffer.pop(), Some(i as u8));
        }
        assert!(buffer.is_empty());
    }

    #[derive(Debug, Clone)]
    enum Op {
        Push(u8),
        ForcePush(u8),
        Pop,
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            any::<u8>().prop_map(Op::Push),
            any::<u8>().prop_map(Op::ForcePush),
            Just(Op::Pop),
        ]
    }

    proptest! {
        #[test]
        fn prop_matches_model_queue(ops in proptest::collection::vec(op(), 0..200)) {
            let mut buffer: RingBuffer<16> = RingBuffer::new();
            let mut model = std::collections::VecDeque::new();

            for op in ops {
                match op {
                    Op::Push(byte) => {
                        let accepted = buffer.try_push(byte);
                        prop_assert_eq!(accepted, model.len() < 16);
                        if accepted {
                            model.push_back(byte);
                        }
                    }
                    Op::ForcePush(byte) => {
                        // Callers check for room before forcing
                        if !buffer.is_full() {
                            buffer.force_push(byte);
                            model.push_back(byte);
                        }
                        prop_assert_eq!(buffer.is_full(), model.len() == 16);
                    }
                    Op::Pop => {
                        prop_assert_eq!(buffer.pop(), model.pop_front());
                    }
                }
                prop_assert_eq!(buffer.len(), model.len());
            }
        }
    }
}
