//! Press event transport for `no_std` environments.
//!
//! Button callbacks (often interrupt context) enqueue and return; the runner
//! drains the queue into the engine at tick time, so puzzle state has a
//! single writer. Built on `critical-section` and `heapless::Deque`.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Deque;

/// A single button activation, carrying the button index.
pub type PressEvent = u8;

/// Error returned when the press queue is full. Carries the dropped event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueFullError(pub PressEvent);

/// Error returned when reading from an empty press queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueEmptyError;

/// A bounded, interrupt-safe press queue.
///
/// Synchronization is a critical section around a fixed-size deque, which
/// makes it safe to feed from button ISRs while the poll loop drains it.
/// A full queue rejects new presses rather than overwriting old ones.
pub struct PressChannel<const SIZE: usize> {
    inner: Mutex<RefCell<Deque<PressEvent, SIZE>>>,
}

impl<const SIZE: usize> PressChannel<SIZE> {
    /// Create a new empty queue.
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    /// Get a sender handle for this queue.
    ///
    /// One sender per button callback is typical; they share the same queue.
    pub const fn sender(&self) -> PressSender<'_, SIZE> {
        PressSender { channel: self }
    }

    /// Get a receiver handle for this queue.
    pub const fn receiver(&self) -> PressReceiver<'_, SIZE> {
        PressReceiver { channel: self }
    }

    /// Try to enqueue a press.
    ///
    /// Returns `Err(QueueFullError(event))` if the queue is full.
    pub fn try_send(&self, event: PressEvent) -> Result<(), QueueFullError> {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            queue.push_back(event).map_err(QueueFullError)
        })
    }

    /// Try to dequeue the oldest press.
    ///
    /// Returns `Err(QueueEmptyError)` if the queue is empty.
    pub fn try_receive(&self) -> Result<PressEvent, QueueEmptyError> {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            queue.pop_front().ok_or(QueueEmptyError)
        })
    }
}

impl<const SIZE: usize> Default for PressChannel<SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

/// A sender handle for a [`PressChannel`].
#[derive(Clone, Copy)]
pub struct PressSender<'a, const SIZE: usize> {
    channel: &'a PressChannel<SIZE>,
}

impl<const SIZE: usize> PressSender<'_, SIZE> {
    /// Try to enqueue a press.
    pub fn try_send(&self, event: PressEvent) -> Result<(), QueueFullError> {
        self.channel.try_send(event)
    }
}

/// A receiver handle for a [`PressChannel`].
#[derive(Clone, Copy)]
pub struct PressReceiver<'a, const SIZE: usize> {
    channel: &'a PressChannel<SIZE>,
}

impl<const SIZE: usize> PressReceiver<'_, SIZE> {
    /// Try to dequeue the oldest press.
    pub fn try_receive(&self) -> Result<PressEvent, QueueEmptyError> {
        self.channel.try_receive()
    }
}
