//! Bounded queue shared between interrupt handlers and the frame loop
//!
//! Backed by a `heapless::Deque` behind a `critical-section` mutex, so any
//! number of producers can push from interrupt or task context while the
//! frame loop drains it.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Deque;

/// The queue was full; the rejected value is handed back
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrySendError<T>(pub T);

/// The queue was empty
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TryReceiveError;

pub struct Channel<T, const SIZE: usize> {
    queue: Mutex<RefCell<Deque<T, SIZE>>>,
}

impl<T, const SIZE: usize> Channel<T, SIZE> {
    pub const fn new() -> Self {
        Self {
            queue: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    /// Producer handle; handles are `Copy` and may be shared freely
    pub const fn sender(&self) -> Sender<'_, T, SIZE> {
        Sender { channel: self }
    }

    /// Consumer handle for the frame loop
    pub const fn receiver(&self) -> Receiver<'_, T, SIZE> {
        Receiver { channel: self }
    }

    /// Queue a value, failing without blocking when full
    pub fn try_send(&self, value: T) -> Result<(), TrySendError<T>> {
        self.with_queue(|queue| queue.push_back(value).map_err(TrySendError))
    }

    /// Take the oldest value
    pub fn try_receive(&self) -> Result<T, TryReceiveError> {
        self.with_queue(|queue| queue.pop_front().ok_or(TryReceiveError))
    }

    pub fn len(&self) -> usize {
        self.with_queue(|queue| queue.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T, const SIZE: usize> Channel<T, SIZE> {
    fn with_queue<R>(&self, f: impl FnOnce(&mut Deque<T, SIZE>) -> R) -> R {
        critical_section::with(|cs| f(&mut self.queue.borrow(cs).borrow_mut()))
    }
}

impl<T, const SIZE: usize> Default for Channel<T, SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy)]
pub struct Sender<'a, T, const SIZE: usize> {
    channel: &'a Channel<T, SIZE>,
}

impl<T, const SIZE: usize> Sender<'_, T, SIZE> {
    pub fn try_send(&self, value: T) -> Result<(), TrySendError<T>> {
        self.channel.try_send(value)
    }
}

#[derive(Clone, Copy)]
pub struct Receiver<'a, T, const SIZE: usize> {
    channel: &'a Channel<T, SIZE>,
}

impl<'a, T, const SIZE: usize> Receiver<'a, T, SIZE> {
    /// Iterate over the queued values until the queue is empty
    ///
    /// Each step takes its own critical section, so values sent while
    /// draining are picked up too.
    pub fn drain(&self) -> impl Iterator<Item = T> + use<'a, T, SIZE> {
        let channel = self.channel;
        core::iter::from_fn(move || channel.try_receive().ok())
    }
}
