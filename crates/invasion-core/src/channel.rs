//! Bounded, non-blocking message queue shared between the two actors.
//!
//! Producers never block: when the queue is full the oldest message is
//! dropped and counted. Consumers poll; an empty queue simply yields nothing.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// A multi-producer, multi-consumer FIFO with drop-oldest overflow.
#[derive(Debug)]
pub struct MessageQueue<T> {
    items: Mutex<VecDeque<T>>,
    capacity: usize,
    dropped: AtomicU64,
}

impl<T> MessageQueue<T> {
    /// A queue holding at most `capacity` messages (minimum 1).
    pub fn bounded(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            items: Mutex::new(VecDeque::with_capacity(capacity.min(1024))),
            capacity,
            dropped: AtomicU64::new(0),
        }
    }

    fn items(&self) -> MutexGuard<'_, VecDeque<T>> {
        self.items.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Enqueue at the back. Returns `true` if an older message was dropped
    /// to make room.
    pub fn push(&self, item: T) -> bool {
        let mut items = self.items();
        let overflowed = items.len() >= self.capacity;
        if overflowed {
            items.pop_front();
            self.dropped.fetch_add(1, Ordering::Relaxed);
        }
        items.push_back(item);
        overflowed
    }

    /// Dequeue the front message, if any.
    pub fn try_pop(&self) -> Option<T> {
        self.items().pop_front()
    }

    /// Take everything currently queued.
    pub fn drain(&self) -> Vec<T> {
        self.items().drain(..).collect()
    }

    /// Take every message matching `pred`, leaving the rest queued in their
    /// original order.
    pub fn take_matching(&self, mut pred: impl FnMut(&T) -> bool) -> Vec<T> {
        let mut items = self.items();
        let mut taken = Vec::new();
        let mut kept = VecDeque::with_capacity(items.len());
        for item in items.drain(..) {
            if pred(&item) {
                taken.push(item);
            } else {
                kept.push_back(item);
            }
        }
        *items = kept;
        taken
    }

    pub fn len(&self) -> usize {
        self.items().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Total messages dropped due to overflow since creation.
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}
