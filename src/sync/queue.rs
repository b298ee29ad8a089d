// src/sync/queue.rs

use std::collections::VecDeque;
use std::sync::{Condvar, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use crate::error::ConveyorError;

/// A thread-safe bounded FIFO buffer with blocking `put` and `get`.
///
/// One mutex guards the buffer; two condition variables signal the two
/// state changes waiters care about:
/// * `not_full`  - a slot opened up, wakes one blocked putter.
/// * `not_empty` - an item arrived, wakes one blocked getter.
///
/// Both share the single mutex, so checking occupancy and going to sleep
/// is one atomic step and no wakeup can be lost. Every wait sits in a
/// `while` loop that re-checks the predicate after waking: a single
/// notification never proves the condition still holds once there is more
/// than one waiter (and spurious wakeups are allowed anyway).
pub struct BoundedQueue<T> {
    capacity: usize,
    buffer: Mutex<VecDeque<T>>,
    not_full: Condvar,
    not_empty: Condvar,
}

impl<T> BoundedQueue<T> {
    /// Creates a queue holding at most `capacity` items.
    ///
    /// A zero capacity is rejected up front: a queue that can never hold
    /// an item would deadlock the first putter.
    pub fn new(capacity: usize) -> Result<Self, ConveyorError> {
        if capacity == 0 {
            return Err(ConveyorError::InvalidConfiguration(
                "queue capacity must be greater than 0".to_string(),
            ));
        }
        Ok(Self {
            capacity,
            buffer: Mutex::new(VecDeque::with_capacity(capacity)),
            not_full: Condvar::new(),
            not_empty: Condvar::new(),
        })
    }

    // A panicked peer poisons the mutex; the buffer itself is still
    // consistent (mutations are single push/pop calls), so we keep going.
    fn lock_buffer(&self) -> MutexGuard<'_, VecDeque<T>> {
        self.buffer.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Appends `item` at the tail, blocking while the queue is full.
    ///
    /// With a timeout, gives up once the deadline passes with the queue
    /// still full: the queue is left unchanged and the item travels back
    /// to the caller in the `Err`, so a timed-out put can be retried
    /// with the very same item instead of losing it. Without a timeout,
    /// waits indefinitely and always succeeds.
    pub fn put(&self, item: T, timeout: Option<Duration>) -> Result<(), T> {
        // Deadline, not per-wait budget: repeated wakes must not stretch
        // the total wait.
        let deadline = timeout.map(|t| Instant::now() + t);
        let mut buffer = self.lock_buffer();

        while buffer.len() >= self.capacity {
            buffer = match deadline {
                Some(deadline) => {
                    let now = Instant::now();
                    if now >= deadline {
                        return Err(item);
                    }
                    let (guard, _timed_out) = self
                        .not_full
                        .wait_timeout(buffer, deadline - now)
                        .unwrap_or_else(|e| e.into_inner());
                    guard
                }
                None => self
                    .not_full
                    .wait(buffer)
                    .unwrap_or_else(|e| e.into_inner()),
            };
        }

        buffer.push_back(item);
        self.not_empty.notify_one();
        Ok(())
    }

    /// Removes and returns the head item, blocking while the queue is
    /// empty.
    ///
    /// With a timeout, returns `None` once the deadline passes with the
    /// queue still empty. Without a timeout, waits indefinitely.
    pub fn get(&self, timeout: Option<Duration>) -> Option<T> {
        let deadline = timeout.map(|t| Instant::now() + t);
        let mut buffer = self.lock_buffer();

        while buffer.is_empty() {
            buffer = match deadline {
                Some(deadline) => {
                    let now = Instant::now();
                    if now >= deadline {
                        return None;
                    }
                    let (guard, _timed_out) = self
                        .not_empty
                        .wait_timeout(buffer, deadline - now)
                        .unwrap_or_else(|e| e.into_inner());
                    guard
                }
                None => self
                    .not_empty
                    .wait(buffer)
                    .unwrap_or_else(|e| e.into_inner()),
            };
        }

        // Non-empty is guaranteed by the loop above.
        let item = buffer.pop_front();
        self.not_full.notify_one();
        item
    }

    /// Current number of buffered items. A snapshot: it can be stale the
    /// moment the lock is released, which is inherent to any concurrent
    /// queue and fine for reporting.
    pub fn len(&self) -> usize {
        self.lock_buffer().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock_buffer().is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.lock_buffer().len() >= self.capacity
    }

    /// The fixed maximum occupancy chosen at construction.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
