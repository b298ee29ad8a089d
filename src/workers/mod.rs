// src/workers/mod.rs

pub mod consumer;
pub mod producer;

pub use consumer::Consumer;
pub use producer::Producer;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::sync::StopToken;

/// Timeout for a single queue `put`/`get` attempt inside a worker loop.
///
/// A worker blocked inside the queue is only released by this timeout,
/// not by the stop flag itself, so it has to be short enough to keep the
/// flag responsive.
pub const QUEUE_OP_TIMEOUT: Duration = Duration::from_millis(100);

const JOIN_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Control handle for a spawned worker thread.
///
/// Owns the join handle, shares the worker's stop token and its
/// monotonic item counter. Safe to use from any thread; `stop` is
/// idempotent and may even be called before the worker gets scheduled.
pub struct WorkerHandle {
    name: String,
    stop: StopToken,
    count: Arc<AtomicUsize>,
    thread: Option<JoinHandle<()>>,
}

impl WorkerHandle {
    fn new(name: String, stop: StopToken, count: Arc<AtomicUsize>, thread: JoinHandle<()>) -> Self {
        Self {
            name,
            stop,
            count,
            thread: Some(thread),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Requests a cooperative stop. The worker notices it at the top of
    /// its loop and between sleep slices.
    pub fn stop(&self) {
        self.stop.stop();
    }

    /// Items moved so far. Monotonic; never observes a torn value.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    pub fn is_finished(&self) -> bool {
        self.thread
            .as_ref()
            .map(|t| t.is_finished())
            .unwrap_or(true)
    }

    /// Waits for the worker to terminate.
    ///
    /// With a timeout, polls for termination and returns `false` when
    /// the deadline passes first (the handle stays joinable). Returns
    /// `true` once the thread has been joined.
    pub fn join(&mut self, timeout: Option<Duration>) -> bool {
        let Some(handle) = self.thread.take() else {
            return true;
        };

        if let Some(timeout) = timeout {
            let deadline = Instant::now() + timeout;
            while !handle.is_finished() {
                if Instant::now() >= deadline {
                    self.thread = Some(handle);
                    return false;
                }
                thread::sleep(JOIN_POLL_INTERVAL);
            }
        }

        // The worker's loop has no panicking paths under expected use; a
        // panicked test worker still counts as terminated.
        let _ = handle.join();
        true
    }
}
