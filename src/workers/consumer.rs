// src/workers/consumer.rs

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::error::ConveyorError;
use crate::model::ItemStore;
use crate::sync::{BoundedQueue, StopToken};
use crate::workers::{WorkerHandle, QUEUE_OP_TIMEOUT};

/// Drains the shared bounded queue into a destination store.
///
/// A consumer started before any producer simply cycles through short
/// `get` timeouts: it blocks politely on the empty queue without
/// busy-spinning, yet still notices a stop request within one timeout.
///
/// Stop is soft. An item already pulled out of the queue is always
/// delivered to the sink before the worker exits; the flag only
/// prevents starting a new pull/delay cycle.
pub struct Consumer<T> {
    id: String,
    sink: Arc<dyn ItemStore<T>>,
    queue: Arc<BoundedQueue<T>>,
    delay: Duration,
    max_items: Option<usize>,
}

impl<T: fmt::Display + Send + 'static> Consumer<T> {
    /// # Arguments
    /// * `id` - Short identifier, e.g. "C1"; becomes part of the thread name.
    /// * `sink` - Store receiving the consumed items.
    /// * `queue` - Shared bounded queue to drain.
    /// * `delay` - Pause after each consumed item (zero = no pause).
    /// * `max_items` - Cap on consumed items (`None` = unlimited).
    pub fn new(
        id: impl Into<String>,
        sink: Arc<dyn ItemStore<T>>,
        queue: Arc<BoundedQueue<T>>,
        delay: Duration,
        max_items: Option<usize>,
    ) -> Self {
        Self {
            id: id.into(),
            sink,
            queue,
            delay,
            max_items,
        }
    }

    /// Starts the consumer on its own named OS thread.
    pub fn spawn(self) -> Result<WorkerHandle, ConveyorError> {
        let name = format!("Consumer-{}", self.id);
        let stop = StopToken::new();
        let count = Arc::new(AtomicUsize::new(0));

        let thread = {
            let name = name.clone();
            let stop = stop.clone();
            let count = Arc::clone(&count);
            thread::Builder::new()
                .name(name.clone())
                .spawn(move || self.run(&name, &stop, &count))?
        };

        Ok(WorkerHandle::new(name, stop, count, thread))
    }

    fn run(self, name: &str, stop: &StopToken, count: &AtomicUsize) {
        let mut consumed = 0usize;

        loop {
            if stop.is_stopped() {
                break;
            }
            if let Some(cap) = self.max_items {
                if consumed >= cap {
                    break;
                }
            }

            // A timeout is not a failure: re-check the stop flag and try
            // again. Timed-out attempts do not count against the cap.
            let Some(item) = self.queue.get(Some(QUEUE_OP_TIMEOUT)) else {
                continue;
            };

            // Deliver before anything else can interrupt us.
            let label = item.to_string();
            self.sink.append(item);
            consumed += 1;
            count.fetch_add(1, Ordering::SeqCst);
            println!("[{name}] Consumed item: {label} (Total: {consumed})");

            if !self.delay.is_zero() {
                stop.interruptible_sleep(self.delay);
            }
        }

        println!("[{name}] Finished consuming. Total items consumed: {consumed}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Container;

    #[test]
    fn drains_queue_into_sink_in_order() {
        let queue = Arc::new(BoundedQueue::new(10).unwrap());
        for i in 1..=4 {
            assert!(queue.put(format!("Item-{i}"), None).is_ok());
        }
        let sink = Arc::new(Container::<String>::new("Destination"));

        let mut handle = Consumer::new(
            "C1",
            sink.clone() as Arc<dyn ItemStore<String>>,
            Arc::clone(&queue),
            Duration::ZERO,
            Some(4),
        )
        .spawn()
        .unwrap();

        assert!(handle.join(Some(Duration::from_secs(5))));
        assert_eq!(handle.count(), 4);
        assert!(queue.is_empty());
        assert_eq!(
            sink.snapshot(),
            vec!["Item-1", "Item-2", "Item-3", "Item-4"]
        );
    }

    #[test]
    fn started_before_producer_waits_then_consumes() {
        let queue = Arc::new(BoundedQueue::new(5).unwrap());
        let sink = Arc::new(Container::<String>::new("Destination"));

        let mut handle = Consumer::new(
            "C1",
            sink.clone() as Arc<dyn ItemStore<String>>,
            Arc::clone(&queue),
            Duration::ZERO,
            Some(1),
        )
        .spawn()
        .unwrap();

        // Let the consumer cycle through a few empty-queue timeouts.
        thread::sleep(Duration::from_millis(250));
        assert_eq!(handle.count(), 0);

        assert!(queue.put("late".to_string(), None).is_ok());
        assert!(handle.join(Some(Duration::from_secs(5))));
        assert_eq!(sink.snapshot(), vec!["late"]);
    }

    #[test]
    fn stop_while_waiting_on_empty_queue_terminates() {
        let queue = Arc::new(BoundedQueue::<String>::new(5).unwrap());
        let sink = Arc::new(Container::<String>::new("Destination"));

        let mut handle = Consumer::new(
            "C1",
            sink as Arc<dyn ItemStore<String>>,
            queue,
            Duration::ZERO,
            None,
        )
        .spawn()
        .unwrap();

        thread::sleep(Duration::from_millis(100));
        handle.stop();
        assert!(handle.join(Some(Duration::from_secs(2))));
        assert_eq!(handle.count(), 0);
    }

    #[test]
    fn stop_is_idempotent_and_safe_before_start() {
        let queue = Arc::new(BoundedQueue::<String>::new(5).unwrap());
        let sink = Arc::new(Container::<String>::new("Destination"));

        let mut handle = Consumer::new(
            "C1",
            sink as Arc<dyn ItemStore<String>>,
            queue,
            Duration::ZERO,
            None,
        )
        .spawn()
        .unwrap();

        handle.stop();
        handle.stop();
        assert!(handle.join(Some(Duration::from_secs(2))));
        // Joining an already-joined worker is a no-op.
        assert!(handle.join(Some(Duration::from_millis(10))));
    }
}
