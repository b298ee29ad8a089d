// src/workers/producer.rs

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::error::ConveyorError;
use crate::model::ItemStore;
use crate::sync::{BoundedQueue, StopToken};
use crate::workers::{WorkerHandle, QUEUE_OP_TIMEOUT};

/// Moves items from a source store into the shared bounded queue.
///
/// The worker terminates when the source runs dry, when its optional
/// item cap is reached, or when a cooperative stop is requested. It is
/// started once via [`Producer::spawn`] and is not restartable.
pub struct Producer<T> {
    id: String,
    source: Arc<dyn ItemStore<T>>,
    queue: Arc<BoundedQueue<T>>,
    delay: Duration,
    max_items: Option<usize>,
}

impl<T: fmt::Display + Send + 'static> Producer<T> {
    /// # Arguments
    /// * `id` - Short identifier, e.g. "P1"; becomes part of the thread name.
    /// * `source` - Store the producer drains, oldest item first.
    /// * `queue` - Shared bounded queue receiving the items.
    /// * `delay` - Pause after each produced item (zero = no pause).
    /// * `max_items` - Cap on produced items (`None` = drain the source).
    pub fn new(
        id: impl Into<String>,
        source: Arc<dyn ItemStore<T>>,
        queue: Arc<BoundedQueue<T>>,
        delay: Duration,
        max_items: Option<usize>,
    ) -> Self {
        Self {
            id: id.into(),
            source,
            queue,
            delay,
            max_items,
        }
    }

    /// Starts the producer on its own named OS thread.
    pub fn spawn(self) -> Result<WorkerHandle, ConveyorError> {
        let name = format!("Producer-{}", self.id);
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
        let mut produced = 0usize;

        'produce: loop {
            if stop.is_stopped() {
                break;
            }
            if let Some(cap) = self.max_items {
                if produced >= cap {
                    break;
                }
            }

            // Oldest first. `None` covers both an empty source and a
            // lost race against another producer on the same store.
            let Some(mut item) = self.source.take(0) else {
                break;
            };

            // Ownership of the item has transferred to this attempt:
            // a timed-out put hands it back and we retry with the SAME
            // item until it lands or a stop is requested. It is never
            // silently dropped.
            loop {
                let label = item.to_string();
                match self.queue.put(item, Some(QUEUE_OP_TIMEOUT)) {
                    Ok(()) => {
                        produced += 1;
                        count.fetch_add(1, Ordering::SeqCst);
                        println!("[{name}] Produced item: {label} (Total: {produced})");
                        break;
                    }
                    Err(returned) => {
                        if stop.is_stopped() {
                            // Put the in-flight item back so every item
                            // stays accounted for in source, queue or
                            // sink even across a stop.
                            self.source.append(returned);
                            break 'produce;
                        }
                        item = returned;
                    }
                }
            }

            if !self.delay.is_zero() {
                stop.interruptible_sleep(self.delay);
            }
        }

        println!("[{name}] Finished producing. Total items produced: {produced}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Container;
    use std::time::Instant;

    fn seeded_source(n: usize) -> Arc<Container<String>> {
        Arc::new(Container::with_items(
            "Source",
            (1..=n).map(|i| format!("Item-{i}")).collect(),
        ))
    }

    #[test]
    fn drains_source_into_queue_in_order() {
        let source = seeded_source(5);
        let queue = Arc::new(BoundedQueue::new(10).unwrap());

        let mut handle = Producer::new(
            "P1",
            source.clone() as Arc<dyn ItemStore<String>>,
            Arc::clone(&queue),
            Duration::ZERO,
            None,
        )
        .spawn()
        .unwrap();

        assert!(handle.join(Some(Duration::from_secs(5))));
        assert_eq!(handle.count(), 5);
        assert!(source.is_empty());

        for i in 1..=5 {
            assert_eq!(queue.get(None), Some(format!("Item-{i}")));
        }
    }

    #[test]
    fn respects_max_items_cap() {
        let source = seeded_source(10);
        let queue = Arc::new(BoundedQueue::new(10).unwrap());

        let mut handle = Producer::new(
            "P1",
            source.clone() as Arc<dyn ItemStore<String>>,
            Arc::clone(&queue),
            Duration::ZERO,
            Some(3),
        )
        .spawn()
        .unwrap();

        assert!(handle.join(Some(Duration::from_secs(5))));
        assert_eq!(handle.count(), 3);
        assert_eq!(source.len(), 7);
        assert_eq!(queue.len(), 3);
    }

    #[test]
    fn stop_interrupts_a_long_run() {
        let source = seeded_source(1000);
        let queue = Arc::new(BoundedQueue::new(1000).unwrap());

        let mut handle = Producer::new(
            "P1",
            source.clone() as Arc<dyn ItemStore<String>>,
            Arc::clone(&queue),
            Duration::from_millis(100),
            None,
        )
        .spawn()
        .unwrap();

        thread::sleep(Duration::from_millis(300));
        handle.stop();

        let stop_requested = Instant::now();
        assert!(handle.join(Some(Duration::from_secs(2))));
        assert!(stop_requested.elapsed() < Duration::from_secs(2));

        let produced = handle.count();
        assert!(produced > 0, "should have produced before the stop");
        assert!(produced < 1000, "stop must interrupt before exhaustion");
        assert_eq!(source.len() + queue.len(), 1000);
    }

    #[test]
    fn stop_during_full_queue_returns_item_to_source() {
        let source = seeded_source(1);
        let queue = Arc::new(BoundedQueue::new(1).unwrap());
        assert!(queue.put("blocker".to_string(), None).is_ok());

        let mut handle = Producer::new(
            "P1",
            source.clone() as Arc<dyn ItemStore<String>>,
            Arc::clone(&queue),
            Duration::ZERO,
            None,
        )
        .spawn()
        .unwrap();

        // Give the producer time to take the item and start retrying.
        thread::sleep(Duration::from_millis(150));
        handle.stop();
        assert!(handle.join(Some(Duration::from_secs(2))));

        assert_eq!(handle.count(), 0);
        // The in-flight item went back: nothing was lost.
        assert_eq!(source.len(), 1);
        assert_eq!(queue.len(), 1);
    }
}
