// src/sim/runner.rs

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use serde::Serialize;

use crate::error::ConveyorError;
use crate::model::{Container, ItemStore};
use crate::sim::config::SimulationConfig;
use crate::sync::BoundedQueue;
use crate::workers::{Consumer, Producer};

/// One row of the exported run log: how many items a worker moved.
#[derive(Debug, Clone, Serialize)]
pub struct WorkerRecord {
    pub worker: String,
    pub role: String,
    pub items_moved: usize,
}

/// Final accounting of a pipeline run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub seeded: usize,
    pub produced: usize,
    pub consumed: usize,
    pub source_remaining: usize,
    pub queue_remaining: usize,
    pub sink_total: usize,
    pub workers: Vec<WorkerRecord>,
}

impl RunReport {
    /// Items currently accounted for across all three locations.
    pub fn accounted(&self) -> usize {
        self.source_remaining + self.queue_remaining + self.sink_total
    }

    /// The conservation law: every seeded item sits in exactly one of
    /// source, queue or sink. A mismatch is a logic defect in the core,
    /// never expected behavior.
    pub fn is_conserved(&self) -> bool {
        self.accounted() == self.seeded
    }
}

/// Wires source, queue, workers and sink together and drives one full
/// producer-consumer run.
pub struct PipelineRun {
    config: SimulationConfig,
    source: Arc<Container<String>>,
    destination: Arc<Container<String>>,
    queue: Arc<BoundedQueue<String>>,
}

impl PipelineRun {
    /// Builds the pipeline: queue first (it must exist before either
    /// worker), source seeded with `Item-1..=N`, empty destination.
    pub fn new(config: SimulationConfig) -> Result<Self, ConveyorError> {
        let queue = Arc::new(BoundedQueue::new(config.queue_capacity)?);
        let items = (1..=config.item_count)
            .map(|i| format!("Item-{i}"))
            .collect();
        Ok(Self {
            config,
            source: Arc::new(Container::with_items("Source", items)),
            destination: Arc::new(Container::new("Destination")),
            queue,
        })
    }

    pub fn source(&self) -> &Container<String> {
        &self.source
    }

    pub fn destination(&self) -> &Container<String> {
        &self.destination
    }

    pub fn queue(&self) -> &BoundedQueue<String> {
        &self.queue
    }

    /// Runs the driver protocol:
    ///
    /// 1. Start the consumer first, so it demonstrably blocks on the
    ///    empty queue.
    /// 2. Start the producer and wait for its natural termination
    ///    (source exhausted).
    /// 3. Give the consumer a grace period to drain the queue.
    /// 4. Signal the consumer to stop and join it with a timeout.
    pub fn run(&self) -> Result<RunReport, ConveyorError> {
        let seeded = self.source.len();

        let consumer = Consumer::new(
            "C1",
            Arc::clone(&self.destination) as Arc<dyn ItemStore<String>>,
            Arc::clone(&self.queue),
            self.config.consumption_delay,
            None,
        );
        let mut consumer_handle = consumer.spawn()?;

        // Small head start so the consumer is already waiting on the
        // empty queue when production begins.
        thread::sleep(Duration::from_millis(50));

        let producer = Producer::new(
            "P1",
            Arc::clone(&self.source) as Arc<dyn ItemStore<String>>,
            Arc::clone(&self.queue),
            self.config.production_delay,
            None,
        );
        let mut producer_handle = producer.spawn()?;

        producer_handle.join(None);

        thread::sleep(self.config.drain_grace);

        consumer_handle.stop();
        if !consumer_handle.join(Some(self.config.consumer_join_timeout)) {
            eprintln!(
                "[{}] did not terminate within {:?}",
                consumer_handle.name(),
                self.config.consumer_join_timeout
            );
        }

        let workers = vec![
            WorkerRecord {
                worker: producer_handle.name().to_string(),
                role: "producer".to_string(),
                items_moved: producer_handle.count(),
            },
            WorkerRecord {
                worker: consumer_handle.name().to_string(),
                role: "consumer".to_string(),
                items_moved: consumer_handle.count(),
            },
        ];

        Ok(RunReport {
            seeded,
            produced: producer_handle.count(),
            consumed: consumer_handle.count(),
            source_remaining: self.source.len(),
            queue_remaining: self.queue.len(),
            sink_total: self.destination.len(),
            workers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_config(item_count: usize) -> SimulationConfig {
        SimulationConfig {
            queue_capacity: 5,
            item_count,
            production_delay: Duration::ZERO,
            consumption_delay: Duration::ZERO,
            drain_grace: Duration::from_millis(300),
            consumer_join_timeout: Duration::from_secs(2),
        }
    }

    #[test]
    fn full_run_drains_everything() {
        let run = PipelineRun::new(fast_config(20)).unwrap();
        let report = run.run().unwrap();

        assert_eq!(report.seeded, 20);
        assert_eq!(report.produced, 20);
        assert_eq!(report.consumed, 20);
        assert_eq!(report.source_remaining, 0);
        assert_eq!(report.queue_remaining, 0);
        assert_eq!(report.sink_total, 20);
        assert!(report.is_conserved());
    }

    #[test]
    fn destination_preserves_fifo_order() {
        let run = PipelineRun::new(fast_config(10)).unwrap();
        run.run().unwrap();

        let expected: Vec<String> = (1..=10).map(|i| format!("Item-{i}")).collect();
        assert_eq!(run.destination().snapshot(), expected);
    }

    #[test]
    fn rejects_zero_capacity_config() {
        let config = SimulationConfig {
            queue_capacity: 0,
            ..fast_config(5)
        };
        assert!(matches!(
            PipelineRun::new(config),
            Err(ConveyorError::InvalidConfiguration(_))
        ));
    }
}
