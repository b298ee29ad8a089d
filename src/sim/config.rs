// src/sim/config.rs

use std::time::Duration;

#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Maximum occupancy of the shared queue.
    pub queue_capacity: usize,
    /// How many items to seed into the source container.
    pub item_count: usize,
    /// Pause after each produced item.
    pub production_delay: Duration,
    /// Pause after each consumed item.
    pub consumption_delay: Duration,
    /// Grace period after the producer finishes, giving the consumer
    /// time to drain the queue before it is told to stop.
    pub drain_grace: Duration,
    /// How long the driver waits for the consumer to join after a stop.
    pub consumer_join_timeout: Duration,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            queue_capacity: 5,
            item_count: 20,
            production_delay: Duration::from_millis(100),
            consumption_delay: Duration::from_millis(150),
            drain_grace: Duration::from_secs(1),
            consumer_join_timeout: Duration::from_secs(2),
        }
    }
}
