// src/sync/mod.rs

pub mod queue;
pub mod stop;

pub use queue::BoundedQueue;
pub use stop::{StopToken, STOP_CHECK_INTERVAL};
