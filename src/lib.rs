// src/lib.rs

//! Bounded-buffer producer/consumer pipeline plus a small CSV sales
//! analysis toolkit.
//!
//! The concurrency core is [`sync::BoundedQueue`] (a blocking bounded
//! FIFO built on a mutex and two condition variables) together with the
//! [`workers`] that drive it under cooperative cancellation. The
//! [`sim`] module wires a full run; [`analysis`] and [`io`] cover the
//! unrelated sales-data subsystem.

pub mod analysis;
pub mod error;
pub mod io;
pub mod model;
pub mod sim;
pub mod sync;
pub mod workers;

pub use error::ConveyorError;
