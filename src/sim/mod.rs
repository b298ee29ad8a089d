// src/sim/mod.rs

pub mod config;
pub mod runner;

pub use config::SimulationConfig;
pub use runner::{PipelineRun, RunReport, WorkerRecord};
