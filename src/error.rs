// src/error.rs

use thiserror::Error;

/// Errors surfaced by the conveyor crate.
///
/// Steady-state conditions (a `put`/`get` timeout, an empty container pop)
/// are NOT errors: they are signalled through `bool` / `Option` return
/// values because the worker loops treat them as normal control flow.
#[derive(Debug, Error)]
pub enum ConveyorError {
    /// A construction-time parameter was rejected. Fatal: no partial
    /// object is usable after this.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
