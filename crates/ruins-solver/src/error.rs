//! Error types for solver configuration and reporting.
//!
//! Not finding an answer is never an error: both searches report that as an
//! empty result. These variants cover bad input and output failures only.

use thiserror::Error;

/// Errors that can occur while configuring a search or reporting its result
#[derive(Error, Debug)]
pub enum SolverError {
    #[error("the monument has 5 slots, got {0} coins")]
    CoinCount(usize),

    #[error("step cap must be at least 1")]
    ZeroStepCap,

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for solver operations
pub type Result<T> = std::result::Result<T, SolverError>;
