//! Error types for tolerance interval estimation
//!
//! Provides a unified error type for all tolerance-stats crates.

use thiserror::Error;

/// Core error type for tolerance interval operations
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid parameter provided to a function
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Operation invoked before its required precursor
    #[error("Missing precursor: {0}")]
    PrecursorMissing(String),

    /// Distribution parameter fitting failed for a sample
    #[error("Fit failure: {0}")]
    FitFailure(String),

    /// Numerical optimization failed to converge
    #[error("Convergence failure: {0}")]
    ConvergenceFailure(String),

    /// Estimation requested with no observed data
    #[error("Empty sample")]
    EmptySample,

    /// Insufficient data for the requested operation
    #[error("Insufficient data: expected at least {expected} samples, got {actual}")]
    InsufficientData { expected: usize, actual: usize },

    /// Other errors
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

// Helper functions for common error patterns

impl Error {
    /// Create an error for a coverage threshold outside [0, 1]
    pub fn invalid_threshold(p: f64) -> Self {
        Self::InvalidParameter(format!("Coverage threshold {p} must be in [0, 1]"))
    }

    /// Create an error for an operation invoked out of order
    pub fn precursor(operation: &str, required: &str) -> Self {
        Self::PrecursorMissing(format!("{operation} requires {required} to have run"))
    }

    /// Create an error for a degenerate location-scale fit
    pub fn degenerate_fit(scale: f64) -> Self {
        Self::FitFailure(format!("fitted scale {scale} is not positive and finite"))
    }
}
