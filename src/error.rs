//! Error types for the damped oscillator simulator.
//!
//! This module provides a unified error type [`DampError`] that covers
//! all error conditions that can occur during parameter validation,
//! integration, and artifact output.

use thiserror::Error;

/// Result type alias using [`DampError`].
pub type Result<T> = std::result::Result<T, DampError>;

/// Unified error type for all dampsim operations.
#[derive(Error, Debug)]
pub enum DampError {
    // ============ Validation Errors ============
    /// A parameter is outside its admissible range
    #[error("Invalid argument '{param}': {message}")]
    InvalidArgument { param: String, message: String },

    /// The decay duration is undefined for these parameters
    #[error("Domain error: {message}")]
    DomainError { message: String },

    // ============ Integration Errors ============
    /// State blew up or became non-finite during integration
    #[error("Numeric overflow at step {step} (t = {time:.4} s): x = {x:.3e}, v = {v:.3e}")]
    NumericOverflow { step: usize, time: f64, x: f64, v: f64 },

    /// Too many steps requested for duration / dt
    #[error("Simulation needs {steps} steps, exceeding the limit of {limit}")]
    StepLimitExceeded { steps: f64, limit: usize },

    /// The trajectory buffer could not be reserved
    #[error("Cannot allocate {samples} trajectory samples: {source}")]
    AllocationFailed {
        samples: usize,
        #[source]
        source: std::collections::TryReserveError,
    },

    // ============ Output Errors ============
    /// Error writing an output artifact
    #[error("Failed to write '{path}': {source}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Error encoding the export record
    #[error("Failed to serialize parameters: {source}")]
    SerializeError {
        #[from]
        source: serde_json::Error,
    },

    /// Error rendering the plot
    #[error("Plot error: {message}")]
    PlotError { message: String },
}

impl DampError {
    /// Create an invalid argument error
    pub fn invalid_argument(param: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            param: param.into(),
            message: message.into(),
        }
    }

    /// Create a domain error
    pub fn domain(message: impl Into<String>) -> Self {
        Self::DomainError {
            message: message.into(),
        }
    }

    /// Create a file write error
    pub fn file_write(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::FileWriteError {
            path: path.display().to_string(),
            source,
        }
    }

    /// Create a plot error
    pub fn plot(message: impl Into<String>) -> Self {
        Self::PlotError {
            message: message.into(),
        }
    }
}
