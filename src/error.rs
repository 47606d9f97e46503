// src/error.rs

//! Error types for the inventory optimizer.
//!
//! Per-record failures (`RecordError`) never abort a batch; they are collected
//! next to the successful results. `OptimizerError` covers everything that
//! stops a whole run: bad configuration and unreadable input files.

use thiserror::Error;

/// Result alias for operations that can fail for the whole run.
pub type OptimizerResult<T> = Result<T, OptimizerError>;

/// Failure attached to a single product record.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    /// A field holds a value the formulas are not defined for.
    #[error("invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    /// The inputs are valid individually but the formula degenerates
    /// (zero denominator, non-finite intermediate).
    #[error("numeric degenerate: {reason}")]
    NumericDegenerate { reason: String },
}

impl RecordError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    pub fn degenerate(reason: impl Into<String>) -> Self {
        Self::NumericDegenerate {
            reason: reason.into(),
        }
    }
}

/// Errors that abort a run.
#[derive(Debug, Error)]
pub enum OptimizerError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Record(#[from] RecordError),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("settings error: {0}")]
    Settings(#[from] config::ConfigError),
}
