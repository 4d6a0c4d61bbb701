//! Error handling for CPUE summarization.
//!
//! Provides error types for configuration problems, malformed input tables,
//! and tabular-engine failures. Every detected error aborts the whole call;
//! no partial output table is ever returned. NaN statistics (missing effort,
//! n = 1 groups) are valid output, not errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CpueError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Input table is missing required columns: {}", missing.join(", "))]
    DataShape { missing: Vec<String> },

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),
}

impl CpueError {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a data shape error for missing input columns
    pub fn data_shape(missing: Vec<String>) -> Self {
        Self::DataShape { missing }
    }
}

pub type Result<T> = std::result::Result<T, CpueError>;
