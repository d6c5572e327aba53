//! Error handling for the anomaly engine and its record source/sink plumbing.

use std::io;

use arrow::error::ArrowError;
use parquet::errors::ParquetError;
use thiserror::Error;

/// Specialized error type for `district-pulse`
#[derive(Debug, Error)]
pub enum PulseError {
    /// Error opening, reading or writing a file
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
    /// Error reading or writing Parquet data
    #[error("Parquet error: {0}")]
    ParquetError(#[from] ParquetError),
    /// Error processing Arrow arrays
    #[error("Arrow error: {0}")]
    ArrowError(#[from] ArrowError),
    /// Error converting between Rust values and record batches
    #[error("Serialization error: {0}")]
    SerdeArrowError(#[from] serde_arrow::Error),
    /// Error parsing a JSON configuration file
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    /// A required column is absent or unusable in an input record set
    #[error("Schema error: {0}")]
    SchemaError(String),
    /// Detection parameters are out of range
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl PulseError {
    /// Create a schema error for a column that is not present in a batch
    #[must_use]
    pub fn missing_column(column: &str) -> Self {
        Self::SchemaError(format!("required column '{column}' not found"))
    }

    /// Whether this error means the input was structurally unusable
    #[must_use]
    pub const fn is_schema_error(&self) -> bool {
        matches!(self, Self::SchemaError(_))
    }
}

/// Result type for `district-pulse` operations
pub type Result<T> = std::result::Result<T, PulseError>;

pub mod util;
