//! Utilities for the record source and sink plumbing
//!
//! Arrow column extraction, Parquet file IO, and logging/progress helpers.
//! None of this is needed by the detection algorithms themselves.

pub mod arrow;
pub mod io;
pub mod logging;

// Re-export commonly used functions for convenience
pub use self::io::{DEFAULT_BATCH_SIZE, find_parquet_files, load_parquet_files_parallel, read_parquet};
