//! IO utilities for Parquet record sources and sinks

pub mod parquet;

// Re-export commonly used functions for convenience
pub use self::parquet::{
    DEFAULT_BATCH_SIZE, find_parquet_files, load_parquet_files_parallel, read_parquet,
    write_parquet,
};
