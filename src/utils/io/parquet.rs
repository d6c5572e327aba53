//! Parquet file operations
//!
//! Finding Parquet files in a directory, reading them into Arrow record
//! batches in parallel, and writing a record batch back out.

use std::path::{Path, PathBuf};
use std::time::Instant;

use arrow::record_batch::RecordBatch;
use indicatif::ParallelProgressIterator;
use itertools::Itertools;
use parquet::arrow::ArrowWriter;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use rayon::prelude::*;

use crate::error::util::{safe_create_file, safe_open_file, validate_directory};
use crate::error::{PulseError, Result};
use crate::utils::logging::{
    create_main_progress_bar, finish_progress_bar, log_operation_complete, log_operation_start,
    log_warning,
};

/// Default batch size for Parquet reading
pub const DEFAULT_BATCH_SIZE: usize = 16384;

/// Read a Parquet file into Arrow record batches
pub fn read_parquet(path: &Path) -> Result<Vec<RecordBatch>> {
    let start = Instant::now();
    let file = safe_open_file(path, "reading parquet file")?;

    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?
        .with_batch_size(DEFAULT_BATCH_SIZE)
        .build()?;
    let batches = reader.collect::<std::result::Result<Vec<_>, _>>()?;

    log_operation_complete("read", path, batches.len(), Some(start.elapsed()));
    Ok(batches)
}

/// Find all Parquet files in a directory, sorted by file name
pub fn find_parquet_files(dir: &Path) -> Result<Vec<PathBuf>> {
    log_operation_start("Searching for parquet files in", dir);
    validate_directory(dir, "finding parquet files")?;

    let parquet_files = std::fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()).map_err(PulseError::from))
        .filter_ok(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "parquet"))
        .collect::<Result<Vec<_>>>()?
        .into_iter()
        .sorted()
        .collect_vec();

    if parquet_files.is_empty() {
        log_warning("No Parquet files found in directory", Some(dir));
    } else {
        log_operation_complete("found", dir, parquet_files.len(), None);
    }
    Ok(parquet_files)
}

/// Load all Parquet files from a directory in parallel
///
/// Batches are returned in file-name order regardless of which file finished
/// reading first.
pub fn load_parquet_files_parallel(dir: &Path) -> Result<Vec<RecordBatch>> {
    let parquet_files = find_parquet_files(dir)?;
    if parquet_files.is_empty() {
        return Ok(Vec::new());
    }

    let pb = create_main_progress_bar(parquet_files.len() as u64, Some("Reading parquet files"));
    let per_file: Vec<Result<Vec<RecordBatch>>> = parquet_files
        .par_iter()
        .progress_with(pb.clone())
        .map(|path| read_parquet(path))
        .collect();
    finish_progress_bar(&pb, Some("Finished reading parquet files"));

    let mut combined_batches = Vec::new();
    for batches in per_file {
        combined_batches.extend(batches?);
    }

    log::info!(
        "Successfully loaded {} batches from {} Parquet files",
        combined_batches.len(),
        parquet_files.len()
    );
    Ok(combined_batches)
}

/// Write a record batch to a Snappy-compressed Parquet file
pub fn write_parquet(path: &Path, batch: &RecordBatch) -> Result<()> {
    let start = Instant::now();
    let file = safe_create_file(path)?;

    let props = WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build();
    let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(props))?;
    writer.write(batch)?;
    writer.close()?;

    log_operation_complete("wrote", path, batch.num_rows(), Some(start.elapsed()));
    Ok(())
}
