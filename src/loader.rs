//! Record source: Parquet feeds to typed records

use std::path::Path;

use arrow::record_batch::RecordBatch;
use log::info;
use rayon::prelude::*;

use crate::config::SourceColumns;
use crate::error::Result;
use crate::models::{DailyBiometricRecord, DailyEnrolmentRecord};
use crate::utils::arrow::{biometric_from_batch, enrolment_from_batch};
use crate::utils::io::load_parquet_files_parallel;

/// Convert every batch with `convert`, keeping batch order
fn records_from_batches<T, F>(batches: &[RecordBatch], convert: F) -> Result<Vec<T>>
where
    T: Send,
    F: Fn(&RecordBatch) -> Result<Vec<T>> + Sync + Send,
{
    let per_batch = batches
        .par_iter()
        .map(convert)
        .collect::<Result<Vec<_>>>()?;
    Ok(per_batch.into_iter().flatten().collect())
}

/// Enrolment records from in-memory batches
pub fn enrolment_from_batches(
    batches: &[RecordBatch],
    columns: &SourceColumns,
) -> Result<Vec<DailyEnrolmentRecord>> {
    records_from_batches(batches, |batch| enrolment_from_batch(batch, columns))
}

/// Biometric records from in-memory batches
pub fn biometric_from_batches(
    batches: &[RecordBatch],
    columns: &SourceColumns,
) -> Result<Vec<DailyBiometricRecord>> {
    records_from_batches(batches, |batch| biometric_from_batch(batch, columns))
}

/// Load every enrolment Parquet file in `dir`
pub fn load_enrolment_dir(dir: &Path, columns: &SourceColumns) -> Result<Vec<DailyEnrolmentRecord>> {
    let batches = load_parquet_files_parallel(dir)?;
    let records = enrolment_from_batches(&batches, columns)?;
    info!("Loaded {} enrolment rows", records.len());
    Ok(records)
}

/// Load every biometric Parquet file in `dir`
pub fn load_biometric_dir(dir: &Path, columns: &SourceColumns) -> Result<Vec<DailyBiometricRecord>> {
    let batches = load_parquet_files_parallel(dir)?;
    let records = biometric_from_batches(&batches, columns)?;
    info!("Loaded {} biometric rows", records.len());
    Ok(records)
}
