//! Conversion between Arrow record batches and typed records

use arrow::array::{Array, Int64Array, StringArray};
use arrow::record_batch::RecordBatch;
use arrow_schema::FieldRef;
use chrono::NaiveDate;
use log::warn;
use serde::Serialize;

use crate::config::SourceColumns;
use crate::error::{PulseError, Result};
use crate::models::{DailyBiometricRecord, DailyEnrolmentRecord, RegionKey};
use crate::utils::arrow::extractors::{count_column, date_column, string_column};

/// Date and location columns shared by both feeds
struct LocationColumns {
    dates: Vec<Option<NaiveDate>>,
    state: StringArray,
    district: StringArray,
    pincode: StringArray,
}

impl LocationColumns {
    fn extract(batch: &RecordBatch, columns: &SourceColumns) -> Result<Self> {
        Ok(Self {
            dates: date_column(batch, &columns.date)?,
            state: string_column(batch, &columns.state)?,
            district: string_column(batch, &columns.district)?,
            pincode: string_column(batch, &columns.pincode)?,
        })
    }

    /// `None` when the row has no usable date, state or district
    fn row(&self, row: usize) -> Option<(NaiveDate, RegionKey)> {
        let date = self.dates.get(row).copied().flatten()?;
        if self.state.is_null(row) || self.district.is_null(row) {
            return None;
        }
        let pincode = if self.pincode.is_null(row) {
            ""
        } else {
            self.pincode.value(row).trim()
        };
        Some((
            date,
            RegionKey::new(
                self.state.value(row).trim(),
                self.district.value(row).trim(),
                pincode,
            ),
        ))
    }
}

/// Read a count, treating null as zero
fn count_value(array: &Int64Array, row: usize, name: &str) -> Result<u32> {
    if array.is_null(row) {
        return Ok(0);
    }
    let value = array.value(row);
    u32::try_from(value).map_err(|_| {
        PulseError::SchemaError(format!(
            "column '{name}' row {row}: {value} is not a valid count"
        ))
    })
}

fn warn_skipped(kind: &str, total: usize, kept: usize) {
    if kept < total {
        warn!(
            "Skipped {} of {} {kind} rows without a date, state or district",
            total - kept,
            total
        );
    }
}

/// Map an enrolment batch onto records
pub fn enrolment_from_batch(
    batch: &RecordBatch,
    columns: &SourceColumns,
) -> Result<Vec<DailyEnrolmentRecord>> {
    let locations = LocationColumns::extract(batch, columns)?;
    let age_0_5 = count_column(batch, &columns.age_0_5)?;
    let age_5_17 = count_column(batch, &columns.age_5_17)?;
    let age_18_plus = count_column(batch, &columns.age_18_plus)?;

    let mut records = Vec::with_capacity(batch.num_rows());
    for row in 0..batch.num_rows() {
        let Some((date, key)) = locations.row(row) else {
            continue;
        };
        records.push(DailyEnrolmentRecord {
            date,
            key,
            age_0_5: count_value(&age_0_5, row, &columns.age_0_5)?,
            age_5_17: count_value(&age_5_17, row, &columns.age_5_17)?,
            age_18_plus: count_value(&age_18_plus, row, &columns.age_18_plus)?,
        });
    }

    warn_skipped("enrolment", batch.num_rows(), records.len());
    Ok(records)
}

/// Map a biometric batch onto records
pub fn biometric_from_batch(
    batch: &RecordBatch,
    columns: &SourceColumns,
) -> Result<Vec<DailyBiometricRecord>> {
    let locations = LocationColumns::extract(batch, columns)?;
    let child = count_column(batch, &columns.bio_update_5_17)?;
    let adult = count_column(batch, &columns.bio_update_17_plus)?;

    let mut records = Vec::with_capacity(batch.num_rows());
    for row in 0..batch.num_rows() {
        let Some((date, key)) = locations.row(row) else {
            continue;
        };
        records.push(DailyBiometricRecord {
            date,
            key,
            bio_update_5_17: count_value(&child, row, &columns.bio_update_5_17)?,
            bio_update_17_plus: count_value(&adult, row, &columns.bio_update_17_plus)?,
        });
    }

    warn_skipped("biometric", batch.num_rows(), records.len());
    Ok(records)
}

/// Serialize rows into a record batch with the given fields using `serde_arrow`
pub fn to_record_batch<T: Serialize>(fields: &[FieldRef], items: &[T]) -> Result<RecordBatch> {
    Ok(serde_arrow::to_record_batch(fields, &items)?)
}
