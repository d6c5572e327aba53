//! Field extraction utilities for Arrow record batches
//!
//! Columns are looked up by name and cast to the type the records need.
//! A missing column, or one that cannot be cast, is a schema error.

use arrow::array::{Array, ArrayRef, Date32Array, Int64Array, StringArray};
use arrow::compute::{CastOptions, cast_with_options};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use chrono::NaiveDate;

use crate::error::{PulseError, Result};

/// Date formats seen in the published feeds, tried in order
pub const FEED_DATE_FORMATS: [&str; 2] = ["%d-%m-%Y", "%Y-%m-%d"];

/// Look up a column by name
pub fn column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a ArrayRef> {
    let idx = batch
        .schema()
        .index_of(name)
        .map_err(|_| PulseError::missing_column(name))?;
    Ok(batch.column(idx))
}

/// Cast a column, failing on any value that cannot be converted
///
/// The lenient arrow cast turns unparseable values into nulls, which the
/// record conversion would then read as zero counts.
fn cast_column(batch: &RecordBatch, name: &str, to: &DataType) -> Result<ArrayRef> {
    let array = column(batch, name)?;
    if array.data_type() == to {
        return Ok(array.clone());
    }
    let options = CastOptions {
        safe: false,
        ..Default::default()
    };
    cast_with_options(array.as_ref(), to, &options).map_err(|e| {
        PulseError::SchemaError(format!(
            "column '{name}' of type {} cannot be read as {to}: {e}",
            array.data_type()
        ))
    })
}

/// A column as UTF-8 strings (numeric pincodes are rendered as text)
pub fn string_column(batch: &RecordBatch, name: &str) -> Result<StringArray> {
    let array = cast_column(batch, name, &DataType::Utf8)?;
    array
        .as_any()
        .downcast_ref::<StringArray>()
        .cloned()
        .ok_or_else(|| PulseError::SchemaError(format!("column '{name}' is not a string array")))
}

/// A count column as 64-bit integers
pub fn count_column(batch: &RecordBatch, name: &str) -> Result<Int64Array> {
    let array = cast_column(batch, name, &DataType::Int64)?;
    array
        .as_any()
        .downcast_ref::<Int64Array>()
        .cloned()
        .ok_or_else(|| PulseError::SchemaError(format!("column '{name}' is not an integer array")))
}

/// Parse a date in one of the feed formats
#[must_use]
pub fn parse_feed_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    FEED_DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
}

/// A date column; nulls and unparseable strings become `None`
pub fn date_column(batch: &RecordBatch, name: &str) -> Result<Vec<Option<NaiveDate>>> {
    let array = column(batch, name)?;
    match array.data_type() {
        DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View => {
            let strings = string_column(batch, name)?;
            Ok(strings.iter().map(|v| v.and_then(parse_feed_date)).collect())
        }
        DataType::Date32 | DataType::Date64 | DataType::Timestamp(_, _) => {
            let dates = cast_column(batch, name, &DataType::Date32)?;
            let dates = dates.as_any().downcast_ref::<Date32Array>().ok_or_else(|| {
                PulseError::SchemaError(format!("column '{name}' is not a date array"))
            })?;
            Ok((0..dates.len())
                .map(|i| {
                    if dates.is_null(i) {
                        None
                    } else {
                        dates.value_as_date(i)
                    }
                })
                .collect())
        }
        other => Err(PulseError::SchemaError(format!(
            "column '{name}' has unsupported date type {other}"
        ))),
    }
}
