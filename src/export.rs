//! Record sink: anomaly feed and unified daily export as Parquet

use std::path::Path;
use std::sync::Arc;

use arrow::datatypes::{DataType, Field};
use arrow::record_batch::RecordBatch;
use arrow_schema::FieldRef;
use chrono::NaiveDate;
use serde::Serialize;

use crate::algorithm::UnifiedDailyRow;
use crate::error::Result;
use crate::models::Anomaly;
use crate::utils::arrow::to_record_batch;
use crate::utils::io::write_parquet;
use crate::utils::logging::log_warning;

/// File name of the anomaly feed inside the output directory
pub const ANOMALY_FILE: &str = "anomalies.parquet";
/// File name of the unified daily export inside the output directory
pub const UNIFIED_FILE: &str = "daily_unified.parquet";

/// Flat row of the exported anomaly feed
#[derive(Debug, Serialize)]
struct AnomalyRow<'a> {
    date: NaiveDate,
    state: &'a str,
    district: &'a str,
    #[serde(rename = "type")]
    anomaly_type: &'static str,
    severity: &'static str,
    z_score: f64,
}

impl<'a> From<&'a Anomaly> for AnomalyRow<'a> {
    fn from(anomaly: &'a Anomaly) -> Self {
        Self {
            date: anomaly.date,
            state: &anomaly.region.state,
            district: &anomaly.region.district,
            anomaly_type: anomaly.anomaly_type.as_str(),
            severity: anomaly.severity.as_str(),
            z_score: anomaly.z_score,
        }
    }
}

fn field(name: &str, data_type: DataType) -> FieldRef {
    Arc::new(Field::new(name, data_type, false))
}

/// Arrow fields of the anomaly feed
#[must_use]
pub fn anomaly_fields() -> Vec<FieldRef> {
    vec![
        field("date", DataType::Date32),
        field("state", DataType::Utf8),
        field("district", DataType::Utf8),
        field("type", DataType::Utf8),
        field("severity", DataType::Utf8),
        field("z_score", DataType::Float64),
    ]
}

/// Arrow fields of the unified daily export
#[must_use]
pub fn unified_fields() -> Vec<FieldRef> {
    let mut fields = vec![
        field("date", DataType::Date32),
        field("state", DataType::Utf8),
        field("district", DataType::Utf8),
        field("pincode", DataType::Utf8),
    ];
    fields.extend(
        [
            "age_0_5",
            "age_5_17",
            "age_18_plus",
            "bio_update_5_17",
            "bio_update_17_plus",
        ]
        .into_iter()
        .map(|name| field(name, DataType::UInt64)),
    );
    fields
}

/// The anomaly feed as a record batch
pub fn anomalies_to_batch(anomalies: &[Anomaly]) -> Result<RecordBatch> {
    let rows: Vec<AnomalyRow<'_>> = anomalies.iter().map(AnomalyRow::from).collect();
    to_record_batch(&anomaly_fields(), &rows)
}

/// The unified daily export as a record batch
pub fn unified_to_batch(rows: &[UnifiedDailyRow]) -> Result<RecordBatch> {
    to_record_batch(&unified_fields(), rows)
}

/// Write the anomaly feed; nothing is written for an empty feed
///
/// Returns whether a file was written.
pub fn write_anomalies(path: &Path, anomalies: &[Anomaly]) -> Result<bool> {
    if anomalies.is_empty() {
        log_warning("No anomalies found, skipping export", Some(path));
        return Ok(false);
    }
    write_parquet(path, &anomalies_to_batch(anomalies)?)?;
    Ok(true)
}

/// Write the unified daily export; nothing is written when there are no rows
pub fn write_unified(path: &Path, rows: &[UnifiedDailyRow]) -> Result<bool> {
    if rows.is_empty() {
        log_warning("No daily rows to export", Some(path));
        return Ok(false);
    }
    write_parquet(path, &unified_to_batch(rows)?)?;
    Ok(true)
}
