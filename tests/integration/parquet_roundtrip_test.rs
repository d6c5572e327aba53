//! File-level tests: Parquet feeds in, anomaly and unified exports out

use std::sync::Arc;

use arrow::array::{ArrayRef, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use district_pulse::algorithm::merge_daily_counts;
use district_pulse::utils::io::{read_parquet, write_parquet};
use district_pulse::{
    AnomalyEngine, DetectionConfig, SourceColumns, load_biometric_dir, load_enrolment_dir,
    write_anomalies, write_unified,
};

use crate::utils::{day, scenario, scratch_dir};

fn enrolment_batch(include_adults: bool) -> RecordBatch {
    let mut fields = vec![
        Field::new("date", DataType::Utf8, true),
        Field::new("state", DataType::Utf8, true),
        Field::new("district", DataType::Utf8, true),
        Field::new("pincode", DataType::Utf8, true),
        Field::new("age_0_5", DataType::Int64, true),
        Field::new("age_5_17", DataType::Int64, true),
    ];
    let mut columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from(vec![
            Some("01-01-2025"),
            Some("2025-01-02"),
            Some("03-01-2025"),
        ])),
        Arc::new(StringArray::from(vec![
            Some("Karnataka"),
            Some("Karnataka"),
            Some("Karnataka"),
        ])),
        Arc::new(StringArray::from(vec![Some("Mysuru"), Some("Mysuru"), None])),
        Arc::new(StringArray::from(vec![
            Some("570001"),
            Some("570002"),
            Some("570003"),
        ])),
        Arc::new(Int64Array::from(vec![Some(3), None, Some(1)])),
        Arc::new(Int64Array::from(vec![Some(4), Some(2), Some(1)])),
    ];
    if include_adults {
        fields.push(Field::new("age_18_greater", DataType::Int64, true));
        columns.push(Arc::new(Int64Array::from(vec![Some(7), Some(9), Some(1)])));
    }
    RecordBatch::try_new(Arc::new(Schema::new(fields)), columns).unwrap()
}

#[test]
fn test_load_enrolment_directory() {
    let dir = scratch_dir("enrolment-feed");
    write_parquet(&dir.join("part-0.parquet"), &enrolment_batch(true)).unwrap();

    let records = load_enrolment_dir(&dir, &SourceColumns::default()).unwrap();

    // The row without a district is skipped
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].date, day(0));
    assert_eq!(records[1].date, day(1));
    assert_eq!(records[0].key.district, "Mysuru");
    assert_eq!(records[0].key.pincode, "570001");
    assert_eq!(records[0].age_18_plus, 7);
    assert_eq!(records[1].age_0_5, 0);
}

#[test]
fn test_missing_adult_column_is_schema_error() {
    let dir = scratch_dir("enrolment-no-adults");
    write_parquet(&dir.join("part-0.parquet"), &enrolment_batch(false)).unwrap();

    let err = load_enrolment_dir(&dir, &SourceColumns::default()).unwrap_err();
    assert!(err.is_schema_error());
}

#[test]
fn test_missing_directory_is_not_schema_error() {
    let dir = scratch_dir("missing-parent").join("does-not-exist");
    let err = load_biometric_dir(&dir, &SourceColumns::default()).unwrap_err();
    assert!(!err.is_schema_error());
}

#[test]
fn test_write_anomaly_feed() {
    let (enrolment, biometric) = scenario();
    let report = AnomalyEngine::new(DetectionConfig::default())
        .unwrap()
        .run(&enrolment, &biometric);

    let dir = scratch_dir("anomaly-export");
    let path = dir.join("anomalies.parquet");
    assert!(write_anomalies(&path, &report.anomalies).unwrap());

    let batches = read_parquet(&path).unwrap();
    let rows: usize = batches.iter().map(RecordBatch::num_rows).sum();
    assert_eq!(rows, report.anomalies.len());

    let schema = batches[0].schema();
    let names: Vec<_> = schema.fields().iter().map(|f| f.name().as_str()).collect();
    assert_eq!(
        names,
        vec!["date", "state", "district", "type", "severity", "z_score"]
    );
    assert_eq!(schema.field(0).data_type(), &DataType::Date32);

    let types = batches[0]
        .column(3)
        .as_any()
        .downcast_ref::<StringArray>()
        .unwrap();
    assert_eq!(types.value(0), "GHOST_VILLAGE");
    assert_eq!(types.value(rows - 1), "MBU_CLIFF");
}

#[test]
fn test_empty_feeds_write_nothing() {
    let dir = scratch_dir("empty-export");
    let anomalies_path = dir.join("anomalies.parquet");
    let unified_path = dir.join("daily_unified.parquet");

    assert!(!write_anomalies(&anomalies_path, &[]).unwrap());
    assert!(!write_unified(&unified_path, &[]).unwrap());
    assert!(!anomalies_path.exists());
    assert!(!unified_path.exists());
}

#[test]
fn test_write_unified_feed() {
    let (enrolment, biometric) = scenario();
    let unified = merge_daily_counts(&enrolment, &biometric);

    let dir = scratch_dir("unified-export");
    let path = dir.join("daily_unified.parquet");
    assert!(write_unified(&path, &unified).unwrap());

    let batches = read_parquet(&path).unwrap();
    let rows: usize = batches.iter().map(RecordBatch::num_rows).sum();
    assert_eq!(rows, unified.len());
    assert!(batches[0].schema().index_of("bio_update_5_17").is_ok());
}
