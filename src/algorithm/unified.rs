//! Unified daily export
//!
//! Enrolment and biometric counts summed per (date, state, district, pincode)
//! and full-outer-joined on that key. A side with no row for a key
//! contributes zeros.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{DailyBiometricRecord, DailyEnrolmentRecord, RegionalRecord};

/// One location-day with every count from both feeds
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UnifiedDailyRow {
    pub date: NaiveDate,
    pub state: String,
    pub district: String,
    pub pincode: String,
    pub age_0_5: u64,
    pub age_5_17: u64,
    pub age_18_plus: u64,
    pub bio_update_5_17: u64,
    pub bio_update_17_plus: u64,
}

type LocationDay<'a> = (NaiveDate, &'a str, &'a str, &'a str);

fn location_day<R: RegionalRecord>(record: &R) -> LocationDay<'_> {
    (
        record.date(),
        record.state(),
        record.district(),
        record.pincode(),
    )
}

fn row_for<'m, 'a>(
    rows: &'m mut BTreeMap<LocationDay<'a>, UnifiedDailyRow>,
    key: LocationDay<'a>,
) -> &'m mut UnifiedDailyRow {
    rows.entry(key).or_insert_with(|| UnifiedDailyRow {
        date: key.0,
        state: key.1.to_string(),
        district: key.2.to_string(),
        pincode: key.3.to_string(),
        ..Default::default()
    })
}

/// Merge both feeds into one row per location-day, ordered by that key
#[must_use]
pub fn merge_daily_counts(
    enrolment: &[DailyEnrolmentRecord],
    biometric: &[DailyBiometricRecord],
) -> Vec<UnifiedDailyRow> {
    let mut rows: BTreeMap<LocationDay<'_>, UnifiedDailyRow> = BTreeMap::new();

    for record in enrolment {
        let row = row_for(&mut rows, location_day(record));
        row.age_0_5 += u64::from(record.age_0_5);
        row.age_5_17 += u64::from(record.age_5_17);
        row.age_18_plus += u64::from(record.age_18_plus);
    }

    for record in biometric {
        let row = row_for(&mut rows, location_day(record));
        row.bio_update_5_17 += u64::from(record.bio_update_5_17);
        row.bio_update_17_plus += u64::from(record.bio_update_17_plus);
    }

    rows.into_values().collect()
}
