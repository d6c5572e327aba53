//! Collapse per-location records into per-(region, date) counts

use chrono::NaiveDate;
use itertools::Itertools;
use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::models::{DailyBiometricRecord, Region, RegionalRecord};

/// Summed count for one region on one day
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionDailyCount {
    pub region: Region,
    pub date: NaiveDate,
    pub count: u64,
}

/// Sum `count` over every record sharing a (state, district, date)
///
/// Pincodes within a district are folded together. The result is ordered by
/// date and then region.
pub fn aggregate_daily<R, F>(records: &[R], count: F) -> Vec<RegionDailyCount>
where
    R: RegionalRecord,
    F: Fn(&R) -> u64,
{
    let mut sums: FxHashMap<(&str, &str, NaiveDate), u64> = FxHashMap::default();
    for record in records {
        *sums
            .entry((record.state(), record.district(), record.date()))
            .or_insert(0) += count(record);
    }

    sums.into_iter()
        .map(|((state, district, date), count)| RegionDailyCount {
            region: Region::new(state, district),
            date,
            count,
        })
        .sorted_unstable_by(|a, b| a.date.cmp(&b.date).then_with(|| a.region.cmp(&b.region)))
        .collect()
}

/// Daily child biometric updates per region
pub fn aggregate_biometric(records: &[DailyBiometricRecord]) -> Vec<RegionDailyCount> {
    aggregate_daily(records, |r| u64::from(r.bio_update_5_17))
}
