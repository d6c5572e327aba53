//! Ghost-village detection
//!
//! Scores every enrolment record against its region's adult baseline and keeps
//! the one-sided outliers. Only spikes above the baseline are reported.

use chrono::NaiveDate;
use log::info;
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::algorithm::baseline::RegionBaseline;
use crate::algorithm::grouping::RegionRef;
use crate::config::DetectionConfig;
use crate::models::{DailyEnrolmentRecord, Region, RegionalRecord};

/// An enrolment day whose adult count is implausibly high for its region
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GhostVillageHit {
    pub date: NaiveDate,
    pub region: Region,
    pub age_18_plus: u32,
    pub z_score: f64,
}

/// Distance of `value` from `mean` in units of `stddev + epsilon`
#[must_use]
pub fn z_score(value: f64, mean: f64, stddev: f64, epsilon: f64) -> f64 {
    (value - mean) / (stddev + epsilon)
}

/// Flag records whose z-score is strictly above the configured threshold
///
/// Records from regions without a baseline are ignored. The result is sorted
/// by z-score, most severe first.
pub fn detect_ghost_villages(
    records: &[DailyEnrolmentRecord],
    baselines: &[RegionBaseline],
    config: &DetectionConfig,
) -> Vec<GhostVillageHit> {
    if records.is_empty() || baselines.is_empty() || !config.is_usable("ghost-village detection") {
        return Vec::new();
    }

    let index: FxHashMap<RegionRef<'_>, &RegionBaseline> =
        baselines.iter().map(|b| (b.region.as_key(), b)).collect();

    let score = |record: &DailyEnrolmentRecord| -> Option<GhostVillageHit> {
        let baseline = index.get(&record.region_key())?;
        let z = z_score(
            f64::from(record.age_18_plus),
            baseline.mean_adult_daily,
            baseline.stddev_adult_daily,
            config.stddev_epsilon,
        );
        (z > config.z_score_threshold).then(|| GhostVillageHit {
            date: record.date,
            region: baseline.region.clone(),
            age_18_plus: record.age_18_plus,
            z_score: z,
        })
    };

    let mut hits: Vec<GhostVillageHit> = if config.parallel {
        records.par_iter().filter_map(|r| score(r)).collect()
    } else {
        records.iter().filter_map(|r| score(r)).collect()
    };

    // Ties keep a fixed order so repeated runs produce identical output
    hits.sort_by(|a, b| {
        b.z_score
            .total_cmp(&a.z_score)
            .then_with(|| a.date.cmp(&b.date))
            .then_with(|| a.region.cmp(&b.region))
    });

    info!("Found {} ghost-village anomalies", hits.len());
    hits
}
