//! Adult-enrolment baselines
//!
//! Mean and sample standard deviation of `age_18_plus` per region over the
//! full history of the run. The baseline includes the days it is later used
//! to judge, so a spike inflates its own baseline.

use log::{debug, info};
use serde::Serialize;

use crate::algorithm::grouping::{group_by_region, map_groups};
use crate::config::DetectionConfig;
use crate::models::{DailyEnrolmentRecord, Region, RegionalRecord};

/// Expected daily adult enrolment for a region
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionBaseline {
    pub region: Region,
    pub mean_adult_daily: f64,
    /// Zero when the region has a single observation
    pub stddev_adult_daily: f64,
    pub observations: usize,
}

/// Arithmetic mean and sample (n - 1) standard deviation
///
/// Returns `None` for an empty slice. The standard deviation is `None` when
/// fewer than two values exist.
#[must_use]
pub fn mean_and_sample_std(values: &[f64]) -> Option<(f64, Option<f64>)> {
    if values.is_empty() {
        return None;
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    if values.len() < 2 {
        return Some((mean, None));
    }

    let sq_diff: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    Some((mean, Some((sq_diff / (n - 1.0)).sqrt())))
}

/// Compute one baseline per (state, district), ordered by region
pub fn compute_adult_baseline(
    records: &[DailyEnrolmentRecord],
    config: &DetectionConfig,
) -> Vec<RegionBaseline> {
    if records.is_empty() {
        return Vec::new();
    }

    let groups = group_by_region(records, |r| r.region_key());
    let baselines = map_groups(groups, config.parallel, |((state, district), rows)| {
        let values: Vec<f64> = rows.iter().map(|r| f64::from(r.age_18_plus)).collect();
        let (mean, stddev) = mean_and_sample_std(&values).unwrap_or((0.0, None));
        if stddev.is_none() {
            debug!("{state}/{district} has a single observation, using zero standard deviation");
        }

        RegionBaseline {
            region: Region::new(state, district),
            mean_adult_daily: mean,
            stddev_adult_daily: stddev.unwrap_or(0.0),
            observations: values.len(),
        }
    });

    info!(
        "Computed adult enrolment baselines for {} regions from {} records",
        baselines.len(),
        records.len()
    );
    baselines
}
