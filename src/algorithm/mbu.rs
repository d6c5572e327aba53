//! Rolling baseline of daily child biometric updates (MBU)
//!
//! Each region gets a trailing mean over the last `mbu_window_days` rows,
//! ordered by date. The window starts at a single row, so newly onboarded
//! regions still get a (noisier) baseline from their first day.

use chrono::NaiveDate;
use itertools::Itertools;
use log::info;
use serde::Serialize;

use crate::algorithm::aggregate::{RegionDailyCount, aggregate_biometric};
use crate::algorithm::grouping::{group_by_region, map_groups};
use crate::algorithm::window::TrailingWindow;
use crate::config::DetectionConfig;
use crate::models::{DailyBiometricRecord, Region};

/// Daily MBU count aligned with its trailing baseline
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MbuDailyAggregate {
    pub region: Region,
    pub date: NaiveDate,
    pub daily_mbu_count: u64,
    /// Mean of up to `mbu_window_days` rows ending at (and including) this one
    pub baseline_30d_avg: f64,
}

/// Trailing min-periods-1 mean of `counts`
#[must_use]
pub fn rolling_mean(counts: &[u64], window: usize) -> Vec<f64> {
    let mut trailing = TrailingWindow::new(window);
    counts
        .iter()
        .map(|&count| {
            trailing.push(count);
            trailing.mean().unwrap_or(count as f64)
        })
        .collect()
}

/// Aggregate biometric records per (region, date) and attach the rolling baseline
pub fn compute_mbu_baseline(
    records: &[DailyBiometricRecord],
    config: &DetectionConfig,
) -> Vec<MbuDailyAggregate> {
    baseline_from_daily(&aggregate_biometric(records), config)
}

/// Attach the rolling baseline to already aggregated daily counts
///
/// Expects at most one row per (region, date). Output is ordered by date and
/// then region.
pub fn baseline_from_daily(
    daily: &[RegionDailyCount],
    config: &DetectionConfig,
) -> Vec<MbuDailyAggregate> {
    if daily.is_empty() || !config.is_usable("MBU baseline") {
        return Vec::new();
    }

    let groups = group_by_region(daily, |d| d.region.as_key());
    let window = config.mbu_window_days;
    let partitions = map_groups(groups, config.parallel, |(_, mut rows)| {
        rows.sort_by_key(|r| r.date);
        let counts = rows.iter().map(|r| r.count).collect_vec();
        rows.into_iter()
            .zip(rolling_mean(&counts, window))
            .map(|(row, baseline)| MbuDailyAggregate {
                region: row.region.clone(),
                date: row.date,
                daily_mbu_count: row.count,
                baseline_30d_avg: baseline,
            })
            .collect_vec()
    });

    let aggregates = partitions
        .into_iter()
        .flatten()
        .sorted_by(|a, b| a.date.cmp(&b.date).then_with(|| a.region.cmp(&b.region)))
        .collect_vec();

    info!(
        "Computed {}-row MBU baselines for {} region-days",
        window,
        aggregates.len()
    );
    aggregates
}
