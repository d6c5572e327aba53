//! MBU-cliff detection
//!
//! A day is low when its count falls strictly below `low_ratio` of the rolling
//! baseline. A cliff is confirmed on every row that closes a run of
//! `consecutive_low_days` low rows, so a long collapse emits one event per
//! qualifying day rather than one per episode.

use chrono::NaiveDate;
use itertools::Itertools;
use log::{debug, info};
use serde::Serialize;

use crate::algorithm::grouping::{group_by_region, map_groups};
use crate::algorithm::mbu::MbuDailyAggregate;
use crate::algorithm::window::TrailingWindow;
use crate::config::DetectionConfig;
use crate::models::Region;

/// Low-day flag and trailing run count for one region-day
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MbuDayAssessment {
    pub region: Region,
    pub date: NaiveDate,
    pub daily_mbu_count: u64,
    pub baseline_30d_avg: f64,
    pub is_low: bool,
    /// Low rows among this one and the preceding `consecutive_low_days - 1`
    pub consecutive_low_days: usize,
}

/// A confirmed sustained drop
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MbuCliffEvent {
    pub region: Region,
    pub date: NaiveDate,
    pub daily_mbu_count: u64,
    pub baseline_30d_avg: f64,
    pub consecutive_low_days: usize,
}

impl From<MbuDayAssessment> for MbuCliffEvent {
    fn from(day: MbuDayAssessment) -> Self {
        Self {
            region: day.region,
            date: day.date,
            daily_mbu_count: day.daily_mbu_count,
            baseline_30d_avg: day.baseline_30d_avg,
            consecutive_low_days: day.consecutive_low_days,
        }
    }
}

/// Whether `count` is strictly below `ratio` of `baseline`
#[must_use]
pub fn is_low_day(count: u64, baseline: f64, ratio: f64) -> bool {
    (count as f64) < baseline * ratio
}

/// Flag low days and count trailing low runs, per region in date order
///
/// Output is ordered by date and then region.
pub fn assess_mbu_days(
    aggregates: &[MbuDailyAggregate],
    config: &DetectionConfig,
) -> Vec<MbuDayAssessment> {
    if aggregates.is_empty() || !config.is_usable("MBU day assessment") {
        return Vec::new();
    }

    let groups = group_by_region(aggregates, |a| a.region.as_key());
    let partitions = map_groups(groups, config.parallel, |(_, mut rows)| {
        rows.sort_by_key(|r| r.date);
        let mut run = TrailingWindow::new(config.consecutive_low_days);
        rows.into_iter()
            .map(|row| {
                let is_low = is_low_day(row.daily_mbu_count, row.baseline_30d_avg, config.low_ratio);
                run.push(u64::from(is_low));
                MbuDayAssessment {
                    region: row.region.clone(),
                    date: row.date,
                    daily_mbu_count: row.daily_mbu_count,
                    baseline_30d_avg: row.baseline_30d_avg,
                    is_low,
                    consecutive_low_days: run.sum() as usize,
                }
            })
            .collect_vec()
    });

    partitions
        .into_iter()
        .flatten()
        .sorted_by(|a, b| a.date.cmp(&b.date).then_with(|| a.region.cmp(&b.region)))
        .collect_vec()
}

/// Emit a cliff event for every row closing a full run of low days
pub fn detect_mbu_cliffs(
    aggregates: &[MbuDailyAggregate],
    config: &DetectionConfig,
) -> Vec<MbuCliffEvent> {
    let required = config.consecutive_low_days;
    let events = assess_mbu_days(aggregates, config)
        .into_iter()
        .filter(|day| day.consecutive_low_days >= required)
        .map(MbuCliffEvent::from)
        .collect_vec();

    for event in &events {
        debug!(
            "MBU cliff in {} on {}: {} updates against baseline {:.1}",
            event.region, event.date, event.daily_mbu_count, event.baseline_30d_avg
        );
    }
    info!("Found {} MBU cliff events", events.len());
    events
}
