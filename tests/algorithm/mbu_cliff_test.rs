//! Tests for the rolling MBU baseline and cliff detection

use district_pulse::algorithm::MbuDailyAggregate;
use district_pulse::{
    DailyBiometricRecord, DetectionConfig, Region, RegionKey, assess_mbu_days,
    compute_mbu_baseline, detect_mbu_cliffs,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::utils::{biometric, day};

fn steady_then_drop(steady_days: u64, drop_days: u64) -> Vec<DailyBiometricRecord> {
    (0..steady_days + drop_days)
        .map(|d| biometric(d, "Mysuru", if d < steady_days { 50 } else { 5 }))
        .collect()
}

#[test]
fn test_third_low_day_confirms_cliff() {
    let config = DetectionConfig::default();
    let aggregates = compute_mbu_baseline(&steady_then_drop(30, 3), &config);
    let days = assess_mbu_days(&aggregates, &config);

    assert_eq!(days[30].consecutive_low_days, 1);
    assert_eq!(days[31].consecutive_low_days, 2);
    assert_eq!(days[32].consecutive_low_days, 3);

    let events = detect_mbu_cliffs(&aggregates, &config);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].date, day(32));
}

#[test]
fn test_continued_drop_emits_overlapping_events() {
    let config = DetectionConfig::default();
    let aggregates = compute_mbu_baseline(&steady_then_drop(30, 4), &config);
    let events = detect_mbu_cliffs(&aggregates, &config);

    let dates: Vec<_> = events.iter().map(|e| e.date).collect();
    assert_eq!(dates, vec![day(32), day(33)]);
    assert!(events.iter().all(|e| e.region == Region::new("Karnataka", "Mysuru")));
}

#[test]
fn test_baseline_defined_from_first_day() {
    let config = DetectionConfig::default();
    let aggregates = compute_mbu_baseline(&steady_then_drop(5, 0), &config);

    assert_eq!(aggregates.len(), 5);
    assert_eq!(aggregates[0].baseline_30d_avg, 50.0);
    assert!(aggregates.iter().all(|a| a.baseline_30d_avg.is_finite()));
}

#[test]
fn test_pincodes_summed_before_baseline() {
    let records: Vec<_> = (0..10)
        .flat_map(|d| {
            ["570001", "570002"].into_iter().map(move |pincode| DailyBiometricRecord {
                date: day(d),
                key: RegionKey::new("Karnataka", "Mysuru", pincode),
                bio_update_5_17: 20,
                bio_update_17_plus: 0,
            })
        })
        .collect();

    let aggregates = compute_mbu_baseline(&records, &DetectionConfig::default());
    assert_eq!(aggregates.len(), 10);
    assert!(aggregates.iter().all(|a| a.daily_mbu_count == 40));
}

#[test]
fn test_regions_do_not_share_runs() {
    // Interleaved low days across two regions never add up to a cliff
    let mut records = Vec::new();
    for d in 0..40_u64 {
        let mysuru_low = d >= 30 && d % 2 == 0;
        let udupi_low = d >= 30 && d % 2 == 1;
        records.push(biometric(d, "Mysuru", if mysuru_low { 1 } else { 60 }));
        records.push(biometric(d, "Udupi", if udupi_low { 1 } else { 60 }));
    }

    assert!(detect_mbu_cliffs(
        &compute_mbu_baseline(&records, &DetectionConfig::default()),
        &DetectionConfig::default()
    )
    .is_empty());
}

#[test]
fn test_consecutive_count_bounded() {
    let mut rng = StdRng::seed_from_u64(17);
    let config = DetectionConfig::default();
    let aggregates: Vec<MbuDailyAggregate> = (0..500)
        .map(|d| MbuDailyAggregate {
            region: Region::new("Karnataka", "Mysuru"),
            date: day(d),
            daily_mbu_count: rng.random_range(0..100),
            baseline_30d_avg: 60.0,
        })
        .collect();

    let days = assess_mbu_days(&aggregates, &config);
    for (i, assessed) in days.iter().enumerate() {
        assert!(assessed.consecutive_low_days <= 3);
        let run_of_three = i >= 2 && days[i - 2..=i].iter().all(|d| d.is_low);
        assert_eq!(assessed.consecutive_low_days == 3, run_of_three);
    }
}

#[test]
fn test_custom_window_and_run_length() {
    let config = DetectionConfig {
        mbu_window_days: 5,
        consecutive_low_days: 2,
        ..Default::default()
    };
    let aggregates = compute_mbu_baseline(&steady_then_drop(10, 2), &config);
    let events = detect_mbu_cliffs(&aggregates, &config);

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].date, day(11));
    assert_eq!(events[0].consecutive_low_days, 2);
}
