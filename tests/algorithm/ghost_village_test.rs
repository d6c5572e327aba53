//! Tests for adult-enrolment baselines and ghost-village detection

use district_pulse::{
    DetectionConfig, Region, compute_adult_baseline, detect_ghost_villages,
};

use crate::utils::{day, enrolment};

#[test]
fn test_single_spike_produces_one_hit() {
    let mut records: Vec<_> = (0..30).map(|d| enrolment(d, "Mysuru", 5)).collect();
    records.push(enrolment(30, "Mysuru", 505));

    let config = DetectionConfig::default();
    let baselines = compute_adult_baseline(&records, &config);
    assert_eq!(baselines.len(), 1);
    // The spike inflates its own baseline
    assert!(baselines[0].mean_adult_daily > 5.0);
    assert!(baselines[0].stddev_adult_daily > 0.0);

    let hits = detect_ghost_villages(&records, &baselines, &config);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].date, day(30));
    assert_eq!(hits[0].region, Region::new("Karnataka", "Mysuru"));
    assert!(hits[0].z_score > 3.0);
}

#[test]
fn test_constant_series_scores_zero() {
    let records: Vec<_> = (0..10).map(|d| enrolment(d, "Udupi", 9)).collect();
    let config = DetectionConfig::default();
    let baselines = compute_adult_baseline(&records, &config);

    assert_eq!(baselines[0].stddev_adult_daily, 0.0);
    assert!(detect_ghost_villages(&records, &baselines, &config).is_empty());
}

#[test]
fn test_single_observation_region() {
    // One day means no sample deviation; epsilon alone scales the score
    let records = vec![enrolment(0, "Kodagu", 12)];
    let config = DetectionConfig::default();
    let baselines = compute_adult_baseline(&records, &config);

    assert_eq!(baselines[0].observations, 1);
    assert_eq!(baselines[0].stddev_adult_daily, 0.0);
    assert!(detect_ghost_villages(&records, &baselines, &config).is_empty());
}

#[test]
fn test_hits_sorted_by_z_descending() {
    let mut records = Vec::new();
    for district in ["Mysuru", "Hassan"] {
        records.extend((0..40).map(|d| enrolment(d, district, 5 + (d % 2) as u32)));
    }
    records.push(enrolment(40, "Mysuru", 300));
    records.push(enrolment(40, "Hassan", 900));
    records.push(enrolment(41, "Hassan", 400));

    let config = DetectionConfig::default();
    let baselines = compute_adult_baseline(&records, &config);
    let hits = detect_ghost_villages(&records, &baselines, &config);

    // Hassan's second spike widens its own deviation enough to hide it
    assert_eq!(hits.len(), 2);
    assert!(hits.windows(2).all(|w| w[0].z_score >= w[1].z_score));
    assert_eq!(hits[0].region.district, "Mysuru");
    assert_eq!(hits[0].age_18_plus, 300);
    assert_eq!(hits[1].region.district, "Hassan");
    assert_eq!(hits[1].age_18_plus, 900);
}

#[test]
fn test_threshold_is_configurable() {
    let mut records: Vec<_> = (0..20).map(|d| enrolment(d, "Mysuru", 10 + (d % 3) as u32)).collect();
    records.push(enrolment(20, "Mysuru", 14));

    let strict = DetectionConfig::default();
    let baselines = compute_adult_baseline(&records, &strict);
    assert!(detect_ghost_villages(&records, &baselines, &strict).is_empty());

    let loose = DetectionConfig {
        z_score_threshold: 1.5,
        ..Default::default()
    };
    let hits = detect_ghost_villages(&records, &baselines, &loose);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].date, day(20));
}

#[test]
fn test_empty_inputs() {
    let config = DetectionConfig::default();
    assert!(compute_adult_baseline(&[], &config).is_empty());
    assert!(detect_ghost_villages(&[], &[], &config).is_empty());

    let records = vec![enrolment(0, "Mysuru", 5)];
    assert!(detect_ghost_villages(&records, &[], &config).is_empty());
}
