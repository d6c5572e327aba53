//! End-to-end tests of the anomaly engine

use district_pulse::algorithm::recover_schema_error;
use district_pulse::{
    AnomalyEngine, AnomalyType, DailyEnrolmentRecord, DetectionConfig, PulseError, RunSummary,
    Severity, merge_daily_counts,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::utils::{SCENARIO_DAYS, day, scenario};

fn engine() -> AnomalyEngine {
    AnomalyEngine::new(DetectionConfig::default()).unwrap()
}

#[test]
fn test_scenario_anomaly_feed() {
    let (enrolment, biometric) = scenario();
    let report = engine().run(&enrolment, &biometric);

    assert_eq!(report.baselines.len(), 5);
    assert_eq!(report.mbu_daily.len(), 5 * SCENARIO_DAYS as usize);
    assert_eq!(report.ghost_villages.len(), 3);
    assert_eq!(report.mbu_cliffs.len(), 3);
    assert_eq!(report.anomalies.len(), 6);

    // Ghost villages first, most severe spike first
    let ghost: Vec<_> = report.anomalies[..3].iter().collect();
    assert!(ghost.iter().all(|a| a.anomaly_type == AnomalyType::GhostVillage));
    assert!(ghost.iter().all(|a| a.severity == Severity::Critical));
    assert!(ghost.iter().all(|a| a.region.district == "District_1"));
    assert_eq!(ghost[0].date, day(SCENARIO_DAYS - 1));
    assert!(ghost.windows(2).all(|w| w[0].z_score >= w[1].z_score));

    // Then cliffs, in date order
    let cliffs: Vec<_> = report.anomalies[3..].iter().collect();
    assert!(cliffs.iter().all(|a| a.anomaly_type == AnomalyType::MbuCliff));
    assert!(cliffs.iter().all(|a| a.severity == Severity::High && a.z_score == 0.0));
    assert!(cliffs.iter().all(|a| a.region.district == "District_2"));
    let cliff_dates: Vec<_> = cliffs.iter().map(|a| a.date).collect();
    assert_eq!(
        cliff_dates,
        vec![day(SCENARIO_DAYS - 3), day(SCENARIO_DAYS - 2), day(SCENARIO_DAYS - 1)]
    );
}

#[test]
fn test_every_anomaly_matches_an_input_record() {
    let (enrolment, biometric) = scenario();
    let report = engine().run(&enrolment, &biometric);

    for anomaly in &report.anomalies {
        let seen = match anomaly.anomaly_type {
            AnomalyType::GhostVillage => enrolment.iter().any(|r| {
                r.date == anomaly.date && r.key.district == anomaly.region.district
            }),
            AnomalyType::MbuCliff => biometric.iter().any(|r| {
                r.date == anomaly.date && r.key.district == anomaly.region.district
            }),
        };
        assert!(seen, "anomaly without a source record: {anomaly:?}");
    }
}

#[test]
fn test_runs_are_idempotent_and_order_invariant() {
    let (enrolment, biometric) = scenario();
    let first = engine().run(&enrolment, &biometric);
    let second = engine().run(&enrolment, &biometric);
    assert_eq!(first.anomalies, second.anomalies);

    let mut rng = StdRng::seed_from_u64(42);
    let mut shuffled_enrolment = enrolment.clone();
    let mut shuffled_biometric = biometric.clone();
    shuffled_enrolment.shuffle(&mut rng);
    shuffled_biometric.shuffle(&mut rng);

    let shuffled = engine().run(&shuffled_enrolment, &shuffled_biometric);
    assert_eq!(first.anomalies, shuffled.anomalies);
    assert_eq!(first.mbu_daily, shuffled.mbu_daily);
}

#[test]
fn test_parallel_matches_sequential() {
    let (enrolment, biometric) = scenario();
    let parallel = engine().run(&enrolment, &biometric);
    let sequential = AnomalyEngine::new(DetectionConfig::default().sequential())
        .unwrap()
        .run(&enrolment, &biometric);

    assert_eq!(parallel.anomalies, sequential.anomalies);
    assert_eq!(parallel.baselines, sequential.baselines);
}

#[test]
fn test_one_sided_inputs() {
    let (enrolment, biometric) = scenario();

    let only_enrolment = engine().run(&enrolment, &[]);
    assert_eq!(only_enrolment.anomalies.len(), 3);
    assert!(only_enrolment.mbu_daily.is_empty());

    let only_biometric = engine().run(&[], &biometric);
    assert_eq!(only_biometric.anomalies.len(), 3);
    assert!(only_biometric.baselines.is_empty());
}

#[test]
fn test_schema_error_is_reported_not_fatal() {
    let (_, biometric) = scenario();
    let mut schema_errors = Vec::new();
    let enrolment = recover_schema_error::<DailyEnrolmentRecord>(
        Err(PulseError::missing_column("age_18_greater")),
        "enrolment",
        &mut schema_errors,
    )
    .unwrap();
    let biometric = recover_schema_error(Ok(biometric), "biometric", &mut schema_errors).unwrap();

    let report = engine().run(&enrolment, &biometric);

    assert_eq!(schema_errors.len(), 1);
    assert!(report.ghost_villages.is_empty());
    assert_eq!(report.mbu_cliffs.len(), 3);
}

#[test]
fn test_summary_and_unified_export() {
    let (enrolment, biometric) = scenario();
    let report = engine().run(&enrolment, &biometric);

    let summary = RunSummary::calculate(&report, &enrolment, &biometric);
    assert_eq!(summary.critical_anomalies, 3);
    assert_eq!(summary.high_anomalies, 3);
    assert_eq!(summary.affected_districts, 2);
    assert_eq!(summary.regions_baselined, 5);

    let unified = merge_daily_counts(&enrolment, &biometric);
    assert_eq!(unified.len(), 5 * SCENARIO_DAYS as usize);
    let enrolled: u64 = unified
        .iter()
        .map(|r| r.age_0_5 + r.age_5_17 + r.age_18_plus)
        .sum();
    assert_eq!(enrolled, summary.total_enrolments);
}
