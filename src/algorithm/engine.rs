//! End-to-end anomaly pipeline
//!
//! Runs both detector chains over one materialized record set and collects
//! every intermediate result alongside the normalized feed.

use std::time::Instant;

use log::{info, warn};

use crate::algorithm::baseline::{RegionBaseline, compute_adult_baseline};
use crate::algorithm::cliff::{MbuCliffEvent, detect_mbu_cliffs};
use crate::algorithm::ghost_village::{GhostVillageHit, detect_ghost_villages};
use crate::algorithm::mbu::{MbuDailyAggregate, compute_mbu_baseline};
use crate::algorithm::normalize::normalize_anomalies;
use crate::config::DetectionConfig;
use crate::error::{PulseError, Result};
use crate::models::{Anomaly, DailyBiometricRecord, DailyEnrolmentRecord};

/// Everything a single run produced
#[derive(Debug, Default)]
pub struct EngineReport {
    pub baselines: Vec<RegionBaseline>,
    pub ghost_villages: Vec<GhostVillageHit>,
    pub mbu_daily: Vec<MbuDailyAggregate>,
    pub mbu_cliffs: Vec<MbuCliffEvent>,
    pub anomalies: Vec<Anomaly>,
    /// Inputs that could not be used; their side of the pipeline is empty
    pub schema_errors: Vec<PulseError>,
}

impl EngineReport {
    /// Whether any input was rejected
    #[must_use]
    pub fn has_schema_errors(&self) -> bool {
        !self.schema_errors.is_empty()
    }
}

/// Baseline and anomaly engine bound to one set of detection parameters
#[derive(Debug, Clone)]
pub struct AnomalyEngine {
    config: DetectionConfig,
}

impl AnomalyEngine {
    /// Create an engine, rejecting unusable parameters
    pub fn new(config: DetectionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    #[must_use]
    pub const fn config(&self) -> &DetectionConfig {
        &self.config
    }

    /// Run both detector chains over typed records
    #[must_use]
    pub fn run(
        &self,
        enrolment: &[DailyEnrolmentRecord],
        biometric: &[DailyBiometricRecord],
    ) -> EngineReport {
        let start = Instant::now();
        let mut report = EngineReport::default();

        if !enrolment.is_empty() {
            report.baselines = compute_adult_baseline(enrolment, &self.config);
            report.ghost_villages =
                detect_ghost_villages(enrolment, &report.baselines, &self.config);
        }

        if !biometric.is_empty() {
            report.mbu_daily = compute_mbu_baseline(biometric, &self.config);
            report.mbu_cliffs = detect_mbu_cliffs(&report.mbu_daily, &self.config);
        }

        report.anomalies = normalize_anomalies(&report.ghost_villages, &report.mbu_cliffs);
        info!(
            "Anomaly run finished in {:?}: {} anomalies from {} enrolment and {} biometric records",
            start.elapsed(),
            report.anomalies.len(),
            enrolment.len(),
            biometric.len()
        );
        report
    }
}

/// Turn a schema error into an empty record set, keeping the error
///
/// Any other error is passed through.
pub fn recover_schema_error<T>(
    loaded: Result<Vec<T>>,
    source: &str,
    schema_errors: &mut Vec<PulseError>,
) -> Result<Vec<T>> {
    match loaded {
        Ok(records) => Ok(records),
        Err(e) if e.is_schema_error() => {
            warn!("Skipping {source} records: {e}");
            schema_errors.push(e);
            Ok(Vec::new())
        }
        Err(e) => Err(e),
    }
}
