//! Run statistics and summaries
//!
//! Headline numbers for a finished run, in the shape the operations dashboard
//! reports them.

use std::fmt;

use rustc_hash::FxHashSet;

use crate::algorithm::engine::EngineReport;
use crate::models::{AnomalyType, DailyBiometricRecord, DailyEnrolmentRecord, Severity};

/// Headline counts for one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub enrolment_records: usize,
    pub biometric_records: usize,
    /// Enrolments across all three age bands
    pub total_enrolments: u64,
    /// Child (5-17) biometric updates
    pub total_child_bio_updates: u64,
    pub regions_baselined: usize,
    pub critical_anomalies: usize,
    pub high_anomalies: usize,
    pub ghost_village_count: usize,
    pub mbu_cliff_count: usize,
    /// Distinct (state, district) pairs with at least one anomaly
    pub affected_districts: usize,
}

impl RunSummary {
    /// Calculate the summary of a report and the records it was computed from
    #[must_use]
    pub fn calculate(
        report: &EngineReport,
        enrolment: &[DailyEnrolmentRecord],
        biometric: &[DailyBiometricRecord],
    ) -> Self {
        let count_severity =
            |severity: Severity| report.anomalies.iter().filter(|a| a.severity == severity).count();
        let count_type = |anomaly_type: AnomalyType| {
            report
                .anomalies
                .iter()
                .filter(|a| a.anomaly_type == anomaly_type)
                .count()
        };

        let affected_districts = report
            .anomalies
            .iter()
            .map(|a| a.region.as_key())
            .collect::<FxHashSet<_>>()
            .len();

        Self {
            enrolment_records: enrolment.len(),
            biometric_records: biometric.len(),
            total_enrolments: enrolment.iter().map(DailyEnrolmentRecord::total).sum(),
            total_child_bio_updates: biometric
                .iter()
                .map(|r| u64::from(r.bio_update_5_17))
                .sum(),
            regions_baselined: report.baselines.len(),
            critical_anomalies: count_severity(Severity::Critical),
            high_anomalies: count_severity(Severity::High),
            ghost_village_count: count_type(AnomalyType::GhostVillage),
            mbu_cliff_count: count_type(AnomalyType::MbuCliff),
            affected_districts,
        }
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Anomaly Run Summary:")?;
        writeln!(f, "  Enrolment Records: {}", self.enrolment_records)?;
        writeln!(f, "  Biometric Records: {}", self.biometric_records)?;
        writeln!(f, "  Total Enrolments: {}", self.total_enrolments)?;
        writeln!(f, "  Child Biometric Updates: {}", self.total_child_bio_updates)?;
        writeln!(f, "  Regions Baselined: {}", self.regions_baselined)?;
        writeln!(f, "  Critical Anomalies: {}", self.critical_anomalies)?;
        writeln!(f, "  High Anomalies: {}", self.high_anomalies)?;
        writeln!(f, "    Ghost Village: {}", self.ghost_village_count)?;
        writeln!(f, "    MBU Cliff: {}", self.mbu_cliff_count)?;
        write!(f, "  Affected Districts: {}", self.affected_districts)
    }
}
