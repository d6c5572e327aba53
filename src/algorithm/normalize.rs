//! Projection of detector output onto the common anomaly schema

use crate::algorithm::cliff::MbuCliffEvent;
use crate::algorithm::ghost_village::GhostVillageHit;
use crate::models::{Anomaly, AnomalyType};

/// A detector result that can be reported as an [`Anomaly`]
pub trait AnomalySource {
    fn to_anomaly(&self) -> Anomaly;
}

impl AnomalySource for GhostVillageHit {
    fn to_anomaly(&self) -> Anomaly {
        Anomaly::new(
            self.date,
            self.region.clone(),
            AnomalyType::GhostVillage,
            self.z_score,
        )
    }
}

impl AnomalySource for MbuCliffEvent {
    fn to_anomaly(&self) -> Anomaly {
        Anomaly::new(self.date, self.region.clone(), AnomalyType::MbuCliff, 0.0)
    }
}

/// Ghost-village anomalies in their z-score order, followed by MBU cliffs in
/// detector order. No global re-sort is applied.
#[must_use]
pub fn normalize_anomalies(
    ghost_villages: &[GhostVillageHit],
    mbu_cliffs: &[MbuCliffEvent],
) -> Vec<Anomaly> {
    let mut anomalies = Vec::with_capacity(ghost_villages.len() + mbu_cliffs.len());
    anomalies.extend(ghost_villages.iter().map(AnomalySource::to_anomaly));
    anomalies.extend(mbu_cliffs.iter().map(AnomalySource::to_anomaly));
    anomalies
}
