//! The normalized anomaly handed to the sink

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::region::Region;
use crate::models::types::{AnomalyType, Severity};

/// One flagged (region, date) with its classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anomaly {
    pub date: NaiveDate,
    pub region: Region,
    pub anomaly_type: AnomalyType,
    pub severity: Severity,
    /// 0.0 for anomaly types without a distributional score
    pub z_score: f64,
}

impl Anomaly {
    /// Create an anomaly tagged with the default severity of its type
    #[must_use]
    pub fn new(date: NaiveDate, region: Region, anomaly_type: AnomalyType, z_score: f64) -> Self {
        Self {
            date,
            region,
            anomaly_type,
            severity: anomaly_type.severity(),
            z_score,
        }
    }
}
