//! Daily input records
//!
//! Records arrive already parsed and typed. The engine never mutates them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::region::RegionKey;

/// Access to the location and date shared by every daily record
pub trait RegionalRecord {
    fn date(&self) -> NaiveDate;
    fn key(&self) -> &RegionKey;

    fn state(&self) -> &str {
        &self.key().state
    }

    fn district(&self) -> &str {
        &self.key().district
    }

    fn pincode(&self) -> &str {
        &self.key().pincode
    }

    /// Borrowed (state, district) grouping key
    fn region_key(&self) -> (&str, &str) {
        (self.state(), self.district())
    }
}

/// Enrolments for one location on one day, split by age band
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyEnrolmentRecord {
    pub date: NaiveDate,
    pub key: RegionKey,
    pub age_0_5: u32,
    pub age_5_17: u32,
    pub age_18_plus: u32,
}

impl DailyEnrolmentRecord {
    /// Total enrolments across all age bands
    #[must_use]
    pub fn total(&self) -> u64 {
        u64::from(self.age_0_5) + u64::from(self.age_5_17) + u64::from(self.age_18_plus)
    }
}

impl RegionalRecord for DailyEnrolmentRecord {
    fn date(&self) -> NaiveDate {
        self.date
    }

    fn key(&self) -> &RegionKey {
        &self.key
    }
}

/// Biometric updates for one location on one day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyBiometricRecord {
    pub date: NaiveDate,
    pub key: RegionKey,
    /// Child mandatory biometric updates
    pub bio_update_5_17: u32,
    pub bio_update_17_plus: u32,
}

impl RegionalRecord for DailyBiometricRecord {
    fn date(&self) -> NaiveDate {
        self.date
    }

    fn key(&self) -> &RegionKey {
        &self.key
    }
}
