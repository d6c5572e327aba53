//! Anomaly classification enums

use std::fmt;

use serde::{Deserialize, Serialize};

/// Class of operational anomaly
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnomalyType {
    /// Adult enrolment spiking far above the region's norm
    GhostVillage,
    /// Sustained collapse of child biometric updates
    MbuCliff,
}

impl AnomalyType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GhostVillage => "GHOST_VILLAGE",
            Self::MbuCliff => "MBU_CLIFF",
        }
    }

    /// Severity every anomaly of this type is reported with
    #[must_use]
    pub const fn severity(self) -> Severity {
        match self {
            Self::GhostVillage => Severity::Critical,
            Self::MbuCliff => Severity::High,
        }
    }
}

impl fmt::Display for AnomalyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity tag attached to an anomaly
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    High,
    Critical,
}

impl Severity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
