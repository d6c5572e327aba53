//! Region identity
//!
//! Statistics are grouped by (state, district). The pincode is carried on
//! every record but never used as a grouping key.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A reporting unit: one district within a state
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Region {
    pub state: String,
    pub district: String,
}

impl Region {
    #[must_use]
    pub fn new(state: impl Into<String>, district: impl Into<String>) -> Self {
        Self {
            state: state.into(),
            district: district.into(),
        }
    }

    /// Borrowed grouping key for hash lookups without cloning
    #[must_use]
    pub fn as_key(&self) -> (&str, &str) {
        (&self.state, &self.district)
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.state, self.district)
    }
}

/// Full location of a record, including the pincode
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RegionKey {
    pub state: String,
    pub district: String,
    pub pincode: String,
}

impl RegionKey {
    #[must_use]
    pub fn new(
        state: impl Into<String>,
        district: impl Into<String>,
        pincode: impl Into<String>,
    ) -> Self {
        Self {
            state: state.into(),
            district: district.into(),
            pincode: pincode.into(),
        }
    }
}

impl fmt::Display for RegionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} ({})", self.state, self.district, self.pincode)
    }
}
