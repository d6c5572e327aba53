//! Domain models for district-level enrolment monitoring
//!
//! Input records handed to the engine by the record source, the region
//! identity used for grouping, and the normalized anomaly the engine emits.

pub mod anomaly;
pub mod records;
pub mod region;
pub mod types;

// Re-export commonly used types
pub use anomaly::Anomaly;
pub use records::{DailyBiometricRecord, DailyEnrolmentRecord, RegionalRecord};
pub use region::{Region, RegionKey};
pub use types::{AnomalyType, Severity};
