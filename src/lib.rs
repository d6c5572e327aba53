//! Baseline computation and anomaly detection for district-level enrolment
//! and biometric-update feeds.
//!
//! The detection core lives in [`algorithm`] and works on typed, already
//! loaded records. [`loader`] and [`export`] are the Parquet record source and
//! sink around it.

pub mod algorithm;
pub mod config;
pub mod error;
pub mod export;
pub mod loader;
pub mod models;
pub mod utils;

// Re-export the most common types for easier use
// Core types
pub use config::{DetectionConfig, PulseConfig, SourceColumns};
pub use error::{PulseError, Result};
pub use models::{
    Anomaly, AnomalyType, DailyBiometricRecord, DailyEnrolmentRecord, Region, RegionKey,
    RegionalRecord, Severity,
};

// Detection operations
pub use algorithm::{
    AnomalyEngine, EngineReport, GhostVillageHit, MbuCliffEvent, MbuDailyAggregate,
    RegionBaseline, RunSummary, assess_mbu_days, compute_adult_baseline, compute_mbu_baseline,
    detect_ghost_villages, detect_mbu_cliffs, merge_daily_counts, normalize_anomalies,
};

// Record source and sink
pub use export::{write_anomalies, write_unified};
pub use loader::{load_biometric_dir, load_enrolment_dir};
