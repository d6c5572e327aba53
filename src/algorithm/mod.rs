//! Baseline computation and anomaly detection
//!
//! Every operation here is a pure function from record sets to result sets.
//! Work is independent per (state, district) region; only the date order
//! inside a region matters for the trailing-window computations.

pub mod aggregate;
pub mod baseline;
pub mod cliff;
pub mod engine;
pub mod ghost_village;
pub mod grouping;
pub mod mbu;
pub mod normalize;
pub mod statistics;
pub mod unified;
pub mod window;

// Re-export commonly used items
pub use aggregate::{RegionDailyCount, aggregate_biometric, aggregate_daily};
pub use baseline::{RegionBaseline, compute_adult_baseline, mean_and_sample_std};
pub use cliff::{MbuCliffEvent, MbuDayAssessment, assess_mbu_days, detect_mbu_cliffs};
pub use engine::{AnomalyEngine, EngineReport, recover_schema_error};
pub use ghost_village::{GhostVillageHit, detect_ghost_villages, z_score};
pub use mbu::{MbuDailyAggregate, baseline_from_daily, compute_mbu_baseline};
pub use normalize::{AnomalySource, normalize_anomalies};
pub use statistics::RunSummary;
pub use unified::{UnifiedDailyRow, merge_daily_counts};
pub use window::TrailingWindow;
