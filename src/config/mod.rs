//! Configuration for the anomaly engine and its record sources.
//!
//! Detection thresholds are policy decisions that get tuned per deployment, so
//! every constant the detectors use lives here with its default value.

use std::fmt;
use std::path::Path;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::{PulseError, Result};
use crate::error::util::safe_open_file;

/// Default epsilon added to the standard deviation before dividing
pub const DEFAULT_STDDEV_EPSILON: f64 = 0.001;
/// Default z-score above which an adult enrolment day is flagged
pub const DEFAULT_Z_SCORE_THRESHOLD: f64 = 3.0;
/// Default trailing window (in rows) for the MBU baseline
pub const DEFAULT_MBU_WINDOW_DAYS: usize = 30;
/// Default fraction of the baseline below which a day counts as low
pub const DEFAULT_LOW_RATIO: f64 = 0.5;
/// Default number of consecutive low rows that confirms a cliff
pub const DEFAULT_CONSECUTIVE_LOW_DAYS: usize = 3;

/// Environment variable overriding the worker thread count
pub const THREADS_ENV_VAR: &str = "PULSE_THREADS";

/// Parameters for baseline computation and anomaly detection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Added to the standard deviation so zero-variance regions still yield a finite z-score
    pub stddev_epsilon: f64,
    /// Strict lower bound on the z-score of a ghost-village day
    pub z_score_threshold: f64,
    /// Maximum number of rows in the trailing MBU average
    pub mbu_window_days: usize,
    /// A day is low when its count is strictly below `low_ratio * baseline`
    pub low_ratio: f64,
    /// Number of trailing low rows required for a cliff event
    pub consecutive_low_days: usize,
    /// Process regions in parallel on the rayon pool
    pub parallel: bool,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            stddev_epsilon: DEFAULT_STDDEV_EPSILON,
            z_score_threshold: DEFAULT_Z_SCORE_THRESHOLD,
            mbu_window_days: DEFAULT_MBU_WINDOW_DAYS,
            low_ratio: DEFAULT_LOW_RATIO,
            consecutive_low_days: DEFAULT_CONSECUTIVE_LOW_DAYS,
            parallel: true,
        }
    }
}

impl DetectionConfig {
    /// Check that every parameter is usable by the detectors
    pub fn validate(&self) -> Result<()> {
        if !(self.stddev_epsilon.is_finite() && self.stddev_epsilon > 0.0) {
            return Err(PulseError::ConfigError(format!(
                "stddev_epsilon must be positive, got {}",
                self.stddev_epsilon
            )));
        }
        if !self.z_score_threshold.is_finite() {
            return Err(PulseError::ConfigError(
                "z_score_threshold must be finite".to_string(),
            ));
        }
        if self.mbu_window_days == 0 {
            return Err(PulseError::ConfigError(
                "mbu_window_days must be at least 1".to_string(),
            ));
        }
        if self.consecutive_low_days == 0 {
            return Err(PulseError::ConfigError(
                "consecutive_low_days must be at least 1".to_string(),
            ));
        }
        if !(self.low_ratio > 0.0 && self.low_ratio <= 1.0) {
            return Err(PulseError::ConfigError(format!(
                "low_ratio must be in (0, 1], got {}",
                self.low_ratio
            )));
        }
        Ok(())
    }

    /// Whether the detectors can run with these parameters
    ///
    /// Logs the reason when they cannot. Detectors given an unusable
    /// configuration return no output.
    pub(crate) fn is_usable(&self, operation: &str) -> bool {
        match self.validate() {
            Ok(()) => true,
            Err(e) => {
                warn!("Skipping {operation}: {e}");
                false
            }
        }
    }

    /// Same parameters, processed on the calling thread only
    #[must_use]
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

impl fmt::Display for DetectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Detection Configuration:")?;
        writeln!(f, "  Stddev Epsilon: {}", self.stddev_epsilon)?;
        writeln!(f, "  Z-Score Threshold: {}", self.z_score_threshold)?;
        writeln!(f, "  MBU Window (rows): {}", self.mbu_window_days)?;
        writeln!(f, "  Low Ratio: {}", self.low_ratio)?;
        writeln!(f, "  Consecutive Low Days: {}", self.consecutive_low_days)?;
        writeln!(f, "  Parallel: {}", self.parallel)
    }
}

/// Column names used when mapping record batches onto typed records
///
/// The defaults match the published enrolment and biometric feeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceColumns {
    pub date: String,
    pub state: String,
    pub district: String,
    pub pincode: String,
    pub age_0_5: String,
    pub age_5_17: String,
    pub age_18_plus: String,
    pub bio_update_5_17: String,
    pub bio_update_17_plus: String,
}

impl Default for SourceColumns {
    fn default() -> Self {
        Self {
            date: "date".to_string(),
            state: "state".to_string(),
            district: "district".to_string(),
            pincode: "pincode".to_string(),
            age_0_5: "age_0_5".to_string(),
            age_5_17: "age_5_17".to_string(),
            age_18_plus: "age_18_greater".to_string(),
            bio_update_5_17: "bio_age_5_17".to_string(),
            bio_update_17_plus: "bio_age_17_".to_string(),
        }
    }
}

/// Top-level configuration for a run of the binary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PulseConfig {
    pub detection: DetectionConfig,
    pub columns: SourceColumns,
    /// Worker threads for the rayon pool
    pub threads: usize,
}

impl Default for PulseConfig {
    fn default() -> Self {
        Self {
            detection: DetectionConfig::default(),
            columns: SourceColumns::default(),
            threads: num_cpus::get(),
        }
    }
}

impl PulseConfig {
    /// Load a configuration from a JSON file; absent keys keep their defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let file = safe_open_file(path, "reading configuration")?;
        let config: Self = serde_json::from_reader(std::io::BufReader::new(file))?;
        config.detection.validate()?;
        Ok(config)
    }

    /// Apply overrides from the environment
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(threads) = get_thread_count() {
            self.threads = threads;
        }
        self
    }
}

/// Helper function to get the thread count from the environment
#[must_use]
pub fn get_thread_count() -> Option<usize> {
    std::env::var(THREADS_ENV_VAR)
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .filter(|&n| n > 0)
}
