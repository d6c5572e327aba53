//! Arrow utilities
//!
//! Typed column access with schema errors for missing or unusable columns,
//! and conversion between record batches and the engine's records.

pub mod conversion;
pub mod extractors;

// Re-export commonly used functions for convenience
pub use conversion::{biometric_from_batch, enrolment_from_batch, to_record_batch};
pub use extractors::{count_column, date_column, parse_feed_date, string_column};
