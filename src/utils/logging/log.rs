//! Logging utilities
//!
//! Consistent messages for file-level operations.

use std::path::Path;
use std::time::Duration;

/// Log an operation start with consistent format
pub fn log_operation_start(operation: &str, path: &Path) {
    log::info!("{} {}", operation, path.display());
}

/// Log an operation completion with consistent format
///
/// # Arguments
/// * `operation` - Past-tense description, e.g. "read" or "wrote"
/// * `path` - Path of the file or directory that was operated on
/// * `items` - Number of items processed
/// * `elapsed` - Optional elapsed time
pub fn log_operation_complete(
    operation: &str,
    path: &Path,
    items: usize,
    elapsed: Option<Duration>,
) {
    match elapsed {
        Some(duration) => log::info!(
            "Successfully {} {} items at {} in {:?}",
            operation,
            items,
            path.display(),
            duration
        ),
        None => log::info!(
            "Successfully {} {} items at {}",
            operation,
            items,
            path.display()
        ),
    }
}

/// Log a warning, optionally tied to a path
pub fn log_warning(message: &str, path: Option<&Path>) {
    if let Some(path) = path {
        log::warn!("{}: {}", message, path.display());
    } else {
        log::warn!("{message}");
    }
}
