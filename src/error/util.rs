//! Utility functions for error handling
//!
//! Small helpers that attach file context to IO failures.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{PulseError, Result};

/// Safely open a file, reporting which path failed and why it was needed
pub fn safe_open_file(path: &Path, purpose: &str) -> Result<fs::File> {
    if !path.is_file() {
        return Err(PulseError::IoError(io::Error::new(
            io::ErrorKind::NotFound,
            format!("{} is not a file (needed for: {purpose})", path.display()),
        )));
    }

    fs::File::open(path).map_err(|e| {
        let context = match e.kind() {
            io::ErrorKind::PermissionDenied => "permission denied".to_string(),
            _ => format!("failed to open for {purpose}"),
        };
        PulseError::IoError(io::Error::new(
            e.kind(),
            format!("{}: {context}: {e}", path.display()),
        ))
    })
}

/// Check that a directory exists and is readable
pub fn validate_directory(path: &Path, purpose: &str) -> Result<()> {
    if !path.is_dir() {
        return Err(PulseError::IoError(io::Error::new(
            io::ErrorKind::NotFound,
            format!("Directory does not exist: {} (needed for: {purpose})", path.display()),
        )));
    }

    fs::read_dir(path).map(|_| ()).map_err(|e| {
        PulseError::IoError(io::Error::new(
            e.kind(),
            format!("Failed to access directory {}: {e}", path.display()),
        ))
    })
}

/// Create a file for writing, creating missing parent directories first
pub fn safe_create_file(path: &Path) -> Result<fs::File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::File::create(path).map_err(|e| {
        PulseError::IoError(io::Error::new(
            e.kind(),
            format!("Failed to create {}: {e}", path.display()),
        ))
    })
}
