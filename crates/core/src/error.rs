//! Error types for tripnotes operations.
//!
//! This module defines the main error type [`TripnotesError`] which represents
//! all possible errors that can occur during collection, categorization, and
//! rendering.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the collection pipeline.
///
/// Only [`TripnotesError::Launch`] is fatal to a run. Everything else is
/// degraded at the point of detection: a failed query yields an empty result,
/// a missing input artifact makes a stage exit early without output.
#[derive(Error, Debug)]
pub enum TripnotesError {
    /// The browser process could not be started.
    ///
    /// This is the only error that aborts a run outright.
    #[error("Failed to launch browser: {0}")]
    Launch(String),

    /// A browser/CDP operation failed after launch.
    ///
    /// Navigation timeouts, evaluation failures, and closed-target errors all
    /// land here. The collector treats these as recoverable per query.
    #[error("Browser error: {0}")]
    Browser(String),

    /// Invalid URL provided or constructed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// An intermediate artifact was not found.
    ///
    /// Returned when the categorize or render stage is pointed at a file that
    /// does not exist. Stages report this and return early; it is not a crash.
    #[error("Input artifact not found: {0}")]
    InputNotFound(PathBuf),

    /// The home directory could not be determined for the cookie store.
    #[error("Could not determine home directory")]
    NoHomeDir,

    /// File I/O errors.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(feature = "browser")]
impl From<chromiumoxide::error::CdpError> for TripnotesError {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        TripnotesError::Browser(err.to_string())
    }
}

/// Result type alias for TripnotesError.
pub type Result<T> = std::result::Result<T, TripnotesError>;
