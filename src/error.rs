//! Error types for printer setup and fit checking
//!
//! All errors carry an error code for categorization.
//!
//! # Error Codes
//!
//! Error codes follow the pattern: `E<category><number>`
//!
//! Categories:
//! - **E1xxx**: I/O and configuration errors
//! - **E2xxx**: Geometry errors
//! - **E3xxx**: Scene and preset lookup errors
//! - **E4xxx**: Host import/export errors
//!
//! ## Error Codes
//!
//! - `E1001`: I/O error
//! - `E1002`: Malformed configuration
//! - `E2001`: No mesh objects to measure
//! - `E2002`: Invalid build volume
//! - `E3001`: Unknown printer model
//! - `E3002`: Scene object not found
//! - `E4001`: Import failed
//! - `E4002`: Export failed

use std::io;
use thiserror::Error;

/// Result type for bambu3mf operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while setting up a scene or checking a model
#[derive(Error, Debug)]
pub enum Error {
    /// IO error occurred while reading or writing a file
    ///
    /// **Error Code**: E1001
    ///
    /// **Common Causes**:
    /// - Configuration file not found
    /// - Insufficient permissions
    /// - Host importer could not read the selected file
    #[error("[E1001] I/O error: {0}")]
    Io(#[from] io::Error),

    /// Configuration could not be deserialized
    ///
    /// **Error Code**: E1002
    ///
    /// **Common Causes**:
    /// - Malformed JSON
    /// - Unknown printer identifier in the `printer` field
    /// - Wrong value type (e.g. a string where a number is expected)
    #[error("[E1002] Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// No eligible mesh objects were supplied to a bounding box computation
    ///
    /// **Error Code**: E2001
    ///
    /// **Common Causes**:
    /// - Nothing is selected
    /// - Only non-mesh objects (empties, curves, cameras, lights) are selected
    ///
    /// **Suggestions**:
    /// - Select at least one mesh object before checking fit or centering
    #[error("[E2001] No mesh objects to measure")]
    EmptyInput,

    /// Build volume has a non-positive or non-finite extent
    ///
    /// **Error Code**: E2002
    #[error("[E2002] Invalid build volume: {0}")]
    InvalidVolume(String),

    /// Printer identifier is not one of the supported models
    ///
    /// **Error Code**: E3001
    ///
    /// **Suggestions**:
    /// - Use one of `A1_MINI`, `A1`, `P1S`, `P1P`, `X1C`, `X1E`
    #[error("[E3001] Unknown printer model: {0}")]
    UnknownPrinter(String),

    /// A named scene object does not exist
    ///
    /// **Error Code**: E3002
    #[error("[E3002] Object not found: {0}")]
    ObjectNotFound(String),

    /// The host importer failed
    ///
    /// **Error Code**: E4001
    ///
    /// **Common Causes**:
    /// - Corrupted or truncated STL/3MF file
    /// - Importer not available in the host
    #[error("[E4001] Import failed: {0}")]
    Import(String),

    /// The host exporter failed
    ///
    /// **Error Code**: E4002
    #[error("[E4002] Export failed: {0}")]
    Export(String),
}

impl Error {
    /// Create an InvalidVolume error naming the offending axis
    ///
    /// # Arguments
    /// * `axis` - Axis name (`x`, `y` or `z`)
    /// * `value` - The rejected extent
    pub fn invalid_volume_axis(axis: &str, value: f64) -> Self {
        Error::InvalidVolume(format!(
            "{} extent must be positive and finite, got {}",
            axis, value
        ))
    }

    /// Create an Import error with the file that failed
    pub fn import_failed(path: &std::path::Path, message: &str) -> Self {
        Error::Import(format!("{}: {}", path.display(), message))
    }

    /// Create an Export error with the target file
    pub fn export_failed(path: &std::path::Path, message: &str) -> Self {
        Error::Export(format!("{}: {}", path.display(), message))
    }
}
