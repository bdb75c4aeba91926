//! Error types for the admitlens engine.
//!
//! All fallible operations return `AdmitLensResult<T>`. "No duplicates found"
//! and empty reports are ordinary `Ok` values, never errors.

use thiserror::Error;

/// The unified error type for every admitlens crate.
#[derive(Debug, Error)]
pub enum AdmitLensError {
    /// The dataset accessor could not enumerate or count its records.
    ///
    /// Surfaced to the caller unchanged; the engine never retries.
    #[error("cannot access collection '{collection}': {reason}")]
    InputAccess { collection: String, reason: String },

    /// A single record could not be decoded at all.
    ///
    /// Never fatal for a run: the snapshot helper logs and skips it.
    #[error("malformed record at line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    /// A filter criterion has the wrong shape (e.g. month 13).
    #[error("invalid filter criterion '{field}': {reason}")]
    InvalidFilterCriteria { field: String, reason: String },

    /// Analysis settings could not be read or parsed.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// A CSV import could not read its input or write its output.
    #[error("import failed: {reason}")]
    ImportFailed { reason: String },
}

/// Convenience alias used throughout the admitlens crates.
pub type AdmitLensResult<T> = Result<T, AdmitLensError>;
