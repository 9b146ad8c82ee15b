//! Unified error types for tootpack.
//!
//! This module provides a single [`ArchiveError`] enum that covers every
//! fatal condition in the library: a missing archive directory, an input file
//! that cannot be read or decoded, and failures while writing output.
//!
//! Malformed individual records are **not** errors. They are reported as
//! [`Skip`](crate::classify::Skip) values by the classifiers and never abort a
//! pipeline.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for tootpack operations.
///
/// # Example
///
/// ```rust
/// use tootpack::error::Result;
///
/// fn my_function() -> Result<usize> {
///     Ok(0)
/// }
/// ```
pub type Result<T> = std::result::Result<T, ArchiveError>;

/// The error type for all fatal tootpack operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ArchiveError {
    /// An I/O error occurred while reading input or writing output.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The archive directory passed by the user does not exist.
    #[error("The target directory doesn't exist: {}", path.display())]
    MissingArchive {
        /// The path that was looked up
        path: PathBuf,
    },

    /// Failed to decode one of the archive's JSON documents.
    #[error("Failed to parse {file}{}: {source}", path.as_ref().map(|p| format!(" (file: {})", p.display())).unwrap_or_default())]
    Parse {
        /// Logical name of the document (e.g. "outbox.json")
        file: &'static str,
        /// The underlying JSON error
        #[source]
        source: serde_json::Error,
        /// The file path, if available
        path: Option<PathBuf>,
    },

    /// The document decoded but does not have the expected shape.
    ///
    /// This occurs when a document lacks its `orderedItems` array.
    #[error("Invalid {file} format: {message}")]
    InvalidFormat {
        /// The document that was expected
        file: &'static str,
        /// Description of what's wrong
        message: String,
    },

    /// JSON serialization error (summary output).
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The HTTP client for liveness probes could not be constructed.
    #[cfg(feature = "probe")]
    #[error("Probe client error: {0}")]
    ProbeClient(#[source] reqwest::Error),
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ArchiveError {
    /// Creates a missing-archive error.
    pub fn missing_archive(path: impl Into<PathBuf>) -> Self {
        ArchiveError::MissingArchive { path: path.into() }
    }

    /// Creates a parse error for one of the archive documents.
    pub fn parse(file: &'static str, source: serde_json::Error, path: Option<PathBuf>) -> Self {
        ArchiveError::Parse { file, source, path }
    }

    /// Creates an invalid format error.
    pub fn invalid_format(file: &'static str, message: impl Into<String>) -> Self {
        ArchiveError::InvalidFormat {
            file,
            message: message.into(),
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ArchiveError::Io(_))
    }

    /// Returns `true` if the archive directory was missing.
    pub fn is_missing_archive(&self) -> bool {
        matches!(self, ArchiveError::MissingArchive { .. })
    }

    /// Returns `true` if this is a parse error.
    pub fn is_parse(&self) -> bool {
        matches!(self, ArchiveError::Parse { .. })
    }

    /// Returns `true` if this is an invalid format error.
    pub fn is_invalid_format(&self) -> bool {
        matches!(self, ArchiveError::InvalidFormat { .. })
    }
}

// ============================================================================
// Tests
// ============================================================================
