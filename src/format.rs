//! Report format types for the tootpack library.
//!
//! This module provides library-first format types that don't depend on CLI
//! frameworks.
//!
//! # Example
//!
//! ```rust
//! use tootpack::core::Summary;
//! use tootpack::format::{ReportFormat, write_report};
//!
//! let mut out = Vec::new();
//! write_report(&Summary::default(), ReportFormat::Text, &mut out)?;
//! assert!(String::from_utf8_lossy(&out).contains("total number of toots: 0"));
//! # Ok::<(), tootpack::ArchiveError>(())
//! ```

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::core::summary::Summary;
use crate::error::ArchiveError;

/// Output format of the summary report.
///
/// - [`Text`](ReportFormat::Text) - Sectioned, human-readable report
/// - [`Json`](ReportFormat::Json) - The full summary as JSON, for scripts
///
/// # Example
///
/// ```rust
/// use tootpack::format::ReportFormat;
/// use std::str::FromStr;
///
/// let format = ReportFormat::from_str("json").unwrap();
/// assert_eq!(format, ReportFormat::Json);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum ReportFormat {
    /// Plain text (default)
    #[default]
    Text,

    /// Pretty-printed JSON
    Json,
}

impl ReportFormat {
    /// Returns all supported format names.
    pub fn all_names() -> &'static [&'static str] {
        &["text", "txt", "json"]
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::Text => write!(f, "Text"),
            ReportFormat::Json => write!(f, "JSON"),
        }
    }
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            _ => Err(format!(
                "Unknown format: '{}'. Expected one of: {}",
                s,
                ReportFormat::all_names().join(", ")
            )),
        }
    }
}

/// Writes the summary report in the specified format.
///
/// # Errors
///
/// Returns an error if:
/// - JSON is requested without the `json-output` feature
/// - The writer fails
pub fn write_report<W: Write>(
    summary: &Summary,
    format: ReportFormat,
    out: &mut W,
) -> Result<(), ArchiveError> {
    match format {
        ReportFormat::Text => Ok(crate::core::output::write_text(summary, out)?),
        #[cfg(feature = "json-output")]
        ReportFormat::Json => crate::core::output::write_json(summary, out),
        #[allow(unreachable_patterns)]
        _ => Err(ArchiveError::InvalidFormat {
            file: "report",
            message: format!(
                "Report format {:?} requires the 'json-output' feature to be enabled",
                format
            ),
        }),
    }
}
