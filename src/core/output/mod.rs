//! Summary report writers.
//!
//! This module provides writers for the two report formats:
//! - [`write_text`] / [`to_text`] - the human-readable report, section by section
//! - [`write_json`] / [`to_json`] - the full [`Summary`](crate::core::summary::Summary)
//!   as JSON - requires `json-output` feature
//!
//! Both write to any [`std::io::Write`], so callers choose between stdout, a
//! file or an in-memory buffer.
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use tootpack::core::output::to_text;
//! use tootpack::core::summary::{Summary, summarize_outbox};
//!
//! let summary = Summary {
//!     outbox: summarize_outbox(&[json!({"type": "Create"})]),
//!     ..Summary::default()
//! };
//!
//! let report = to_text(&summary)?;
//! assert!(report.contains("total number of toots: 1"));
//! # Ok::<(), tootpack::ArchiveError>(())
//! ```

#[cfg(feature = "json-output")]
mod json_report;
mod text_report;

#[cfg(feature = "json-output")]
pub use json_report::{to_json, write_json};
pub use text_report::{to_text, write_text};
