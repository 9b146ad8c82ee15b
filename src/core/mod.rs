//! The two pipelines and their building blocks.
//!
//! This module contains:
//! - [`tally`] - Insertion-ordered frequency tables
//! - [`summary`] - The statistical summary of an archive
//! - [`probe`] - Liveness probes for remote profiles
//! - [`render`] - Static HTML rendering of the outbox
//! - [`output`] - Summary report writers (text, JSON)
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use tootpack::archive::Archive;
//! use tootpack::config::{RenderConfig, SummaryConfig};
//! use tootpack::core::{summarize, write_html, write_text};
//!
//! let mut archive = Archive::open("mastodon-export")?;
//!
//! let summary = summarize(&mut archive, &SummaryConfig::default())?;
//! write_text(&summary, &mut std::io::stdout())?;
//!
//! let (path, _stats) = write_html(&archive, &RenderConfig::default())?;
//! println!("{}", path.display());
//! # Ok::<(), tootpack::ArchiveError>(())
//! ```

pub mod output;
pub mod probe;
pub mod render;
pub mod summary;
pub mod tally;

// Re-export main types for convenience
pub use probe::{Probe, ProbeReport, ProbeStatus, Unreachable, probe_all};
pub use render::{RenderStats, render_document, render_record, write_html};
pub use summary::{
    LikeStats, LivenessStats, OutboxStats, Summary, summarize, summarize_archive,
    summarize_likes, summarize_outbox, summarize_with_probe,
};
pub use tally::Tally;

#[cfg(feature = "probe")]
pub use probe::HttpProbe;

#[cfg(feature = "json-output")]
pub use output::{to_json, write_json};
pub use output::{to_text, write_text};
