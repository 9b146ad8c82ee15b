//! # tootpack
//!
//! A Rust library for reading Mastodon data exports: print a statistical
//! summary of an archive, or render its outbox as a single static HTML page.
//!
//! ## Overview
//!
//! A Mastodon export is a directory holding `outbox.json` (everything the
//! account posted or boosted) and `likes.json` (URLs of liked posts), plus the
//! media files. tootpack reads both documents and offers two pipelines:
//!
//! - **Summary**: post types, most boosted and most replied profiles,
//!   visibility, orphaned replies, activity by year, popular hashtags, liked
//!   posts by platform and media statistics. Optionally checks whether the
//!   most frequent profiles still exist.
//! - **Render**: `outbox.html` inside the archive, one entry per post or boost,
//!   with images, videos and descriptions.
//!
//! Records that are missing fields or have an unexpected shape are skipped
//! one by one; they never abort a pass.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tootpack::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let mut archive = Archive::open("mastodon-export")?;
//!
//!     // Print the summary
//!     let summary = summarize(&mut archive, &SummaryConfig::default())?;
//!     write_text(&summary, &mut std::io::stdout())?;
//!
//!     // Render outbox.html with links to the original posts
//!     let config = RenderConfig::new().with_original_links(true);
//!     let (path, _) = write_html(&archive, &config)?;
//!     println!("saved {}", path.display());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`archive`]: [`Archive`](archive::Archive), the loaded export
//! - [`activity`]: Typed ActivityPub records ([`Activity`](activity::Activity), [`Note`](activity::Note))
//! - [`classify`]: Per-record classifiers and [`Skip`](classify::Skip) reasons
//! - [`config`]: [`RenderConfig`](config::RenderConfig), [`SummaryConfig`](config::SummaryConfig), [`ProbeConfig`](config::ProbeConfig)
//! - [`core`]: The pipelines
//!   - [`core::summary`]: [`summarize`](core::summarize), [`Summary`](core::Summary)
//!   - [`core::render`]: [`render_document`](core::render_document), [`write_html`](core::write_html)
//!   - [`core::probe`]: [`Probe`](core::Probe), liveness checks
//!   - [`core::tally`]: [`Tally`](core::Tally) frequency tables
//!   - [`core::output`]: Text and JSON report writers
//! - [`format`]: [`ReportFormat`](format::ReportFormat)
//! - [`cli`]: CLI types (feature `cli`)
//! - [`error`]: Unified error types ([`ArchiveError`], [`Result`])
//! - [`prelude`]: Convenient re-exports

pub mod activity;
pub mod archive;
pub mod classify;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod format;

// Re-export the main types at the crate root for convenience
pub use error::{ArchiveError, Result};

/// Convenient re-exports for common usage.
///
/// Import everything you need with a single line:
///
/// ```rust
/// use tootpack::prelude::*;
/// ```
pub mod prelude {
    // Loading
    pub use crate::archive::Archive;

    // Error types
    pub use crate::error::{ArchiveError, Result};

    // Configs
    pub use crate::config::{ProbeConfig, RenderConfig, SummaryConfig};

    // Classification
    pub use crate::classify::{Audience, LikedOrigin, Record, Skip};

    // Pipelines
    pub use crate::core::{
        Probe, ProbeStatus, Summary, Tally, render_document, summarize, summarize_archive,
        write_html,
    };

    // Report writers
    pub use crate::core::output::{to_text, write_text};
    #[cfg(feature = "json-output")]
    pub use crate::core::output::{to_json, write_json};
    pub use crate::format::{ReportFormat, write_report};
}
