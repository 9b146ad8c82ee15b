//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure (for use with clap)
//! - [`ReportFormat`] - Summary output format options
//!
//! [`Args`] converts into the library configs, so `main` only wires them to
//! the pipelines:
//!
//! ```rust
//! use clap::Parser;
//! use tootpack::cli::Args;
//!
//! let args = Args::parse_from(["tootpack", "archive", "--original"]);
//! assert!(args.render_config().link_original);
//! assert!(!args.summary);
//! ```

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::{ProbeConfig, RenderConfig, SummaryConfig};

/// Convert a Mastodon archive to a simple HTML file,
/// or print a summary of it.
#[derive(Parser, Debug, Clone)]
#[command(name = "tootpack")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    tootpack ./archive
    tootpack ./archive --original --no-boosts
    tootpack ./archive --summary
    tootpack ./archive -s --format json
    tootpack ./archive -s --probe --probe-limit 20")]
pub struct Args {
    /// Path to the unpacked Mastodon archive
    pub path: String,

    /// Print a summary of the archive instead of writing HTML
    #[arg(short, long)]
    pub summary: bool,

    /// Link each post to its original URL (not shown by default)
    #[arg(short, long)]
    pub original: bool,

    /// Don't list boosts (shown by default)
    #[arg(long, visible_alias = "noboosts")]
    pub no_boosts: bool,

    /// Summary output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: ReportFormat,

    /// Check whether the most boosted and replied profiles are still up
    #[arg(long)]
    pub probe: bool,

    /// Number of profiles checked per list
    #[arg(long, value_name = "N", default_value_t = 50)]
    pub probe_limit: usize,

    /// Timeout per request, in seconds
    #[arg(long, value_name = "SECS", default_value_t = 10)]
    pub probe_timeout: u64,
}

impl Args {
    /// Renderer settings from `--original` and `--no-boosts`.
    pub fn render_config(&self) -> RenderConfig {
        RenderConfig::new()
            .with_original_links(self.original)
            .with_boosts(!self.no_boosts)
    }

    /// Summary settings, including the probe flags.
    pub fn summary_config(&self) -> SummaryConfig {
        let probe = ProbeConfig {
            enabled: self.probe,
            ..ProbeConfig::default()
        }
        .with_limit(self.probe_limit)
        .with_timeout_secs(self.probe_timeout);

        SummaryConfig::new().with_probe(probe)
    }
}

/// Summary output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Human-readable report
    #[default]
    #[value(alias = "txt")]
    Text,

    /// The full summary as JSON
    Json,
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::Text => write!(f, "Text"),
            ReportFormat::Json => write!(f, "JSON"),
        }
    }
}

// Conversion to library format type
impl From<ReportFormat> for crate::format::ReportFormat {
    fn from(format: ReportFormat) -> crate::format::ReportFormat {
        match format {
            ReportFormat::Text => crate::format::ReportFormat::Text,
            ReportFormat::Json => crate::format::ReportFormat::Json,
        }
    }
}
