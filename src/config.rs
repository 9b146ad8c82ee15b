//! Configuration types for the two pipelines.
//!
//! These are plain, serde-serializable structs with builder methods, usable
//! without any CLI framework.
//!
//! - [`RenderConfig`] - what the HTML page includes
//! - [`SummaryConfig`] - report shape and liveness probing
//! - [`ProbeConfig`] - liveness probe limits
//!
//! # Example
//!
//! ```rust
//! use tootpack::config::{ProbeConfig, RenderConfig, SummaryConfig};
//!
//! let render = RenderConfig::new().with_original_links(true);
//! assert!(render.show_boosts);
//!
//! let summary = SummaryConfig::new().with_probe(ProbeConfig::enabled());
//! assert!(summary.probe.enabled);
//! ```

use serde::{Deserialize, Serialize};

/// Configuration for the HTML renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Link each post to its original URL with a timestamp (default: false)
    pub link_original: bool,

    /// Emit a block for each boost (default: true)
    pub show_boosts: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            link_original: false,
            show_boosts: true,
        }
    }
}

impl RenderConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables links to the original posts.
    #[must_use]
    pub fn with_original_links(mut self, enabled: bool) -> Self {
        self.link_original = enabled;
        self
    }

    /// Shows or hides boosts.
    #[must_use]
    pub fn with_boosts(mut self, enabled: bool) -> Self {
        self.show_boosts = enabled;
        self
    }
}

/// Configuration for liveness probes against remote profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeConfig {
    /// Run the probes at all (default: false)
    pub enabled: bool,

    /// How many of the most frequent actors to check per section (default: 50)
    pub limit: usize,

    /// Per-request timeout in seconds (default: 10)
    pub timeout_secs: u64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            limit: 50,
            timeout_secs: 10,
        }
    }
}

impl ProbeConfig {
    /// Creates a disabled probe configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an enabled probe configuration with default limits.
    pub fn enabled() -> Self {
        Self {
            enabled: true,
            ..Self::default()
        }
    }

    /// Sets how many actors are checked per section.
    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs.max(1);
        self
    }
}

/// Configuration for the summary report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryConfig {
    /// Rows in the most-boosted table (default: 10)
    pub top_reshared: usize,

    /// Rows in the replied and orphan tables (default: 20)
    pub top_replied: usize,

    /// Rank whose frequency sets the hashtag threshold (default: 25)
    pub hashtag_rank: usize,

    /// Rows in the most-liked Mastodon actors table (default: 50)
    pub top_liked: usize,

    /// Liveness probe settings
    pub probe: ProbeConfig,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            top_reshared: 10,
            top_replied: 20,
            hashtag_rank: 25,
            top_liked: 50,
            probe: ProbeConfig::default(),
        }
    }
}

impl SummaryConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the liveness probe configuration.
    #[must_use]
    pub fn with_probe(mut self, probe: ProbeConfig) -> Self {
        self.probe = probe;
        self
    }

    /// Sets the rank used for the hashtag threshold.
    #[must_use]
    pub fn with_hashtag_rank(mut self, rank: usize) -> Self {
        self.hashtag_rank = rank.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_defaults() {
        let config = RenderConfig::new();
        assert!(!config.link_original);
        assert!(config.show_boosts);
    }

    #[test]
    fn test_render_builder() {
        let config = RenderConfig::new()
            .with_original_links(true)
            .with_boosts(false);
        assert!(config.link_original);
        assert!(!config.show_boosts);
    }

    #[test]
    fn test_probe_defaults() {
        let probe = ProbeConfig::new();
        assert!(!probe.enabled);
        assert_eq!(probe.limit, 50);
        assert!(ProbeConfig::enabled().enabled);
    }

    #[test]
    fn test_probe_timeout_floor() {
        assert_eq!(ProbeConfig::new().with_timeout_secs(0).timeout_secs, 1);
    }

    #[test]
    fn test_summary_defaults() {
        let config = SummaryConfig::default();
        assert_eq!(config.top_reshared, 10);
        assert_eq!(config.top_replied, 20);
        assert_eq!(config.hashtag_rank, 25);
        assert_eq!(config.top_liked, 50);
        assert!(!config.probe.enabled);
    }

    #[test]
    fn test_config_serde() {
        let config = SummaryConfig::new().with_probe(ProbeConfig::enabled().with_limit(5));
        let json = serde_json::to_string(&config).unwrap();
        let parsed: SummaryConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }
}
