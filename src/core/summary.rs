//! Statistical summary of an archive.
//!
//! [`summarize_outbox`] makes one forward pass over the outbox. Each record is
//! classified with [`classify`](crate::classify), and its categories
//! (post type, audience, thread, year, hashtags, media) feed independent
//! [`Tally`] tables. [`summarize_likes`] is a second, independent pass over the
//! liked items. [`summarize`] combines both and optionally runs liveness
//! probes.
//!
//! Records that cannot be classified are counted in
//! [`OutboxStats::skipped`] by reason and contribute nothing else.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use tootpack::core::summary::summarize_outbox;
//!
//! let records = vec![
//!     json!({"type": "Announce", "cc": ["https://a.example/users/x"], "object": "https://a.example/users/x/statuses/1"}),
//!     json!({"type": "Create"}), // no object: skipped
//! ];
//!
//! let stats = summarize_outbox(&records);
//! assert_eq!(stats.reshares, 1);
//! assert_eq!(stats.skipped.total(), 1);
//! ```

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::archive::Archive;
use crate::classify::{
    Audience, Creation, LikedOrigin, OrphanMention, Record, Reshare, Thread, classify_activity,
    classify_liked_item, decode_activity,
};
use crate::config::SummaryConfig;
use crate::core::probe::{Probe, ProbeReport, probe_all};
use crate::core::tally::Tally;
use crate::error::Result;

/// Counts accumulated over the outbox log.
#[derive(Debug, Clone, Default, Serialize)]
pub struct OutboxStats {
    /// Number of records in the log, classifiable or not
    pub total_records: usize,
    /// `Create` activities
    pub creations: usize,
    /// `Announce` activities
    pub reshares: usize,
    /// Boosted actor profile URLs
    pub reshared_actors: Tally<String>,
    /// Posts by visibility
    pub audience: Tally<Audience>,
    /// Posts with no `inReplyTo`
    pub originals: usize,
    /// Replies by parent actor profile URL
    pub replied_actors: Tally<String>,
    /// Originals that open with a mention
    pub orphans: usize,
    /// Plain-text leading mentions
    pub orphan_plain: Tally<String>,
    /// Hyperlinked (h-card) leading mentions
    pub orphan_linked: Tally<String>,
    /// Posts by publish year
    pub years: Tally<String>,
    /// Hashtag names, exact strings
    pub hashtags: Tally<String>,
    /// Hashtag occurrences (a post with three hashtags counts three times)
    pub tagged_posts: usize,
    /// Attachments by MIME type
    pub media_types: Tally<String>,
    /// Attachments without a description
    pub media_without_description: usize,
    /// Skipped records by reason
    pub skipped: Tally<String>,
}

impl OutboxStats {
    /// Number of replies (creations with a parent).
    pub fn replies(&self) -> usize {
        self.replied_actors.total()
    }

    /// Total number of media attachments.
    pub fn media_total(&self) -> usize {
        self.media_types.total()
    }

    fn add_reshare(&mut self, reshare: &Reshare<'_>) {
        self.reshares += 1;
        self.reshared_actors.add(reshare.actor.to_string());
    }

    fn add_creation(&mut self, post: &Creation<'_>) {
        self.creations += 1;
        self.audience.add(post.audience);

        match &post.thread {
            Thread::Original => self.originals += 1,
            Thread::Reply { parent_actor } => self.replied_actors.add(parent_actor.clone()),
        }

        match &post.orphan {
            Some(OrphanMention::Plain(actor)) => {
                self.orphans += 1;
                self.orphan_plain.add(actor.clone());
            }
            Some(OrphanMention::Linked(actor)) => {
                self.orphans += 1;
                self.orphan_linked.add(actor.clone());
            }
            None => {}
        }

        self.years.add(post.year());

        for tag in post.note.hashtags() {
            self.hashtags.add(tag.to_string());
            self.tagged_posts += 1;
        }

        for attachment in &post.note.attachments {
            self.media_types.add(attachment.media_type.clone());
            if attachment.name.is_none() {
                self.media_without_description += 1;
            }
        }
    }
}

/// Counts accumulated over the likes log.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LikeStats {
    /// Number of liked items in the log
    pub total: usize,
    /// Liked items by origin platform label
    pub platforms: Tally<String>,
    /// Authors of liked Mastodon posts
    pub mastodon_actors: Tally<String>,
    /// Items that are not URL strings
    pub skipped: usize,
}

/// Liveness probe results for both actor lists.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LivenessStats {
    /// Most boosted actors
    pub reshared: ProbeReport,
    /// Most replied actors
    pub replied: ProbeReport,
}

/// The complete summary of an archive.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Summary {
    pub outbox: OutboxStats,
    pub likes: LikeStats,
    /// Present only when probing was enabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub liveness: Option<LivenessStats>,
    /// Report shape used when this summary was built
    pub config: SummaryConfig,
}

/// Single forward pass over the outbox log.
pub fn summarize_outbox(records: &[Value]) -> OutboxStats {
    let mut stats = OutboxStats {
        total_records: records.len(),
        ..OutboxStats::default()
    };

    for (idx, value) in records.iter().enumerate() {
        let activity = match decode_activity(value) {
            Ok(activity) => activity,
            Err(skip) => {
                debug!(record = idx, %skip, "skipping outbox record");
                stats.skipped.add(skip.label());
                continue;
            }
        };

        match classify_activity(&activity) {
            Ok(Record::Reshare(reshare)) => stats.add_reshare(&reshare),
            Ok(Record::Creation(post)) => stats.add_creation(&post),
            Err(skip) => {
                debug!(record = idx, %skip, "skipping outbox record");
                stats.skipped.add(skip.label());
            }
        }
    }

    stats
}

/// Single forward pass over the likes log.
pub fn summarize_likes(items: &[Value]) -> LikeStats {
    let mut stats = LikeStats {
        total: items.len(),
        ..LikeStats::default()
    };

    for (idx, value) in items.iter().enumerate() {
        match classify_liked_item(value) {
            Ok(origin) => {
                stats.platforms.add(origin.label());
                if let LikedOrigin::Mastodon { actor } = origin {
                    stats.mastodon_actors.add(actor);
                }
            }
            Err(skip) => {
                debug!(record = idx, %skip, "skipping liked item");
                stats.skipped += 1;
            }
        }
    }

    stats
}

/// Probes the most boosted and most replied actors.
pub fn check_liveness<P: Probe + ?Sized>(
    stats: &OutboxStats,
    prober: &P,
    limit: usize,
) -> LivenessStats {
    let reshared = stats.reshared_actors.most_common(limit);
    let replied = stats.replied_actors.most_common(limit);

    info!(reshared = reshared.len(), replied = replied.len(), "checking liveness");

    LivenessStats {
        reshared: probe_all(prober, reshared.iter().map(|(url, _)| url.as_str())),
        replied: probe_all(prober, replied.iter().map(|(url, _)| url.as_str())),
    }
}

/// Summarizes a loaded archive without probing.
///
/// Loads `likes.json` if needed.
pub fn summarize(archive: &mut Archive, config: &SummaryConfig) -> Result<Summary> {
    let outbox = summarize_outbox(archive.outbox());
    let likes = summarize_likes(archive.load_likes()?);

    info!(
        records = outbox.total_records,
        skipped = outbox.skipped.total(),
        likes = likes.total,
        "summarized archive"
    );

    Ok(Summary {
        outbox,
        likes,
        liveness: None,
        config: *config,
    })
}

/// Summarizes a loaded archive and probes with the given prober.
pub fn summarize_with_probe<P: Probe + ?Sized>(
    archive: &mut Archive,
    config: &SummaryConfig,
    prober: &P,
) -> Result<Summary> {
    let mut summary = summarize(archive, config)?;
    summary.liveness = Some(check_liveness(&summary.outbox, prober, config.probe.limit));
    Ok(summary)
}

/// Summarizes a loaded archive, probing over HTTP when the config enables it.
#[cfg(feature = "probe")]
pub fn summarize_archive(archive: &mut Archive, config: &SummaryConfig) -> Result<Summary> {
    if config.probe.enabled {
        let prober = crate::core::probe::HttpProbe::new(&config.probe)?;
        summarize_with_probe(archive, config, &prober)
    } else {
        summarize(archive, config)
    }
}

/// Summarizes a loaded archive. Built without the `probe` feature, so the
/// probe flag is ignored.
#[cfg(not(feature = "probe"))]
pub fn summarize_archive(archive: &mut Archive, config: &SummaryConfig) -> Result<Summary> {
    if config.probe.enabled {
        tracing::warn!("liveness probes requested but the `probe` feature is disabled");
    }
    summarize(archive, config)
}
