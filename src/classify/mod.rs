//! Record classification shared by the summarizer and the renderer.
//!
//! Every classifier returns a [`Classified`] value: either the classification
//! or a [`Skip`] naming why the record cannot be classified. Pipelines compose
//! them with `?` inside a per-record function and `continue` on `Err`, so one
//! malformed record never stops the batch.
//!
//! # Classifiers
//!
//! | Function | Input | Output |
//! |----------|-------|--------|
//! | [`decode_activity`] | raw outbox record | [`Activity`] |
//! | [`classify_activity`] | activity | [`Record`] (reshare or creation) |
//! | [`classify_audience`] | note | [`Audience`] |
//! | [`classify_reply`] | note | [`Thread`] |
//! | [`detect_orphan`] | note | optional [`OrphanMention`] |
//! | [`classify_liked_item`] | raw liked item | [`LikedOrigin`] |
//! | [`classify_media`] | MIME type | [`MediaKind`] |
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use tootpack::classify::{Audience, Record, classify_activity, decode_activity};
//!
//! let raw = json!({
//!     "type": "Create",
//!     "object": {
//!         "id": "https://example.social/users/me/statuses/1",
//!         "to": ["https://example.social/users/me/followers"],
//!         "published": "2024-05-01T10:00:00Z",
//!         "content": "<p>hi</p>"
//!     }
//! });
//!
//! let activity = decode_activity(&raw).unwrap();
//! match classify_activity(&activity).unwrap() {
//!     Record::Creation(post) => assert_eq!(post.audience, Audience::FollowersOnly),
//!     Record::Reshare(_) => unreachable!(),
//! }
//! ```

mod liked;
pub mod orphan;

pub use liked::{LikedOrigin, classify_liked_item, classify_liked_url};
pub use orphan::{OrphanMention, detect_orphan};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::activity::{Activity, ActivityKind, Note};

/// Result of classifying a single record.
pub type Classified<T> = Result<T, Skip>;

/// Why a record was left out of a pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
pub enum Skip {
    /// A field the classification needs is absent, null or empty.
    #[error("missing field `{0}`")]
    MissingField(&'static str),

    /// The record's `type` is neither `Create` nor `Announce`.
    #[error("unsupported activity type `{0}`")]
    UnsupportedType(String),

    /// The record does not have the expected JSON shape.
    #[error("malformed record: {0}")]
    Malformed(String),
}

impl Skip {
    /// Short, stable label used to tally skips by reason.
    pub fn label(&self) -> String {
        match self {
            Skip::MissingField(field) => format!("missing {}", field),
            Skip::UnsupportedType(_) => "unsupported type".to_string(),
            Skip::Malformed(_) => "malformed".to_string(),
        }
    }
}

// ============================================================================
// Audience
// ============================================================================

/// Visibility of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Audience {
    /// Addressed to `as:Public`
    Public,
    /// Addressed to the author's followers collection
    FollowersOnly,
    /// Addressed to individual actors only
    Direct,
}

impl std::fmt::Display for Audience {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Audience::Public => write!(f, "public"),
            Audience::FollowersOnly => write!(f, "followers only"),
            Audience::Direct => write!(f, "direct message"),
        }
    }
}

/// Classifies a note's audience from the suffix of `to[0]`.
pub fn classify_audience(note: &Note) -> Classified<Audience> {
    let first = note.to.first().ok_or(Skip::MissingField("object.to"))?;

    Ok(if first.ends_with("#Public") {
        Audience::Public
    } else if first.ends_with("/followers") {
        Audience::FollowersOnly
    } else {
        Audience::Direct
    })
}

// ============================================================================
// Thread relationship
// ============================================================================

/// Whether a note starts a thread or answers another post.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Thread {
    /// `inReplyTo` is null or absent
    Original,
    /// Reply to a post of the given actor
    Reply {
        /// Parent post URL truncated before `/statuses`
        parent_actor: String,
    },
}

impl Thread {
    /// Returns `true` for original posts.
    pub fn is_original(&self) -> bool {
        matches!(self, Thread::Original)
    }
}

/// Classifies a note as original or reply.
pub fn classify_reply(note: &Note) -> Thread {
    match note.in_reply_to.as_deref() {
        None => Thread::Original,
        Some(url) => Thread::Reply {
            parent_actor: actor_prefix(url).to_string(),
        },
    }
}

/// Returns the part of a post URL before the first `/statuses`.
///
/// Mastodon post URLs look like `https://host/users/name/statuses/123`, so the
/// prefix is the author's profile URL. URLs without `/statuses` are returned
/// unchanged.
pub fn actor_prefix(url: &str) -> &str {
    url.split("/statuses").next().unwrap_or(url)
}

// ============================================================================
// Media
// ============================================================================

/// Broad class of a media attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
    Audio,
    Other,
}

/// Classifies an attachment by the prefix of its MIME type.
pub fn classify_media(media_type: &str) -> MediaKind {
    if media_type.starts_with("image") {
        MediaKind::Image
    } else if media_type.starts_with("video") {
        MediaKind::Video
    } else if media_type.starts_with("audio") {
        MediaKind::Audio
    } else {
        MediaKind::Other
    }
}

// ============================================================================
// Whole records
// ============================================================================

/// A classified outbox record.
#[derive(Debug, Clone)]
pub enum Record<'a> {
    /// An `Announce` activity
    Reshare(Reshare<'a>),
    /// A `Create` activity
    Creation(Creation<'a>),
}

/// A boost of another actor's post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reshare<'a> {
    /// Profile URL of the boosted actor (`cc[0]`)
    pub actor: &'a str,
    /// URL of the boosted post
    pub object_url: &'a str,
}

impl Reshare<'_> {
    /// Last path segment of the actor URL, used as a display name.
    pub fn actor_name(&self) -> &str {
        self.actor.rsplit('/').next().unwrap_or(self.actor)
    }
}

/// A post written by the archive owner, with everything both pipelines need.
#[derive(Debug, Clone)]
pub struct Creation<'a> {
    /// The underlying note
    pub note: &'a Note,
    pub audience: Audience,
    pub thread: Thread,
    /// Set only for original posts that open with a mention
    pub orphan: Option<OrphanMention>,
    /// Publish timestamp as written in the export
    pub published: &'a str,
    /// Post body (HTML)
    pub content: &'a str,
}

impl Creation<'_> {
    /// Publish year: the first four characters of the timestamp.
    pub fn year(&self) -> String {
        self.published.chars().take(4).collect()
    }
}

/// Decodes a raw outbox record into a typed [`Activity`].
pub fn decode_activity(value: &Value) -> Classified<Activity> {
    Activity::deserialize(value).map_err(|e| Skip::Malformed(e.to_string()))
}

/// Reads the boosted actor and post out of an `Announce`.
///
/// Needs `cc[0]` and a link `object`.
pub fn classify_reshare(activity: &Activity) -> Classified<Reshare<'_>> {
    let actor = activity.cc.first().ok_or(Skip::MissingField("cc"))?;
    let object_url = activity.object_url().ok_or(Skip::MissingField("object"))?;
    Ok(Reshare { actor, object_url })
}

/// Publish timestamp of a creation: the note's, else the activity's.
pub fn published_at<'a>(activity: &'a Activity, note: &'a Note) -> Option<&'a str> {
    note.published.as_deref().or(activity.published.as_deref())
}

/// Classifies a decoded activity as a reshare or a creation.
///
/// A reshare needs `cc[0]` and a link `object`. A creation needs a note with a
/// non-empty `to`, a publish timestamp and `content`.
pub fn classify_activity(activity: &Activity) -> Classified<Record<'_>> {
    match activity.kind() {
        Some(ActivityKind::Announce) => classify_reshare(activity).map(Record::Reshare),
        Some(ActivityKind::Create) => {
            let note = activity.note().ok_or(Skip::MissingField("object"))?;
            let audience = classify_audience(note)?;
            let published =
                published_at(activity, note).ok_or(Skip::MissingField("object.published"))?;
            let content = note
                .content
                .as_deref()
                .ok_or(Skip::MissingField("object.content"))?;

            Ok(Record::Creation(Creation {
                note,
                audience,
                thread: classify_reply(note),
                orphan: detect_orphan(note),
                published,
                content,
            }))
        }
        None => Err(Skip::UnsupportedType(activity.kind.clone())),
    }
}
