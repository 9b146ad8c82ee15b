//! ActivityPub records as they appear in a Mastodon export.
//!
//! The outbox log (`outbox.json`) is an `OrderedCollection` whose
//! `orderedItems` are activities. Only two activity types matter here:
//!
//! - **`Create`**: the user wrote a post. `object` is a [`Note`].
//! - **`Announce`**: the user boosted someone else's post. `object` is the
//!   URL of the boosted post and `cc[0]` is the boosted actor's profile.
//!
//! Every field is optional at the type level. Exports are frequently partial,
//! and deciding whether a missing field matters is the job of
//! [`classify`](crate::classify), not of deserialization.
//!
//! # Example
//!
//! ```
//! use serde::Deserialize;
//! use serde_json::json;
//! use tootpack::activity::{Activity, ActivityKind};
//!
//! let raw = json!({
//!     "type": "Announce",
//!     "cc": ["https://example.social/users/alice"],
//!     "object": "https://example.social/users/alice/statuses/1"
//! });
//!
//! let activity = Activity::deserialize(&raw)?;
//! assert_eq!(activity.kind(), Some(ActivityKind::Announce));
//! # Ok::<(), serde_json::Error>(())
//! ```

use serde::{Deserialize, Serialize};

/// The activity types tootpack understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivityKind {
    /// An original post or reply
    Create,
    /// A boost (reshare) of another actor's post
    Announce,
}

impl ActivityKind {
    /// Returns the ActivityStreams type name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityKind::Create => "Create",
            ActivityKind::Announce => "Announce",
        }
    }
}

impl std::fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ActivityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Create" => Ok(ActivityKind::Create),
            "Announce" => Ok(ActivityKind::Announce),
            _ => Err(format!("Unsupported activity type: '{}'", s)),
        }
    }
}

/// One entry of the outbox log.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Activity {
    /// Raw ActivityStreams type (`"Create"`, `"Announce"`, ...)
    #[serde(rename = "type", default)]
    pub kind: String,

    /// Carbon-copy audience. For boosts, the first entry is the boosted actor.
    #[serde(default)]
    pub cc: Vec<String>,

    /// Activity-level publish timestamp
    #[serde(default)]
    pub published: Option<String>,

    /// The note (for `Create`) or the boosted post URL (for `Announce`)
    #[serde(default)]
    pub object: Option<ActivityObject>,
}

impl Activity {
    /// Returns the parsed activity type, or `None` for anything tootpack ignores.
    pub fn kind(&self) -> Option<ActivityKind> {
        self.kind.parse().ok()
    }

    /// Returns the embedded note, if `object` is one.
    pub fn note(&self) -> Option<&Note> {
        match &self.object {
            Some(ActivityObject::Note(note)) => Some(note),
            _ => None,
        }
    }

    /// Returns the object URL, if `object` is a bare link.
    pub fn object_url(&self) -> Option<&str> {
        match &self.object {
            Some(ActivityObject::Link(url)) => Some(url),
            _ => None,
        }
    }
}

/// The `object` of an activity: either a link or an embedded note.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ActivityObject {
    /// A bare object URL (boosts)
    Link(String),
    /// An embedded post (creations)
    Note(Box<Note>),
}

/// A post written by the archive owner.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Canonical URL of the post
    #[serde(default)]
    pub id: Option<String>,

    /// Primary audience. The suffix of the first entry decides visibility.
    #[serde(default)]
    pub to: Vec<String>,

    /// URL of the parent post, `None` for an original post
    #[serde(default)]
    pub in_reply_to: Option<String>,

    /// ISO-8601 timestamp, e.g. `2022-11-13T21:19:52Z`
    #[serde(default)]
    pub published: Option<String>,

    /// Post body as an HTML fragment
    #[serde(default)]
    pub content: Option<String>,

    /// Hashtags, mentions and custom emoji
    #[serde(default, rename = "tag")]
    pub tags: Vec<Tag>,

    /// Media attachments
    #[serde(default, rename = "attachment")]
    pub attachments: Vec<Attachment>,
}

impl Note {
    /// Iterates over the names of `Hashtag` tags, in document order.
    pub fn hashtags(&self) -> impl Iterator<Item = &str> {
        self.tags
            .iter()
            .filter(|tag| tag.is_hashtag())
            .map(|tag| tag.name.as_str())
    }
}

/// An entry of a note's `tag` list.
#[derive(Debug, Clone, Deserialize)]
pub struct Tag {
    /// `Hashtag`, `Mention`, `Emoji`, ...
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Tag text, including the leading `#` or `@`
    #[serde(default)]
    pub name: String,
}

impl Tag {
    /// Returns `true` for hashtags.
    pub fn is_hashtag(&self) -> bool {
        self.kind == "Hashtag"
    }
}

/// A media attachment on a note.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    /// MIME type such as `image/png`
    #[serde(default)]
    pub media_type: String,

    /// Path of the file inside the archive, starting with `/`
    #[serde(default)]
    pub url: Option<String>,

    /// Alt text. `None` when the author wrote no description.
    #[serde(default)]
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_create() {
        let raw = json!({
            "type": "Create",
            "published": "2023-01-02T03:04:05Z",
            "cc": [],
            "object": {
                "id": "https://example.social/users/me/statuses/1",
                "to": ["https://www.w3.org/ns/activitystreams#Public"],
                "inReplyTo": null,
                "published": "2023-01-02T03:04:05Z",
                "content": "<p>hello</p>",
                "tag": [
                    {"type": "Hashtag", "name": "#rust"},
                    {"type": "Mention", "name": "@bob@example.social"}
                ],
                "attachment": [
                    {"mediaType": "image/png", "url": "/media/a.png", "name": null}
                ]
            }
        });

        let activity = Activity::deserialize(&raw).unwrap();
        assert_eq!(activity.kind(), Some(ActivityKind::Create));

        let note = activity.note().unwrap();
        assert_eq!(note.to.len(), 1);
        assert!(note.in_reply_to.is_none());
        assert_eq!(note.hashtags().collect::<Vec<_>>(), vec!["#rust"]);
        assert_eq!(note.attachments[0].media_type, "image/png");
        assert!(note.attachments[0].name.is_none());
    }

    #[test]
    fn test_deserialize_announce() {
        let raw = json!({
            "type": "Announce",
            "cc": ["https://example.social/users/alice"],
            "object": "https://example.social/users/alice/statuses/9"
        });

        let activity = Activity::deserialize(&raw).unwrap();
        assert_eq!(activity.kind(), Some(ActivityKind::Announce));
        assert_eq!(
            activity.object_url(),
            Some("https://example.social/users/alice/statuses/9")
        );
        assert!(activity.note().is_none());
    }

    #[test]
    fn test_missing_fields_default() {
        let activity = Activity::deserialize(&json!({"type": "Create"})).unwrap();
        assert!(activity.object.is_none());
        assert!(activity.cc.is_empty());
    }

    #[test]
    fn test_unknown_kind() {
        let activity = Activity::deserialize(&json!({"type": "Like"})).unwrap();
        assert_eq!(activity.kind(), None);
    }

    #[test]
    fn test_kind_display_roundtrip() {
        for kind in [ActivityKind::Create, ActivityKind::Announce] {
            assert_eq!(kind.to_string().parse::<ActivityKind>().unwrap(), kind);
        }
    }
}
