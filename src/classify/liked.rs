//! Origin-platform classification for liked items.
//!
//! `likes.json` only stores the URL of each liked post. The URL shape is the
//! only hint about which fediverse software hosted it, so classification is a
//! list of substring checks where the **first match wins**. The order matters:
//! nothing stops a URL from containing both `/users/` and `/p/`, and such a
//! URL is reported as Mastodon.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Classified, Skip, actor_prefix};

/// Fediverse software a liked post most likely came from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "platform", rename_all = "lowercase")]
pub enum LikedOrigin {
    /// `tag:` or `urn:` identifiers; the post no longer resolves
    Vanished,
    /// `/users/` URLs
    Mastodon {
        /// Profile URL of the liked post's author
        actor: String,
    },
    /// `/p/` URLs
    Pixelfed,
    /// `/objects/` URLs
    Pleroma,
    /// `/item/` URLs
    Hubzilla,
    /// `/videos/` URLs
    PeerTube,
    /// `/notes/` URLs
    Misskey,
    /// No known pattern matched
    Unknown {
        /// The URL as found in the export
        url: String,
    },
}

impl LikedOrigin {
    /// Label used in the platform tally.
    pub fn label(&self) -> String {
        match self {
            LikedOrigin::Vanished => "unknown (vanished posts)".to_string(),
            LikedOrigin::Mastodon { .. } => "Mastodon".to_string(),
            LikedOrigin::Pixelfed => "Pixelfed".to_string(),
            LikedOrigin::Pleroma => "Pleroma".to_string(),
            LikedOrigin::Hubzilla => "Hubzilla".to_string(),
            LikedOrigin::PeerTube => "PeerTube".to_string(),
            LikedOrigin::Misskey => "Misskey".to_string(),
            LikedOrigin::Unknown { url } => format!("unknown ({})", url),
        }
    }
}

/// Classifies one raw entry of `likes.json`.
///
/// Entries are expected to be strings; anything else is skipped.
pub fn classify_liked_item(value: &Value) -> Classified<LikedOrigin> {
    value
        .as_str()
        .map(classify_liked_url)
        .ok_or_else(|| Skip::Malformed(format!("liked item is not a string: {}", value)))
}

/// Classifies a liked post URL by its shape.
pub fn classify_liked_url(url: &str) -> LikedOrigin {
    if url.starts_with("tag:") || url.starts_with("urn:") {
        return LikedOrigin::Vanished;
    }

    if url.contains("/users/") {
        LikedOrigin::Mastodon {
            actor: actor_prefix(url).to_string(),
        }
    } else if url.contains("/p/") {
        LikedOrigin::Pixelfed
    } else if url.contains("/objects/") {
        LikedOrigin::Pleroma
    } else if url.contains("/item/") {
        LikedOrigin::Hubzilla
    } else if url.contains("/videos/") {
        LikedOrigin::PeerTube
    } else if url.contains("/notes/") {
        LikedOrigin::Misskey
    } else {
        LikedOrigin::Unknown {
            url: url.to_string(),
        }
    }
}
