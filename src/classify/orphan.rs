//! Orphaned-reply detection.
//!
//! An *orphan* is an original post (no `inReplyTo`) whose first paragraph
//! opens by addressing another actor. That usually means it was written as a
//! reply, but the parent post has vanished or was never linked, so the
//! conversation is broken.
//!
//! Detection is plain text matching against the two HTML templates Mastodon
//! emits for a leading mention:
//!
//! 1. **Plain**: `<p>@alice@example.social hello</p>`. The actor is the first
//!    whitespace-delimited token.
//! 2. **Linked**: `<p><span class="h-card"><a href="URL" class="u-url mention">@<span>alice</span></a></span> hello</p>`.
//!    The actor is `URL`, the 4th `"`-delimited token.
//!
//! This is not an HTML parser. Any change in Mastodon's markup (extra
//! attributes, different quoting) makes the match fail silently and the post
//! counts as an ordinary original. Callers only see [`detect_orphan`], so a
//! real parser can replace this module without touching them.

use serde::{Deserialize, Serialize};

use crate::activity::Note;

const PARAGRAPH_CLOSE: &str = "</p>";

/// Characters dropped from the start of the first paragraph (the `<p>` tag).
const PARAGRAPH_OPEN_LEN: usize = 3;

const HCARD_PREFIX: &str = r#"<span class="h-card"><a href="#;
const MENTION_MARKER: &str = r#"class="u-url mention">@<span>"#;

/// The actor addressed at the start of an orphaned post.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "shape", content = "actor", rename_all = "lowercase")]
pub enum OrphanMention {
    /// Leading `@handle` written as plain text
    Plain(String),
    /// Leading h-card mention; holds the profile URL
    Linked(String),
}

impl OrphanMention {
    /// The mentioned actor (handle or profile URL).
    pub fn actor(&self) -> &str {
        match self {
            OrphanMention::Plain(actor) | OrphanMention::Linked(actor) => actor,
        }
    }
}

/// Detects whether an original post is an orphaned reply.
///
/// Returns `None` for replies, for notes without content, and for posts that
/// do not open with a mention.
pub fn detect_orphan(note: &Note) -> Option<OrphanMention> {
    if note.in_reply_to.is_some() {
        return None;
    }
    detect_in_content(note.content.as_deref()?)
}

/// Runs the orphan heuristic on a raw HTML body.
pub fn detect_in_content(content: &str) -> Option<OrphanMention> {
    let first_paragraph = content.split(PARAGRAPH_CLOSE).next().unwrap_or_default();
    let line = skip_chars(first_paragraph, PARAGRAPH_OPEN_LEN);

    if line.starts_with('@') {
        let actor = line.split_whitespace().next()?;
        return Some(OrphanMention::Plain(actor.to_string()));
    }

    if line.starts_with(HCARD_PREFIX) && line.contains(MENTION_MARKER) {
        let actor = line.split('"').nth(3)?;
        return Some(OrphanMention::Linked(actor.to_string()));
    }

    None
}

/// Drops the first `n` characters, returning `""` if there are fewer.
fn skip_chars(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[idx..],
        None => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINKED: &str = r#"<p><span class="h-card"><a href="https://example.social/@bob" class="u-url mention">@<span>bob</span></a></span> are you there?</p>"#;

    #[test]
    fn test_plain_mention() {
        assert_eq!(
            detect_in_content("<p>@alice hello</p>"),
            Some(OrphanMention::Plain("@alice".into()))
        );
    }

    #[test]
    fn test_plain_mention_full_handle() {
        let found = detect_in_content("<p>@alice@example.social\tsee you</p><p>later</p>").unwrap();
        assert_eq!(found.actor(), "@alice@example.social");
    }

    #[test]
    fn test_linked_mention() {
        assert_eq!(
            detect_in_content(LINKED),
            Some(OrphanMention::Linked("https://example.social/@bob".into()))
        );
    }

    #[test]
    fn test_hcard_without_mention_marker() {
        let content = r#"<p><span class="h-card"><a href="https://x/@y" class="u-url">y</a></span></p>"#;
        assert_eq!(detect_in_content(content), None);
    }

    #[test]
    fn test_not_an_orphan() {
        assert_eq!(detect_in_content("<p>hello @alice</p>"), None);
        assert_eq!(detect_in_content(""), None);
        assert_eq!(detect_in_content("<p>"), None);
    }

    #[test]
    fn test_only_first_paragraph_counts() {
        assert_eq!(detect_in_content("<p>hi</p><p>@alice</p>"), None);
    }

    #[test]
    fn test_multibyte_prefix() {
        // three characters, not three bytes, are dropped
        assert_eq!(
            detect_in_content("äöü@alice x</p>"),
            Some(OrphanMention::Plain("@alice".into()))
        );
    }

    #[test]
    fn test_replies_are_never_orphans() {
        let note = Note {
            in_reply_to: Some("https://example.social/users/bob/statuses/1".into()),
            content: Some("<p>@bob hi</p>".into()),
            ..Note::default()
        };
        assert_eq!(detect_orphan(&note), None);
    }

    #[test]
    fn test_detect_orphan_on_note() {
        let note = Note {
            content: Some(LINKED.into()),
            ..Note::default()
        };
        assert!(matches!(detect_orphan(&note), Some(OrphanMention::Linked(_))));
    }
}
