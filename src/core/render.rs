//! Static HTML rendering of the outbox.
//!
//! One forward pass over the outbox produces one self-contained page. Boosts
//! become a green link block, posts become their raw HTML content followed by
//! their media, and every entry is closed by a `<hr/>` separator.
//!
//! Each record is rendered into its own buffer first. A record that fails
//! classification halfway through (say, an attachment without a URL) is
//! dropped whole and never leaves a half-written entry behind.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use tootpack::config::RenderConfig;
//! use tootpack::core::render::render_document;
//!
//! let records = vec![json!({
//!     "type": "Announce",
//!     "cc": ["https://example.social/users/alice"],
//!     "object": "https://example.social/users/alice/statuses/1"
//! })];
//!
//! let html = render_document(&records, &RenderConfig::default());
//! assert!(html.contains(r#"by <a href="https://example.social/users/alice">alice</a>"#));
//! ```

use std::fs;
use std::path::PathBuf;

use serde_json::Value;
use tracing::{debug, info};

use crate::activity::{Activity, ActivityKind, Attachment, Note};
use crate::archive::Archive;
use crate::classify::{
    Classified, MediaKind, Reshare, Skip, classify_media, classify_reshare, decode_activity,
    published_at,
};
use crate::config::RenderConfig;
use crate::error::Result;

/// Document prologue: styles for padding, descriptions and boosts.
pub const HTML_HEAD: &str = r#"
<!DOCTYPE html>
<html>
  <head>
    <meta charset="utf-8">
    <title>Mastodon archive</title>
    <style>
       div {
          padding: 20px;
      }
      .img_desc {
          background-color: lightblue;
      }
      .boost {
          background-color: lightgreen;
      }
    </style>
  </head>

<body>
<hr/>
"#;

/// Document epilogue.
pub const HTML_FOOT: &str = "
</body>
</html>
";

const SEPARATOR: &str = "<hr/>\n";

/// Shown in place of a missing attachment description.
const NO_DESCRIPTION: &str = "None";

/// Statistics of one rendering pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Entries written to the page (hidden boosts are not counted)
    pub rendered: usize,
    /// Records dropped because they could not be classified
    pub skipped: usize,
}

/// A post as the page shows it.
///
/// Only `content` is required. Audience and threading are never shown, and
/// the timestamp is only needed next to an original link.
#[derive(Debug, Clone, Copy)]
struct PagePost<'a> {
    note: &'a Note,
    content: &'a str,
    published: Option<&'a str>,
}

impl<'a> PagePost<'a> {
    fn from_activity(activity: &'a Activity) -> Classified<Self> {
        let note = activity.note().ok_or(Skip::MissingField("object"))?;
        let content = note
            .content
            .as_deref()
            .ok_or(Skip::MissingField("object.content"))?;
        Ok(Self {
            note,
            content,
            published: published_at(activity, note),
        })
    }
}

/// Renders a single outbox record.
///
/// Returns `Ok(None)` for a boost when boosts are hidden.
pub fn render_record(value: &Value, config: &RenderConfig) -> Classified<Option<String>> {
    let activity = decode_activity(value)?;
    match activity.kind() {
        Some(ActivityKind::Announce) => {
            let reshare = classify_reshare(&activity)?;
            Ok(config.show_boosts.then(|| render_reshare(&reshare)))
        }
        Some(ActivityKind::Create) => {
            render_post(&PagePost::from_activity(&activity)?, config).map(Some)
        }
        None => Err(Skip::UnsupportedType(activity.kind.clone())),
    }
}

/// Renders the whole outbox into a complete HTML document.
pub fn render_document(records: &[Value], config: &RenderConfig) -> String {
    render_document_with_stats(records, config).0
}

/// Like [`render_document`], also returning how many records made it in.
pub fn render_document_with_stats(records: &[Value], config: &RenderConfig) -> (String, RenderStats) {
    let mut output = String::from(HTML_HEAD);
    let mut stats = RenderStats::default();

    for (idx, value) in records.iter().enumerate() {
        match render_record(value, config) {
            Ok(Some(entry)) => {
                output.push_str(&entry);
                stats.rendered += 1;
            }
            Ok(None) => {}
            Err(skip) => {
                debug!(record = idx, %skip, "dropping record from page");
                stats.skipped += 1;
            }
        }
    }

    output.push_str(HTML_FOOT);
    (output, stats)
}

/// Renders the archive's outbox and writes it to `<archive>/outbox.html`.
///
/// The page is built completely in memory before the file is created.
pub fn write_html(archive: &Archive, config: &RenderConfig) -> Result<(PathBuf, RenderStats)> {
    let (html, stats) = render_document_with_stats(archive.outbox(), config);
    let path = archive.html_path();

    fs::write(&path, html)?;
    info!(
        path = %path.display(),
        rendered = stats.rendered,
        skipped = stats.skipped,
        "wrote html"
    );

    Ok((path, stats))
}

fn render_reshare(reshare: &Reshare<'_>) -> String {
    format!(
        "<div class=\"boost\"><a href=\"{}\">Boosted post</a> by <a href=\"{}\">{}</a></div>\n{}",
        reshare.object_url,
        reshare.actor,
        reshare.actor_name(),
        SEPARATOR
    )
}

fn render_post(post: &PagePost<'_>, config: &RenderConfig) -> Classified<String> {
    let mut entry = String::from("<div>");

    if config.link_original {
        let id = post.note.id.as_deref().ok_or(Skip::MissingField("object.id"))?;
        let published = post
            .published
            .ok_or(Skip::MissingField("object.published"))?;
        entry.push_str(&format!(
            "<a href=\"{}\">Original</a> {}\n",
            id,
            display_timestamp(published)
        ));
    }

    entry.push_str(post.content);
    entry.push_str("</div>\n");

    for attachment in &post.note.attachments {
        entry.push_str(&render_attachment(attachment)?);
    }

    entry.push_str(SEPARATOR);
    Ok(entry)
}

fn render_attachment(attachment: &Attachment) -> Classified<String> {
    let description = attachment.name.as_deref().unwrap_or(NO_DESCRIPTION);

    let embed = match classify_media(&attachment.media_type) {
        MediaKind::Image => format!(
            "<div><img src=\"{}\" width=\"600\" alt=\"{}\"></div>\n",
            media_src(attachment)?,
            description
        ),
        MediaKind::Video => format!(
            "<div><video width=\"600\" controls>\n<source src=\"{}\" type=\"{}\"></video></div>\n",
            media_src(attachment)?,
            attachment.media_type
        ),
        MediaKind::Audio => format!(
            "<div><audio controls>\n<source src=\"{}\" type=\"{}\"></audio></div>\n",
            media_src(attachment)?,
            attachment.media_type
        ),
        MediaKind::Other => {
            "<div><i>(error: media attachment is neither image nor video)</i></div>\n".to_string()
        }
    };

    Ok(format!(
        "{}<div class=\"img_desc\">{}</div>\n",
        embed, description
    ))
}

/// Attachment URL made relative to the archive directory.
///
/// Export URLs are absolute paths (`/media_attachments/...`); the first
/// character is dropped.
fn media_src(attachment: &Attachment) -> Classified<&str> {
    let url = attachment
        .url
        .as_deref()
        .ok_or(Skip::MissingField("attachment.url"))?;
    let mut chars = url.chars();
    chars.next();
    Ok(chars.as_str())
}

/// `2022-11-13T21:19:52Z` becomes `2022-11-13 21:19:52`.
fn display_timestamp(published: &str) -> String {
    let mut shown = published.replace('T', " ");
    shown.pop();
    shown
}
