//! Loading a Mastodon export from disk.
//!
//! An unpacked Mastodon archive is a directory containing, among others:
//!
//! ```text
//! archive/
//! ├── outbox.json        # OrderedCollection of Create/Announce activities
//! ├── likes.json         # OrderedCollection of liked post URLs
//! └── media_attachments/ # files referenced by attachment URLs
//! ```
//!
//! [`Archive`] is the context value both pipelines receive. It holds the base
//! directory and the raw `orderedItems` of each document. Records are kept as
//! [`serde_json::Value`] so that one malformed record can be skipped by the
//! classifiers instead of failing the whole document.
//!
//! # Example
//!
//! ```rust,no_run
//! use tootpack::archive::Archive;
//!
//! let archive = Archive::open("mastodon-export")?;
//! println!("{} outbox records", archive.outbox().len());
//! # Ok::<(), tootpack::ArchiveError>(())
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::{ArchiveError, Result};

/// File name of the outbox log inside the archive.
pub const OUTBOX_FILE: &str = "outbox.json";

/// File name of the likes log inside the archive.
pub const LIKES_FILE: &str = "likes.json";

/// File name of the rendered page inside the archive.
pub const HTML_FILE: &str = "outbox.html";

/// Wrapper for the ActivityStreams collections in the export.
#[derive(Debug, Deserialize)]
struct OrderedCollection {
    #[serde(rename = "orderedItems")]
    ordered_items: Option<Vec<Value>>,
}

/// A loaded archive: base directory plus its record sets.
#[derive(Debug, Clone, Default)]
pub struct Archive {
    root: PathBuf,
    outbox: Vec<Value>,
    likes: Option<Vec<Value>>,
}

impl Archive {
    /// Opens an archive directory and loads its outbox.
    ///
    /// The likes log is loaded on demand by [`Archive::load_likes`], since
    /// only the summary needs it.
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        if !root.exists() {
            return Err(ArchiveError::missing_archive(root));
        }

        let outbox = read_collection(&root.join(OUTBOX_FILE), OUTBOX_FILE)?;
        info!(records = outbox.len(), path = %root.display(), "loaded outbox");

        Ok(Self {
            root: root.to_path_buf(),
            outbox,
            likes: None,
        })
    }

    /// Builds an archive from records already in memory.
    ///
    /// Useful for tests and for callers that obtained the JSON elsewhere.
    pub fn from_records(root: impl Into<PathBuf>, outbox: Vec<Value>, likes: Vec<Value>) -> Self {
        Self {
            root: root.into(),
            outbox,
            likes: Some(likes),
        }
    }

    /// Builds an archive from the text of `outbox.json` and `likes.json`.
    pub fn from_json_str(root: impl Into<PathBuf>, outbox: &str, likes: &str) -> Result<Self> {
        Ok(Self {
            root: root.into(),
            outbox: parse_collection(outbox, OUTBOX_FILE, None)?,
            likes: Some(parse_collection(likes, LIKES_FILE, None)?),
        })
    }

    /// Loads `likes.json` if it has not been loaded yet.
    pub fn load_likes(&mut self) -> Result<&[Value]> {
        if self.likes.is_none() {
            let likes = read_collection(&self.root.join(LIKES_FILE), LIKES_FILE)?;
            info!(records = likes.len(), "loaded likes");
            self.likes = Some(likes);
        }
        Ok(self.likes.as_deref().unwrap_or_default())
    }

    /// Raw outbox records, in export order.
    pub fn outbox(&self) -> &[Value] {
        &self.outbox
    }

    /// Raw liked items, or an empty slice if they were never loaded.
    pub fn likes(&self) -> &[Value] {
        self.likes.as_deref().unwrap_or_default()
    }

    /// Where the rendered HTML page is written.
    pub fn html_path(&self) -> PathBuf {
        self.root.join(HTML_FILE)
    }
}

fn read_collection(path: &Path, file: &'static str) -> Result<Vec<Value>> {
    debug!(path = %path.display(), "reading collection");
    let content = fs::read_to_string(path)?;
    parse_collection(&content, file, Some(path.to_path_buf()))
}

fn parse_collection(content: &str, file: &'static str, path: Option<PathBuf>) -> Result<Vec<Value>> {
    let collection: OrderedCollection =
        serde_json::from_str(content).map_err(|e| ArchiveError::parse(file, e, path))?;

    collection
        .ordered_items
        .ok_or_else(|| ArchiveError::invalid_format(file, "missing \"orderedItems\" array"))
}
