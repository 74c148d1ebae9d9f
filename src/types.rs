//! Shared result types returned by the classifier and the library facade.
//!
//! These are plain data: produced fresh by every traversal, never cached, and
//! serializable so the CLI can emit them as JSON.

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// What a directory is, judged from its immediate children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// Contains at least one supported image file: a stack of layers.
    Schema,
    /// No images, but at least one subdirectory.
    Collection,
    /// Neither; never surfaced to callers.
    Ignored,
}

impl EntryKind {
    pub fn is_navigable(self) -> bool {
        !matches!(self, EntryKind::Ignored)
    }

    pub fn label(self) -> &'static str {
        match self {
            EntryKind::Schema => "schema",
            EntryKind::Collection => "collection",
            EntryKind::Ignored => "ignored",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A classified child directory from a shallow listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectoryEntry {
    pub name: String,
    pub path: PathBuf,
    pub kind: EntryKind,
}

/// A directory matched by a deep search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    pub display_name: String,
    pub path: PathBuf,
    pub kind: EntryKind,
    /// Location below the search root, `/`-separated.
    pub relative_path: String,
}

/// A path left out of a batch operation, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedPath {
    pub path: PathBuf,
    pub reason: String,
}

impl SkippedPath {
    pub fn new(path: &Path, reason: impl fmt::Display) -> Self {
        Self {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }
}

/// Entries produced by a traversal plus the paths it had to skip.
///
/// A skipped path never aborts the traversal; it only shows up here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Listing<T> {
    pub entries: Vec<T>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedPath>,
}

impl<T> Listing<T> {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl<T> Default for Listing<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            skipped: Vec::new(),
        }
    }
}
