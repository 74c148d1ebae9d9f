//! Directory classification and traversal.
//!
//! Every directory in a library is judged from its immediate children only:
//!
//! ```text
//! Anatomy/                         # Collection (has subdirectories, no images)
//! ├── -1-Upper-Limb/               # Collection
//! │   ├── -2-Forearm/              # Schema
//! │   │   ├── -1-Bone.png          # back layer
//! │   │   ├── -2-Muscle.png
//! │   │   ├── -10-Skin.png         # front layer
//! │   │   └── notes.txt            # not a layer, ignored
//! │   └── -10-Hand/                # Schema
//! ├── -10-Thorax/                  # Schema (images win over subdirectories)
//! │   ├── -1-Ribs.png
//! │   └── sources/
//! └── Docs/                        # Ignored (no images, no subdirectories)
//!     └── readme.txt
//! ```
//!
//! ## Rules
//!
//! - **Schema**: at least one file with a supported image extension
//!   (case-insensitive, see [`IMAGE_EXTENSIONS`]).
//! - **Collection**: otherwise, at least one subdirectory, whatever that
//!   subdirectory turns out to be.
//! - **Ignored**: neither. Never returned to callers.
//!
//! Dot-named entries get no special treatment: `.overlay.png` is a layer and
//! `.git/` is a subdirectory like any other.
//!
//! ## Failure Isolation
//!
//! Only the directory an operation starts from can fail it. Children that
//! cannot be read are recorded in [`Listing::skipped`] and the traversal
//! continues.

use crate::naming::natural_cmp;
use crate::types::{DirectoryEntry, EntryKind, Listing, SearchResult, SkippedPath};
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Cannot read directory {}: {source}", path.display())]
    Access {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Image extensions that make a directory a schema.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "tif", "tiff", "webp"];

/// Immediate children of one directory, split by type.
struct DirContents {
    image_files: Vec<PathBuf>,
    subdirs: Vec<PathBuf>,
}

impl DirContents {
    fn kind(&self) -> EntryKind {
        if !self.image_files.is_empty() {
            EntryKind::Schema
        } else if !self.subdirs.is_empty() {
            EntryKind::Collection
        } else {
            EntryKind::Ignored
        }
    }
}

/// Whether `path` names a supported image, judged by extension alone.
pub fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| IMAGE_EXTENSIONS.iter().any(|known| ext.eq_ignore_ascii_case(known)))
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}

fn read_children(path: &Path) -> Result<DirContents, ScanError> {
    let entries = fs::read_dir(path).map_err(|source| ScanError::Access {
        path: path.to_path_buf(),
        source,
    })?;

    let mut contents = DirContents {
        image_files: Vec::new(),
        subdirs: Vec::new(),
    };
    for p in entries.filter_map(|e| e.ok()).map(|e| e.path()) {
        if p.is_dir() {
            contents.subdirs.push(p);
        } else if p.is_file() && is_image(&p) {
            contents.image_files.push(p);
        }
    }
    Ok(contents)
}

fn sort_by_file_name(paths: &mut [PathBuf]) {
    paths.sort_by(|a, b| natural_cmp(&file_name_of(a), &file_name_of(b)));
}

/// Classify a single directory from its immediate children.
pub fn classify(dir: &Path) -> Result<EntryKind, ScanError> {
    let kind = read_children(dir)?.kind();
    debug!("{} → {kind}", dir.display());
    Ok(kind)
}

/// Image files directly inside `dir`, in natural order of their file names.
pub fn schema_files(dir: &Path) -> Result<Vec<PathBuf>, ScanError> {
    let mut files = read_children(dir)?.image_files;
    sort_by_file_name(&mut files);
    Ok(files)
}

/// List the navigable subdirectories of `path` in natural order.
///
/// Fails only when `path` itself cannot be read.
pub fn list_children(path: &Path) -> Result<Listing<DirectoryEntry>, ScanError> {
    let mut subdirs = read_children(path)?.subdirs;
    sort_by_file_name(&mut subdirs);

    let mut listing = Listing::default();
    for dir in subdirs {
        match classify(&dir) {
            Ok(kind) if kind.is_navigable() => listing.entries.push(DirectoryEntry {
                name: file_name_of(&dir),
                path: dir,
                kind,
            }),
            Ok(_) => {}
            Err(e) => {
                warn!("skipping {}: {e}", dir.display());
                listing.skipped.push(SkippedPath::new(&dir, &e));
            }
        }
    }
    Ok(listing)
}

/// Find every schema or collection below `root` whose name contains `query`,
/// ignoring case.
///
/// The root itself is not a candidate. An empty query matches nothing. Symlinks
/// are not followed, and unreadable subtrees are skipped.
pub fn search_deep(root: &Path, query: &str) -> Listing<SearchResult> {
    let mut listing = Listing::default();
    if query.is_empty() {
        return listing;
    }
    let needle = query.to_lowercase();

    let walker = WalkDir::new(root).min_depth(1).into_iter();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                let path = err.path().unwrap_or(root).to_path_buf();
                warn!("skipping {}: {err}", path.display());
                listing.skipped.push(SkippedPath::new(&path, &err));
                continue;
            }
        };
        if !entry.file_type().is_dir() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().to_string();
        if !name.to_lowercase().contains(&needle) {
            continue;
        }

        match classify(entry.path()) {
            Ok(kind) if kind.is_navigable() => listing.entries.push(SearchResult {
                display_name: name,
                path: entry.path().to_path_buf(),
                kind,
                relative_path: relative_path(entry.path(), root),
            }),
            Ok(_) => {}
            Err(e) => {
                warn!("skipping {}: {e}", entry.path().display());
                listing.skipped.push(SkippedPath::new(entry.path(), &e));
            }
        }
    }

    listing.entries.sort_by(|a, b| {
        natural_cmp(&a.display_name, &b.display_name)
            .then_with(|| natural_cmp(&a.relative_path, &b.relative_path))
    });
    // A matching unreadable directory is reported by both the classifier and
    // the walker.
    listing.skipped.sort_by(|a, b| a.path.cmp(&b.path));
    listing.skipped.dedup_by(|a, b| a.path == b.path);
    listing
}

/// `path` relative to `root`, joined with `/` regardless of platform.
fn relative_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy().to_string())
        .collect::<Vec<_>>()
        .join("/")
}
