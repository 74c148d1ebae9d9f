//! The library facade: the one entry point a front end needs.
//!
//! [`LibraryIndex`] ties the classifier, the layer model and the compositor to
//! a configured library root:
//!
//! | Question | Method |
//! |---|---|
//! | What is in this folder? | [`browse`](LibraryIndex::browse) |
//! | What matches this query? | [`search`](LibraryIndex::search) |
//! | Open a schema for viewing | [`open_schema`](LibraryIndex::open_schema) |
//! | Draw the current view | [`render_scene`](LibraryIndex::render_scene) |
//! | Card image for an entry | [`thumbnail`](LibraryIndex::thumbnail) |
//!
//! Nothing is cached: every call looks at the filesystem again, so a folder
//! edited between two calls is seen as it is now.
//!
//! ## Search Mode
//!
//! An empty (or all-whitespace) query is not a search ([`is_search_query`]).
//! [`search`](LibraryIndex::search)
//! returns no results for it; the caller is expected to switch back to
//! browsing the folder it was last showing.
//!
//! ## Parallel Thumbnails
//!
//! [`thumbnails`](LibraryIndex::thumbnails) renders many cards at once on the
//! rayon pool, reporting each one through an optional channel as it
//! completes. Results come back in input order.

use crate::config::LibraryConfig;
use crate::imaging::compositor;
use crate::imaging::{ImageDecoder, RustBackend, fit_within, render_preview};
use crate::layers::LayerSet;
use crate::scan::{self, ScanError};
use crate::types::{DirectoryEntry, EntryKind, Listing, SearchResult};
use image::RgbaImage;
use image::imageops::{self, FilterType};
use log::{debug, warn};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;

/// Progress report for one entry of a [`LibraryIndex::thumbnails`] batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThumbnailEvent {
    pub name: String,
    pub path: PathBuf,
    pub status: ThumbnailStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThumbnailStatus {
    Rendered { width: u32, height: u32 },
    /// Collections, and schemas whose base layer cannot be decoded.
    Placeholder,
}

/// Whether `query` asks for a search. Blank queries mean "go back to browsing".
pub fn is_search_query(query: &str) -> bool {
    !query.trim().is_empty()
}

/// Facade over one configured library.
pub struct LibraryIndex<D: ImageDecoder = RustBackend> {
    config: LibraryConfig,
    decoder: D,
}

impl LibraryIndex {
    pub fn new(config: LibraryConfig) -> Self {
        Self::with_decoder(config, RustBackend::new())
    }
}

impl<D: ImageDecoder> LibraryIndex<D> {
    /// Build an index that decodes layers with `decoder`.
    pub fn with_decoder(config: LibraryConfig, decoder: D) -> Self {
        Self { config, decoder }
    }

    pub fn config(&self) -> &LibraryConfig {
        &self.config
    }

    pub fn root(&self) -> &Path {
        &self.config.root_path
    }

    /// Navigable entries directly inside `path`, in natural order.
    pub fn browse(&self, path: &Path) -> Result<Listing<DirectoryEntry>, ScanError> {
        debug!("browse {}", path.display());
        scan::list_children(path)
    }

    /// [`browse`](Self::browse) the library root.
    pub fn browse_root(&self) -> Result<Listing<DirectoryEntry>, ScanError> {
        self.browse(self.root())
    }

    /// Deep search below the library root.
    pub fn search(&self, query: &str) -> Listing<SearchResult> {
        self.search_in(self.root(), query)
    }

    /// Deep search below `root`. Surrounding whitespace in `query` is ignored.
    pub fn search_in(&self, root: &Path, query: &str) -> Listing<SearchResult> {
        if !is_search_query(query) {
            return Listing::default();
        }
        let query = query.trim();
        debug!("search {} for '{query}'", root.display());
        scan::search_deep(root, query)
    }

    /// Load the schema at `path` into a fresh, fully visible layer set.
    pub fn open_schema(&self, path: &Path) -> Result<LayerSet, ScanError> {
        LayerSet::load_with_decoder(&self.decoder, path)
    }

    /// Composite the visible layers of an opened schema.
    pub fn render_scene(&self, layers: &LayerSet) -> Option<RgbaImage> {
        compositor::render_scene(layers)
    }

    /// Card image for an entry: the full layer stack of a schema, scaled to
    /// fit `thumbnails.max_edge`. Collections have none.
    pub fn thumbnail(&self, path: &Path, kind: EntryKind) -> Option<RgbaImage> {
        if kind != EntryKind::Schema {
            return None;
        }
        let files = match scan::schema_files(path) {
            Ok(files) => files,
            Err(e) => {
                warn!("no thumbnail: {e}");
                return None;
            }
        };
        let preview = render_preview(&self.decoder, &files, self.config.thumbnails.max_files)?;
        Some(self.shrink(preview))
    }

    fn shrink(&self, img: RgbaImage) -> RgbaImage {
        let (w, h) = fit_within(img.dimensions(), self.config.thumbnails.max_edge);
        if (w, h) == img.dimensions() {
            img
        } else {
            imageops::resize(&img, w, h, FilterType::Lanczos3)
        }
    }

    /// Render thumbnails for many entries in parallel.
    ///
    /// When `events` is given, one [`ThumbnailEvent`] is sent per entry as it
    /// finishes (in completion order). The returned vector is in input order.
    pub fn thumbnails(
        &self,
        entries: &[DirectoryEntry],
        events: Option<Sender<ThumbnailEvent>>,
    ) -> Vec<Option<RgbaImage>> {
        entries
            .par_iter()
            .map_with(events, |tx, entry| {
                let thumb = self.thumbnail(&entry.path, entry.kind);
                if let Some(tx) = tx {
                    let status = match &thumb {
                        Some(img) => ThumbnailStatus::Rendered {
                            width: img.width(),
                            height: img.height(),
                        },
                        None => ThumbnailStatus::Placeholder,
                    };
                    // The receiver may have stopped listening; rendering goes on.
                    tx.send(ThumbnailEvent {
                        name: entry.name.clone(),
                        path: entry.path.clone(),
                        status,
                    })
                    .ok();
                }
                thumb
            })
            .collect()
    }

    /// The folder one level up from `path`, or `None` at (or outside) the root.
    pub fn parent_of(&self, path: &Path) -> Option<PathBuf> {
        if path == self.root() || !path.starts_with(self.root()) {
            return None;
        }
        path.parent().map(Path::to_path_buf)
    }

    /// Folder names from the root down to `path`. Empty for the root itself
    /// or for paths outside the library.
    pub fn breadcrumb(&self, path: &Path) -> Vec<String> {
        path.strip_prefix(self.root())
            .map(|rel| {
                rel.components()
                    .map(|c| c.as_os_str().to_string_lossy().to_string())
                    .collect()
            })
            .unwrap_or_default()
    }
}
