//! # Anato View
//!
//! A browser for libraries of layered anatomical diagrams. Your filesystem is
//! the data source: a folder of images is a schema whose images are stacked as
//! layers, a folder of folders is a collection, and everything else is left
//! alone.
//!
//! # Architecture
//!
//! ```text
//! scan       directory  →  Listing<DirectoryEntry>   (classify + natural order)
//! scan       root+query →  Listing<SearchResult>     (deep name search)
//! layers     schema     →  LayerSet                  (decoded, ordered, mutable)
//! imaging    LayerSet   →  RgbaImage                 (source-over composite)
//! ```
//!
//! [`library::LibraryIndex`] wraps these behind one configured facade; the CLI
//! in `main.rs` is a thin shell over it.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`naming`] | Natural sort keys and layer display names |
//! | [`scan`] | Directory classification, folder listing, deep search |
//! | [`types`] | Plain data shared between modules (`DirectoryEntry`, `Listing`, ...) |
//! | [`layers`] | The mutable layer model of an opened schema, with change observers |
//! | [`imaging`] | Decoding behind the [`imaging::ImageDecoder`] seam, compositing, thumbnail math |
//! | [`library`] | The facade: browse, search, open, render, thumbnails |
//! | [`config`] | `anato-view.toml` loading, validation and saving |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## No Caching
//!
//! Every listing and search goes back to the filesystem. Libraries are edited
//! by hand while the viewer is open, and a stale tree is worse than a slower
//! one.
//!
//! ## Partial Results Over Failure
//!
//! A library is a pile of user files. One unreadable folder or corrupt image
//! must not hide the rest, so batch operations return what they could read
//! alongside a list of [`types::SkippedPath`]s instead of failing outright.
//! Only a failure on the path the caller asked for is an error.
//!
//! ## Natural Order
//!
//! Layer files are named like `-1-Bone.png`, `-2-Muscle.png`, `-10-Skin.png`.
//! Plain string order would put `-10-` before `-2-`; [`naming::natural_key`]
//! compares digit runs by value so the stack reads the way it was numbered.

pub mod config;
pub mod imaging;
pub mod layers;
pub mod library;
pub mod naming;
pub mod output;
pub mod scan;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
