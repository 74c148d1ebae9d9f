//! Shared test utilities for the anato-view test suite.
//!
//! Builds a small anatomy library on disk with real, decodable layer images
//! and provides extractors for asserting on listings and layer sets.
//!
//! # Fixture Layout
//!
//! ```text
//! <tmp>/
//! ├── -1-Upper-Limb/            collection
//! │   ├── -1-Arm/               schema (one JPEG)
//! │   ├── -2-Forearm/           schema: -1-Bone, -2-Muscle, -10-Skin + notes.txt
//! │   └── -10-Hand/             schema (one PNG)
//! ├── -2-Head/                  collection
//! │   ├── Skull/                schema
//! │   └── Empty/                ignored
//! ├── -10-Thorax/               schema, plus sources/ (itself a schema)
//! └── Docs/                     ignored (readme.txt only)
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use crate::test_helpers::*;
//!
//! let tmp = setup_library();
//! let listing = list_children(tmp.path()).unwrap();
//! assert_eq!(entry_names(&listing), vec!["-1-Upper-Limb", "-2-Head", "-10-Thorax"]);
//! ```

use image::{ImageEncoder, Rgba, RgbaImage};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

use crate::layers::LayerSet;
use crate::types::{DirectoryEntry, EntryKind, Listing, SearchResult};

// =========================================================================
// Fixture constants
// =========================================================================

pub const UPPER_LIMB: &str = "-1-Upper-Limb";
pub const FOREARM: &str = "-1-Upper-Limb/-2-Forearm";
pub const THORAX: &str = "-10-Thorax";
pub const HEAD: &str = "-2-Head";

/// Edge length of every forearm layer.
pub const LAYER_SIZE: u32 = 8;

pub const BONE_COLOR: [u8; 4] = [230, 225, 200, 255];
pub const MUSCLE_COLOR: [u8; 4] = [180, 40, 40, 255];
pub const SKIN_COLOR: [u8; 4] = [240, 190, 160, 255];

// =========================================================================
// Image writers
// =========================================================================

/// Write a PNG filled with a single color.
pub fn write_solid_png(path: &Path, width: u32, height: u32, color: [u8; 4]) {
    RgbaImage::from_pixel(width, height, Rgba(color))
        .save(path)
        .unwrap();
}

/// Write a square PNG that is `color` on rows `rows.0..rows.1` and
/// transparent elsewhere.
pub fn write_band_png(path: &Path, size: u32, rows: (u32, u32), color: [u8; 4]) {
    RgbaImage::from_fn(size, size, |_, y| {
        if y >= rows.0 && y < rows.1 {
            Rgba(color)
        } else {
            Rgba([0, 0, 0, 0])
        }
    })
    .save(path)
    .unwrap();
}

/// Write an opaque JPEG.
pub fn write_jpeg(path: &Path, width: u32, height: u32) {
    let pixels = vec![128u8; (width * height * 3) as usize];
    let file = fs::File::create(path).unwrap();
    image::codecs::jpeg::JpegEncoder::new(std::io::BufWriter::new(file))
        .write_image(&pixels, width, height, image::ExtendedColorType::Rgb8)
        .unwrap();
}

/// Write a file with an image extension but garbage contents.
pub fn write_corrupt(path: &Path) {
    fs::write(path, b"\x00\x01 not an image").unwrap();
}

// =========================================================================
// Fixture setup
// =========================================================================

/// Build the fixture library in a fresh temp directory.
pub fn setup_library() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    let dir = |rel: &str| {
        let p = root.join(rel);
        fs::create_dir_all(&p).unwrap();
        p
    };

    let arm = dir("-1-Upper-Limb/-1-Arm");
    write_jpeg(&arm.join("-1-Humerus.jpg"), 6, 4);

    let forearm = dir(FOREARM);
    write_solid_png(&forearm.join("-1-Bone.png"), LAYER_SIZE, LAYER_SIZE, BONE_COLOR);
    write_band_png(
        &forearm.join("-2-Muscle.png"),
        LAYER_SIZE,
        (LAYER_SIZE / 4, LAYER_SIZE / 2),
        MUSCLE_COLOR,
    );
    write_band_png(
        &forearm.join("-10-Skin.png"),
        LAYER_SIZE,
        (0, LAYER_SIZE / 4),
        SKIN_COLOR,
    );
    fs::write(forearm.join("notes.txt"), "radius and ulna").unwrap();

    let hand = dir("-1-Upper-Limb/-10-Hand");
    write_solid_png(&hand.join("carpals.png"), 4, 4, BONE_COLOR);

    let skull = dir("-2-Head/Skull");
    write_solid_png(&skull.join("-1-Cranium.png"), 4, 4, BONE_COLOR);
    dir("-2-Head/Empty");

    let thorax = dir(THORAX);
    write_solid_png(&thorax.join("-1-Ribs.png"), 4, 4, BONE_COLOR);
    let sources = dir("-10-Thorax/sources");
    write_solid_png(&sources.join("original.png"), 4, 4, SKIN_COLOR);

    let docs = dir("Docs");
    fs::write(docs.join("readme.txt"), "library notes").unwrap();

    tmp
}

/// Remove all permissions from `dir`. Returns `false` (and restores the
/// permissions) when the directory stays readable anyway, as it does for root.
#[cfg(unix)]
pub fn lock_dir(dir: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(dir, fs::Permissions::from_mode(0o000)).unwrap();
    if fs::read_dir(dir).is_ok() {
        unlock_dir(dir);
        return false;
    }
    true
}

/// Undo [`lock_dir`] so the temp directory can be cleaned up.
#[cfg(unix)]
pub fn unlock_dir(dir: &Path) {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(dir, fs::Permissions::from_mode(0o755)).unwrap();
}

// =========================================================================
// Bulk extractors
// =========================================================================

/// Entry names in listing order.
pub fn entry_names(listing: &Listing<DirectoryEntry>) -> Vec<&str> {
    listing.entries.iter().map(|e| e.name.as_str()).collect()
}

/// Entry kinds in listing order.
pub fn entry_kinds(listing: &Listing<DirectoryEntry>) -> Vec<EntryKind> {
    listing.entries.iter().map(|e| e.kind).collect()
}

/// Search result names in result order.
pub fn search_names(listing: &Listing<SearchResult>) -> Vec<&str> {
    listing
        .entries
        .iter()
        .map(|r| r.display_name.as_str())
        .collect()
}

/// Search result paths relative to the search root, in result order.
pub fn search_paths(listing: &Listing<SearchResult>) -> Vec<&str> {
    listing
        .entries
        .iter()
        .map(|r| r.relative_path.as_str())
        .collect()
}

/// Layer display names back to front.
pub fn layer_names(set: &LayerSet) -> Vec<&str> {
    set.ordered_layers()
        .iter()
        .map(|l| l.display_name())
        .collect()
}

/// Find a listing entry by name. Panics if not found.
pub fn find_entry<'a>(listing: &'a Listing<DirectoryEntry>, name: &str) -> &'a DirectoryEntry {
    listing
        .entries
        .iter()
        .find(|e| e.name == name)
        .unwrap_or_else(|| {
            let names = entry_names(listing);
            panic!("entry '{name}' not found. Available: {names:?}")
        })
}
