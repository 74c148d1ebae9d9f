//! End-to-end checks of the library facade through the public API: build a
//! small library on disk, then browse, search, open and render it the way a
//! front end would.

use anato_view::config::{self, LibraryConfig, Theme};
use anato_view::library::{LibraryIndex, ThumbnailStatus};
use anato_view::types::EntryKind;
use image::{Rgba, RgbaImage};
use std::fs;
use std::path::Path;
use std::sync::mpsc;
use tempfile::TempDir;

const RED: [u8; 4] = [255, 0, 0, 255];
const BLUE: [u8; 4] = [0, 0, 255, 255];

fn solid(path: &Path, w: u32, h: u32, color: [u8; 4]) {
    RgbaImage::from_pixel(w, h, Rgba(color)).save(path).unwrap();
}

/// ```text
/// <tmp>/
/// ├── -2-Pelvis/        schema: -1-Bone (red), -2-Vessels (blue)
/// ├── -10-Leg/          collection
/// │   └── -1-Femur/     schema
/// └── misc/             ignored
/// ```
fn library() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();

    let pelvis = root.join("-2-Pelvis");
    fs::create_dir_all(&pelvis).unwrap();
    solid(&pelvis.join("-1-Bone.png"), 10, 6, RED);
    solid(&pelvis.join("-2-Vessels.png"), 10, 6, BLUE);

    let femur = root.join("-10-Leg/-1-Femur");
    fs::create_dir_all(&femur).unwrap();
    solid(&femur.join("femur.png"), 4, 4, RED);

    fs::create_dir_all(root.join("misc")).unwrap();
    fs::write(root.join("misc/todo.txt"), "label the tendons").unwrap();

    tmp
}

fn index(tmp: &TempDir) -> LibraryIndex {
    LibraryIndex::new(LibraryConfig::with_root(tmp.path()))
}

#[test]
fn browse_root_lists_navigable_entries_in_natural_order() {
    let tmp = library();
    let listing = index(&tmp).browse_root().unwrap();

    let names: Vec<_> = listing.entries.iter().map(|e| e.name.as_str()).collect();
    let kinds: Vec<_> = listing.entries.iter().map(|e| e.kind).collect();
    assert_eq!(names, vec!["-2-Pelvis", "-10-Leg"]);
    assert_eq!(kinds, vec![EntryKind::Schema, EntryKind::Collection]);
    assert!(listing.skipped.is_empty());
}

#[test]
fn search_finds_nested_schema() {
    let tmp = library();
    let results = index(&tmp).search("femur");

    assert_eq!(results.len(), 1);
    let hit = &results.entries[0];
    assert_eq!(hit.display_name, "-1-Femur");
    assert_eq!(hit.relative_path, "-10-Leg/-1-Femur");
    assert_eq!(hit.kind, EntryKind::Schema);
}

#[test]
fn blank_search_returns_nothing() {
    let tmp = library();
    assert!(index(&tmp).search("   ").is_empty());
}

#[test]
fn open_toggle_and_render() {
    let tmp = library();
    let index = index(&tmp);
    let mut layers = index.open_schema(&tmp.path().join("-2-Pelvis")).unwrap();

    let names: Vec<_> = layers
        .ordered_layers()
        .iter()
        .map(|l| l.display_name())
        .collect();
    assert_eq!(names, vec!["-1-Bone", "-2-Vessels"]);

    // Front layer is opaque blue.
    let scene = index.render_scene(&layers).unwrap();
    assert_eq!(scene.dimensions(), (10, 6));
    assert_eq!(scene.get_pixel(3, 3).0, BLUE);

    // Hide it and the bone shows through.
    layers.set_visible(1, false).unwrap();
    let scene = index.render_scene(&layers).unwrap();
    assert_eq!(scene.get_pixel(3, 3).0, RED);

    // Half-transparent vessels blend over the bone.
    layers.set_visible(1, true).unwrap();
    layers.set_opacity(1, 0.5).unwrap();
    let px = index.render_scene(&layers).unwrap().get_pixel(0, 0).0;
    assert_eq!(px[3], 255);
    assert!((127..=128).contains(&px[0]), "red channel {}", px[0]);
    assert!((127..=128).contains(&px[2]), "blue channel {}", px[2]);
}

#[test]
fn out_of_range_layer_is_an_error() {
    let tmp = library();
    let mut layers = index(&tmp)
        .open_schema(&tmp.path().join("-2-Pelvis"))
        .unwrap();
    assert!(layers.set_visible(5, false).is_err());
    assert!(layers.ordered_layers().iter().all(|l| l.visible()));
}

#[test]
fn thumbnails_report_each_entry() {
    let tmp = library();
    let index = index(&tmp);
    let listing = index.browse_root().unwrap();

    let (tx, rx) = mpsc::channel();
    let thumbs = index.thumbnails(&listing.entries, Some(tx));
    let events: Vec<_> = rx.iter().collect();

    assert_eq!(thumbs.len(), 2);
    assert_eq!(thumbs[0].as_ref().map(|t| t.dimensions()), Some((10, 6)));
    assert!(thumbs[1].is_none());
    assert_eq!(events.len(), 2);
    let leg = events.iter().find(|e| e.name == "-10-Leg").unwrap();
    assert_eq!(leg.status, ThumbnailStatus::Placeholder);
}

#[test]
fn saved_config_round_trips_root_and_theme() {
    let lib = library();
    let cfg_dir = TempDir::new().unwrap();
    let cfg_path = cfg_dir.path().join(config::CONFIG_FILENAME);

    let mut cfg = config::load_config(&cfg_path).unwrap();
    assert_eq!(cfg, LibraryConfig::default());

    cfg.root_path = lib.path().to_path_buf();
    cfg.theme = Theme::Light;
    config::save_config(&cfg, &cfg_path).unwrap();

    let loaded = config::load_config(&cfg_path).unwrap();
    assert_eq!(loaded.root_path, lib.path());
    assert_eq!(loaded.theme, Theme::Light);

    let listing = LibraryIndex::new(loaded).browse_root().unwrap();
    assert_eq!(listing.len(), 2);
}
