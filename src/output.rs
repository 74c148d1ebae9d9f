//! CLI output formatting.
//!
//! # Information-First Display
//!
//! Every entity leads with its positional index and name; filesystem paths
//! and per-entity details follow on indented context lines. Skipped paths are
//! listed last so a partially unreadable library still reads as an inventory.
//!
//! # Output Format
//!
//! ## Browse
//!
//! ```text
//! Root > Upper-Limb
//! 001 -1-Arm [schema]
//! 002 -2-Forearm [schema]
//! 003 -10-Hand [schema]
//! ```
//!
//! ## Search
//!
//! ```text
//! Searching for 'arm' in entire library...
//! 001 -1-Arm [schema]
//!     Path: -1-Upper-Limb/-1-Arm
//! ```
//!
//! ## Layers
//!
//! ```text
//! -2-Forearm (3 layers)
//! 001 -1-Bone  visible  100%
//!     Source: -1-Bone.png
//! ```
//!
//! # Architecture
//!
//! Each view has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions do no I/O.

use crate::layers::LayerSet;
use crate::library::{ThumbnailEvent, ThumbnailStatus};
use crate::types::{DirectoryEntry, Listing, SearchResult, SkippedPath};

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Format an entity header: positional index + name + kind tag.
///
/// ```text
/// 001 -2-Forearm [schema]
/// ```
fn entity_header(index: usize, name: &str, kind: impl std::fmt::Display) -> String {
    format!("{} {} [{}]", format_index(index), name, kind)
}

fn skipped_lines(skipped: &[SkippedPath]) -> Vec<String> {
    if skipped.is_empty() {
        return Vec::new();
    }
    let mut lines = vec![String::new(), "Skipped".to_string()];
    for s in skipped {
        lines.push(format!("{}{}", indent(1), s.path.display()));
        lines.push(format!("{}{}", indent(2), s.reason));
    }
    lines
}

// ============================================================================
// Breadcrumb
// ============================================================================

/// Location label for a browse view.
///
/// ```text
/// Root Library
/// Root > Upper-Limb > Forearm
/// ```
pub fn format_breadcrumb(parts: &[String]) -> String {
    if parts.is_empty() {
        "Root Library".to_string()
    } else {
        format!("Root > {}", parts.join(" > "))
    }
}

// ============================================================================
// Browse
// ============================================================================

/// Format a folder listing under its breadcrumb.
pub fn format_listing(breadcrumb: &[String], listing: &Listing<DirectoryEntry>) -> Vec<String> {
    let mut lines = vec![format_breadcrumb(breadcrumb)];
    if listing.is_empty() {
        lines.push(format!("{}(nothing to show)", indent(1)));
    }
    for (i, entry) in listing.entries.iter().enumerate() {
        lines.push(entity_header(i + 1, &entry.name, entry.kind));
    }
    lines.extend(skipped_lines(&listing.skipped));
    lines
}

pub fn print_listing(breadcrumb: &[String], listing: &Listing<DirectoryEntry>) {
    for line in format_listing(breadcrumb, listing) {
        println!("{}", line);
    }
}

// ============================================================================
// Search
// ============================================================================

/// Format deep search results with each match's location below the root.
pub fn format_search(query: &str, listing: &Listing<SearchResult>) -> Vec<String> {
    let mut lines = vec![format!("Searching for '{}' in entire library...", query)];
    if listing.is_empty() {
        lines.push(format!("{}(no matches)", indent(1)));
    }
    for (i, result) in listing.entries.iter().enumerate() {
        lines.push(entity_header(i + 1, &result.display_name, result.kind));
        lines.push(format!("{}Path: {}", indent(1), result.relative_path));
    }
    lines.extend(skipped_lines(&listing.skipped));
    lines
}

pub fn print_search(query: &str, listing: &Listing<SearchResult>) {
    for line in format_search(query, listing) {
        println!("{}", line);
    }
}

// ============================================================================
// Layers
// ============================================================================

/// Format an opened schema's layers, back to front.
pub fn format_layers(title: &str, set: &LayerSet) -> Vec<String> {
    let mut lines = vec![format!("{} ({} layers)", title, set.len())];
    for layer in set.ordered_layers() {
        let state = if layer.visible() { "visible" } else { "hidden" };
        lines.push(format!(
            "{} {}  {}  {}%",
            format_index(layer.order() + 1),
            layer.display_name(),
            state,
            (layer.opacity() * 100.0).round() as u32
        ));
        let file = layer
            .source_file()
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        lines.push(format!("{}Source: {}", indent(1), file));
    }
    lines.extend(skipped_lines(set.skipped()));
    lines
}

pub fn print_layers(title: &str, set: &LayerSet) {
    for line in format_layers(title, set) {
        println!("{}", line);
    }
}

// ============================================================================
// Thumbnails
// ============================================================================

/// Format a single thumbnail batch event.
///
/// ```text
/// -2-Forearm: 400x300
/// -1-Upper-Limb: placeholder
/// ```
pub fn format_thumbnail_event(event: &ThumbnailEvent) -> Vec<String> {
    let status = match event.status {
        ThumbnailStatus::Rendered { width, height } => format!("{}x{}", width, height),
        ThumbnailStatus::Placeholder => "placeholder".to_string(),
    };
    vec![format!("{}: {}", event.name, status)]
}
