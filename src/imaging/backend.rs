//! Image decoding trait and shared types.
//!
//! The [`ImageDecoder`] trait is the single seam between the library and
//! pixel data. Everything above it (layer loading, previews, thumbnails) is
//! written against the trait so tests can substitute a decoder that fails on
//! chosen files.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), built on the `image`
//! crate's pure Rust decoders.

use image::RgbaImage;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to decode {}: {message}", path.display())]
    Decode { path: PathBuf, message: String },
}

/// Decodes layer files into straight-alpha RGBA8 bitmaps.
///
/// `Sync` so one decoder can be shared by rayon workers rendering different
/// schemas at once.
pub trait ImageDecoder: Sync {
    /// Decode the whole file into RGBA8.
    fn decode(&self, path: &Path) -> Result<RgbaImage, BackendError>;
}
