//! Pure Rust decoding backend built on the `image` crate.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (PNG, JPEG, BMP, TIFF, WebP) | `image::ImageReader` |
//! | Convert to RGBA8 | `image::DynamicImage::into_rgba8` |
//!
//! The format is sniffed from file contents before falling back to the
//! extension, so a PNG saved with a `.jpg` name still decodes.

use super::backend::{BackendError, ImageDecoder};
use image::{ImageReader, RgbaImage};
use std::path::Path;

/// Decoder backed by the `image` crate.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn open(path: &Path) -> Result<ImageReader<std::io::BufReader<std::fs::File>>, BackendError> {
    Ok(ImageReader::open(path)?.with_guessed_format()?)
}

fn decode_failed(path: &Path, err: image::ImageError) -> BackendError {
    BackendError::Decode {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

impl ImageDecoder for RustBackend {
    fn decode(&self, path: &Path) -> Result<RgbaImage, BackendError> {
        let img = open(path)?.decode().map_err(|e| decode_failed(path, e))?;
        Ok(img.into_rgba8())
    }
}
