//! Flattening layer stacks into a single bitmap.
//!
//! Two entry points share one blending primitive:
//!
//! - [`render_preview`] draws a list of files exactly as they are on disk.
//!   Used for directory thumbnails, which always show the full, unmodified
//!   stack.
//! - [`render_scene`] draws a [`LayerSet`], honoring each layer's visibility
//!   and opacity. Used for the interactive view.
//!
//! ## Canvas
//!
//! The canvas takes the dimensions of the first (backmost) image and starts
//! fully transparent. Every layer is anchored at the top-left corner; pixels
//! that fall outside the canvas are clipped.
//!
//! ## Blending
//!
//! Straight (non-premultiplied) RGBA8, "source-over", linear arithmetic with
//! no gamma correction. For a source pixel `s` drawn at opacity `o` over a
//! destination pixel `d`:
//!
//! ```text
//! sa  = s.a * o
//! out.a = sa + d.a * (1 - sa)
//! out.c = (s.c * sa + d.c * d.a * (1 - sa)) / out.a
//! ```
//!
//! All functions are pure; different inputs can be rendered concurrently.

use super::backend::ImageDecoder;
use crate::layers::LayerSet;
use image::{Rgba, RgbaImage};
use log::{debug, warn};
use std::path::PathBuf;

/// Draw `layer` over `canvas` with source-over blending, scaling the layer's
/// own alpha by `opacity` (clamped to `[0, 1]`).
pub fn blend_over(canvas: &mut RgbaImage, layer: &RgbaImage, opacity: f32) {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity == 0.0 {
        return;
    }

    let width = canvas.width().min(layer.width());
    let height = canvas.height().min(layer.height());

    for y in 0..height {
        for x in 0..width {
            let src = layer.get_pixel(x, y);
            let dst = canvas.get_pixel_mut(x, y);
            *dst = blend_pixel(*dst, *src, opacity);
        }
    }
}

fn blend_pixel(dst: Rgba<u8>, src: Rgba<u8>, opacity: f32) -> Rgba<u8> {
    let sa = src[3] as f32 / 255.0 * opacity;
    if sa <= 0.0 {
        return dst;
    }
    let da = dst[3] as f32 / 255.0;
    let back = da * (1.0 - sa);
    let out_a = sa + back;
    if out_a <= 0.0 {
        return Rgba([0, 0, 0, 0]);
    }

    let channel = |i: usize| {
        let c = (src[i] as f32 * sa + dst[i] as f32 * back) / out_a;
        to_u8(c)
    };
    Rgba([channel(0), channel(1), channel(2), to_u8(out_a * 255.0)])
}

fn to_u8(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

/// Composite image files back to front, ignoring visibility and opacity.
///
/// `max_files` caps how many of `paths` are considered. Returns `None` when
/// there is nothing to draw or the first file cannot be decoded; later files
/// that fail to decode are skipped.
pub fn render_preview(
    decoder: &impl ImageDecoder,
    paths: &[PathBuf],
    max_files: Option<usize>,
) -> Option<RgbaImage> {
    let limit = max_files.unwrap_or(paths.len()).min(paths.len());
    let (first, rest) = paths[..limit].split_first()?;

    let base = match decoder.decode(first) {
        Ok(img) => img,
        Err(e) => {
            warn!("preview base unreadable, no thumbnail: {e}");
            return None;
        }
    };

    let mut canvas = RgbaImage::new(base.width(), base.height());
    blend_over(&mut canvas, &base, 1.0);

    for path in rest {
        match decoder.decode(path) {
            Ok(layer) => blend_over(&mut canvas, &layer, 1.0),
            Err(e) => warn!("skipping preview layer: {e}"),
        }
    }

    debug!(
        "rendered preview {}x{} from {} file(s)",
        canvas.width(),
        canvas.height(),
        limit
    );
    Some(canvas)
}

/// Composite the visible layers of `layers`, each scaled by its opacity.
///
/// The canvas is sized by the first layer even when that layer is hidden.
/// Returns `None` for an empty set.
pub fn render_scene(layers: &LayerSet) -> Option<RgbaImage> {
    let ordered = layers.ordered_layers();
    let first = ordered.first()?;
    let (width, height) = first.pixels().dimensions();

    let mut canvas = RgbaImage::new(width, height);
    for layer in ordered.iter().filter(|l| l.visible()) {
        blend_over(&mut canvas, layer.pixels(), layer.opacity());
    }
    Some(canvas)
}
