//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

/// Calculate the size of an image scaled down to fit inside a square of
/// `max_edge` pixels, keeping its aspect ratio.
///
/// Images that already fit are returned unchanged; nothing is ever upscaled.
/// Neither edge drops below one pixel.
///
/// # Examples
/// ```
/// # use anato_view::imaging::fit_within;
/// // Landscape 1600x1200 into 400 → 400x300
/// assert_eq!(fit_within((1600, 1200), 400), (400, 300));
///
/// // Already small enough
/// assert_eq!(fit_within((120, 80), 400), (120, 80));
/// ```
pub fn fit_within(source: (u32, u32), max_edge: u32) -> (u32, u32) {
    let (src_w, src_h) = source;
    let longest = src_w.max(src_h);
    if longest <= max_edge || longest == 0 {
        return source;
    }

    let scale = max_edge as f64 / longest as f64;
    let w = ((src_w as f64 * scale).round() as u32).max(1);
    let h = ((src_h as f64 * scale).round() as u32).max(1);
    (w, h)
}
