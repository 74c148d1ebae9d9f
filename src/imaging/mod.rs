//! Image decoding and compositing in pure Rust.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** | `image::ImageReader` → RGBA8 |
//! | **Composite** | [`compositor::blend_over`] (source-over, linear) |
//! | **Thumbnail scale** | `image::imageops::resize` with `Lanczos3` |
//!
//! The module is split into:
//! - **Backend**: [`ImageDecoder`] trait + [`RustBackend`]
//! - **Compositor**: flattening layer stacks into one bitmap
//! - **Calculations**: pure dimension math (unit testable)

pub mod backend;
mod calculations;
pub mod compositor;
pub mod rust_backend;

pub use backend::{BackendError, ImageDecoder};
pub use calculations::fit_within;
pub use compositor::{blend_over, render_preview, render_scene};
pub use rust_backend::RustBackend;
