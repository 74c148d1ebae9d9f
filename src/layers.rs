//! In-memory model of an opened schema.
//!
//! A [`LayerSet`] holds one [`Layer`] per decodable image file in a schema
//! directory, ordered by the natural key of the file name. Index `i` is drawn
//! above index `i - 1`, so `-1-Bone.png` sits at the back and `-10-Skin.png`
//! at the front.
//!
//! Pixel data and order are fixed at load time. Visibility and opacity change
//! only through [`LayerSet::set_visible`] and [`LayerSet::set_opacity`], which
//! notify registered [`LayerObserver`]s after every effective change.

use crate::imaging::{ImageDecoder, RustBackend};
use crate::naming::display_name;
use crate::scan::{self, ScanError};
use crate::types::SkippedPath;
use image::RgbaImage;
use log::{debug, warn};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum LayerError {
    #[error("Layer index {index} out of range (schema has {len} layers)")]
    IndexOutOfRange { index: usize, len: usize },
}

/// One decoded image layer.
pub struct Layer {
    source_file: PathBuf,
    order: usize,
    display_name: String,
    visible: bool,
    opacity: f32,
    pixels: RgbaImage,
}

impl Layer {
    pub fn source_file(&self) -> &Path {
        &self.source_file
    }

    /// Stacking position, 0 = backmost.
    pub fn order(&self) -> usize {
        self.order
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Opacity in `[0, 1]`.
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }
}

impl fmt::Debug for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Layer")
            .field("source_file", &self.source_file)
            .field("order", &self.order)
            .field("display_name", &self.display_name)
            .field("visible", &self.visible)
            .field("opacity", &self.opacity)
            .field("dimensions", &self.pixels.dimensions())
            .finish()
    }
}

/// Receives layer changes synchronously, after the new state is in place.
pub trait LayerObserver: Send {
    fn on_layer_changed(&mut self, index: usize, layer: &Layer);
}

/// Ordered, toggleable layers of one schema.
pub struct LayerSet {
    path: PathBuf,
    layers: Vec<Layer>,
    skipped: Vec<SkippedPath>,
    observers: Vec<Box<dyn LayerObserver>>,
}

impl LayerSet {
    /// Load the schema at `schema_path` with the default decoder.
    pub fn load(schema_path: &Path) -> Result<Self, ScanError> {
        Self::load_with_decoder(&RustBackend::new(), schema_path)
    }

    /// Load the schema at `schema_path`, decoding with `decoder`.
    ///
    /// Files that fail to decode are left out and listed in
    /// [`skipped`](Self::skipped); a schema where nothing decodes yields an
    /// empty set. Only an unreadable directory is an error.
    pub fn load_with_decoder(
        decoder: &impl ImageDecoder,
        schema_path: &Path,
    ) -> Result<Self, ScanError> {
        let files = scan::schema_files(schema_path)?;
        let mut layers = Vec::with_capacity(files.len());
        let mut skipped = Vec::new();

        for file in files {
            match decoder.decode(&file) {
                Ok(pixels) => {
                    let file_name = file
                        .file_name()
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_default();
                    debug!("layer {}: {}", layers.len(), file.display());
                    layers.push(Layer {
                        order: layers.len(),
                        display_name: display_name(&file_name),
                        source_file: file,
                        visible: true,
                        opacity: 1.0,
                        pixels,
                    });
                }
                Err(e) => {
                    warn!("skipping layer: {e}");
                    skipped.push(SkippedPath::new(&file, &e));
                }
            }
        }

        Ok(Self {
            path: schema_path.to_path_buf(),
            layers,
            skipped,
            observers: Vec::new(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Layers back to front.
    pub fn ordered_layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn get(&self, index: usize) -> Option<&Layer> {
        self.layers.get(index)
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Files that were found but could not be decoded.
    pub fn skipped(&self) -> &[SkippedPath] {
        &self.skipped
    }

    pub fn subscribe(&mut self, observer: Box<dyn LayerObserver>) {
        self.observers.push(observer);
    }

    pub fn set_visible(&mut self, index: usize, visible: bool) -> Result<(), LayerError> {
        let layer = self.layer_mut(index)?;
        if layer.visible != visible {
            layer.visible = visible;
            self.notify(index);
        }
        Ok(())
    }

    /// Set a layer's opacity, clamping into `[0, 1]`. NaN is treated as 0.
    pub fn set_opacity(&mut self, index: usize, opacity: f32) -> Result<(), LayerError> {
        let opacity = if opacity.is_nan() {
            0.0
        } else {
            opacity.clamp(0.0, 1.0)
        };
        let layer = self.layer_mut(index)?;
        if layer.opacity != opacity {
            layer.opacity = opacity;
            self.notify(index);
        }
        Ok(())
    }

    /// Make every layer visible at full opacity.
    pub fn reset(&mut self) {
        for index in 0..self.layers.len() {
            let layer = &mut self.layers[index];
            if !layer.visible || layer.opacity != 1.0 {
                layer.visible = true;
                layer.opacity = 1.0;
                self.notify(index);
            }
        }
    }

    fn layer_mut(&mut self, index: usize) -> Result<&mut Layer, LayerError> {
        let len = self.layers.len();
        self.layers
            .get_mut(index)
            .ok_or(LayerError::IndexOutOfRange { index, len })
    }

    fn notify(&mut self, index: usize) {
        let layer = &self.layers[index];
        for observer in &mut self.observers {
            observer.on_layer_changed(index, layer);
        }
    }
}

impl fmt::Debug for LayerSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayerSet")
            .field("path", &self.path)
            .field("layers", &self.layers)
            .field("skipped", &self.skipped)
            .field("observers", &self.observers.len())
            .finish()
    }
}
