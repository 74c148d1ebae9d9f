//! Library configuration.
//!
//! Everything the core needs from the outside world arrives through one
//! explicit [`LibraryConfig`] value handed to
//! [`LibraryIndex::new`](crate::library::LibraryIndex::new). The front end
//! owns where that value comes from; this module provides the simple
//! TOML-backed store the CLI uses to remember the last library root and theme.
//!
//! ## Config File
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! root_path = "."           # Library root to browse and search
//! theme = "dark"            # "dark" or "light"
//!
//! [thumbnails]
//! max_edge = 400            # Longest thumbnail edge in pixels
//! # max_files = 12          # Only composite the first N layers (omit for all)
//!
//! [processing]
//! # max_processes = 4       # Parallel thumbnail workers (omit for auto = CPU cores)
//! ```
//!
//! ## Partial Configuration
//!
//! Files are sparse: values missing from the file keep their stock default.
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILENAME: &str = "anato-view.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML write error: {0}")]
    TomlWrite(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Color theme preference. Stored for the front end; the core never reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            other => Err(format!("unknown theme '{other}' (expected dark or light)")),
        }
    }
}

/// Configuration for a [`LibraryIndex`](crate::library::LibraryIndex).
///
/// All fields have defaults; config files need only specify overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LibraryConfig {
    /// Root directory of the library.
    pub root_path: PathBuf,
    /// Last selected theme.
    pub theme: Theme,
    /// Thumbnail rendering settings.
    pub thumbnails: ThumbnailsConfig,
    /// Parallel processing settings.
    pub processing: ProcessingConfig,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            root_path: PathBuf::from("."),
            theme: Theme::default(),
            thumbnails: ThumbnailsConfig::default(),
            processing: ProcessingConfig::default(),
        }
    }
}

impl LibraryConfig {
    /// Default config rooted at `root_path`.
    pub fn with_root(root_path: impl Into<PathBuf>) -> Self {
        Self {
            root_path: root_path.into(),
            ..Self::default()
        }
    }

    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.root_path.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "root_path must not be empty".into(),
            ));
        }
        if self.thumbnails.max_edge == 0 {
            return Err(ConfigError::Validation(
                "thumbnails.max_edge must be non-zero".into(),
            ));
        }
        if self.thumbnails.max_files == Some(0) {
            return Err(ConfigError::Validation(
                "thumbnails.max_files must be at least 1 when set".into(),
            ));
        }
        Ok(())
    }
}

/// Thumbnail rendering settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThumbnailsConfig {
    /// Longest edge of a rendered thumbnail, in pixels.
    pub max_edge: u32,
    /// Composite only the first N layers of a schema. `None` means all.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_files: Option<usize>,
}

impl Default for ThumbnailsConfig {
    fn default() -> Self {
        Self {
            max_edge: 400,
            max_files: None,
        }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel thumbnail workers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_processes
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

// =============================================================================
// Config loading and saving
// =============================================================================

/// Load the config file at `path`, falling back to defaults when it is missing.
///
/// Keys missing from the file keep their defaults through `#[serde(default)]`.
pub fn load_config(path: &Path) -> Result<LibraryConfig, ConfigError> {
    let config: LibraryConfig = if path.exists() {
        let content = fs::read_to_string(path)?;
        toml::from_str(&content)?
    } else {
        LibraryConfig::default()
    };
    config.validate()?;
    Ok(config)
}

/// Validate and write `config` to `path`, replacing any existing file.
pub fn save_config(config: &LibraryConfig, path: &Path) -> Result<(), ConfigError> {
    config.validate()?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, toml::to_string_pretty(config)?)?;
    Ok(())
}

/// Returns a fully-commented stock config file.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# anato-view configuration
# ========================
# Every key is optional. Missing keys keep the defaults shown here.
# Unknown keys are rejected.

# Library root: the directory whose schemas and collections are browsed.
root_path = "."

# Front-end theme preference: "dark" or "light".
theme = "dark"

[thumbnails]
# Longest edge of a rendered thumbnail, in pixels. Larger composites are
# scaled down; smaller ones are left alone.
max_edge = 400

# Composite only the first N layers of each schema (back to front).
# Omit to use every layer.
# max_files = 12

[processing]
# Number of schemas rendered in parallel when precomputing thumbnails.
# Omit for one worker per CPU core; larger values are clamped to the core count.
# max_processes = 4
"##
}
