//! Configuration file handling for lumen.
//!
//! Settings live in `config.toml` under the platform config directory. Every
//! key is optional; missing keys take their defaults and out-of-range values
//! fall back to defaults with a warning.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use lumen_core::{AnimationSpeed, MAX_PIXEL_RATIO, Scene};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub const CONFIG_FILE_NAME: &str = "config.toml";

const DEFAULT_FPS: u32 = 30;
const MAX_FPS: u32 = 120;
const DEFAULT_CELL_WIDTH: f32 = 8.0;
const DEFAULT_CELL_HEIGHT: f32 = 16.0;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// User settings for the hero background.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Layers to show.
    pub scene: Scene,
    pub speed: AnimationSpeed,
    /// Target frame rate of every layer.
    pub fps: u32,
    /// Fixed seed for reproducible layouts; random when absent.
    pub seed: Option<u64>,
    /// Logical pixels per terminal column.
    pub cell_width: f32,
    /// Logical pixels per terminal row.
    pub cell_height: f32,
    /// Raster pixels per logical pixel. Defaults to one raster pixel per
    /// half block.
    pub pixel_ratio: Option<f32>,
    pub show_tagline: bool,
    /// Tilt the background towards the mouse.
    pub parallax: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scene: Scene::default(),
            speed: AnimationSpeed::default(),
            fps: DEFAULT_FPS,
            seed: None,
            cell_width: DEFAULT_CELL_WIDTH,
            cell_height: DEFAULT_CELL_HEIGHT,
            pixel_ratio: None,
            show_tagline: true,
            parallax: true,
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "lumen")
}

/// Location of the config file, if the platform has a config directory.
pub fn config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

/// Directory for runtime files such as the log.
pub fn data_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
}

fn positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

impl Config {
    /// Load from the platform config file. A missing file yields defaults.
    pub fn load() -> Result<Self, ConfigError> {
        match config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            Some(path) => {
                debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    /// Load and validate a specific file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "config loaded");
        Ok(config.validated())
    }

    /// Replace out-of-range values with their defaults.
    pub fn validated(mut self) -> Self {
        let defaults = Config::default();
        if self.fps == 0 || self.fps > MAX_FPS {
            warn!(fps = self.fps, fallback = defaults.fps, "fps out of range");
            self.fps = defaults.fps;
        }
        if !positive(self.cell_width) {
            warn!(cell_width = self.cell_width, "invalid cell width");
            self.cell_width = defaults.cell_width;
        }
        if !positive(self.cell_height) {
            warn!(cell_height = self.cell_height, "invalid cell height");
            self.cell_height = defaults.cell_height;
        }
        if let Some(ratio) = self.pixel_ratio {
            if !positive(ratio) || ratio > MAX_PIXEL_RATIO {
                warn!(pixel_ratio = ratio, "pixel ratio out of range, using automatic");
                self.pixel_ratio = None;
            }
        }
        self
    }

    /// Raster pixels per logical pixel in effect.
    pub fn effective_pixel_ratio(&self) -> f32 {
        self.pixel_ratio.unwrap_or(1.0 / self.cell_width)
    }
}
