use std::fs;
use std::path::Path;

use log::info;
use serde::Deserialize;

use crate::caster::{DEFAULT_MAX_DISTANCE, DEFAULT_RESOLUTION};
use crate::error::ConfigError;
use crate::world::{DEFAULT_OBSTACLE_COUNT, DEFAULT_SEED};

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub canvas: CanvasConfig,
    #[serde(default)]
    pub obstacles: ObstaclesConfig,
    #[serde(default)]
    pub rays: RaysConfig,
    #[serde(default)]
    pub render: RenderConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CanvasConfig {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default = "default_title")]
    pub title: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ObstaclesConfig {
    #[serde(default = "default_obstacle_count")]
    pub count: usize,
    #[serde(default = "default_seed")]
    pub seed: u64,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RaysConfig {
    #[serde(default = "default_resolution")]
    pub resolution: usize,
    #[serde(default = "default_max_distance")]
    pub max_distance: f32,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RenderConfig {
    #[serde(default = "default_fps")]
    pub fps: u32,
    #[serde(default = "default_background")]
    pub background: [u8; 3],
    #[serde(default = "default_line_color")]
    pub obstacle_color: [u8; 3],
    #[serde(default = "default_line_color")]
    pub ray_color: [u8; 3],
}

fn default_width() -> u32 { 1260 }
fn default_height() -> u32 { 540 }
fn default_title() -> String { "Rust Raycasting".to_string() }
fn default_obstacle_count() -> usize { DEFAULT_OBSTACLE_COUNT }
fn default_seed() -> u64 { DEFAULT_SEED }
fn default_resolution() -> usize { DEFAULT_RESOLUTION }
fn default_max_distance() -> f32 { DEFAULT_MAX_DISTANCE }
fn default_fps() -> u32 { 30 }
fn default_background() -> [u8; 3] { [0, 0, 0] }
fn default_line_color() -> [u8; 3] { [0, 255, 0] }

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            title: default_title(),
        }
    }
}

impl Default for ObstaclesConfig {
    fn default() -> Self {
        Self {
            count: default_obstacle_count(),
            seed: default_seed(),
        }
    }
}

impl Default for RaysConfig {
    fn default() -> Self {
        Self {
            resolution: default_resolution(),
            max_distance: default_max_distance(),
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            fps: default_fps(),
            background: default_background(),
            obstacle_color: default_line_color(),
            ray_color: default_line_color(),
        }
    }
}

impl Config {
    pub fn from_toml_str(contents: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&contents, path)?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Like [`Config::load`], but a missing file yields the defaults.
    /// Unreadable or malformed files are still errors.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            info!("No {} found, using default configuration", path.display());
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Rejects values that would break the ray caster's contract or the frame loop.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "canvas must be non-empty, got {}x{}",
                self.canvas.width, self.canvas.height
            )));
        }
        if self.rays.resolution == 0 {
            return Err(ConfigError::Invalid("rays.resolution must be at least 1".into()));
        }
        if !(self.rays.max_distance.is_finite() && self.rays.max_distance > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "rays.max_distance must be positive, got {}",
                self.rays.max_distance
            )));
        }
        if self.render.fps == 0 {
            return Err(ConfigError::Invalid("render.fps must be at least 1".into()));
        }
        Ok(())
    }
}
