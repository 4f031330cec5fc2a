//! Viewer configuration.

use quadtree::{RemovalPolicy, TreeOptions};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Rejected configuration values.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("tree size must be positive, got {0}")]
    InvalidSize(f32),

    #[error("minimum quadrant size must be positive, got {0}")]
    InvalidMinQuadrantSize(f32),

    #[error("point radius must not be negative, got {0}")]
    InvalidPointRadius(f32),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub tree: TreeConfig,
    #[serde(default)]
    pub render: RenderConfig,
}

impl Config {
    /// Load configuration from `config.toml` or use defaults.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from("config.toml")
    }

    /// Load configuration from `path`, writing the defaults there if it's missing.
    pub fn load_from(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let config = if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            toml::from_str::<Self>(&contents)?
        } else {
            info!("No {} found, creating default config", path.display());
            let default_config = Self::default();
            std::fs::write(path, toml::to_string_pretty(&default_config)?)?;
            default_config
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.tree.size > 0.0) {
            return Err(ConfigError::InvalidSize(self.tree.size));
        }
        if !(self.tree.min_quadrant_size > 0.0) {
            return Err(ConfigError::InvalidMinQuadrantSize(self.tree.min_quadrant_size));
        }
        if self.render.point_radius < 0.0 {
            return Err(ConfigError::InvalidPointRadius(self.render.point_radius));
        }
        Ok(())
    }
}

/// Tree domain and splitting settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TreeConfig {
    /// Side length of the square domain. Powers of two subdivide evenly.
    #[serde(default = "default_size")]
    pub size: f32,
    /// Splits producing quadrants narrower than this are rejected.
    #[serde(default = "default_min_quadrant_size")]
    pub min_quadrant_size: f32,
    #[serde(default)]
    pub removal: Removal,
}

impl TreeConfig {
    pub fn options(&self) -> TreeOptions {
        TreeOptions {
            min_quadrant_size: self.min_quadrant_size,
            removal: self.removal.into(),
        }
    }
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            size: default_size(),
            min_quadrant_size: default_min_quadrant_size(),
            removal: Removal::default(),
        }
    }
}

fn default_size() -> f32 {
    768.0
}
fn default_min_quadrant_size() -> f32 {
    quadtree::DEFAULT_MIN_QUADRANT_SIZE
}

/// Removal matching, as written in the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Removal {
    /// Clear whatever occupies the leaf under the cursor.
    #[default]
    Region,
    /// Clear only an identical point.
    Exact,
}

impl From<Removal> for RemovalPolicy {
    fn from(removal: Removal) -> Self {
        match removal {
            Removal::Region => RemovalPolicy::Region,
            Removal::Exact => RemovalPolicy::Exact,
        }
    }
}

/// SVG output settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RenderConfig {
    /// Where `draw` writes when no path is given.
    #[serde(default = "default_output")]
    pub output: PathBuf,
    #[serde(default = "default_point_radius")]
    pub point_radius: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
            point_radius: default_point_radius(),
        }
    }
}

fn default_output() -> PathBuf {
    PathBuf::from("quadtree.svg")
}
fn default_point_radius() -> f32 {
    5.0
}
