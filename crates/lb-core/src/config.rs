//! Editor configuration.
//!
//! Every field has the builder's stock value as its default, and the
//! struct deserializes with `#[serde(default)]`, so a host only needs to
//! send the fields it wants to override (e.g. a measured canvas size).

use crate::geometry::{Canvas, GRID_SIZE};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_CANVAS_WIDTH: i32 = 800;
pub const DEFAULT_CANVAS_HEIGHT: i32 = 600;
pub const MAX_HISTORY_SIZE: usize = 50;
pub const MAX_ELEMENTS_PER_LAYOUT: usize = 100;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid editor config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("grid size must be positive, got {0}")]
    InvalidGrid(i32),
    #[error("canvas {width}x{height} is smaller than one grid unit ({grid})")]
    CanvasTooSmall { width: i32, height: i32, grid: i32 },
    #[error("history size must be at least 1")]
    ZeroHistorySize,
}

/// Configuration for an editing session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Grid unit positions and sizes snap to. Default: **10**.
    pub grid_size: i32,
    /// Canvas width in pixels. Default: **800**.
    pub canvas_width: i32,
    /// Canvas height in pixels. Default: **600**.
    pub canvas_height: i32,
    /// Undo depth; older actions are dropped silently. Default: **50**.
    pub max_history_size: usize,
    /// Maximum number of elements per layout. Default: **100**.
    pub max_elements: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            canvas_width: DEFAULT_CANVAS_WIDTH,
            canvas_height: DEFAULT_CANVAS_HEIGHT,
            max_history_size: MAX_HISTORY_SIZE,
            max_elements: MAX_ELEMENTS_PER_LAYOUT,
        }
    }
}

impl EditorConfig {
    /// Parse a (possibly partial) JSON config and validate it.
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] for malformed JSON, or the first
    /// failing check from [`EditorConfig::validate`].
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants the geometry engine relies on.
    ///
    /// # Errors
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size <= 0 {
            return Err(ConfigError::InvalidGrid(self.grid_size));
        }
        if self.canvas_width < self.grid_size || self.canvas_height < self.grid_size {
            return Err(ConfigError::CanvasTooSmall {
                width: self.canvas_width,
                height: self.canvas_height,
                grid: self.grid_size,
            });
        }
        if self.max_history_size == 0 {
            return Err(ConfigError::ZeroHistorySize);
        }
        Ok(())
    }

    pub fn canvas(&self) -> Canvas {
        Canvas::new(self.canvas_width, self.canvas_height).with_grid(self.grid_size)
    }
}
