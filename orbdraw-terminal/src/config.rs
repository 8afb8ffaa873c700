//! Configuration for the orbdraw command line tool
//!
//! Values come from a TOML file (if given) and are then overridden by command-line flags.

use anyhow::{Context, Result};
use clap::ValueEnum;
use log::{debug, info};
use orbdraw_core::{Angles, CanvasSize, DrawingMode, Pipeline};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Output technology for a drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `x, y` coordinate list
    Csv,
    /// SVG document
    #[default]
    Svg,
    /// Live character canvas
    Terminal,
}

/// Writer settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default = "default_stroke")]
    pub stroke: String,
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f64,
}

fn default_stroke() -> String {
    "black".to_string()
}

fn default_stroke_width() -> f64 {
    1.0
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            title: None,
            description: None,
            stroke: default_stroke(),
            stroke_width: default_stroke_width(),
        }
    }
}

/// Complete orbdraw configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OrbdrawConfig {
    #[serde(default)]
    pub angles: Angles,
    #[serde(default)]
    pub canvas: CanvasSize,
    #[serde(default)]
    pub mode: DrawingMode,
    #[serde(default)]
    pub output: OutputConfig,
}

impl OrbdrawConfig {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config: {}", path.display()))?;
        info!("Loaded configuration from {}", path.display());
        debug!("{:?}", config);
        Ok(config)
    }

    pub fn pipeline(&self) -> Pipeline {
        Pipeline::new(self.angles, self.canvas, self.mode)
    }
}
