//! Configuration management for visplot.
//!
//! This module handles the layered configuration system with the following precedence:
//! 1. Command-line arguments (highest priority)
//! 2. Environment variables
//! 3. JSON config file
//! 4. Default values (lowest priority)
//!
//! All configuration values are owned, immutable structs: merging happens
//! here, inside [`PlotConfig::load`], and rendering functions only ever
//! borrow the result. Caller-held values are never mutated.

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::colormaps::{get_colormap, parse_color};
use crate::error::{Result, VisplotError};

/// Command-line arguments for the visplot demo renderer
#[derive(Parser, Debug)]
#[command(name = "visplot")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Directory the rendered figures are written to
    #[arg(short, long, env = "VISPLOT_OUTPUT_DIR", default_value = "plots")]
    pub output_dir: PathBuf,

    /// Path to JSON configuration file
    #[arg(short, long, env = "VISPLOT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Number of demo parameters (the grid size)
    #[arg(short = 'n', long, env = "VISPLOT_PARAMS", default_value = "5")]
    pub params: usize,

    /// Number of demo samples per parameter
    #[arg(short = 'm', long, env = "VISPLOT_SAMPLES", default_value = "200")]
    pub samples: usize,

    /// Seed for the demo sample generator
    #[arg(long, env = "VISPLOT_SEED", default_value = "42")]
    pub seed: u64,

    /// Mirror each pair below the diagonal
    #[arg(long, env = "VISPLOT_MIRROR")]
    pub mirror: bool,

    /// Color scatter points by estimated density
    #[arg(long, env = "VISPLOT_DENSITY")]
    pub density: bool,

    /// Colormap for color-mapped scatters
    #[arg(long, env = "VISPLOT_COLORMAP")]
    pub colormap: Option<String>,

    /// Map view for the map figure (global, eurasia)
    #[arg(long, env = "VISPLOT_VIEW", default_value = "global")]
    pub view: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "VISPLOT_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

/// Pair-grid figure configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairGridConfig {
    /// Figure width in pixels
    #[serde(default = "default_grid_side")]
    pub width: u32,

    /// Figure height in pixels
    #[serde(default = "default_grid_side")]
    pub height: u32,

    /// Colormap used for color-mapped scatters
    #[serde(default = "default_colormap")]
    pub colormap: String,

    /// Scatter marker radius in pixels
    #[serde(default = "default_marker_size")]
    pub marker_size: u32,

    /// Flat scatter color (#rrggbb)
    #[serde(default = "default_flat_color")]
    pub flat_color: String,

    /// Color used when a density estimate fails (#rrggbb)
    #[serde(default = "default_fallback_color")]
    pub fallback_color: String,

    /// Repeat each pair below the diagonal using raw values
    #[serde(default)]
    pub mirror: bool,

    /// Color scatter points by estimated density
    #[serde(default)]
    pub density: bool,

    /// Lower bound of the color scale (defaults to the data minimum)
    #[serde(default)]
    pub vmin: Option<f64>,

    /// Upper bound of the color scale (defaults to the data maximum)
    #[serde(default)]
    pub vmax: Option<f64>,

    /// Font size of the diagonal parameter labels
    #[serde(default = "default_label_font")]
    pub label_font: u32,
}

/// Map figure styling
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapStyle {
    /// Figure width in pixels
    #[serde(default = "default_map_width")]
    pub width: u32,

    /// Figure height in pixels
    #[serde(default = "default_map_height")]
    pub height: u32,

    /// Draw a dashed graticule on each panel
    #[serde(default = "default_gridlines")]
    pub gridlines: bool,

    /// Opacity of the land fill
    #[serde(default = "default_land_fill_alpha")]
    pub land_fill_alpha: f64,

    /// Opacity of the land outline
    #[serde(default = "default_land_stroke_alpha")]
    pub land_stroke_alpha: f64,

    /// Font size of panel captions
    #[serde(default = "default_caption_font")]
    pub caption_font: u32,
}

/// Complete configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlotConfig {
    /// Pair-grid configuration
    #[serde(default)]
    pub pair_grid: PairGridConfig,

    /// Map styling
    #[serde(default)]
    pub map: MapStyle,
}

impl PlotConfig {
    /// Load configuration from all sources with proper precedence
    pub fn load() -> Result<(Self, Args)> {
        let args = Args::parse();

        // Start with defaults
        let mut config = PlotConfig::default();

        // Load from JSON file if provided
        if let Some(config_path) = &args.config {
            let json_config = Self::load_from_file(config_path)?;
            config.merge(json_config);
        }

        // Override with command-line arguments
        if args.mirror {
            config.pair_grid.mirror = true;
        }
        if args.density {
            config.pair_grid.density = true;
        }
        if let Some(colormap) = &args.colormap {
            config.pair_grid.colormap = colormap.clone();
        }

        Ok((config, args))
    }

    /// Load configuration from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: PlotConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: PlotConfig) {
        self.pair_grid = other.pair_grid;
        self.map = other.map;
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.pair_grid.validate()?;
        self.map.validate()
    }
}

impl PairGridConfig {
    /// Validate the pair-grid configuration
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(VisplotError::Config {
                message: "Pair-grid figure dimensions cannot be 0".to_string(),
            });
        }
        // Pixel sizes end up as i32 backend coordinates, so huge values
        // are as unusable as zero.
        if !(1..=256).contains(&self.marker_size) {
            return Err(VisplotError::Config {
                message: format!(
                    "Marker size must be within [1, 256], got {}",
                    self.marker_size
                ),
            });
        }
        if !(1..=512).contains(&self.label_font) {
            return Err(VisplotError::Config {
                message: format!(
                    "Label font size must be within [1, 512], got {}",
                    self.label_font
                ),
            });
        }
        get_colormap(&self.colormap)?;
        parse_color(&self.flat_color)?;
        parse_color(&self.fallback_color)?;
        if let (Some(vmin), Some(vmax)) = (self.vmin, self.vmax) {
            if vmin >= vmax {
                return Err(VisplotError::Config {
                    message: format!("vmin ({}) must be below vmax ({})", vmin, vmax),
                });
            }
        }
        Ok(())
    }
}

impl MapStyle {
    /// Validate the map styling
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(VisplotError::Config {
                message: "Map figure dimensions cannot be 0".to_string(),
            });
        }
        for (name, alpha) in [
            ("land_fill_alpha", self.land_fill_alpha),
            ("land_stroke_alpha", self.land_stroke_alpha),
        ] {
            if !(0.0..=1.0).contains(&alpha) {
                return Err(VisplotError::Config {
                    message: format!("{} must be within [0, 1], got {}", name, alpha),
                });
            }
        }
        if !(1..=512).contains(&self.caption_font) {
            return Err(VisplotError::Config {
                message: format!(
                    "Caption font size must be within [1, 512], got {}",
                    self.caption_font
                ),
            });
        }
        Ok(())
    }
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            pair_grid: PairGridConfig::default(),
            map: MapStyle::default(),
        }
    }
}

impl Default for PairGridConfig {
    fn default() -> Self {
        Self {
            width: default_grid_side(),
            height: default_grid_side(),
            colormap: default_colormap(),
            marker_size: default_marker_size(),
            flat_color: default_flat_color(),
            fallback_color: default_fallback_color(),
            mirror: false,
            density: false,
            vmin: None,
            vmax: None,
            label_font: default_label_font(),
        }
    }
}

impl Default for MapStyle {
    fn default() -> Self {
        Self {
            width: default_map_width(),
            height: default_map_height(),
            gridlines: default_gridlines(),
            land_fill_alpha: default_land_fill_alpha(),
            land_stroke_alpha: default_land_stroke_alpha(),
            caption_font: default_caption_font(),
        }
    }
}

// Default value functions for serde
fn default_grid_side() -> u32 {
    1500
}

fn default_colormap() -> String {
    "bupu".to_string()
}

fn default_marker_size() -> u32 {
    6
}

fn default_flat_color() -> String {
    "#005f73".to_string()
}

fn default_fallback_color() -> String {
    "#1f77b4".to_string()
}

fn default_label_font() -> u32 {
    20
}

fn default_map_width() -> u32 {
    1500
}

fn default_map_height() -> u32 {
    800
}

fn default_gridlines() -> bool {
    true
}

fn default_land_fill_alpha() -> f64 {
    0.1
}

fn default_land_stroke_alpha() -> f64 {
    0.5
}

fn default_caption_font() -> u32 {
    14
}
