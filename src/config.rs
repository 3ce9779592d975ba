//! Configuration management for scatterfield.
//!
//! This module handles the layered configuration system with the following precedence:
//! 1. Command-line arguments (highest priority)
//! 2. Environment variables
//! 3. JSON config file
//! 4. Default values (lowest priority)

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::colormaps::COLORMAP_NAMES;
use crate::distance::DistanceMetric;
use crate::error::{InterpError, Result};
use crate::grid::Bounds;
use crate::interpolation::{InterpolationMethod, InterpolationOptions, DEFAULT_KERNEL_RADIUS};
use crate::kriging::{KrigingParams, VariogramModel};

/// Command-line arguments for scatterfield
#[derive(Parser, Debug)]
#[command(name = "scatterfield")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to a JSON array of reference points
    pub points_file: PathBuf,

    /// Output file; `.json` writes the grid as JSON, anything else is encoded as an image
    #[arg(short, long, env = "SCATTERFIELD_OUTPUT")]
    pub output: PathBuf,

    /// Path to JSON configuration file
    #[arg(short, long, env = "SCATTERFIELD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Estimator (average, nearest, bilinear, idw, lanczos, kriging)
    #[arg(short, long, env = "SCATTERFIELD_METHOD")]
    pub method: Option<String>,

    /// Lanczos kernel radius
    #[arg(long, env = "SCATTERFIELD_KERNEL_RADIUS")]
    pub kernel_radius: Option<f64>,

    /// Distance metric (planar, euclidean3)
    #[arg(long, env = "SCATTERFIELD_DISTANCE")]
    pub distance: Option<DistanceMetric>,

    /// Numeric attribute in `m` to interpolate instead of `z`
    #[arg(long, env = "SCATTERFIELD_VALUE_FIELD")]
    pub value_field: Option<String>,

    /// Interpolate the r/g/b/a attributes as a color
    #[arg(long, env = "SCATTERFIELD_RGBA")]
    pub rgba: bool,

    /// Variogram model for kriging (gaussian, exponential, spherical)
    #[arg(long, env = "SCATTERFIELD_KRIGING_MODEL")]
    pub kriging_model: Option<VariogramModel>,

    /// Kriging noise variance
    #[arg(long, env = "SCATTERFIELD_SIGMA2")]
    pub sigma2: Option<f64>,

    /// Grid width in cells
    #[arg(short = 'W', long, env = "SCATTERFIELD_WIDTH")]
    pub width: Option<usize>,

    /// Grid height in cells
    #[arg(short = 'H', long, env = "SCATTERFIELD_HEIGHT")]
    pub height: Option<usize>,

    /// Grid extent as min_x,min_y,max_x,max_y (defaults to the points' extent)
    #[arg(long, env = "SCATTERFIELD_BOUNDS")]
    pub bounds: Option<Bounds>,

    /// Colormap for scalar output
    #[arg(long, env = "SCATTERFIELD_COLORMAP")]
    pub colormap: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "SCATTERFIELD_LOG_LEVEL")]
    pub log_level: Option<String>,
}

/// The estimator a run uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Estimator {
    Interpolation(InterpolationMethod),
    Kriging,
}

impl FromStr for Estimator {
    type Err = InterpError;

    fn from_str(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("kriging") {
            return Ok(Estimator::Kriging);
        }
        s.parse().map(Estimator::Interpolation)
    }
}

impl fmt::Display for Estimator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Estimator::Interpolation(method) => write!(f, "{}", method),
            Estimator::Kriging => write!(f, "kriging"),
        }
    }
}

/// Estimator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterpolationConfig {
    /// Estimator name
    #[serde(default = "default_method")]
    pub method: String,

    /// Lanczos kernel radius
    #[serde(default = "default_kernel_radius")]
    pub kernel_radius: f64,

    #[serde(default)]
    pub distance: DistanceMetric,

    /// Attribute to read from each point's payload; `None` reads `z`
    #[serde(default)]
    pub value_field: Option<String>,

    /// Interpolate colors instead of scalars
    #[serde(default)]
    pub rgba: bool,
}

/// Output grid configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    #[serde(default = "default_grid_size")]
    pub width: usize,

    #[serde(default = "default_grid_size")]
    pub height: usize,

    /// Extent; `None` covers the reference points
    #[serde(default)]
    pub bounds: Option<Bounds>,
}

/// Rendering configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    #[serde(default = "default_colormap")]
    pub colormap: String,
}

/// Complete configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub interpolation: InterpolationConfig,

    #[serde(default)]
    pub kriging: KrigingParams,

    #[serde(default)]
    pub grid: GridConfig,

    #[serde(default)]
    pub render: RenderConfig,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Config {
    /// Load configuration from all sources with proper precedence
    pub fn load() -> Result<(Self, Args)> {
        let args = Args::parse();
        let config = Self::from_args(&args)?;
        Ok((config, args))
    }

    /// Build the configuration for already-parsed arguments
    pub fn from_args(args: &Args) -> Result<Self> {
        // Start with defaults
        let mut config = Config::default();

        // Load from JSON file if provided
        if let Some(config_path) = &args.config {
            let json_config = Self::load_from_file(config_path)?;
            config.merge(json_config);
        }

        // Override with command-line arguments and environment
        config.apply_args(args);
        Ok(config)
    }

    /// Load configuration from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Merge another config into this one (other takes precedence)
    pub fn merge(&mut self, other: Config) {
        self.interpolation = other.interpolation;
        self.kriging = other.kriging;
        self.grid.width = other.grid.width;
        self.grid.height = other.grid.height;
        if other.grid.bounds.is_some() {
            self.grid.bounds = other.grid.bounds;
        }
        self.render = other.render;
        self.log_level = other.log_level;
    }

    fn apply_args(&mut self, args: &Args) {
        if let Some(method) = &args.method {
            self.interpolation.method = method.clone();
        }
        if let Some(radius) = args.kernel_radius {
            self.interpolation.kernel_radius = radius;
        }
        if let Some(distance) = args.distance {
            self.interpolation.distance = distance;
        }
        if args.value_field.is_some() {
            self.interpolation.value_field = args.value_field.clone();
        }
        if args.rgba {
            self.interpolation.rgba = true;
        }
        if let Some(model) = args.kriging_model {
            self.kriging.model = model;
        }
        if let Some(sigma2) = args.sigma2 {
            self.kriging.sigma2 = sigma2;
        }
        if let Some(width) = args.width {
            self.grid.width = width;
        }
        if let Some(height) = args.height {
            self.grid.height = height;
        }
        if args.bounds.is_some() {
            self.grid.bounds = args.bounds;
        }
        if let Some(colormap) = &args.colormap {
            self.render.colormap = colormap.clone();
        }
        if let Some(level) = &args.log_level {
            self.log_level = level.clone();
        }
    }

    /// The configured estimator
    pub fn estimator(&self) -> Result<Estimator> {
        self.interpolation.method.parse().map_err(|_| InterpError::Config {
            message: format!(
                "Invalid interpolation method: {}. Must be one of: average, nearest, bilinear, idw, lanczos, kriging",
                self.interpolation.method
            ),
        })
    }

    /// Options handed to the scalar and RGBA estimators
    pub fn interpolation_options(&self) -> InterpolationOptions {
        InterpolationOptions {
            kernel_radius: self.interpolation.kernel_radius,
            distance: self.interpolation.distance,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        // Validate log level
        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(InterpError::Config {
                    message: format!(
                        "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                        self.log_level
                    ),
                });
            }
        }

        let estimator = self.estimator()?;

        if self.interpolation.rgba && estimator == Estimator::Kriging {
            return Err(InterpError::Config {
                message: "Kriging cannot interpolate RGBA values".to_string(),
            });
        }

        let radius = self.interpolation.kernel_radius;
        if !radius.is_finite() || radius <= 0.0 {
            return Err(InterpError::Config {
                message: format!("Kernel radius must be finite and positive, got {}", radius),
            });
        }

        self.kriging.validate().map_err(|e| InterpError::Config {
            message: e.to_string(),
        })?;

        if self.grid.width == 0 || self.grid.height == 0 {
            return Err(InterpError::Config {
                message: format!(
                    "Grid dimensions must be non-zero, got {}x{}",
                    self.grid.width, self.grid.height
                ),
            });
        }

        if let Some(bounds) = &self.grid.bounds {
            bounds.validate().map_err(|e| InterpError::Config {
                message: e.to_string(),
            })?;
        }

        let colormap = self.render.colormap.to_lowercase();
        if !COLORMAP_NAMES.contains(&colormap.as_str()) {
            return Err(InterpError::Config {
                message: format!(
                    "Invalid colormap: {}. Must be one of: {}",
                    self.render.colormap,
                    COLORMAP_NAMES.join(", ")
                ),
            });
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            interpolation: InterpolationConfig::default(),
            kriging: KrigingParams::default(),
            grid: GridConfig::default(),
            render: RenderConfig::default(),
            log_level: default_log_level(),
        }
    }
}

impl Default for InterpolationConfig {
    fn default() -> Self {
        Self {
            method: default_method(),
            kernel_radius: default_kernel_radius(),
            distance: DistanceMetric::default(),
            value_field: None,
            rgba: false,
        }
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: default_grid_size(),
            height: default_grid_size(),
            bounds: None,
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            colormap: default_colormap(),
        }
    }
}

// Default value functions for serde
fn default_method() -> String {
    InterpolationMethod::default().to_string()
}

fn default_kernel_radius() -> f64 {
    DEFAULT_KERNEL_RADIUS
}

fn default_grid_size() -> usize {
    256
}

fn default_colormap() -> String {
    "viridis".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}
