//! Configuration management for dem-upsample.
//!
//! This module handles the layered configuration system with the following precedence:
//! 1. Command-line arguments (highest priority)
//! 2. Environment variables
//! 3. JSON config file
//! 4. Default values (lowest priority)

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::data_loader::ByteOrder;
use crate::error::{DemError, Result};

/// Side length of an SRTM1 tile
pub const SRTM1_SIZE: usize = 3601;

/// Output file used when none is given
pub const DEFAULT_OUTPUT: &str = "elevation.dem";

/// Accepted input extensions
pub const INPUT_EXTENSIONS: &[&str] = &["hgt", "dem"];

/// Accepted output extensions
pub const OUTPUT_EXTENSIONS: &[&str] = &["dem"];

/// Command-line arguments for dem-upsample
#[derive(Parser, Debug)]
#[command(name = "dem-upsample")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the .hgt or .dem file to upsample
    pub input: PathBuf,

    /// Upsampling rate (positive integer)
    pub rate: usize,

    /// Width of the input grid
    pub ncols: Option<usize>,

    /// Height of the input grid
    pub nrows: Option<usize>,

    /// Path of the upsampled .dem file
    pub output: Option<PathBuf>,

    /// Byte order of the input samples (default: big for .hgt, native otherwise)
    #[arg(short, long, env = "DEM_UPSAMPLE_BYTE_ORDER", value_enum)]
    pub byte_order: Option<ByteOrder>,

    /// Fill the upsampled grid in parallel
    #[arg(short, long, env = "DEM_UPSAMPLE_PARALLEL")]
    pub parallel: bool,

    /// Number of worker threads for parallel upsampling
    #[arg(short, long, env = "DEM_UPSAMPLE_WORKERS")]
    pub workers: Option<usize>,

    /// Path to JSON configuration file
    #[arg(short, long, env = "DEM_UPSAMPLE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "DEM_UPSAMPLE_LOG_LEVEL")]
    pub log_level: Option<String>,
}

/// Input grid configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Number of rows in the input grid
    #[serde(default = "default_dim")]
    pub nrows: usize,

    /// Number of columns in the input grid
    #[serde(default = "default_dim")]
    pub ncols: usize,

    /// Byte order of the input samples (None = infer from the extension)
    #[serde(default)]
    pub byte_order: Option<ByteOrder>,
}

/// Upsampling configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpsampleConfig {
    /// Upsampling rate
    #[serde(default = "default_rate")]
    pub rate: usize,

    /// Fill the destination grid in parallel
    #[serde(default)]
    pub parallel: bool,

    /// Number of worker threads (None = rayon's global pool)
    #[serde(default)]
    pub workers: Option<usize>,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Path of the upsampled file
    #[serde(default = "default_output")]
    pub path: PathBuf,
}

/// Complete configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Input grid configuration
    #[serde(default)]
    pub grid: GridConfig,

    /// Upsampling configuration
    #[serde(default)]
    pub upsample: UpsampleConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Config {
    /// Load configuration from all sources with proper precedence
    pub fn load() -> Result<(Self, PathBuf)> {
        Self::from_args(Args::parse())
    }

    /// Build configuration from parsed arguments, returning it with the input path
    pub fn from_args(args: Args) -> Result<(Self, PathBuf)> {
        // Start with defaults
        let mut config = Config::default();

        // Load from JSON file if provided
        if let Some(config_path) = &args.config {
            let json_config = Self::load_from_file(config_path)?;
            config.merge(json_config);
        }

        // Override with command-line arguments
        config.upsample.rate = args.rate;
        if let Some(ncols) = args.ncols {
            config.grid.ncols = ncols;
        }
        if let Some(nrows) = args.nrows {
            config.grid.nrows = nrows;
        }
        if let Some(output) = args.output {
            config.output.path = output;
        }
        if args.byte_order.is_some() {
            config.grid.byte_order = args.byte_order;
        }
        if args.parallel {
            config.upsample.parallel = true;
        }
        if args.workers.is_some() {
            config.upsample.workers = args.workers;
        }
        if let Some(log_level) = args.log_level {
            config.log_level = log_level;
        }

        Ok((config, args.input))
    }

    /// Load configuration from a JSON file
    fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        self.grid.nrows = other.grid.nrows;
        self.grid.ncols = other.grid.ncols;
        if other.grid.byte_order.is_some() {
            self.grid.byte_order = other.grid.byte_order;
        }
        self.upsample.rate = other.upsample.rate;
        self.upsample.parallel = other.upsample.parallel;
        if other.upsample.workers.is_some() {
            self.upsample.workers = other.upsample.workers;
        }
        self.output = other.output;
        self.log_level = other.log_level;
    }

    /// Byte order for `input`, falling back to its extension
    pub fn byte_order_for(&self, input: &Path) -> ByteOrder {
        self.grid
            .byte_order
            .unwrap_or_else(|| ByteOrder::from_path(input))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.upsample.rate == 0 {
            return Err(DemError::Config {
                message: "Rate must be a positive integer".to_string(),
            });
        }

        // Interpolation needs at least one full cell
        if self.grid.nrows < 2 || self.grid.ncols < 2 {
            return Err(DemError::Config {
                message: format!(
                    "Grid must be at least 2x2, got {} rows and {} columns",
                    self.grid.nrows, self.grid.ncols
                ),
            });
        }

        if self.upsample.workers == Some(0) {
            return Err(DemError::Config {
                message: "Number of workers cannot be 0".to_string(),
            });
        }

        // Validate log level
        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(DemError::Config {
                    message: format!(
                        "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                        self.log_level
                    ),
                });
            }
        }

        check_extension(&self.output.path, OUTPUT_EXTENSIONS)
    }

    /// Validate the configuration together with the input path
    pub fn validate_with_input(&self, input: &Path) -> Result<()> {
        self.validate()?;
        check_extension(input, INPUT_EXTENSIONS)
    }
}

/// Check that `path` ends in one of `allowed` (case-sensitive, without the dot)
pub fn check_extension(path: &Path, allowed: &[&str]) -> Result<()> {
    let ext = path.extension().and_then(|e| e.to_str());
    match ext {
        Some(ext) if allowed.contains(&ext) => Ok(()),
        _ => Err(DemError::InvalidExtension {
            path: path.to_path_buf(),
            expected: allowed
                .iter()
                .map(|e| format!(".{}", e))
                .collect::<Vec<_>>()
                .join(", "),
        }),
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            upsample: UpsampleConfig::default(),
            output: OutputConfig::default(),
            log_level: default_log_level(),
        }
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            nrows: default_dim(),
            ncols: default_dim(),
            byte_order: None,
        }
    }
}

impl Default for UpsampleConfig {
    fn default() -> Self {
        Self {
            rate: default_rate(),
            parallel: false,
            workers: None,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output(),
        }
    }
}

// Default value functions for serde
fn default_dim() -> usize {
    SRTM1_SIZE
}

fn default_rate() -> usize {
    1
}

fn default_output() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT)
}

fn default_log_level() -> String {
    "info".to_string()
}
