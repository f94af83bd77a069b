//! Error types for dem-upsample.
//!
//! This module defines the error enum shared by the grid, the I/O layer and
//! the configuration. The interpolation core itself only fails on invalid
//! parameters; everything else is surfaced before the core runs.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for dem-upsample operations.
#[derive(Error, Debug)]
pub enum DemError {
    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Invalid parameter errors
    #[error("Invalid parameter: {param} - {message}")]
    InvalidParameter { param: String, message: String },

    /// Grid shape or content errors
    #[error("Invalid grid: {message}")]
    InvalidGrid { message: String },

    /// File extension mismatch
    #[error("Invalid extension for {path:?}: expected one of {expected}")]
    InvalidExtension { path: PathBuf, expected: String },

    /// The input file holds fewer samples than the grid dimensions require
    #[error("Read failure from {path:?}: expected {expected} bytes, found {actual}")]
    ShortRead {
        path: PathBuf,
        expected: usize,
        actual: usize,
    },

    /// Worker pool construction errors
    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Convenience type alias for Results with DemError
pub type Result<T> = std::result::Result<T, DemError>;
