//! # dem-upsample
//!
//! Bilinear upsampling of 16-bit digital elevation models.
//!
//! This library takes a regularly sampled elevation grid, such as an SRTM
//! `.hgt` tile, and produces a denser grid by an integer rate. Original
//! samples are kept at their scaled positions and the points between them are
//! interpolated.
//!
//! ## Architecture
//!
//! - **Grid**: a contiguous row-major buffer with explicit row/column indexing
//! - **Interpolation**: bilinear fill of interior cells, linear fill of the last
//!   row and column, and a copied bottom-right corner
//! - **I/O**: raw sample files with byte-order conversion and extension checks

pub mod config;
pub mod data_loader;
pub mod error;
pub mod grid;
pub mod interpolation;
pub mod logging;

pub use config::Config;
pub use data_loader::{load_grid, save_grid, ByteOrder};
pub use error::{DemError, Result};
pub use grid::{flat_index, sample_count, upsampled_len, DemGrid, GridShape};
pub use interpolation::{upsample, upsample_parallel, Upsampler};
pub use logging::{
    generate_operation_id, init_tracing, log_error, log_grid_stats, log_operation_end,
    log_operation_start, log_timed_operation,
};
