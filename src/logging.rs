//! Logging utilities for dem-upsample.
//!
//! This module provides structured logging functionality so that runs over
//! large tiles can be timed and searched.

use std::time::Instant;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::grid::DemGrid;

/// Initialize the tracing subscriber with the given log level
pub fn init_tracing(log_level: &str) {
    let filter = match std::env::var("RUST_LOG") {
        Ok(val) => val,
        Err(_) => log_level.to_string(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .init();
}

/// Log a start message for a significant operation
pub fn log_operation_start(operation: &str, details: Option<&str>) {
    if let Some(details) = details {
        info!(
            operation = operation,
            details = details,
            "Starting operation"
        );
    } else {
        info!(operation = operation, "Starting operation");
    }
}

/// Log the completion of an operation that produced `samples` grid samples
pub fn log_operation_end(operation: &str, start_time: Instant, samples: usize) {
    let duration = start_time.elapsed().as_secs_f64();
    let duration_ms = duration * 1000.0;

    info!(
        operation = operation,
        duration_ms = duration_ms,
        samples = samples,
        msamples_per_sec = throughput(samples, duration),
        "Operation completed"
    );
}

/// Millions of samples per second, omitted when no time was measured
fn throughput(samples: usize, seconds: f64) -> Option<f64> {
    (seconds > 0.0).then(|| samples as f64 / seconds / 1e6)
}

/// Log an operation with timing and result in a single statement
pub fn log_timed_operation<F, R>(operation: &str, f: F) -> R
where
    F: FnOnce() -> R,
{
    let start = Instant::now();
    let operation_id = generate_operation_id();

    debug!(
        operation = operation,
        operation_id = %operation_id,
        "Starting operation"
    );

    let result = f();

    info!(
        operation = operation,
        operation_id = %operation_id,
        duration_ms = start.elapsed().as_secs_f64() * 1000.0,
        "Operation completed"
    );

    result
}

/// Log the shape and elevation range of a grid
pub fn log_grid_stats(label: &str, grid: &DemGrid) {
    let (min_elevation, max_elevation) = grid.elevation_range();
    info!(
        grid = label,
        nrows = grid.nrows(),
        ncols = grid.ncols(),
        samples = grid.len(),
        memory_mb = (grid.len() * std::mem::size_of::<i16>()) / (1024 * 1024),
        min_elevation,
        max_elevation,
        "Grid ready"
    );
}

/// Log an error with context
pub fn log_error(error: &crate::error::DemError, context: &str) {
    error!(
        error = %error,
        context = context,
        error_type = std::any::type_name_of_val(error),
        "Error occurred"
    );
}

/// Generate a unique operation ID
pub fn generate_operation_id() -> String {
    Uuid::new_v4().to_string()
}
