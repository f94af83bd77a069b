//! dem-upsample - Bilinear upsampling of 16-bit digital elevation models
//!
//! This is the main entry point for the dem-upsample command.

use anyhow::Context;
use std::time::Instant;
use tracing::{error, info};

use dem_upsample::{
    init_tracing, load_grid, log_error, log_grid_stats, log_operation_end, log_operation_start,
    log_timed_operation, save_grid, Config, Upsampler,
};

fn main() -> anyhow::Result<()> {
    // Load configuration
    let (config, input) = Config::load().context("Failed to load configuration")?;

    init_tracing(&config.log_level);
    info!("Starting dem-upsample v{}", env!("CARGO_PKG_VERSION"));

    // Validate configuration
    config.validate_with_input(&input).map_err(|e| {
        error!("Invalid configuration: {}", e);
        e
    })?;

    let start = Instant::now();
    let details = format!("{} by {}", input.display(), config.upsample.rate);
    log_operation_start("upsample_dem", Some(&details));

    let byte_order = config.byte_order_for(&input);
    info!("Reading from {} ({:?} byte order)", input.display(), byte_order);

    let grid = load_grid(&input, config.grid.nrows, config.grid.ncols, byte_order)
        .map_err(|e| {
            log_error(&e, "load");
            e
        })
        .with_context(|| format!("Failed to read {}", input.display()))?;
    log_grid_stats("input", &grid);

    let upsampler = Upsampler::from_config(&config.upsample)?;
    let up_shape = upsampler.output_shape(&grid).map_err(|e| {
        log_error(&e, "upsample");
        e
    })?;
    info!(
        "New size of upsampled DEM: {} rows, {} cols",
        up_shape.nrows, up_shape.ncols
    );

    let upsampled = log_timed_operation("interpolate", || upsampler.run(&grid))
        .context("Failed to upsample grid")?;
    log_grid_stats("upsampled", &upsampled);

    let output = &config.output.path;
    save_grid(output, &upsampled)
        .map_err(|e| {
            log_error(&e, "save");
            e
        })
        .with_context(|| format!("Failed to write {}", output.display()))?;

    log_operation_end("upsample_dem", start, upsampled.len());
    info!("{} write complete", output.display());
    Ok(())
}
