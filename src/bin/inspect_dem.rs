use clap::Parser;
use serde::Serialize;
use std::error::Error;
use std::path::PathBuf;

use dem_upsample::config::SRTM1_SIZE;
use dem_upsample::{load_grid, ByteOrder, GridShape};

/// Print the shape, elevation range and corner samples of a raw DEM file
#[derive(Parser, Debug)]
#[command(name = "inspect_dem")]
struct Args {
    /// Path to the .hgt or .dem file
    path: PathBuf,

    /// Width of the grid
    #[arg(default_value_t = SRTM1_SIZE)]
    ncols: usize,

    /// Height of the grid
    #[arg(default_value_t = SRTM1_SIZE)]
    nrows: usize,

    /// Byte order of the samples (default: inferred from the extension)
    #[arg(short, long, value_enum)]
    byte_order: Option<ByteOrder>,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Summary {
    path: PathBuf,
    byte_order: ByteOrder,
    shape: GridShape,
    min_elevation: i16,
    max_elevation: i16,
    /// Top-left, top-right, bottom-left, bottom-right
    corners: [i16; 4],
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let byte_order = args
        .byte_order
        .unwrap_or_else(|| ByteOrder::from_path(&args.path));

    let grid = load_grid(&args.path, args.nrows, args.ncols, byte_order)?;
    let (last_row, last_col) = (grid.nrows() - 1, grid.ncols() - 1);
    let (min_elevation, max_elevation) = grid.elevation_range();

    let summary = Summary {
        path: args.path.clone(),
        byte_order,
        shape: grid.shape(),
        min_elevation,
        max_elevation,
        corners: [
            grid.get(0, 0),
            grid.get(0, last_col),
            grid.get(last_row, 0),
            grid.get(last_row, last_col),
        ],
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Inspecting DEM file: {}", summary.path.display());
    println!("  Byte order: {:?}", summary.byte_order);
    println!(
        "  Shape: {} rows x {} cols",
        summary.shape.nrows, summary.shape.ncols
    );
    println!(
        "  Elevation range: {} to {}",
        summary.min_elevation, summary.max_elevation
    );
    println!("  Corners (TL, TR, BL, BR): {:?}", summary.corners);

    // A few samples from the first row
    let view = grid.view()?;
    let first: Vec<i16> = view.row(0).iter().take(8).copied().collect();
    println!("  First row: {:?}", first);

    Ok(())
}
