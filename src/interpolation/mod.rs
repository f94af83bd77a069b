//! Upsampling of elevation grids.
//!
//! Every destination point belongs to exactly one of four fills:
//!
//! - **Interior** ([`bilinear`]): points anchored in a source cell with a right
//!   and a below neighbor.
//! - **Last column** and **last row** ([`linear`]): 1D interpolation along the
//!   only available axis.
//! - **Corner**: the bottom-right source sample, copied.
//!
//! [`upsample`] runs the fills one after another. [`upsample_parallel`] computes
//! whole destination rows independently and produces the same samples.

pub mod bilinear;
pub mod common;
pub mod linear;

use rayon::prelude::*;
use std::iter;
use tracing::debug;

use crate::config::UpsampleConfig;
use crate::error::{DemError, Result};
use crate::grid::{sample_count, upsampled_len, DemGrid, GridShape};

use self::bilinear::BilinearCell;

fn check_rate(rate: usize) -> Result<()> {
    if rate == 0 {
        return Err(DemError::InvalidParameter {
            param: "rate".to_string(),
            message: "Upsampling rate must be a positive integer".to_string(),
        });
    }
    Ok(())
}

/// Shape of `src` upsampled by `rate`.
///
/// Fails when the rate is 0 or the destination would not fit in memory.
pub fn destination_shape(src: &DemGrid, rate: usize) -> Result<GridShape> {
    check_rate(rate)?;

    let too_large = || DemError::InvalidParameter {
        param: "rate".to_string(),
        message: format!(
            "Upsampling a {}x{} grid by {} overflows the destination size",
            src.nrows(),
            src.ncols(),
            rate
        ),
    };

    let nrows = upsampled_len(src.nrows(), rate).ok_or_else(too_large)?;
    let ncols = upsampled_len(src.ncols(), rate).ok_or_else(too_large)?;
    sample_count(nrows, ncols).ok_or_else(too_large)?;

    Ok(GridShape { nrows, ncols })
}

/// Zeroed destination buffer, reporting allocation failure as an error
fn allocate(shape: GridShape) -> Result<Vec<i16>> {
    // destination_shape already checked the product
    let len = shape.nrows * shape.ncols;
    let mut data = Vec::new();
    data.try_reserve_exact(len)
        .map_err(|e| DemError::InvalidGrid {
            message: format!("Failed to allocate {} samples: {}", len, e),
        })?;
    data.resize(len, 0);
    Ok(data)
}

/// Every destination point as an `(offset, value)` pair.
///
/// Interior points come first, then the last column, the last row and the corner.
/// Each destination offset appears exactly once.
pub fn destination_points(
    src: &DemGrid,
    rate: usize,
) -> Result<impl Iterator<Item = (usize, i16)> + '_> {
    let dst = destination_shape(src, rate)?;

    Ok(bilinear::interior_points(src, rate, dst.ncols)
        .chain(linear::last_column_points(src, rate, dst.ncols))
        .chain(linear::last_row_points(src, rate, dst.ncols))
        .chain(iter::once(linear::corner_point(src, dst))))
}

/// Upsample `src` by `rate`, filling the destination sequentially
pub fn upsample(src: &DemGrid, rate: usize) -> Result<DemGrid> {
    let dst = destination_shape(src, rate)?;
    debug!(
        nrows = src.nrows(),
        ncols = src.ncols(),
        up_nrows = dst.nrows,
        up_ncols = dst.ncols,
        rate,
        "Upsampling grid"
    );

    let mut data = allocate(dst)?;
    for (offset, value) in destination_points(src, rate)? {
        data[offset] = value;
    }

    DemGrid::new(dst.nrows, dst.ncols, data)
}

/// Upsample `src` by `rate`, one destination row per rayon task.
///
/// Runs on the current rayon pool and returns the same grid as [`upsample`].
pub fn upsample_parallel(src: &DemGrid, rate: usize) -> Result<DemGrid> {
    let dst = destination_shape(src, rate)?;
    debug!(
        nrows = src.nrows(),
        ncols = src.ncols(),
        up_nrows = dst.nrows,
        up_ncols = dst.ncols,
        rate,
        threads = rayon::current_num_threads(),
        "Upsampling grid in parallel"
    );

    let mut data = allocate(dst)?;
    data.par_chunks_mut(dst.ncols)
        .enumerate()
        .for_each(|(row, out)| fill_row(src, rate, row, out));

    DemGrid::new(dst.nrows, dst.ncols, data)
}

/// Fill destination row `row`
fn fill_row(src: &DemGrid, rate: usize, row: usize, out: &mut [i16]) {
    let (i, bi) = (row / rate, row % rate);
    let last_j = src.ncols() - 1;

    if i == src.nrows() - 1 {
        // Final destination row, bi is always 0 here
        for (col, value) in out.iter_mut().enumerate() {
            let (j, bj) = (col / rate, col % rate);
            *value = if j == last_j {
                linear::corner(src)
            } else {
                linear::along_row(src, i, j, bj, rate)
            };
        }
        return;
    }

    let mut cell = BilinearCell::from_grid(src, i, 0);
    for (col, value) in out.iter_mut().enumerate() {
        let (j, bj) = (col / rate, col % rate);
        if j == last_j {
            *value = linear::along_column(src, i, j, bi, rate);
        } else {
            if bj == 0 && j > 0 {
                cell = BilinearCell::from_grid(src, i, j);
            }
            *value = cell.sample(bi, bj, rate);
        }
    }
}

/// Upsampler built from configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upsampler {
    rate: usize,
    parallel: bool,
    workers: Option<usize>,
}

impl Upsampler {
    /// Create a sequential upsampler
    pub fn new(rate: usize) -> Result<Self> {
        check_rate(rate)?;
        Ok(Self {
            rate,
            parallel: false,
            workers: None,
        })
    }

    /// Create an upsampler from the `upsample` configuration section
    pub fn from_config(config: &UpsampleConfig) -> Result<Self> {
        Ok(Self::new(config.rate)?.with_parallel(config.parallel, config.workers))
    }

    /// Run in parallel, optionally on a dedicated pool of `workers` threads
    pub fn with_parallel(mut self, parallel: bool, workers: Option<usize>) -> Self {
        self.parallel = parallel;
        self.workers = workers;
        self
    }

    pub fn rate(&self) -> usize {
        self.rate
    }

    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    /// Output shape for `src`
    pub fn output_shape(&self, src: &DemGrid) -> Result<GridShape> {
        destination_shape(src, self.rate)
    }

    /// Upsample `src`
    pub fn run(&self, src: &DemGrid) -> Result<DemGrid> {
        if !self.parallel {
            return upsample(src, self.rate);
        }

        match self.workers {
            Some(workers) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(workers)
                    .build()?;
                pool.install(|| upsample_parallel(src, self.rate))
            }
            None => upsample_parallel(src, self.rate),
        }
    }
}
