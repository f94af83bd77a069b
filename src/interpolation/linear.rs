//! Linear interpolation along the grid boundary.
//!
//! The last source column has no right neighbor and the last source row has
//! no below neighbor, so those destination points are interpolated along the
//! single available axis. The bottom-right corner has no neighbor at all and
//! is copied.

use super::common::{fraction, linear_weight, to_sample};
use crate::grid::{flat_index, DemGrid, GridShape};

/// Linear interpolation between `h1` and `h2` at `t` in `[0, 1)`, computed as `t*h2 + (1-t)*h1`
#[inline]
pub fn lerp(h1: i16, h2: i16, t: f32) -> i16 {
    let (w0, w1) = linear_weight(t);
    to_sample(w1 * h2 as f32 + w0 * h1 as f32)
}

/// Sample between source rows `i` and `i + 1` in column `j`, `bi` steps of `rate` down
#[inline]
pub fn along_column(src: &DemGrid, i: usize, j: usize, bi: usize, rate: usize) -> i16 {
    lerp(src.get(i, j), src.get(i + 1, j), fraction(bi, rate))
}

/// Sample between source columns `j` and `j + 1` in row `i`, `bj` steps of `rate` across
#[inline]
pub fn along_row(src: &DemGrid, i: usize, j: usize, bj: usize, rate: usize) -> i16 {
    lerp(src.get(i, j), src.get(i, j + 1), fraction(bj, rate))
}

/// The bottom-right source sample
#[inline]
pub fn corner(src: &DemGrid) -> i16 {
    src.get(src.nrows() - 1, src.ncols() - 1)
}

/// Points of the final destination column, excluding the corner
pub fn last_column_points(
    src: &DemGrid,
    rate: usize,
    up_ncols: usize,
) -> impl Iterator<Item = (usize, i16)> + '_ {
    let j = src.ncols() - 1;

    (0..src.nrows() - 1).flat_map(move |i| {
        (0..rate).map(move |bi| {
            let offset = flat_index(rate * i + bi, rate * j, up_ncols);
            (offset, along_column(src, i, j, bi, rate))
        })
    })
}

/// Points of the final destination row, excluding the corner
pub fn last_row_points(
    src: &DemGrid,
    rate: usize,
    up_ncols: usize,
) -> impl Iterator<Item = (usize, i16)> + '_ {
    let i = src.nrows() - 1;

    (0..src.ncols() - 1).flat_map(move |j| {
        (0..rate).map(move |bj| {
            let offset = flat_index(rate * i, rate * j + bj, up_ncols);
            (offset, along_row(src, i, j, bj, rate))
        })
    })
}

/// The bottom-right destination point
pub fn corner_point(src: &DemGrid, dst: GridShape) -> (usize, i16) {
    (
        flat_index(dst.nrows - 1, dst.ncols - 1, dst.ncols),
        corner(src),
    )
}
