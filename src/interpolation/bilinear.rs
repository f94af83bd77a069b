//! Bilinear interpolation.
//!
//! Fills every destination point anchored in a source cell that has both a
//! right and a below neighbor, using the four corners of that cell.

use super::common::{fraction, to_sample};
use crate::grid::{flat_index, DemGrid};

/// Bilinear coefficients of one source cell.
///
/// With corners `h1 = (i, j)`, `h2 = (i, j + 1)`, `h3 = (i + 1, j)` and
/// `h4 = (i + 1, j + 1)` the surface is `a00 + a10*x + a01*y + a11*x*y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BilinearCell {
    pub a00: i32,
    pub a10: i32,
    pub a01: i32,
    pub a11: i32,
}

impl BilinearCell {
    pub fn from_corners(h1: i16, h2: i16, h3: i16, h4: i16) -> Self {
        let (h1, h2, h3, h4) = (h1 as i32, h2 as i32, h3 as i32, h4 as i32);
        Self {
            a00: h1,
            a10: h2 - h1,
            a01: h3 - h1,
            a11: h1 - h2 - h3 + h4,
        }
    }

    /// Coefficients of the cell whose top-left corner is `(i, j)`.
    ///
    /// Requires `i < nrows - 1` and `j < ncols - 1`.
    pub fn from_grid(grid: &DemGrid, i: usize, j: usize) -> Self {
        Self::from_corners(
            grid.get(i, j),
            grid.get(i, j + 1),
            grid.get(i + 1, j),
            grid.get(i + 1, j + 1),
        )
    }

    /// Evaluate the surface at normalized coordinates `x` (columns) and `y` (rows)
    #[inline]
    pub fn evaluate(&self, x: f32, y: f32) -> f32 {
        self.a00 as f32 + self.a10 as f32 * x + self.a01 as f32 * y + self.a11 as f32 * x * y
    }

    /// Sample at sub-point `(bi, bj)` of a cell split into `rate x rate` points
    #[inline]
    pub fn sample(&self, bi: usize, bj: usize, rate: usize) -> i16 {
        to_sample(self.evaluate(fraction(bj, rate), fraction(bi, rate)))
    }
}

/// All interior destination points as `(offset, value)` pairs.
///
/// Covers every destination point except the final destination row and column.
/// `up_ncols` is the destination width, already checked for overflow.
pub fn interior_points(
    src: &DemGrid,
    rate: usize,
    up_ncols: usize,
) -> impl Iterator<Item = (usize, i16)> + '_ {
    (0..src.nrows() - 1)
        .flat_map(move |i| (0..src.ncols() - 1).map(move |j| (i, j)))
        .flat_map(move |(i, j)| {
            let cell = BilinearCell::from_grid(src, i, j);
            (0..rate).flat_map(move |bi| {
                (0..rate).map(move |bj| {
                    let offset = flat_index(rate * i + bi, rate * j + bj, up_ncols);
                    (offset, cell.sample(bi, bj, rate))
                })
            })
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coefficients() {
        let cell = BilinearCell::from_corners(10, 20, 30, 40);
        assert_eq!(
            cell,
            BilinearCell {
                a00: 10,
                a10: 10,
                a01: 20,
                a11: 0
            }
        );
    }

    #[test]
    fn test_cell_center() {
        let cell = BilinearCell::from_corners(10, 20, 30, 40);
        assert_eq!(cell.sample(1, 1, 2), 25);
        assert_eq!(cell.sample(0, 1, 2), 15);
        assert_eq!(cell.sample(1, 0, 2), 20);
    }

    #[test]
    fn test_anchor_reproduces_corner() {
        let cell = BilinearCell::from_corners(-32768, 32767, 1234, -4321);
        for rate in 1..6 {
            assert_eq!(cell.sample(0, 0, rate), -32768);
        }
    }

    #[test]
    fn test_extreme_corners_do_not_overflow() {
        let cell = BilinearCell::from_corners(i16::MIN, i16::MAX, i16::MAX, i16::MIN);
        assert_eq!(cell.a11, -4 * 32767 - 2);
        assert_eq!(cell.sample(1, 1, 2), 0);
    }

    #[test]
    fn test_value_is_truncated() {
        // 0 -> 3 along x, half way is 1.5
        let cell = BilinearCell::from_corners(0, 3, 0, 3);
        assert_eq!(cell.sample(0, 1, 2), 1);
        // -0.5 truncates toward zero rather than rounding away
        let cell = BilinearCell::from_corners(0, -1, 0, -1);
        assert_eq!(cell.sample(0, 1, 2), 0);
        assert_eq!(cell.sample(1, 1, 2), 0);
    }

    #[test]
    fn test_interior_points_layout() {
        let src = DemGrid::new(2, 2, vec![10, 20, 30, 40]).unwrap();
        let points: Vec<_> = interior_points(&src, 2, 3).collect();
        // 3x3 destination, interior covers rows 0..2 and cols 0..2
        assert_eq!(points, vec![(0, 10), (1, 15), (3, 20), (4, 25)]);
    }
}
