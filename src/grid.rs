//! Elevation grid storage.
//!
//! A [`DemGrid`] is a single contiguous, row-major buffer of signed 16-bit
//! samples. Rows and columns are addressed through [`flat_index`], which is
//! shared by the source grid and the (wider) upsampled grid.

use ndarray::{Array2, ArrayView2};
use serde::{Deserialize, Serialize};

use crate::error::{DemError, Result};

/// Map a `(row, col)` pair to its offset in a row-major buffer with `ncols` columns
#[inline]
pub fn flat_index(row: usize, col: usize, ncols: usize) -> usize {
    row * ncols + col
}

/// Number of samples along one axis after upsampling `n` samples by `rate`.
///
/// Three points at `x = (0, 1, 2)` upsampled by 2 become five points at
/// `x = (0, 0.5, 1, 1.5, 2)`. Returns `None` for `n == 0` or on overflow.
pub fn upsampled_len(n: usize, rate: usize) -> Option<usize> {
    n.checked_sub(1)?.checked_mul(rate)?.checked_add(1)
}

/// Number of samples in an `nrows x ncols` grid, or `None` on overflow.
///
/// Also rejects grids whose buffer would exceed `isize::MAX` bytes.
pub fn sample_count(nrows: usize, ncols: usize) -> Option<usize> {
    nrows
        .checked_mul(ncols)
        .filter(|&n| n <= isize::MAX as usize / std::mem::size_of::<i16>())
}

/// Dimensions of a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridShape {
    /// Number of rows
    pub nrows: usize,
    /// Number of columns
    pub ncols: usize,
}

/// A row-major grid of 16-bit elevation samples
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemGrid {
    nrows: usize,
    ncols: usize,
    data: Vec<i16>,
}

impl DemGrid {
    /// Create a grid from row-major samples.
    ///
    /// At least one full cell is required, so both dimensions must be 2 or more.
    pub fn new(nrows: usize, ncols: usize, data: Vec<i16>) -> Result<Self> {
        if nrows < 2 || ncols < 2 {
            return Err(DemError::InvalidGrid {
                message: format!(
                    "Grid must be at least 2x2, got {} rows and {} columns",
                    nrows, ncols
                ),
            });
        }

        let expected = sample_count(nrows, ncols).ok_or_else(|| DemError::InvalidGrid {
            message: format!("A {}x{} grid is too large to address", nrows, ncols),
        })?;

        if data.len() != expected {
            return Err(DemError::InvalidGrid {
                message: format!(
                    "Expected {} samples for a {}x{} grid, got {}",
                    expected,
                    nrows,
                    ncols,
                    data.len()
                ),
            });
        }

        Ok(Self { nrows, ncols, data })
    }

    /// Build a grid from a 2D ndarray
    pub fn from_array(array: Array2<i16>) -> Result<Self> {
        let (nrows, ncols) = array.dim();
        let data = if array.is_standard_layout() {
            array.into_raw_vec()
        } else {
            array.iter().copied().collect()
        };
        Self::new(nrows, ncols, data)
    }

    pub fn nrows(&self) -> usize {
        self.nrows
    }

    pub fn ncols(&self) -> usize {
        self.ncols
    }

    pub fn shape(&self) -> GridShape {
        GridShape {
            nrows: self.nrows,
            ncols: self.ncols,
        }
    }

    /// Total number of samples
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false; a valid grid holds at least four samples
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Offset of `(row, col)` in this grid's buffer
    #[inline]
    pub fn index(&self, row: usize, col: usize) -> usize {
        flat_index(row, col, self.ncols)
    }

    /// Sample at `(row, col)`. Panics when out of bounds.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> i16 {
        self.data[self.index(row, col)]
    }

    pub fn as_slice(&self) -> &[i16] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<i16> {
        self.data
    }

    /// Borrow the samples as a 2D ndarray view
    pub fn view(&self) -> Result<ArrayView2<'_, i16>> {
        ArrayView2::from_shape((self.nrows, self.ncols), &self.data).map_err(|e| {
            DemError::InvalidGrid {
                message: format!("Failed to view grid as a 2D array: {}", e),
            }
        })
    }

    /// Lowest and highest elevation in the grid
    pub fn elevation_range(&self) -> (i16, i16) {
        self.data
            .iter()
            .fold((i16::MAX, i16::MIN), |(lo, hi), &v| (lo.min(v), hi.max(v)))
    }
}
