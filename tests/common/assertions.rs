//! Assertion utilities for testing.
//!
//! This module provides helper functions for checking upsampled grids
//! against their source grids.

use dem_upsample::DemGrid;

/// Assert that every source sample appears unchanged at `(rate*i, rate*j)`.
///
/// # Panics
///
/// Panics if the upsampled grid has the wrong shape or any source sample moved.
pub fn assert_samples_preserved(src: &DemGrid, up: &DemGrid, rate: usize) {
    assert_eq!(
        (up.nrows(), up.ncols()),
        (rate * (src.nrows() - 1) + 1, rate * (src.ncols() - 1) + 1),
        "Upsampled grid has the wrong shape"
    );

    for i in 0..src.nrows() {
        for j in 0..src.ncols() {
            assert_eq!(
                up.get(rate * i, rate * j),
                src.get(i, j),
                "Source sample ({}, {}) not preserved at rate {}",
                i,
                j,
                rate
            );
        }
    }
}

/// Assert that a value lies between two bounds in either order.
///
/// # Panics
///
/// Panics if `actual` is outside `[min(a, b), max(a, b)]`.
pub fn assert_between(actual: i16, a: i16, b: i16) {
    let (min, max) = (a.min(b), a.max(b));
    assert!(
        actual >= min && actual <= max,
        "Value not in range: actual = {}, min = {}, max = {}",
        actual,
        min,
        max
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assert_between() {
        assert_between(5, 0, 10);
        assert_between(5, 10, 0);
        assert_between(0, 0, 0);
    }
}
