//! Common utilities for interpolation algorithms.
//!
//! This module provides the fractional offsets and sample conversion shared by
//! the bilinear and linear fills. All arithmetic is single precision so that
//! every path produces the same bits for the same input.

/// Fractional position of sub-point `offset` inside a cell of `rate` sub-points.
///
/// The division is done in floating point; `offset < rate` so the result lies in `[0, 1)`.
#[inline]
pub fn fraction(offset: usize, rate: usize) -> f32 {
    offset as f32 / rate as f32
}

/// Convert an interpolated value to a sample by truncating toward zero.
///
/// Values are cast, not rounded.
#[inline]
pub fn to_sample(value: f32) -> i16 {
    value as i16
}

/// Get the weights for linear interpolation
#[inline]
pub fn linear_weight(fraction: f32) -> (f32, f32) {
    (1.0 - fraction, fraction)
}
