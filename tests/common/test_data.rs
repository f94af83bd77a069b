//! Test data generation utilities.
//!
//! This module writes raw DEM files with known patterns for testing.

use std::io;
use std::path::Path;

/// A ramp that rises by `dx` per column and `dy` per row from `base`
pub fn ramp(nrows: usize, ncols: usize, base: i16, dx: i16, dy: i16) -> Vec<i16> {
    (0..nrows)
        .flat_map(|r| (0..ncols).map(move |c| base + dx * c as i16 + dy * r as i16))
        .collect()
}

/// A rough pattern with negative and positive elevations
pub fn rough(nrows: usize, ncols: usize) -> Vec<i16> {
    (0..nrows * ncols)
        .map(|k| {
            let (r, c) = ((k / ncols) as i32, (k % ncols) as i32);
            ((r * 131 + c * 71 + r * c * 17) % 997 - 300) as i16
        })
        .collect()
}

/// Write samples as an SRTM-style big-endian `.hgt` file
pub fn write_hgt(path: &Path, samples: &[i16]) -> io::Result<()> {
    let bytes: Vec<u8> = samples.iter().flat_map(|s| s.to_be_bytes()).collect();
    std::fs::write(path, bytes)
}

/// Write samples as a native-order `.dem` file
pub fn write_dem(path: &Path, samples: &[i16]) -> io::Result<()> {
    std::fs::write(path, dem_upsample::data_loader::encode_samples(samples))
}

/// Read a native-order `.dem` file
pub fn read_dem(path: &Path) -> io::Result<Vec<i16>> {
    let bytes = std::fs::read(path)?;
    Ok(dem_upsample::data_loader::decode_samples(
        &bytes,
        dem_upsample::ByteOrder::Native,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_ramp() {
        assert_eq!(ramp(2, 3, 100, 1, 10), vec![100, 101, 102, 110, 111, 112]);
    }

    #[test]
    fn test_write_hgt_is_big_endian() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tile.hgt");
        write_hgt(&path, &[0x0102]).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), vec![0x01, 0x02]);
    }
}
