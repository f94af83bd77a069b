//! Raw elevation file loading and saving.
//!
//! Input and output files are headerless sequences of signed 16-bit samples in
//! row-major order. SRTM `.hgt` tiles store big-endian samples, which are
//! converted to host order on load. Output is always written in native order.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{debug, info, warn};

use crate::error::{DemError, Result};
use crate::grid::{sample_count, DemGrid};

/// Bytes per sample
pub const SAMPLE_SIZE: usize = std::mem::size_of::<i16>();

/// Byte order of samples in a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ByteOrder {
    /// Big-endian, as in SRTM `.hgt` tiles
    Big,
    /// Little-endian
    Little,
    /// Host byte order
    Native,
}

impl ByteOrder {
    /// Infer the byte order from a file name: `.hgt` is big-endian, anything else native
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("hgt") => ByteOrder::Big,
            _ => ByteOrder::Native,
        }
    }

    /// Whether samples in this order must be byte-swapped on this host
    pub fn needs_swap(self) -> bool {
        match self {
            ByteOrder::Big => cfg!(target_endian = "little"),
            ByteOrder::Little => cfg!(target_endian = "big"),
            ByteOrder::Native => false,
        }
    }

    fn decode(self, bytes: [u8; SAMPLE_SIZE]) -> i16 {
        match self {
            ByteOrder::Big => i16::from_be_bytes(bytes),
            ByteOrder::Little => i16::from_le_bytes(bytes),
            ByteOrder::Native => i16::from_ne_bytes(bytes),
        }
    }
}

/// Decode every whole sample in `bytes`
pub fn decode_samples(bytes: &[u8], order: ByteOrder) -> Vec<i16> {
    bytes
        .chunks_exact(SAMPLE_SIZE)
        .map(|chunk| order.decode([chunk[0], chunk[1]]))
        .collect()
}

/// Encode samples in native byte order
pub fn encode_samples(samples: &[i16]) -> Vec<u8> {
    samples.iter().flat_map(|s| s.to_ne_bytes()).collect()
}

/// Load an `nrows x ncols` grid from a raw sample file
pub fn load_grid(path: &Path, nrows: usize, ncols: usize, order: ByteOrder) -> Result<DemGrid> {
    // Check if the file exists
    if !path.exists() {
        return Err(DemError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("File not found: {}", path.display()),
        )));
    }

    // sample_count keeps the byte count below isize::MAX
    let expected = sample_count(nrows, ncols)
        .map(|n| n * SAMPLE_SIZE)
        .ok_or_else(|| DemError::InvalidGrid {
            message: format!("A {}x{} grid is too large to load", nrows, ncols),
        })?;

    let bytes = std::fs::read(path)?;
    debug!(
        path = %path.display(),
        bytes = bytes.len(),
        expected,
        byte_order = ?order,
        swap = order.needs_swap(),
        "Read elevation file"
    );

    if bytes.len() < expected {
        return Err(DemError::ShortRead {
            path: path.to_path_buf(),
            expected,
            actual: bytes.len(),
        });
    }

    if bytes.len() > expected {
        warn!(
            "Ignoring {} trailing bytes in {}",
            bytes.len() - expected,
            path.display()
        );
    }

    let samples = decode_samples(&bytes[..expected], order);
    let grid = DemGrid::new(nrows, ncols, samples)?;

    info!("Loaded {}x{} grid from {}", nrows, ncols, path.display());
    Ok(grid)
}

/// Save a grid as raw native-order samples
pub fn save_grid(path: &Path, grid: &DemGrid) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    for sample in grid.as_slice() {
        writer.write_all(&sample.to_ne_bytes())?;
    }
    writer.flush()?;

    info!(
        "Wrote {}x{} grid to {}",
        grid.nrows(),
        grid.ncols(),
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_byte_order_from_path() {
        assert_eq!(ByteOrder::from_path(Path::new("N19W156.hgt")), ByteOrder::Big);
        assert_eq!(ByteOrder::from_path(Path::new("a/b/elevation.dem")), ByteOrder::Native);
        assert_eq!(ByteOrder::from_path(Path::new("noext")), ByteOrder::Native);
        assert!(!ByteOrder::Native.needs_swap());
    }

    #[test]
    fn test_decode_samples() {
        let bytes = [0x01, 0x02, 0xff, 0xfe, 0x00];
        assert_eq!(decode_samples(&bytes, ByteOrder::Big), vec![0x0102, -2]);
        assert_eq!(decode_samples(&bytes, ByteOrder::Little), vec![0x0201, -257]);
    }

    #[test]
    fn test_encode_samples_is_native() {
        let bytes = encode_samples(&[1, -1]);
        assert_eq!(decode_samples(&bytes, ByteOrder::Native), vec![1, -1]);
    }

    #[test]
    fn test_load_hgt_swaps_bytes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("N00E000.hgt");
        let samples: [i16; 4] = [10, -20, 300, 8848];
        let bytes: Vec<u8> = samples.iter().flat_map(|s| s.to_be_bytes()).collect();
        std::fs::write(&path, bytes).unwrap();

        let grid = load_grid(&path, 2, 2, ByteOrder::from_path(&path)).unwrap();
        assert_eq!(grid.as_slice(), &samples);
    }

    #[test]
    fn test_load_short_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("short.dem");
        std::fs::write(&path, encode_samples(&[1, 2, 3])).unwrap();

        let err = load_grid(&path, 2, 2, ByteOrder::Native).unwrap_err();
        assert!(matches!(
            err,
            DemError::ShortRead {
                expected: 8,
                actual: 6,
                ..
            }
        ));
    }

    #[test]
    fn test_load_ignores_trailing_bytes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("long.dem");
        std::fs::write(&path, encode_samples(&[1, 2, 3, 4, 5])).unwrap();

        let grid = load_grid(&path, 2, 2, ByteOrder::Native).unwrap();
        assert_eq!(grid.as_slice(), &[1, 2, 3, 4]);
    }

    #[test]
    fn test_load_rejects_wrapping_dimensions() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tiny.dem");
        std::fs::write(&path, encode_samples(&[1, 2, 3, 4])).unwrap();

        // nrows * ncols * 2 wraps to 0 with unchecked multiplication
        let half = 1usize << (usize::BITS / 2);
        let result = load_grid(&path, half, half, ByteOrder::Native);
        assert!(matches!(result, Err(DemError::InvalidGrid { .. })));
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_grid(Path::new("does/not/exist.dem"), 2, 2, ByteOrder::Native);
        assert!(matches!(result, Err(DemError::Io(_))));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.dem");
        let grid = DemGrid::new(2, 3, vec![-5, 0, 5, 10, 15, 20]).unwrap();

        save_grid(&path, &grid).unwrap();
        assert_eq!(std::fs::metadata(&path).unwrap().len(), 12);

        let loaded = load_grid(&path, 2, 3, ByteOrder::Native).unwrap();
        assert_eq!(loaded, grid);
    }
}
