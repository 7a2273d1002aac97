//! # rlepix
//!
//! A lossless run-length codec for RGB pixmaps. Each row of an image is split
//! into its three channel sequences and every sequence is encoded on its own
//! into signed run markers plus payload values.
//!
//! ## Token stream
//!
//! - **Run**: `count value` with `2 <= count <= 127`, the value repeated `count` times
//! - **Literal**: `-count v1 .. v_count` with `1 <= count <= 127`, values stored verbatim
//!
//! Tokens for row 0 channel 0, row 0 channel 1, row 0 channel 2, row 1 channel 0
//! and so on are concatenated with no separators. The decoder recovers the
//! boundaries from the image width and height, which travel out of band.
//!
//! ## Quick Start
//!
//! ```rust
//! use rlepix::{decode, encode};
//!
//! let grid = vec![vec![[5, 1, 0], [5, 2, 0], [5, 3, 0], [9, 4, 0]]];
//! let stream = encode(4, 1, &grid).unwrap();
//! assert_eq!(stream, vec![3, 5, -1, 9, -4, 1, 2, 3, 4, 4, 0]);
//!
//! let restored = decode(4, 1, &stream).unwrap();
//! assert_eq!(restored, grid);
//! ```
//!
//! ### Working with Files
//!
//! ```rust
//! use rlepix::pipeline;
//! use rlepix::RleConfig;
//! use std::fs::File;
//! use std::io::{BufReader, BufWriter};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = RleConfig::default();
//!
//! let input = File::open("input.ppm")?;
//! let output = File::create("output.rle")?;
//! let mut reader = BufReader::new(input);
//! let mut writer = BufWriter::new(output);
//!
//! let stats = pipeline::compress(&mut reader, &mut writer, &config)?;
//! println!("Compression ratio: {:.2}x", stats.ratio);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod codec;
pub mod config;
pub mod container;
pub mod error;
pub mod generator;
pub mod grid;
pub mod pipeline;

// Re-export commonly used types for convenience
pub use codec::{decode, encode, Token, TokenSummary};
pub use config::{Pattern, RleConfig};
pub use container::RleImage;
pub use error::{Result, RleError};
pub use grid::{Grid, Image, Pixel, Sample};
pub use pipeline::{compress, decompress, CompressionStats, FileInfo};

use std::io::Cursor;

/// Compress an in-memory P3 pixmap into RLE text.
///
/// # Example
///
/// ```rust
/// use rlepix::{compress_data, RleConfig};
///
/// let ppm = b"P3\n2 1\n255\n7 7 7 7 7 7\n";
/// let compressed = compress_data(ppm, &RleConfig::default()).unwrap();
/// assert_eq!(compressed, b"2 1\n2 7 2 7 2 7 \n".to_vec());
/// ```
pub fn compress_data(ppm: &[u8], config: &RleConfig) -> Result<Vec<u8>> {
    let mut input = Cursor::new(ppm);
    let mut output = Vec::new();

    pipeline::compress(&mut input, &mut output, config)?;
    Ok(output)
}

/// Decompress in-memory RLE text back into a P3 pixmap.
///
/// The RLE layout does not record the maximum intensity; `config.max_value`
/// is written to the pixmap header and enforced on every sample.
pub fn decompress_data(compressed: &[u8], config: &RleConfig) -> Result<Vec<u8>> {
    let mut input = Cursor::new(compressed);
    let mut output = Vec::new();

    pipeline::decompress(&mut input, &mut output, config)?;
    Ok(output)
}

/// Dimensions and token statistics of in-memory RLE text.
pub fn get_compression_info(compressed: &[u8]) -> Result<FileInfo> {
    let mut input = Cursor::new(compressed);
    pipeline::info(&mut input)
}

/// Check that in-memory RLE text decodes cleanly for its declared dimensions.
pub fn validate_data(compressed: &[u8]) -> Result<bool> {
    let mut input = Cursor::new(compressed);
    pipeline::validate(&mut input)
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const AUTHORS: &str = env!("CARGO_PKG_AUTHORS");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

pub fn version_info() -> VersionInfo {
    VersionInfo {
        version: VERSION,
        authors: AUTHORS,
        description: DESCRIPTION,
    }
}

#[derive(Debug, Clone)]
pub struct VersionInfo {
    pub version: &'static str,
    pub authors: &'static str,
    pub description: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    const FLAT_PPM: &[u8] = b"P3\n3 2\n255\n1 2 3 1 2 3 1 2 3 \n1 2 3 1 2 3 1 2 3 \n";

    #[test]
    fn test_compress_decompress_data() {
        let config = RleConfig::default();
        let compressed = compress_data(FLAT_PPM, &config).unwrap();
        assert_eq!(compressed, b"3 2\n3 1 3 2 3 3 3 1 3 2 3 3 \n".to_vec());

        let decompressed = decompress_data(&compressed, &config).unwrap();
        assert_eq!(decompressed, FLAT_PPM.to_vec());
    }

    #[test]
    fn test_empty_image() {
        let config = RleConfig::default();
        let compressed = compress_data(b"P3\n0 0\n255\n", &config).unwrap();
        assert_eq!(compressed, b"0 0\n\n".to_vec());

        let decompressed = decompress_data(&compressed, &config).unwrap();
        assert_eq!(decompressed, b"P3\n0 0\n255\n".to_vec());
    }

    #[test]
    fn test_validation() {
        let compressed = compress_data(FLAT_PPM, &RleConfig::default()).unwrap();
        assert!(validate_data(&compressed).unwrap());

        let mut corrupted = compressed.clone();
        corrupted.extend_from_slice(b"5\n");
        assert!(matches!(validate_data(&corrupted), Err(RleError::TrailingData { remaining: 1 })));
    }

    #[test]
    fn test_compression_info() {
        let compressed = compress_data(FLAT_PPM, &RleConfig::default()).unwrap();
        let info = get_compression_info(&compressed).unwrap();
        assert_eq!(info.width, 3);
        assert_eq!(info.height, 2);
        assert_eq!(info.samples, 18);
        assert_eq!(info.tokens.runs, 6);
        assert_eq!(info.tokens.literals, 0);
        assert!((info.compression_ratio - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_version_info() {
        let info = version_info();
        assert!(!info.version.is_empty());
        assert!(!info.description.is_empty());
    }
}
