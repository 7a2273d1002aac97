use crate::codec::{self, TokenSummary};
use crate::config::RleConfig;
use crate::container::{read_ppm, read_rle, write_ppm, write_rle, RleImage};
use crate::error::RleError;
use crate::grid::Image;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

pub const RLE_EXTENSION: &str = "rle";

#[derive(Debug, Clone)]
pub struct CompressionStats {
	pub original_size: u64,
	pub compressed_size: u64,
	pub ratio: f64,
	pub samples: u64,
	pub tokens: TokenSummary,
	pub processing_time: Duration,
}

#[derive(Debug, Clone)]
pub struct FileInfo {
	pub width: usize,
	pub height: usize,
	pub samples: u64,
	pub tokens: TokenSummary,
	/// Channel samples per stored integer.
	pub compression_ratio: f64,
}

/// Encode an image and, when `verify` is set, decode it again and compare.
pub fn encode_image(image: &Image, config: &RleConfig) -> Result<RleImage, RleError> {
	let tokens = codec::encode_parallel(image.width, image.height, &image.rows, config.threads)?;

	if config.verify {
		let decoded = codec::decode(image.width, image.height, &tokens)?;
		if decoded != image.rows {
			log::warn!("round-trip mismatch for {}x{} image", image.width, image.height);
			return Err(RleError::VerificationFailed);
		}
	}

	Ok(RleImage { width: image.width, height: image.height, tokens })
}

/// Decode an encoded image and tag it with the configured maximum intensity.
pub fn decode_image(encoded: &RleImage, config: &RleConfig) -> Result<Image, RleError> {
	let rows = codec::decode(encoded.width, encoded.height, &encoded.tokens)?;
	let image = Image { width: encoded.width, height: encoded.height, max_value: config.max_value, rows };
	image.validate_samples()?;
	Ok(image)
}

pub fn compress<R: Read, W: Write>(
	reader: &mut R,
	writer: &mut W,
	config: &RleConfig,
) -> Result<CompressionStats, RleError> {
	config.validate()?;
	let start = Instant::now();

	let mut buffer = Vec::new();
	reader.read_to_end(&mut buffer)?;
	let original_size = buffer.len() as u64;

	let image = read_ppm(&mut buffer.as_slice())?;
	log::debug!("read {}x{} pixmap, max {}", image.width, image.height, image.max_value);

	let encoded = encode_image(&image, config)?;
	let tokens = codec::summarize(&encoded.tokens)
		.map_err(|fault| RleError::InvalidFormat(format!("encoder produced a malformed stream: {:?}", fault)))?;
	let compressed_size = write_rle(writer, &encoded)?;
	let ratio = if compressed_size > 0 { original_size as f64 / compressed_size as f64 } else { 0.0 };

	log::info!(
		"compressed {} -> {} bytes ({} runs, {} literals)",
		original_size, compressed_size, tokens.runs, tokens.literals
	);

	Ok(CompressionStats {
		original_size,
		compressed_size,
		ratio,
		samples: image.sample_count() as u64,
		tokens,
		processing_time: start.elapsed(),
	})
}

pub fn decompress<R: Read, W: Write>(
	reader: &mut R,
	writer: &mut W,
	config: &RleConfig,
) -> Result<u64, RleError> {
	config.validate()?;
	let encoded = read_rle(reader)?;
	log::debug!("read {}x{} stream of {} integers", encoded.width, encoded.height, encoded.tokens.len());

	let image = decode_image(&encoded, config)?;
	write_ppm(writer, &image)
}

pub fn info<R: Read>(reader: &mut R) -> Result<FileInfo, RleError> {
	let encoded = read_rle(reader)?;
	let tokens = codec::summarize(&encoded.tokens)
		.map_err(|fault| RleError::InvalidFormat(format!("malformed token stream: {:?}", fault)))?;
	let samples = encoded.width
		.checked_mul(encoded.height)
		.and_then(|n| n.checked_mul(crate::grid::CHANNELS))
		.ok_or_else(|| RleError::InvalidFormat(format!("dimensions {}x{} are too large", encoded.width, encoded.height)))?
		as u64;

	Ok(FileInfo {
		width: encoded.width,
		height: encoded.height,
		samples,
		compression_ratio: tokens.ratio(),
		tokens,
	})
}

/// Fully decode a stream without producing output.
pub fn validate<R: Read>(reader: &mut R) -> Result<bool, RleError> {
	let encoded = read_rle(reader)?;
	codec::decode(encoded.width, encoded.height, &encoded.tokens)?;
	Ok(true)
}

/// Where a compressed copy of `input` goes in batch mode.
pub fn output_path_for(input: &Path) -> PathBuf {
	input.with_extension(RLE_EXTENSION)
}

fn compress_file(input: &Path, output: &Path, config: &RleConfig) -> Result<CompressionStats, RleError> {
	let mut in_file = BufReader::new(File::open(input)?);
	let mut out_file = BufWriter::new(File::create(output)?);
	compress(&mut in_file, &mut out_file, config)
}

/// Compress several pixmaps side by side, one `.rle` next to each input.
/// Stops at the first failing file.
pub fn compress_files(inputs: &[PathBuf], config: &RleConfig) -> Result<Vec<(PathBuf, CompressionStats)>, RleError> {
	config.validate()?;

	let pool = rayon::ThreadPoolBuilder::new()
		.num_threads(config.threads)
		.build()
		.map_err(|e| RleError::ConfigError(e.to_string()))?;

	let pb = ProgressBar::new(inputs.len() as u64);
	pb.set_style(ProgressStyle::default_bar()
		.template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] Files {pos}/{len} ({eta})")
		.map_err(|e| RleError::ConfigError(e.to_string()))?
		.progress_chars("#>-")
	);

	// Rows of each image are encoded sequentially; the pool is spent on files.
	let file_config = config.clone().with_threads(1);
	let results = pool.install(|| {
		inputs
			.par_iter()
			.map(|input| {
				let output = output_path_for(input);
				let stats = compress_file(input, &output, &file_config).map_err(|e| {
					log::warn!("failed to compress {}: {}", input.display(), e);
					e
				})?;
				pb.inc(1);
				Ok::<_, RleError>((output, stats))
			})
			.collect::<Result<Vec<_>, RleError>>()
	})?;

	pb.finish_with_message("Compression finished");
	Ok(results)
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Cursor;

	const SAMPLE_PPM: &str = "P3\n4 2\n255\n5 1 0 5 2 0 5 3 0 9 4 0\n7 7 7 7 7 7 7 7 7 7 7 7\n";

	#[test]
	fn test_compress_writes_rle_text() {
		let mut output = Vec::new();
		let config = RleConfig::default().with_threads(1);
		let stats = compress(&mut Cursor::new(SAMPLE_PPM), &mut output, &config).unwrap();

		let text = String::from_utf8(output).unwrap();
		assert_eq!(text, "4 2\n3 5 -1 9 -4 1 2 3 4 4 0 4 7 4 7 4 7 \n");
		assert_eq!(stats.original_size, SAMPLE_PPM.len() as u64);
		assert_eq!(stats.compressed_size, text.len() as u64);
		assert_eq!(stats.samples, 24);
		assert_eq!(stats.tokens.runs, 5);
		assert_eq!(stats.tokens.literals, 2);
	}

	#[test]
	fn test_decompress_restores_pixmap() {
		let mut compressed = Vec::new();
		let config = RleConfig::default();
		compress(&mut Cursor::new(SAMPLE_PPM), &mut compressed, &config).unwrap();

		let mut restored = Vec::new();
		decompress(&mut Cursor::new(compressed), &mut restored, &config).unwrap();
		let original = read_ppm(&mut Cursor::new(SAMPLE_PPM)).unwrap();
		let restored = read_ppm(&mut Cursor::new(restored)).unwrap();
		assert_eq!(restored, original);
	}

	#[test]
	fn test_decompress_rejects_samples_above_max() {
		let config = RleConfig::default().with_max_value(15);
		let mut out = Vec::new();
		let result = decompress(&mut Cursor::new("1 1\n-1 16 -1 0 -1 0\n"), &mut out, &config);
		assert!(matches!(result, Err(RleError::SampleExceedsMax { value: 16, max: 15, .. })));
		assert!(out.is_empty());
	}

	#[test]
	fn test_decompress_dimension_mismatch() {
		let config = RleConfig::default();
		let mut out = Vec::new();
		let result = decompress(&mut Cursor::new("3 1\n3 1 3 2 3 3 9\n"), &mut out, &config);
		assert!(matches!(result, Err(RleError::TrailingData { remaining: 1 })));
	}

	#[test]
	fn test_info_and_validate() {
		let info = info(&mut Cursor::new("4 1\n3 5 -1 9 -4 1 2 3 4 4 0\n")).unwrap();
		assert_eq!(info.width, 4);
		assert_eq!(info.height, 1);
		assert_eq!(info.samples, 12);
		assert_eq!(info.tokens.stored, 11);
		assert!(info.compression_ratio > 1.0);

		assert!(validate(&mut Cursor::new("4 1\n3 5 -1 9 -4 1 2 3 4 4 0\n")).unwrap());
		assert!(validate(&mut Cursor::new("4 1\n3 5 -1 9 -4 1 2 3 4\n")).is_err());
	}

	#[test]
	fn test_info_rejects_overflowing_dimensions() {
		let result = info(&mut Cursor::new("18446744073709551615 2\n"));
		assert!(matches!(result, Err(RleError::InvalidFormat(_))));
	}

	#[test]
	fn test_validate_oversized_header_is_truncation() {
		let result = validate(&mut Cursor::new("1 1000000000000\n"));
		assert!(matches!(result, Err(RleError::TruncatedRun { row: 0, channel: 0, offset: 0 })));
	}

	#[test]
	fn test_output_path_for() {
		assert_eq!(output_path_for(Path::new("img/cat.ppm")), PathBuf::from("img/cat.rle"));
		assert_eq!(output_path_for(Path::new("plain")), PathBuf::from("plain.rle"));
	}
}
