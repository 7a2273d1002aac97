use thiserror::Error;

#[derive(Error, Debug)]
pub enum RleError {
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	#[error("Invalid grid shape: expected {expected_width}x{expected_height}, {}", shape_detail(.row, .found))]
	InvalidGridShape {
		expected_width: usize,
		expected_height: usize,
		/// Offending row, or `None` when the row count itself is wrong.
		row: Option<usize>,
		found: usize,
	},

	#[error("Zero-length token at offset {offset} (row {row}, channel {channel})")]
	ZeroLengthToken { row: usize, channel: usize, offset: usize },

	#[error("Truncated run token at offset {offset} (row {row}, channel {channel})")]
	TruncatedRun { row: usize, channel: usize, offset: usize },

	#[error("Truncated literal token at offset {offset} (row {row}, channel {channel}): needs {needed} values, {available} left")]
	TruncatedLiteral { row: usize, channel: usize, offset: usize, needed: usize, available: usize },

	#[error("Channel overrun in row {row}, channel {channel}: {filled} samples decoded for width {width}")]
	ChannelOverrun { row: usize, channel: usize, width: usize, filled: usize },

	#[error("Trailing data: {remaining} integers left after the last row")]
	TrailingData { remaining: usize },

	#[error("Sample value {value} out of range (row {row}, channel {channel})")]
	SampleOutOfRange { row: usize, channel: usize, value: i32 },

	#[error("Sample value {value} at row {row}, column {column} exceeds maximum intensity {max}")]
	SampleExceedsMax { row: usize, column: usize, value: u16, max: u16 },

	#[error("Invalid container format: {0}")]
	InvalidFormat(String),

	#[error("Round-trip verification failed: decoded grid differs from input")]
	VerificationFailed,

	#[error("Configuration error: {0}")]
	ConfigError(String),
}

fn shape_detail(row: &Option<usize>, found: &usize) -> String {
	match row {
		Some(row) => format!("row {} has {} pixels", row, found),
		None => format!("found {} rows", found),
	}
}

pub type Result<T> = std::result::Result<T, RleError>;
