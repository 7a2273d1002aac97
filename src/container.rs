use crate::error::RleError;
use crate::grid::{Grid, Image, Pixel, Sample, CHANNELS};
use std::io::{Read, Write};
use std::str::FromStr;

const PPM_MAGIC: &str = "P3";

/// Run-length encoded image as stored on disk: a `width height` line, then
/// the flat token stream as whitespace-separated signed integers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RleImage {
	pub width: usize,
	pub height: usize,
	pub tokens: Vec<i32>,
}

/// Whitespace-delimited words with `#` comments stripped to end of line.
struct Words<'a> {
	inner: Box<dyn Iterator<Item = &'a str> + 'a>,
}

impl<'a> Words<'a> {
	fn new(text: &'a str) -> Self {
		let inner = text
			.lines()
			.map(|line| line.split('#').next().unwrap_or(""))
			.flat_map(str::split_ascii_whitespace);
		Self { inner: Box::new(inner) }
	}

	fn next_int<T: FromStr>(&mut self, what: &str) -> Result<T, RleError> {
		let word = self.inner.next()
			.ok_or_else(|| RleError::InvalidFormat(format!("missing {}", what)))?;
		word.parse()
			.map_err(|_| RleError::InvalidFormat(format!("invalid {}: {:?}", what, word)))
	}

	fn next_word(&mut self) -> Option<&'a str> {
		self.inner.next()
	}

	fn rest(self) -> Vec<&'a str> {
		self.inner.collect()
	}
}

/// Header dimensions must describe an image the body can actually hold.
fn check_dimensions(width: usize, height: usize) -> Result<usize, RleError> {
	if width == 0 && height > 0 {
		return Err(RleError::InvalidFormat(format!("{} rows of zero width", height)));
	}
	width
		.checked_mul(height)
		.and_then(|n| n.checked_mul(CHANNELS))
		.ok_or_else(|| RleError::InvalidFormat(format!("dimensions {}x{} are too large", width, height)))
}

fn read_text<R: Read>(reader: &mut R) -> Result<String, RleError> {
	let mut text = String::new();
	reader.read_to_string(&mut text)?;
	Ok(text)
}

pub fn read_ppm<R: Read>(reader: &mut R) -> Result<Image, RleError> {
	let text = read_text(reader)?;
	let mut words = Words::new(&text);

	match words.next_word() {
		Some(PPM_MAGIC) => {}
		Some(other) => return Err(RleError::InvalidFormat(format!("unsupported magic {:?}, only P3 is supported", other))),
		None => return Err(RleError::InvalidFormat("empty pixmap".to_string())),
	}

	let width: usize = words.next_int("width")?;
	let height: usize = words.next_int("height")?;
	let max_value: u32 = words.next_int("maximum intensity")?;
	let max_value = match Sample::try_from(max_value) {
		Ok(max) if max > 0 => max,
		_ => return Err(RleError::InvalidFormat(format!("maximum intensity {} outside 1..=65535", max_value))),
	};

	let expected = check_dimensions(width, height)?;
	let body = words.rest();
	if body.len() < expected {
		return Err(RleError::InvalidFormat(format!("missing samples: {}x{} needs {}, found {}", width, height, expected, body.len())));
	}
	if let Some(extra) = body.get(expected) {
		return Err(RleError::InvalidFormat(format!("unexpected data after {}x{} pixels: {:?}", width, height, extra)));
	}

	let pixels = body
		.chunks_exact(CHANNELS)
		.map(|triple| Ok::<Pixel, RleError>([parse_sample(triple[0])?, parse_sample(triple[1])?, parse_sample(triple[2])?]))
		.collect::<Result<Vec<Pixel>, RleError>>()?;
	let rows: Grid = if width == 0 {
		Vec::new()
	} else {
		pixels.chunks(width).map(<[Pixel]>::to_vec).collect()
	};

	let image = Image { width, height, max_value, rows };
	image.validate_samples()?;
	Ok(image)
}

fn parse_sample(word: &str) -> Result<Sample, RleError> {
	word.parse()
		.map_err(|_| RleError::InvalidFormat(format!("invalid sample: {:?}", word)))
}

pub fn write_ppm<W: Write>(writer: &mut W, image: &Image) -> Result<u64, RleError> {
	let mut text = Vec::new();
	writeln!(text, "{}", PPM_MAGIC)?;
	writeln!(text, "{} {}", image.width, image.height)?;
	writeln!(text, "{}", image.max_value)?;
	for row in &image.rows {
		for [r, g, b] in row {
			write!(text, "{} {} {} ", r, g, b)?;
		}
		writeln!(text)?;
	}

	writer.write_all(&text)?;
	writer.flush()?;
	Ok(text.len() as u64)
}

pub fn read_rle<R: Read>(reader: &mut R) -> Result<RleImage, RleError> {
	let text = read_text(reader)?;
	let mut words = Words::new(&text);

	let width = words.next_int("width")?;
	let height = words.next_int("height")?;
	check_dimensions(width, height)?;
	let mut tokens = Vec::new();
	while let Some(word) = words.next_word() {
		let token = word.parse()
			.map_err(|_| RleError::InvalidFormat(format!("invalid token: {:?}", word)))?;
		tokens.push(token);
	}

	Ok(RleImage { width, height, tokens })
}

pub fn write_rle<W: Write>(writer: &mut W, image: &RleImage) -> Result<u64, RleError> {
	let mut text = Vec::with_capacity(16 + image.tokens.len() * 4);
	writeln!(text, "{} {}", image.width, image.height)?;
	for token in &image.tokens {
		write!(text, "{} ", token)?;
	}
	writeln!(text)?;

	writer.write_all(&text)?;
	writer.flush()?;
	Ok(text.len() as u64)
}
