use rlepix::config::{Pattern, RleConfig};
use rlepix::container::write_ppm;
use rlepix::generator::generate;
use rlepix::pipeline;

fn main() {
	let image = generate(64, 32, 255, Pattern::Stripes, 7);
	let mut ppm = Vec::new();
	write_ppm(&mut ppm, &image).unwrap();

	let cfg = RleConfig::default();
	let mut input = std::io::Cursor::new(ppm);
	let mut compressed = Vec::new();
	let stats = pipeline::compress(&mut input, &mut compressed, &cfg).unwrap();
	println!("compressed {} -> {} bytes ({} runs, {} literals)",
		stats.original_size, stats.compressed_size, stats.tokens.runs, stats.tokens.literals);

	let mut comp_cur = std::io::Cursor::new(compressed);
	let mut restored = Vec::new();
	pipeline::decompress(&mut comp_cur, &mut restored, &cfg).unwrap();
	println!("restored {} bytes", restored.len());
}
