use crate::config::{Pattern, RleConfig};
use crate::container::write_ppm;
use crate::error::RleError;
use crate::generator;
use crate::grid::Sample;
use crate::pipeline;
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(author, version, about, long_about = "Lossless per-channel run-length codec for P3 pixmaps")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compresses one or more P3 pixmaps
    Compress {
        /// Pixmap(s) to compress; repeat for batch mode
        #[arg(short, long, value_name = "FILE", required = true, num_args = 1..)]
        input: Vec<PathBuf>,

        /// Output file name (single input only; batch mode writes <input>.rle)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Number of threads to use (default: all available cores)
        #[arg(short, long)]
        threads: Option<usize>,

        /// Skip the decode-and-compare check after encoding
        #[arg(long)]
        no_verify: bool,
    },
    /// Decompresses an RLE file back into a P3 pixmap
    Decompress {
        /// Input file to decompress
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        /// Output file name
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,

        /// Maximum intensity written to the pixmap header
        #[arg(short, long, default_value_t = 255)]
        max_value: Sample,
    },
    /// Prints dimensions and token statistics of an RLE file
    Info {
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,
    },
    /// Decodes an RLE file without writing anything
    Validate {
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,
    },
    /// Writes a synthetic P3 pixmap
    Generate {
        /// Output file name
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,

        #[arg(long)]
        width: usize,

        #[arg(long)]
        height: usize,

        /// Maximum intensity
        #[arg(short, long, default_value_t = 255)]
        max_value: Sample,

        /// Fill pattern [random, flat, stripes, gradient]
        #[arg(short, long, default_value = "random")]
        pattern: Pattern,

        /// Seed for the random number generator
        #[arg(short, long, default_value_t = 0)]
        seed: u64,
    },
}

pub fn run() -> Result<(), RleError> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Compress { input, output, threads, no_verify } => {
            let config = RleConfig {
                threads: threads.unwrap_or_else(num_cpus::get),
                verify: !no_verify,
                ..Default::default()
            };

            match (input.as_slice(), output) {
                ([single], output) => {
                    let output = output.clone().unwrap_or_else(|| pipeline::output_path_for(single));
                    println!("Compressing {} to {}...", single.display(), output.display());

                    let mut in_file = BufReader::new(File::open(single)?);
                    let mut out_file = BufWriter::new(File::create(&output)?);

                    let stats = pipeline::compress(&mut in_file, &mut out_file, &config)?;

                    println!("Compression successful!");
                    println!("  Original Size:    {} bytes", stats.original_size);
                    println!("  Compressed Size:  {} bytes", stats.compressed_size);
                    println!("  Ratio:            {:.2}x", stats.ratio);
                    println!("  Runs / Literals:  {} / {}", stats.tokens.runs, stats.tokens.literals);
                    println!("  Elapsed Time:     {:.2?}", stats.processing_time);
                }
                (_, Some(_)) => {
                    return Err(RleError::ConfigError("--output can only be used with a single input".to_string()));
                }
                (inputs, None) => {
                    println!("Compressing {} files...", inputs.len());
                    let start = Instant::now();
                    let results = pipeline::compress_files(inputs, &config)?;

                    let original: u64 = results.iter().map(|(_, s)| s.original_size).sum();
                    let compressed: u64 = results.iter().map(|(_, s)| s.compressed_size).sum();
                    for (path, stats) in &results {
                        println!("  {} ({:.2}x)", path.display(), stats.ratio);
                    }
                    println!("Compression successful!");
                    println!("  Original Size:    {} bytes", original);
                    println!("  Compressed Size:  {} bytes", compressed);
                    println!("  Elapsed Time:     {:.2?}", start.elapsed());
                }
            }
        }
        Commands::Decompress { input, output, max_value } => {
            println!("Decompressing {} to {}...", input.display(), output.display());
            let config = RleConfig::default().with_max_value(*max_value);

            let mut in_file = BufReader::new(File::open(input)?);
            let mut out_file = BufWriter::new(File::create(output)?);

            let start = Instant::now();
            let written = pipeline::decompress(&mut in_file, &mut out_file, &config)?;
            let duration = start.elapsed();

            println!("Decompression successful!");
            println!("  Written:      {} bytes", written);
            println!("  Elapsed Time: {:.2?}", duration);
        }
        Commands::Info { input } => {
            let mut in_file = BufReader::new(File::open(input)?);
            let info = pipeline::info(&mut in_file)?;

            println!("{}", input.display());
            println!("  Dimensions:       {}x{}", info.width, info.height);
            println!("  Samples:          {}", info.samples);
            println!("  Stored Integers:  {}", info.tokens.stored);
            println!("  Runs:             {} ({} samples, longest {})", info.tokens.runs, info.tokens.run_samples, info.tokens.longest_run);
            println!("  Literals:         {} ({} samples)", info.tokens.literals, info.tokens.literal_samples);
            println!("  Ratio:            {:.2}x", info.compression_ratio);
        }
        Commands::Validate { input } => {
            let mut in_file = BufReader::new(File::open(input)?);
            pipeline::validate(&mut in_file)?;
            println!("{}: OK", input.display());
        }
        Commands::Generate { output, width, height, max_value, pattern, seed } => {
            if *max_value == 0 {
                return Err(RleError::ConfigError("maximum intensity must be at least 1".to_string()));
            }
            let image = generator::generate(*width, *height, *max_value, *pattern, *seed);
            let mut out_file = BufWriter::new(File::create(output)?);
            let written = write_ppm(&mut out_file, &image)?;
            println!("Wrote {}x{} {:?} pixmap to {} ({} bytes)", width, height, pattern, output.display(), written);
        }
    }

    Ok(())
}
