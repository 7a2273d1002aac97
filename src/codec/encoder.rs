/// Greedy per-channel run-length encoder.
/// Each row is split into three channel sequences (channel 0, 1, 2) and each
/// sequence is encoded on its own; the token groups are concatenated in
/// row-then-channel order with no separators.

use super::token::{flatten, Token, MAX_LITERAL, MAX_RUN, MIN_RUN};
use crate::error::{Result, RleError};
use crate::grid::{check_shape, Pixel, Sample, CHANNELS};
use rayon::prelude::*;

/// Length of the run of equal values starting at `start`, capped at [`MAX_RUN`].
fn run_length(channel: &[Sample], start: usize) -> usize {
    let value = channel[start];
    channel[start..]
        .iter()
        .take(MAX_RUN)
        .take_while(|&&v| v == value)
        .count()
}

/// Encode one channel sequence.
///
/// A pair of equal neighbours is always a run, never part of a literal, so a
/// literal stops right before the next element that starts a run.
pub fn encode_channel(channel: &[Sample]) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < channel.len() {
        let run = run_length(channel, i);
        if run >= MIN_RUN {
            tokens.push(Token::Run { count: run, value: channel[i] });
            i += run;
            continue;
        }

        let start = i;
        while i < channel.len()
            && (i + 1 == channel.len() || channel[i] != channel[i + 1])
            && i - start < MAX_LITERAL
        {
            i += 1;
        }
        tokens.push(Token::Literal { values: channel[start..i].to_vec() });
    }

    tokens
}

fn channel_of(row: &[Pixel], channel: usize) -> Vec<Sample> {
    row.iter().map(|pixel| pixel[channel]).collect()
}

fn encode_row(row: &[Pixel], out: &mut Vec<Token>) {
    for channel in 0..CHANNELS {
        out.extend(encode_channel(&channel_of(row, channel)));
    }
}

/// Encode a grid into tagged tokens, in row-then-channel order.
pub fn encode_tokens(width: usize, height: usize, grid: &[Vec<Pixel>]) -> Result<Vec<Token>> {
    check_shape(width, height, grid)?;
    let mut tokens = Vec::new();
    for row in grid {
        encode_row(row, &mut tokens);
    }
    Ok(tokens)
}

/// Encode a grid into the flat sign-prefixed integer stream.
pub fn encode(width: usize, height: usize, grid: &[Vec<Pixel>]) -> Result<Vec<i32>> {
    encode_tokens(width, height, grid).map(|tokens| flatten(&tokens))
}

/// Same output as [`encode`], with rows encoded on a dedicated pool of
/// `threads` workers and stitched back together in row order.
pub fn encode_parallel(
    width: usize,
    height: usize,
    grid: &[Vec<Pixel>],
    threads: usize,
) -> Result<Vec<i32>> {
    check_shape(width, height, grid)?;
    if threads <= 1 || height <= 1 {
        return encode(width, height, grid);
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .map_err(|e| RleError::ConfigError(e.to_string()))?;

    let rows: Vec<Vec<i32>> = pool.install(|| {
        grid.par_iter()
            .map(|row| {
                let mut tokens = Vec::new();
                encode_row(row, &mut tokens);
                flatten(&tokens)
            })
            .collect()
    });

    Ok(rows.concat())
}
