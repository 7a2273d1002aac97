/// Inverse of the encoder. The stream carries no length markers, so the
/// decoder fills exactly `width` samples per channel, three channels per row,
/// `height` rows, and then requires the stream to be fully consumed.

use super::token::{TokenFault, TokenReader, MAX_RUN};
use crate::error::{Result, RleError};
use crate::grid::{Grid, Pixel, Sample, CHANNELS};

fn fault_to_error(fault: TokenFault, row: usize, channel: usize, offset: usize) -> RleError {
    match fault {
        TokenFault::ZeroLength => RleError::ZeroLengthToken { row, channel, offset },
        TokenFault::TruncatedRun => RleError::TruncatedRun { row, channel, offset },
        TokenFault::TruncatedLiteral { needed, available } => {
            RleError::TruncatedLiteral { row, channel, offset, needed, available }
        }
        TokenFault::SampleOutOfRange(value) => RleError::SampleOutOfRange { row, channel, value },
    }
}

/// Decode one channel sequence of exactly `width` samples from `reader`.
pub fn decode_channel(
    reader: &mut TokenReader<'_>,
    width: usize,
    row: usize,
    channel: usize,
) -> Result<Vec<Sample>> {
    // Capacity is bounded by what the stream can still expand to, not by the
    // caller's dimensions.
    let mut buffer = Vec::with_capacity(width.min(reader.remaining().saturating_mul(MAX_RUN)));

    while buffer.len() < width {
        let offset = reader.position();
        let token = reader.next_token().map_err(|fault| {
            let err = fault_to_error(fault, row, channel, offset);
            log::debug!("decode aborted: {}", err);
            err
        })?;

        let filled = buffer.len().saturating_add(token.len());
        if filled > width {
            log::debug!(
                "token at offset {} overruns row {} channel {} ({} > {})",
                offset, row, channel, filled, width
            );
            return Err(RleError::ChannelOverrun { row, channel, width, filled });
        }
        token.expand_into(&mut buffer);
    }

    Ok(buffer)
}

fn interleave(channels: &[Vec<Sample>; CHANNELS], width: usize) -> Vec<Pixel> {
    (0..width)
        .map(|x| [channels[0][x], channels[1][x], channels[2][x]])
        .collect()
}

/// Rebuild a `height` x `width` grid from a flat token stream.
pub fn decode(width: usize, height: usize, stream: &[i32]) -> Result<Grid> {
    let mut reader = TokenReader::new(stream);
    let mut grid = Vec::with_capacity(height.min(reader.remaining()));

    for row in 0..height {
        let channels = [
            decode_channel(&mut reader, width, row, 0)?,
            decode_channel(&mut reader, width, row, 1)?,
            decode_channel(&mut reader, width, row, 2)?,
        ];
        grid.push(interleave(&channels, width));
    }

    if !reader.is_exhausted() {
        return Err(RleError::TrailingData { remaining: reader.remaining() });
    }

    Ok(grid)
}
