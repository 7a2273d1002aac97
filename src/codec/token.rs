/// Tagged run/literal tokens and their flat, sign-prefixed integer form.
/// Flat layout: run = [+count, value], literal = [-count, v1, .., v_count]

use crate::grid::Sample;

/// Longest run a single token may carry.
pub const MAX_RUN: usize = 127;
/// Longest literal span a single token may carry.
pub const MAX_LITERAL: usize = 127;
/// Shortest run the encoder emits. Anything shorter goes into a literal.
pub const MIN_RUN: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Run { count: usize, value: Sample },
    Literal { values: Vec<Sample> },
}

impl Token {
    /// Number of samples the token expands to.
    pub fn len(&self) -> usize {
        match self {
            Token::Run { count, .. } => *count,
            Token::Literal { values } => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of integers the token occupies in the flat stream.
    pub fn stored_len(&self) -> usize {
        match self {
            Token::Run { .. } => 2,
            Token::Literal { values } => 1 + values.len(),
        }
    }

    pub fn write_to(&self, out: &mut Vec<i32>) {
        match self {
            Token::Run { count, value } => {
                out.push(*count as i32);
                out.push(*value as i32);
            }
            Token::Literal { values } => {
                out.push(-(values.len() as i32));
                out.extend(values.iter().map(|&v| v as i32));
            }
        }
    }

    /// Append the expansion of this token to `buffer`.
    pub fn expand_into(&self, buffer: &mut Vec<Sample>) {
        match self {
            Token::Run { count, value } => {
                buffer.extend(std::iter::repeat(*value).take(*count))
            }
            Token::Literal { values } => buffer.extend_from_slice(values),
        }
    }
}

pub fn flatten(tokens: &[Token]) -> Vec<i32> {
    let mut out = Vec::with_capacity(tokens.iter().map(Token::stored_len).sum());
    for token in tokens {
        token.write_to(&mut out);
    }
    out
}

/// Why the next group in a flat stream could not be read as a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenFault {
    ZeroLength,
    TruncatedRun,
    TruncatedLiteral { needed: usize, available: usize },
    SampleOutOfRange(i32),
}

/// Cursor over a flat token stream.
///
/// The reader knows nothing about rows or channels; callers attach that
/// context when a fault comes back.
#[derive(Debug)]
pub struct TokenReader<'a> {
    stream: &'a [i32],
    pos: usize,
}

impl<'a> TokenReader<'a> {
    pub fn new(stream: &'a [i32]) -> Self {
        Self { stream, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.stream.len() - self.pos
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    /// Read one token. On failure the cursor stays at the start of the
    /// offending group.
    ///
    /// Run counts are taken as-is: a count of one or above [`MAX_RUN`] is
    /// well-formed here and the channel quota decides whether it fits.
    pub fn next_token(&mut self) -> Result<Token, TokenFault> {
        let rest = &self.stream[self.pos..];
        let (&head, body) = match rest.split_first() {
            Some(split) => split,
            None => return Err(TokenFault::TruncatedRun),
        };

        if head > 0 {
            let &raw = body.first().ok_or(TokenFault::TruncatedRun)?;
            let value = to_sample(raw)?;
            self.pos += 2;
            return Ok(Token::Run { count: head as usize, value });
        }
        if head == 0 {
            return Err(TokenFault::ZeroLength);
        }

        let needed = head.unsigned_abs() as usize;
        if body.len() < needed {
            return Err(TokenFault::TruncatedLiteral { needed, available: body.len() });
        }
        let values = body[..needed]
            .iter()
            .map(|&raw| to_sample(raw))
            .collect::<Result<Vec<_>, _>>()?;
        self.pos += 1 + needed;
        Ok(Token::Literal { values })
    }
}

fn to_sample(raw: i32) -> Result<Sample, TokenFault> {
    Sample::try_from(raw).map_err(|_| TokenFault::SampleOutOfRange(raw))
}

/// Token statistics for a flat stream.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TokenSummary {
    pub runs: usize,
    pub literals: usize,
    pub run_samples: usize,
    pub literal_samples: usize,
    pub longest_run: usize,
    /// Integers in the flat stream.
    pub stored: usize,
}

impl TokenSummary {
    pub fn add_token(&mut self, token: &Token) {
        self.stored += token.stored_len();
        match token {
            Token::Run { count, .. } => {
                self.runs += 1;
                self.run_samples += *count;
                self.longest_run = self.longest_run.max(*count);
            }
            Token::Literal { values } => {
                self.literals += 1;
                self.literal_samples += values.len();
            }
        }
    }

    pub fn total_samples(&self) -> usize {
        self.run_samples + self.literal_samples
    }

    /// Samples per stored integer; above 1.0 means the stream is smaller than the raw grid.
    pub fn ratio(&self) -> f64 {
        if self.stored == 0 {
            return 0.0;
        }
        self.total_samples() as f64 / self.stored as f64
    }
}

/// Walk a flat stream and tally its tokens. Stops at the first malformed group.
pub fn summarize(stream: &[i32]) -> Result<TokenSummary, TokenFault> {
    let mut reader = TokenReader::new(stream);
    let mut summary = TokenSummary::default();
    while !reader.is_exhausted() {
        summary.add_token(&reader.next_token()?);
    }
    Ok(summary)
}
