pub mod decoder;
pub mod encoder;
pub mod token;

pub use decoder::{decode, decode_channel};
pub use encoder::{encode, encode_channel, encode_parallel, encode_tokens};
pub use token::{flatten, summarize, Token, TokenFault, TokenReader, TokenSummary, MAX_LITERAL, MAX_RUN, MIN_RUN};
