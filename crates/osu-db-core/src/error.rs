//! Error types for osu-db-core

use thiserror::Error;

/// Main error type for osu!.db decoding
///
/// Decode errors carry the byte offset at which the failing field started,
/// since the format has no framing to resynchronize against.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unexpected end of input at offset {offset} ({needed} more byte(s) required)")]
    UnexpectedEof { offset: usize, needed: usize },

    #[error("invalid UTF-8 in string at offset {offset}")]
    InvalidString {
        offset: usize,
        #[source]
        source: std::string::FromUtf8Error,
    },

    #[error("ULEB128 value at offset {offset} does not fit in 64 bits")]
    VarIntOverflow { offset: usize },
}

/// Result type alias for osu!.db decoding
pub type Result<T> = std::result::Result<T, Error>;
