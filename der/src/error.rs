//! Error types for stream and tag-length-value reads.

use thiserror::Error;

/// Errors raised by [`Stream`](crate::Stream) reads.
///
/// A read that fails leaves the stream at an unspecified position; the
/// caller is expected to abandon the whole decode.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("truncated input: needed {needed} bytes, {remaining} remaining")]
    Truncated { needed: usize, remaining: usize },

    #[error("unexpected tag: expected 0x{expected:02x}, got 0x{actual:02x}")]
    UnexpectedTag { expected: u8, actual: u8 },

    #[error("indefinite length encoding is not allowed")]
    IndefiniteLength,

    #[error("length field of {0} bytes is too long")]
    LengthTooLong(usize),

    #[error("length {0} is not minimally encoded")]
    NonMinimalLength(usize),

    #[error("length {length} out of range [{min}, {max}]")]
    LengthOutOfRange {
        length: usize,
        min: usize,
        max: usize,
    },

    #[error("BIT STRING: unused bits {0} (must be 0)")]
    NonZeroUnusedBits(u8),

    #[error("INTEGER: no data")]
    EmptyInteger,

    #[error("NULL: non-empty contents")]
    NonEmptyNull,

    #[error("OBJECT IDENTIFIER: {0}")]
    InvalidObjectIdentifier(String),

    #[error("parser error {0:?}")]
    Parser(nom::error::ErrorKind),
}

pub type Result<T> = std::result::Result<T, Error>;
