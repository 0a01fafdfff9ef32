//! Error types for public-key decoding.

use thiserror::Error;

use crate::algorithm::{Algorithm, Family, KeyFormat};

/// Coarse classification of an [`Error`].
///
/// - `BadData`: the input is malformed or out of range. Reject the key.
/// - `NotAvailable`: the input is well formed but names something this
///   library does not support (an unknown curve, a compressed point).
/// - `Internal`: the caller broke the API contract, e.g. asked for a
///   format that the key's algorithm cannot be encoded in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    BadData,
    NotAvailable,
    Internal,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("malformed encoding: {0}")]
    Der(#[from] der::error::Error),

    #[error("{field}: length {length} out of range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        length: usize,
        min: usize,
        max: usize,
    },

    #[error("{field}: value is not less than its bound")]
    NotLessThanBound { field: &'static str },

    #[error("{field}: leading zero padding")]
    LeadingZero { field: &'static str },

    #[error("{field}: negative value")]
    Negative { field: &'static str },

    #[error("{field}: value has more bits than its declared bit count")]
    BitCountMismatch { field: &'static str },

    #[error("algorithm mismatch: key is {expected}, data is {actual}")]
    AlgorithmMismatch {
        expected: Algorithm,
        actual: Algorithm,
    },

    #[error("algorithm parameters: {0}")]
    InvalidParameters(String),

    #[error("key type mismatch: expected {0}")]
    KeyTypeMismatch(&'static str),

    #[error("invalid PGP version {0}")]
    InvalidPgpVersion(u8),

    #[error("invalid PGP algorithm {0}")]
    InvalidPgpAlgorithm(u8),

    #[error("invalid TLS curve type {0} (expected named curve)")]
    InvalidCurveType(u8),

    #[error("invalid ECC point: {0}")]
    InvalidPoint(&'static str),

    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    #[error("unknown algorithm OID: {0}")]
    UnknownAlgorithmOid(String),

    #[error("unsupported curve: {0}")]
    UnsupportedCurve(String),

    #[error("unsupported ECC point format 0x{0:02x}")]
    UnsupportedPointFormat(u8),

    #[error("{family} keys cannot be read from {format} data")]
    UnsupportedFormat { family: Family, format: KeyFormat },

    #[error("{algorithm} keys cannot be read from {format} data")]
    UnsupportedAlgorithmFormat {
        algorithm: Algorithm,
        format: KeyFormat,
    },

    #[error("{algorithm} is not handled by the {family} reader")]
    WrongFamily { algorithm: Algorithm, family: Family },

    #[error("{0} keys have no signature value decoder")]
    NoSignatureDecoder(Algorithm),

    #[error("contract violation: {0}")]
    Contract(&'static str),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::UnknownAlgorithmOid(_)
            | Error::UnsupportedCurve(_)
            | Error::UnsupportedPointFormat(_) => ErrorKind::NotAvailable,
            Error::UnsupportedFormat { .. }
            | Error::UnsupportedAlgorithmFormat { .. }
            | Error::WrongFamily { .. }
            | Error::NoSignatureDecoder(_)
            | Error::Contract(_) => ErrorKind::Internal,
            _ => ErrorKind::BadData,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
