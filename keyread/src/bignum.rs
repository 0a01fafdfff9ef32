//! Range-validated integer reads.
//!
//! Every numeric key field goes through [`read_bignum`] or
//! [`read_bignum_checked`]. The value's significant length (leading zero
//! octets removed) must fall inside the field's [`Bounds`], and when a
//! bound value is given the integer must be strictly less than it.
//!
//! The checked variants additionally reject zero padding in front of the
//! value, which key moduli must not carry. For the signed encodings (DER
//! INTEGER, SSH mpint) a single 0x00 in front of a byte with the top bit
//! set is a sign octet, not padding.

use der::Stream;
use num_bigint::BigUint;
use num_traits::Zero;

use crate::error::{Error, Result};
use crate::limits::Bounds;

/// Physical encoding of an integer on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegerEncoding {
    /// DER INTEGER, two's complement.
    Der,
    /// 16-bit byte count followed by an unsigned big-endian value (TLS).
    Uint16,
    /// 32-bit byte count followed by a two's-complement value (SSH mpint).
    Uint32,
    /// 16-bit bit count followed by an unsigned big-endian value (PGP MPI).
    Bits16,
}

impl IntegerEncoding {
    const fn is_signed(self) -> bool {
        matches!(self, Self::Der | Self::Uint32)
    }
}

pub(crate) fn read_bignum(
    stream: &mut Stream<'_>,
    encoding: IntegerEncoding,
    bounds: Bounds,
    bound_value: Option<&BigUint>,
) -> Result<BigUint> {
    read_integer(stream, encoding, bounds, bound_value, false)
}

pub(crate) fn read_bignum_checked(
    stream: &mut Stream<'_>,
    encoding: IntegerEncoding,
    bounds: Bounds,
    bound_value: Option<&BigUint>,
) -> Result<BigUint> {
    read_integer(stream, encoding, bounds, bound_value, true)
}

fn read_integer(
    stream: &mut Stream<'_>,
    encoding: IntegerEncoding,
    bounds: Bounds,
    bound_value: Option<&BigUint>,
    checked: bool,
) -> Result<BigUint> {
    let field = bounds.field;
    // One extra octet is allowed for a sign byte.
    let max_encoded = bounds.max + 1;
    let data = match encoding {
        IntegerEncoding::Der => stream.read_integer()?,
        IntegerEncoding::Uint16 => stream
            .read_string16(0, max_encoded)
            .map_err(|e| with_field(field, e))?,
        IntegerEncoding::Uint32 => stream
            .read_string32(0, max_encoded)
            .map_err(|e| with_field(field, e))?,
        IntegerEncoding::Bits16 => {
            let bits = stream.read_u16()? as usize;
            let length = bits.div_ceil(8);
            check_encoded_length(field, length, max_encoded)?;
            let data = stream.read_bytes(length)?;
            if BigUint::from_bytes_be(data).bits() > bits as u64 {
                return Err(Error::BitCountMismatch { field });
            }
            data
        }
    };
    if encoding == IntegerEncoding::Der {
        check_encoded_length(field, data.len(), max_encoded)?;
    }

    let data = if encoding.is_signed() {
        strip_sign_octet(field, data)?
    } else {
        data
    };
    if checked && data.first() == Some(&0) {
        return Err(Error::LeadingZero { field });
    }
    import_bignum(data, bounds, bound_value)
}

fn check_encoded_length(field: &'static str, length: usize, max: usize) -> Result<()> {
    if length > max {
        return Err(Error::OutOfRange {
            field,
            length,
            min: 0,
            max,
        });
    }
    Ok(())
}

/// Attaches the field name to a length prefix that exceeds its bounds.
fn with_field(field: &'static str, err: der::error::Error) -> Error {
    match err {
        der::error::Error::LengthOutOfRange { length, min, max } => Error::OutOfRange {
            field,
            length,
            min,
            max,
        },
        other => other.into(),
    }
}

/// Removes the sign octet of a non-negative two's-complement value.
fn strip_sign_octet<'a>(field: &'static str, data: &'a [u8]) -> Result<&'a [u8]> {
    match data {
        [first, ..] if first & 0x80 != 0 => Err(Error::Negative { field }),
        [0, second, rest @ ..] if second & 0x80 != 0 => Ok(&data[1..=rest.len() + 1]),
        _ => Ok(data),
    }
}

/// Converts raw unsigned big-endian octets and applies the range checks.
pub(crate) fn import_bignum(
    data: &[u8],
    bounds: Bounds,
    bound_value: Option<&BigUint>,
) -> Result<BigUint> {
    let value = BigUint::from_bytes_be(data);
    let length = significant_length(&value);
    if !bounds.contains(length) {
        return Err(Error::OutOfRange {
            field: bounds.field,
            length,
            min: bounds.min,
            max: bounds.max,
        });
    }
    if let Some(bound_value) = bound_value {
        if &value >= bound_value {
            return Err(Error::NotLessThanBound {
                field: bounds.field,
            });
        }
    }
    Ok(value)
}

fn significant_length(value: &BigUint) -> usize {
    if value.is_zero() {
        return 0;
    }
    value.bits().div_ceil(8) as usize
}
