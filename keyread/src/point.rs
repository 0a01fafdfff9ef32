//! SEC1 elliptic-curve point import.

use crate::bignum::import_bignum;
use crate::error::{Error, Result};
use crate::limits::{Bounds, MAX_ECC_POINT, MIN_ECC_POINT};
use crate::params::EccPoint;

const POINT_UNCOMPRESSED: u8 = 0x04;

/// Splits an encoded point `0x04 || X || Y` into its affine coordinates.
///
/// Each coordinate must be exactly `field_size` bytes. Compressed and
/// hybrid encodings are well formed but not supported.
pub fn import_ecc_point(blob: &[u8], field_size: usize) -> Result<EccPoint> {
    if blob.len() < MIN_ECC_POINT || blob.len() > MAX_ECC_POINT {
        return Err(Error::OutOfRange {
            field: "ECC point",
            length: blob.len(),
            min: MIN_ECC_POINT,
            max: MAX_ECC_POINT,
        });
    }
    match blob[0] {
        POINT_UNCOMPRESSED => {}
        format @ (0x02 | 0x03 | 0x06 | 0x07) => return Err(Error::UnsupportedPointFormat(format)),
        _ => return Err(Error::InvalidPoint("unknown point format")),
    }
    let coordinates = &blob[1..];
    if coordinates.len() != 2 * field_size {
        return Err(Error::InvalidPoint("coordinate size does not match curve"));
    }
    let (x, y) = coordinates.split_at(field_size);
    if x.iter().all(|&b| b == 0) || y.iter().all(|&b| b == 0) {
        return Err(Error::InvalidPoint("zero coordinate"));
    }
    let qx = import_bignum(x, Bounds::new("ECC qx", 1, field_size), None)?;
    let qy = import_bignum(y, Bounds::new("ECC qy", 1, field_size), None)?;
    Ok(EccPoint { qx, qy })
}
