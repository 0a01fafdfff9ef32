//! Signature value pair `(r, s)` decoding for DLP and ECC signatures.
//!
//! | Format        | Layout                                   |
//! |---------------|------------------------------------------|
//! | `Certificate` | `SEQUENCE { INTEGER r, INTEGER s }`      |
//! | `Pgp`         | two MPIs                                 |
//! | `Ssh` (DLP)   | `r || s`, each exactly 20 bytes          |
//! | `Ssh` (ECC)   | two mpints                               |
//!
//! Both values must be strictly less than the caller's bound, normally the
//! subgroup order.

use der::Stream;
use num_bigint::BigUint;

use crate::algorithm::KeyFormat;
use crate::bignum::{IntegerEncoding, import_bignum, read_bignum};
use crate::error::{Error, Result};
use crate::limits::{
    DLP_SIG_R, DLP_SIG_S, ECC_SIG_R, ECC_SIG_S, MAX_INTLENGTH_SHORT, MIN_SIGNATURE_BUFFER,
    SSH_DLP_SIG_COMPONENT, SSH_DLP_SIG_R, SSH_DLP_SIG_S,
};

fn check_buffer(buffer: &[u8], min_size: usize) -> Result<()> {
    if min_size < MIN_SIGNATURE_BUFFER {
        return Err(Error::Contract("signature minimum size below 32 bytes"));
    }
    if buffer.len() < min_size || buffer.len() >= MAX_INTLENGTH_SHORT {
        return Err(Error::InvalidSignature(format!(
            "{} byte buffer outside [{}, {})",
            buffer.len(),
            min_size,
            MAX_INTLENGTH_SHORT
        )));
    }
    Ok(())
}

/// Decodes a DSA/DH/Elgamal signature value pair.
pub fn decode_dl_values(
    buffer: &[u8],
    min_size: usize,
    bound: &BigUint,
    format: KeyFormat,
) -> Result<(BigUint, BigUint)> {
    check_buffer(buffer, min_size)?;
    match format {
        KeyFormat::Certificate => {
            let mut stream = Stream::new(buffer);
            stream.read_sequence()?;
            let r = read_bignum(&mut stream, IntegerEncoding::Der, DLP_SIG_R, Some(bound))?;
            let s = read_bignum(&mut stream, IntegerEncoding::Der, DLP_SIG_S, Some(bound))?;
            Ok((r, s))
        }
        KeyFormat::Pgp => {
            let mut stream = Stream::new(buffer);
            let r = read_bignum(&mut stream, IntegerEncoding::Bits16, DLP_SIG_R, Some(bound))?;
            let s = read_bignum(&mut stream, IntegerEncoding::Bits16, DLP_SIG_S, Some(bound))?;
            Ok((r, s))
        }
        KeyFormat::Ssh => {
            // Fixed-width blocks with no length prefix, so nothing on the
            // wire says where r ends.
            if buffer.len() != 2 * SSH_DLP_SIG_COMPONENT {
                return Err(Error::InvalidSignature(format!(
                    "SSH DSA signature is {} bytes, expected {}",
                    buffer.len(),
                    2 * SSH_DLP_SIG_COMPONENT
                )));
            }
            let (r, s) = buffer.split_at(SSH_DLP_SIG_COMPONENT);
            let r = import_bignum(r, SSH_DLP_SIG_R, Some(bound))?;
            let s = import_bignum(s, SSH_DLP_SIG_S, Some(bound))?;
            Ok((r, s))
        }
        KeyFormat::Ssl => Err(Error::Contract("TLS has no signature value pair encoding")),
    }
}

/// Decodes an ECDSA signature value pair.
///
/// Only SSH differs from the DLP layouts.
pub fn decode_ecdl_values(
    buffer: &[u8],
    min_size: usize,
    bound: &BigUint,
    format: KeyFormat,
) -> Result<(BigUint, BigUint)> {
    if format != KeyFormat::Ssh {
        return decode_dl_values(buffer, min_size, bound, format);
    }
    check_buffer(buffer, min_size)?;
    let mut stream = Stream::new(buffer);
    let r = read_bignum(&mut stream, IntegerEncoding::Uint32, ECC_SIG_R, Some(bound))?;
    let s = read_bignum(&mut stream, IntegerEncoding::Uint32, ECC_SIG_S, Some(bound))?;
    Ok((r, s))
}
