//! RSA public key decoders.

use der::Stream;

use crate::algorithm::{Algorithm, Family, KeyFormat, read_algorithm_identifier_no_params};
use crate::bignum::{IntegerEncoding, read_bignum, read_bignum_checked};
use crate::error::{Error, Result};
use crate::limits::{MAX_TEXTSIZE, MIN_PKCSIZE, RSA_E, RSA_N};
use crate::params::{DecodedKey, KeyParams, RsaParams};
use crate::permission::ActionPermissions;
use crate::pgp::{
    PGP_ALGO_RSA, PGP_ALGO_RSA_ENCRYPT, PGP_ALGO_RSA_SIGN, PGP_VERSION_2, PGP_VERSION_3,
    PGP_VERSION_OPENPGP, read_key_header,
};

const SSH_RSA: &[u8] = b"ssh-rsa";

/// Reads an RSA public key in `format`.
pub(crate) fn read_rsa_public_key(
    stream: &mut Stream<'_>,
    algorithm: Algorithm,
    format: KeyFormat,
) -> Result<DecodedKey> {
    if algorithm.family() != Family::Rsa {
        return Err(Error::WrongFamily {
            algorithm,
            family: Family::Rsa,
        });
    }
    match format {
        KeyFormat::Certificate => read_rsa_subject_public_key(stream),
        KeyFormat::Ssh => read_ssh_rsa_public_key(stream),
        KeyFormat::Pgp => read_pgp_rsa_public_key(stream),
        KeyFormat::Ssl => Err(Error::UnsupportedFormat {
            family: Family::Rsa,
            format,
        }),
    }
}

/// ```asn1
/// SubjectPublicKeyInfo ::= SEQUENCE {
///     algorithm         AlgorithmIdentifier,
///     subjectPublicKey  BIT STRING  -- RSAPublicKey
/// }
///
/// RSAPublicKey ::= SEQUENCE {
///     modulus         INTEGER,
///     publicExponent  INTEGER
/// }
/// ```
///
/// The outer wrapper is read with any tag since keysets may store it
/// context-specific tagged.
fn read_rsa_subject_public_key(stream: &mut Stream<'_>) -> Result<DecodedKey> {
    stream.read_generic_hole(8 + MIN_PKCSIZE + RSA_E.min)?;
    let algorithm = read_algorithm_identifier_no_params(stream)?;
    if algorithm != Algorithm::Rsa {
        return Err(Error::AlgorithmMismatch {
            expected: Algorithm::Rsa,
            actual: algorithm,
        });
    }

    stream.read_bit_string_hole(MIN_PKCSIZE)?;
    stream.read_sequence()?;
    let n = read_bignum_checked(stream, IntegerEncoding::Der, RSA_N, None)?;
    let e = read_bignum(stream, IntegerEncoding::Der, RSA_E, Some(&n))?;

    Ok(DecodedKey::new(
        KeyParams::Rsa(RsaParams { n, e }),
        ActionPermissions::unrestricted(),
    ))
}

/// ```text
/// string  key blob
///     string  "ssh-rsa"
///     mpint   e
///     mpint   n
/// ```
fn read_ssh_rsa_public_key(stream: &mut Stream<'_>) -> Result<DecodedKey> {
    stream.read_u32()?;
    let name = stream.read_string32(1, MAX_TEXTSIZE)?;
    if name != SSH_RSA {
        return Err(Error::KeyTypeMismatch("ssh-rsa"));
    }

    // e comes first on the wire so the e < n check happens afterwards
    let e = read_bignum(stream, IntegerEncoding::Uint32, RSA_E, None)?;
    let n = read_bignum_checked(stream, IntegerEncoding::Uint32, RSA_N, None)?;
    if e >= n {
        return Err(Error::NotLessThanBound { field: RSA_E.field });
    }

    Ok(DecodedKey::new(
        KeyParams::Rsa(RsaParams { n, e }),
        ActionPermissions::internal_verify(),
    ))
}

fn read_pgp_rsa_public_key(stream: &mut Stream<'_>) -> Result<DecodedKey> {
    let header = read_key_header(
        stream,
        &[PGP_VERSION_2, PGP_VERSION_3, PGP_VERSION_OPENPGP],
    )?;

    // Single-purpose keys are internal-only since RSA encryption and
    // signing are the same operation.
    let permissions = match header.algorithm {
        PGP_ALGO_RSA => ActionPermissions::unrestricted(),
        PGP_ALGO_RSA_ENCRYPT => ActionPermissions::internal_crypt(),
        PGP_ALGO_RSA_SIGN => ActionPermissions::internal_sign_verify(),
        other => return Err(Error::InvalidPgpAlgorithm(other)),
    };

    let n = read_bignum_checked(stream, IntegerEncoding::Bits16, RSA_N, None)?;
    let e = read_bignum(stream, IntegerEncoding::Bits16, RSA_E, Some(&n))?;

    Ok(DecodedKey {
        params: KeyParams::Rsa(RsaParams { n, e }),
        permissions,
        pgp_creation_time: Some(header.creation_time),
    })
}
