//! Discrete-log (DSA, DH, Elgamal) public key decoders.
//!
//! DSA keys may sign and verify, DH and Elgamal keys may encrypt and
//! decrypt. In every encoding the usage is internal-only, since these
//! algorithms need format-specific data shaping that only the library's
//! own protocol code performs.

use der::Stream;

use crate::algorithm::{Algorithm, Family, KeyFormat, read_algorithm_identifier};
use crate::bignum::{IntegerEncoding, read_bignum, read_bignum_checked};
use crate::error::{Error, Result};
use crate::limits::{
    DLP_G, DLP_P, DLP_Q, DLP_Y, MAX_INTLENGTH_SHORT, MAX_TEXTSIZE, MIN_PKCSIZE,
};
use crate::params::{DecodedKey, DlpParams, KeyParams};
use crate::permission::ActionPermissions;
use crate::pgp::{PGP_ALGO_DSA, PGP_ALGO_ELGAMAL, PGP_VERSION_OPENPGP, read_key_header};

const SSH_DSS: &[u8] = b"ssh-dss";
const SSH_DH: &[u8] = b"ssh-dh";

/// Reads a DLP public key in `format`.
pub(crate) fn read_dlp_public_key(
    stream: &mut Stream<'_>,
    algorithm: Algorithm,
    format: KeyFormat,
) -> Result<DecodedKey> {
    if algorithm.family() != Family::Dlp {
        return Err(Error::WrongFamily {
            algorithm,
            family: Family::Dlp,
        });
    }
    match format {
        KeyFormat::Certificate => read_dlp_subject_public_key(stream, algorithm),
        KeyFormat::Ssh => read_ssh_dlp_public_key(stream, algorithm),
        KeyFormat::Ssl => read_ssl_dlp_public_key(stream, algorithm),
        KeyFormat::Pgp => read_pgp_dlp_public_key(stream, algorithm),
    }
}

fn permissions_for(algorithm: Algorithm) -> ActionPermissions {
    match algorithm {
        Algorithm::Dsa => ActionPermissions::internal_sign_verify(),
        _ => ActionPermissions::internal_crypt(),
    }
}

/// ```asn1
/// SubjectPublicKeyInfo ::= SEQUENCE {
///     algorithm  SEQUENCE {
///         algorithm   OBJECT IDENTIFIER,
///         parameters  SEQUENCE { p, q, g }   -- DSA, FIPS 186
///                   | SEQUENCE { p, g, q }   -- DH and Elgamal, X9.42
///     },
///     subjectPublicKey  BIT STRING  -- INTEGER y
/// }
/// ```
fn read_dlp_subject_public_key(
    stream: &mut Stream<'_>,
    algorithm: Algorithm,
) -> Result<DecodedKey> {
    stream.read_generic_hole(8 + MIN_PKCSIZE + DLP_G.min + DLP_Q.min + MIN_PKCSIZE)?;
    let algorithm_id = read_algorithm_identifier(stream)?;
    let min_params = MIN_PKCSIZE + DLP_G.min + DLP_Q.min;
    if algorithm_id.parameters_len < min_params
        || algorithm_id.parameters_len > MAX_INTLENGTH_SHORT
    {
        return Err(Error::InvalidParameters(format!(
            "{} bytes of domain parameters",
            algorithm_id.parameters_len
        )));
    }
    if algorithm_id.algorithm != algorithm {
        return Err(Error::AlgorithmMismatch {
            expected: algorithm,
            actual: algorithm_id.algorithm,
        });
    }

    stream.read_sequence()?;
    let p = read_bignum_checked(stream, IntegerEncoding::Der, DLP_P, None)?;
    let (q, g) = if algorithm.has_reversed_params() {
        let g = read_bignum(stream, IntegerEncoding::Der, DLP_G, Some(&p))?;
        let q = read_bignum(stream, IntegerEncoding::Der, DLP_Q, Some(&p))?;
        (q, g)
    } else {
        let q = read_bignum(stream, IntegerEncoding::Der, DLP_Q, Some(&p))?;
        let g = read_bignum(stream, IntegerEncoding::Der, DLP_G, Some(&p))?;
        (q, g)
    };

    stream.read_bit_string_hole(MIN_PKCSIZE)?;
    let y = read_bignum_checked(stream, IntegerEncoding::Der, DLP_Y, Some(&p))?;

    Ok(DecodedKey::new(
        KeyParams::Dlp(DlpParams {
            p,
            q: Some(q),
            g,
            y: Some(y),
        }),
        permissions_for(algorithm),
    ))
}

/// ```text
/// string  key blob
///     string  "ssh-dss"   "ssh-dh"
///     mpint   p           p
///     mpint   q           g
///     mpint   g
///     mpint   y
/// ```
///
/// SSH DH keys are PKCS #3 domain parameters with no q or y.
fn read_ssh_dlp_public_key(stream: &mut Stream<'_>, algorithm: Algorithm) -> Result<DecodedKey> {
    let (expected_name, display_name) = match algorithm {
        Algorithm::Dsa => (SSH_DSS, "ssh-dss"),
        Algorithm::Dh => (SSH_DH, "ssh-dh"),
        _ => {
            return Err(Error::UnsupportedAlgorithmFormat {
                algorithm,
                format: KeyFormat::Ssh,
            });
        }
    };

    stream.read_u32()?;
    let name = stream.read_string32(1, MAX_TEXTSIZE)?;
    if name != expected_name {
        return Err(Error::KeyTypeMismatch(display_name));
    }

    let p = read_bignum_checked(stream, IntegerEncoding::Uint32, DLP_P, None)?;
    let params = if algorithm == Algorithm::Dh {
        let g = read_bignum(stream, IntegerEncoding::Uint32, DLP_G, Some(&p))?;
        DlpParams {
            p,
            q: None,
            g,
            y: None,
        }
    } else {
        let q = read_bignum(stream, IntegerEncoding::Uint32, DLP_Q, Some(&p))?;
        let g = read_bignum(stream, IntegerEncoding::Uint32, DLP_G, Some(&p))?;
        let y = read_bignum(stream, IntegerEncoding::Uint32, DLP_Y, Some(&p))?;
        DlpParams {
            p,
            q: Some(q),
            g,
            y: Some(y),
        }
    };

    Ok(DecodedKey::new(
        KeyParams::Dlp(params),
        permissions_for(algorithm),
    ))
}

/// ```text
/// uint16  dh_p length
/// byte[]  dh_p
/// uint16  dh_g length
/// byte[]  dh_g
/// ```
///
/// A following `dh_Ys` belongs to the key exchange, not the key.
fn read_ssl_dlp_public_key(stream: &mut Stream<'_>, algorithm: Algorithm) -> Result<DecodedKey> {
    if algorithm != Algorithm::Dh {
        return Err(Error::UnsupportedAlgorithmFormat {
            algorithm,
            format: KeyFormat::Ssl,
        });
    }

    let p = read_bignum_checked(stream, IntegerEncoding::Uint16, DLP_P, None)?;
    let g = read_bignum(stream, IntegerEncoding::Uint16, DLP_G, Some(&p))?;

    Ok(DecodedKey::new(
        KeyParams::Dlp(DlpParams {
            p,
            q: None,
            g,
            y: None,
        }),
        ActionPermissions::internal_crypt(),
    ))
}

/// OpenPGP DSA `(p, q, g, y)` or Elgamal `(p, g, y)`. Only version 4
/// packets carry DLP keys.
fn read_pgp_dlp_public_key(stream: &mut Stream<'_>, algorithm: Algorithm) -> Result<DecodedKey> {
    if algorithm == Algorithm::Dh {
        return Err(Error::UnsupportedAlgorithmFormat {
            algorithm,
            format: KeyFormat::Pgp,
        });
    }

    let header = read_key_header(stream, &[PGP_VERSION_OPENPGP])?;
    let packet_algorithm = match header.algorithm {
        PGP_ALGO_DSA => Algorithm::Dsa,
        PGP_ALGO_ELGAMAL => Algorithm::Elgamal,
        other => return Err(Error::InvalidPgpAlgorithm(other)),
    };
    if packet_algorithm != algorithm {
        return Err(Error::AlgorithmMismatch {
            expected: algorithm,
            actual: packet_algorithm,
        });
    }

    let p = read_bignum_checked(stream, IntegerEncoding::Bits16, DLP_P, None)?;
    let q = match algorithm {
        Algorithm::Dsa => Some(read_bignum(
            stream,
            IntegerEncoding::Bits16,
            DLP_Q,
            Some(&p),
        )?),
        _ => None,
    };
    let g = read_bignum(stream, IntegerEncoding::Bits16, DLP_G, Some(&p))?;
    let y = read_bignum(stream, IntegerEncoding::Bits16, DLP_Y, Some(&p))?;

    Ok(DecodedKey {
        params: KeyParams::Dlp(DlpParams {
            p,
            q,
            g,
            y: Some(y),
        }),
        permissions: permissions_for(algorithm),
        pgp_creation_time: Some(header.creation_time),
    })
}
