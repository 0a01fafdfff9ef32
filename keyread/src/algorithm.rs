//! Algorithm identities, algorithm families and wire formats.

use std::fmt::Display;

use der::{ObjectIdentifier, Stream};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Public-key algorithm of a key context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    Rsa,
    Dsa,
    Dh,
    Elgamal,
    Ecdsa,
    Ecdh,
}

impl Algorithm {
    // AlgorithmIdentifier OIDs (RFC 3279, RFC 5480)
    pub const OID_RSA_ENCRYPTION: &'static str = "1.2.840.113549.1.1.1";
    pub const OID_DSA: &'static str = "1.2.840.10040.4.1";
    pub const OID_DSA_OIW: &'static str = "1.3.14.3.2.12";
    pub const OID_DH_PUBLIC_NUMBER: &'static str = "1.2.840.10046.2.1";
    pub const OID_ELGAMAL: &'static str = "1.3.6.1.4.1.3029.1.2.1";
    pub const OID_EC_PUBLIC_KEY: &'static str = "1.2.840.10045.2.1";

    pub const fn family(self) -> Family {
        match self {
            Self::Rsa => Family::Rsa,
            Self::Dsa | Self::Dh | Self::Elgamal => Family::Dlp,
            Self::Ecdsa | Self::Ecdh => Family::Ecc,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Rsa => "RSA",
            Self::Dsa => "DSA",
            Self::Dh => "DH",
            Self::Elgamal => "Elgamal",
            Self::Ecdsa => "ECDSA",
            Self::Ecdh => "ECDH",
        }
    }

    /// Maps an AlgorithmIdentifier OID to an algorithm.
    ///
    /// id-ecPublicKey does not distinguish ECDSA from ECDH, so it maps to
    /// ECDSA and ECC readers compare families instead.
    pub fn from_oid(oid: &ObjectIdentifier) -> Option<Self> {
        let oid_str = oid.to_string();
        match oid_str.as_str() {
            Self::OID_RSA_ENCRYPTION => Some(Self::Rsa),
            Self::OID_DSA | Self::OID_DSA_OIW => Some(Self::Dsa),
            Self::OID_DH_PUBLIC_NUMBER => Some(Self::Dh),
            Self::OID_ELGAMAL => Some(Self::Elgamal),
            Self::OID_EC_PUBLIC_KEY => Some(Self::Ecdsa),
            _ => None,
        }
    }

    /// X9.42 as used in PKIX swaps the last two domain parameters relative
    /// to FIPS 186, giving `(p, g, q)` instead of `(p, q, g)`.
    pub(crate) const fn has_reversed_params(self) -> bool {
        matches!(self, Self::Dh | Self::Elgamal)
    }
}

impl Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Algorithm family. Each family has its own public-key reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Family {
    Rsa,
    Dlp,
    Ecc,
}

impl Family {
    /// The fixed family/format compatibility matrix.
    pub const fn supports(self, format: KeyFormat) -> bool {
        match self {
            Self::Rsa => matches!(
                format,
                KeyFormat::Certificate | KeyFormat::Ssh | KeyFormat::Pgp
            ),
            Self::Dlp => true,
            Self::Ecc => matches!(
                format,
                KeyFormat::Certificate | KeyFormat::Ssl | KeyFormat::Ssh
            ),
        }
    }
}

impl Display for Family {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Rsa => "RSA",
            Self::Dlp => "DLP",
            Self::Ecc => "ECC",
        };
        write!(f, "{}", name)
    }
}

/// Wire encoding of a public key or signature value pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyFormat {
    /// X.509 SubjectPublicKeyInfo; DER SEQUENCE for signature values.
    Certificate,
    /// SSHv2 public key blob.
    Ssh,
    /// TLS ServerKeyExchange parameters.
    Ssl,
    /// OpenPGP public key packet body.
    Pgp,
}

impl Display for KeyFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Certificate => "certificate",
            Self::Ssh => "SSH",
            Self::Ssl => "TLS",
            Self::Pgp => "PGP",
        };
        write!(f, "{}", name)
    }
}

/// The leading part of a SubjectPublicKeyInfo AlgorithmIdentifier.
///
/// ```asn1
/// AlgorithmIdentifier ::= SEQUENCE {
///     algorithm   OBJECT IDENTIFIER,
///     parameters  ANY DEFINED BY algorithm OPTIONAL
/// }
/// ```
///
/// The parameters are left unread in the stream; `parameters_len` is the
/// number of bytes they occupy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct AlgorithmIdentifier {
    pub algorithm: Algorithm,
    pub parameters_len: usize,
}

pub(crate) fn read_algorithm_identifier(stream: &mut Stream<'_>) -> Result<AlgorithmIdentifier> {
    let length = stream.read_sequence()?;
    let start = stream.position();
    let oid = stream.read_object_identifier()?;
    let algorithm =
        Algorithm::from_oid(&oid).ok_or_else(|| Error::UnknownAlgorithmOid(oid.to_string()))?;
    let consumed = stream.position() - start;
    let parameters_len = length.checked_sub(consumed).ok_or_else(|| {
        Error::InvalidParameters("OID overruns AlgorithmIdentifier".to_string())
    })?;
    Ok(AlgorithmIdentifier {
        algorithm,
        parameters_len,
    })
}

/// Reads an AlgorithmIdentifier that carries no parameters or a NULL.
pub(crate) fn read_algorithm_identifier_no_params(stream: &mut Stream<'_>) -> Result<Algorithm> {
    let algorithm_id = read_algorithm_identifier(stream)?;
    match algorithm_id.parameters_len {
        0 => {}
        2 => stream.read_null()?,
        n => {
            return Err(Error::InvalidParameters(format!(
                "{} bytes of unexpected parameters",
                n
            )));
        }
    }
    Ok(algorithm_id.algorithm)
}
