//! Decoded key parameters, one shape per algorithm family.

use num_bigint::BigUint;

use crate::curve::Curve;
use crate::permission::ActionPermissions;

/// RSA public key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaParams {
    /// Modulus
    pub n: BigUint,
    /// Public exponent, always less than `n`
    pub e: BigUint,
}

/// Discrete-log key or domain parameters (DSA, DH, Elgamal).
///
/// `q`, `g` and `y` are each less than `p`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DlpParams {
    /// Prime modulus
    pub p: BigUint,
    /// Subgroup order; absent for PKCS #3 DH and PGP Elgamal
    pub q: Option<BigUint>,
    /// Generator
    pub g: BigUint,
    /// Public value; absent for domain-parameter-only encodings
    pub y: Option<BigUint>,
}

/// Affine public point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EccPoint {
    pub qx: BigUint,
    pub qy: BigUint,
}

/// Elliptic-curve key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EccParams {
    pub curve: Curve,
    /// Absent when only the curve is negotiated (TLS)
    pub point: Option<EccPoint>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyParams {
    Rsa(RsaParams),
    Dlp(DlpParams),
    Ecc(EccParams),
}

impl KeyParams {
    /// Modulus or prime size in bits; field size in bits for ECC keys.
    pub fn key_size_bits(&self) -> u64 {
        match self {
            KeyParams::Rsa(rsa) => rsa.n.bits(),
            KeyParams::Dlp(dlp) => dlp.p.bits(),
            KeyParams::Ecc(ecc) => ecc.curve.field_size() as u64 * 8,
        }
    }

    pub fn as_rsa(&self) -> Option<&RsaParams> {
        match self {
            KeyParams::Rsa(params) => Some(params),
            _ => None,
        }
    }

    pub fn as_dlp(&self) -> Option<&DlpParams> {
        match self {
            KeyParams::Dlp(params) => Some(params),
            _ => None,
        }
    }

    pub fn as_ecc(&self) -> Option<&EccParams> {
        match self {
            KeyParams::Ecc(params) => Some(params),
            _ => None,
        }
    }
}

/// What a leaf decoder hands back to its dispatcher.
///
/// Nothing here reaches a [`crate::KeyContext`] until the whole decode has
/// succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DecodedKey {
    pub params: KeyParams,
    pub permissions: ActionPermissions,
    pub pgp_creation_time: Option<u32>,
}

impl DecodedKey {
    pub(crate) fn new(params: KeyParams, permissions: ActionPermissions) -> Self {
        Self {
            params,
            permissions,
            pgp_creation_time: None,
        }
    }
}
