//! Named curves and the per-format curve identifier tables.
//!
//! Each wire format names curves differently:
//!
//! - certificates use an OBJECT IDENTIFIER (RFC 5480, RFC 5639)
//! - SSH uses a short text name (RFC 5656)
//! - TLS uses a 16-bit NamedCurve registry code (RFC 4492, RFC 7027)
//!
//! Lookups scan the table for the first match. A miss means the input
//! was well formed but names a curve that isn't supported, so it is
//! reported as not-available rather than bad data.

use std::fmt::Display;

use der::ObjectIdentifier;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Supported named curves, all over prime fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Curve {
    /// NIST P-192 (secp192r1)
    P192,
    /// NIST P-224 (secp224r1)
    P224,
    /// NIST P-256 (secp256r1)
    P256,
    /// NIST P-384 (secp384r1)
    P384,
    /// NIST P-521 (secp521r1)
    P521,
    BrainpoolP256,
    BrainpoolP384,
    BrainpoolP512,
}

impl Curve {
    pub const OID_SECP192R1: &'static str = "1.2.840.10045.3.1.1";
    pub const OID_SECP224R1: &'static str = "1.3.132.0.33";
    pub const OID_SECP256R1: &'static str = "1.2.840.10045.3.1.7";
    pub const OID_SECP384R1: &'static str = "1.3.132.0.34";
    pub const OID_SECP521R1: &'static str = "1.3.132.0.35";
    pub const OID_BRAINPOOL_P256R1: &'static str = "1.3.36.3.3.2.8.1.1.7";
    pub const OID_BRAINPOOL_P384R1: &'static str = "1.3.36.3.3.2.8.1.1.11";
    pub const OID_BRAINPOOL_P512R1: &'static str = "1.3.36.3.3.2.8.1.1.13";

    /// Size of a field element in bytes.
    pub const fn field_size(self) -> usize {
        match self {
            Self::P192 => 24,
            Self::P224 => 28,
            Self::P256 | Self::BrainpoolP256 => 32,
            Self::P384 | Self::BrainpoolP384 => 48,
            Self::P521 => 66,
            Self::BrainpoolP512 => 64,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::P192 => "P-192",
            Self::P224 => "P-224",
            Self::P256 => "P-256",
            Self::P384 => "P-384",
            Self::P521 => "P-521",
            Self::BrainpoolP256 => "brainpoolP256r1",
            Self::BrainpoolP384 => "brainpoolP384r1",
            Self::BrainpoolP512 => "brainpoolP512r1",
        }
    }

    /// Resolves a certificate curve OID.
    pub fn from_oid(oid: &ObjectIdentifier) -> Result<Self> {
        let oid_str = oid.to_string();
        lookup(&CERT_CURVES, &oid_str.as_str())
            .ok_or_else(|| Error::UnsupportedCurve(format!("OID {}", oid_str)))
    }

    /// Resolves an SSH curve name such as `nistp256`.
    pub fn from_ssh_name(name: &[u8]) -> Result<Self> {
        lookup(&SSH_CURVES, &name).ok_or_else(|| {
            Error::UnsupportedCurve(format!("SSH curve {}", String::from_utf8_lossy(name)))
        })
    }

    /// Resolves a TLS NamedCurve code.
    pub fn from_tls_named_curve(code: u16) -> Result<Self> {
        lookup(&TLS_CURVES, &code)
            .ok_or_else(|| Error::UnsupportedCurve(format!("TLS named curve {}", code)))
    }
}

impl Display for Curve {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

pub(crate) static CERT_CURVES: [(&str, Curve); 8] = [
    (Curve::OID_SECP192R1, Curve::P192),
    (Curve::OID_SECP224R1, Curve::P224),
    (Curve::OID_SECP256R1, Curve::P256),
    (Curve::OID_SECP384R1, Curve::P384),
    (Curve::OID_SECP521R1, Curve::P521),
    (Curve::OID_BRAINPOOL_P256R1, Curve::BrainpoolP256),
    (Curve::OID_BRAINPOOL_P384R1, Curve::BrainpoolP384),
    (Curve::OID_BRAINPOOL_P512R1, Curve::BrainpoolP512),
];

pub(crate) static SSH_CURVES: [(&[u8], Curve); 3] = [
    (b"nistp256".as_slice(), Curve::P256),
    (b"nistp384".as_slice(), Curve::P384),
    (b"nistp521".as_slice(), Curve::P521),
];

pub(crate) static TLS_CURVES: [(u16, Curve); 8] = [
    (19, Curve::P192),
    (21, Curve::P224),
    (23, Curve::P256),
    (24, Curve::P384),
    (25, Curve::P521),
    (26, Curve::BrainpoolP256),
    (27, Curve::BrainpoolP384),
    (28, Curve::BrainpoolP512),
];

fn lookup<K: PartialEq>(table: &[(K, Curve)], key: &K) -> Option<Curve> {
    table
        .iter()
        .find(|(id, _)| id == key)
        .map(|&(_, curve)| curve)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::ErrorKind;

    #[rstest]
    #[case(Curve::OID_SECP192R1, Curve::P192, 24)]
    #[case(Curve::OID_SECP224R1, Curve::P224, 28)]
    #[case(Curve::OID_SECP256R1, Curve::P256, 32)]
    #[case(Curve::OID_SECP384R1, Curve::P384, 48)]
    #[case(Curve::OID_SECP521R1, Curve::P521, 66)]
    #[case(Curve::OID_BRAINPOOL_P256R1, Curve::BrainpoolP256, 32)]
    #[case(Curve::OID_BRAINPOOL_P384R1, Curve::BrainpoolP384, 48)]
    #[case(Curve::OID_BRAINPOOL_P512R1, Curve::BrainpoolP512, 64)]
    fn test_cert_curve_table(#[case] oid: &str, #[case] curve: Curve, #[case] field_size: usize) {
        let oid: ObjectIdentifier = oid.parse().unwrap();
        let resolved = Curve::from_oid(&oid).unwrap();
        assert_eq!(resolved, curve);
        assert_eq!(resolved.field_size(), field_size);
    }

    #[rstest]
    #[case(b"nistp256", Curve::P256, 32)]
    #[case(b"nistp384", Curve::P384, 48)]
    #[case(b"nistp521", Curve::P521, 66)]
    fn test_ssh_curve_table(
        #[case] name: &[u8],
        #[case] curve: Curve,
        #[case] field_size: usize,
    ) {
        let resolved = Curve::from_ssh_name(name).unwrap();
        assert_eq!(resolved, curve);
        assert_eq!(resolved.field_size(), field_size);
    }

    #[rstest]
    #[case(19, Curve::P192, 24)]
    #[case(21, Curve::P224, 28)]
    #[case(23, Curve::P256, 32)]
    #[case(24, Curve::P384, 48)]
    #[case(25, Curve::P521, 66)]
    #[case(26, Curve::BrainpoolP256, 32)]
    #[case(27, Curve::BrainpoolP384, 48)]
    #[case(28, Curve::BrainpoolP512, 64)]
    fn test_tls_curve_table(#[case] code: u16, #[case] curve: Curve, #[case] field_size: usize) {
        let resolved = Curve::from_tls_named_curve(code).unwrap();
        assert_eq!(resolved, curve);
        assert_eq!(resolved.field_size(), field_size);
    }

    #[test]
    fn test_tables_cover_every_entry_once() {
        assert_eq!(CERT_CURVES.len(), 8);
        assert_eq!(SSH_CURVES.len(), 3);
        assert_eq!(TLS_CURVES.len(), 8);
        for (i, (code, _)) in TLS_CURVES.iter().enumerate() {
            assert!(TLS_CURVES[i + 1..].iter().all(|(other, _)| other != code));
        }
    }

    #[test]
    fn test_unknown_curves_are_not_available() {
        let oid: ObjectIdentifier = "1.3.132.0.10".parse().unwrap();
        assert_eq!(
            Curve::from_oid(&oid).unwrap_err().kind(),
            ErrorKind::NotAvailable
        );
        assert_eq!(
            Curve::from_ssh_name(b"nistk163").unwrap_err().kind(),
            ErrorKind::NotAvailable
        );
        for code in [0u16, 18, 20, 22, 29, 29 + 256] {
            assert_eq!(
                Curve::from_tls_named_curve(code).unwrap_err().kind(),
                ErrorKind::NotAvailable
            );
        }
    }
}
