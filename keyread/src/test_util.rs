//! Wire encoders and sample key material for tests.

use der::ObjectIdentifier;
use num_bigint::BigUint;

use crate::algorithm::Algorithm;

pub const P256_X: [u8; 32] = [
    0x6b, 0x17, 0xd1, 0xf2, 0xe1, 0x2c, 0x42, 0x47, 0xf8, 0xbc, 0xe6, 0xe5, 0x63, 0xa4, 0x40, 0xf2,
    0x77, 0x03, 0x7d, 0x81, 0x2d, 0xeb, 0x33, 0xa0, 0xf4, 0xa1, 0x39, 0x45, 0xd8, 0x98, 0xc2, 0x96,
];
pub const P256_Y: [u8; 32] = [
    0x4f, 0xe3, 0x42, 0xe2, 0xfe, 0x1a, 0x7f, 0x9b, 0x8e, 0xe7, 0xeb, 0x4a, 0x7c, 0x0f, 0x9e, 0x16,
    0x2b, 0xce, 0x33, 0x57, 0x6b, 0x31, 0x5e, 0xce, 0xcb, 0xb6, 0x40, 0x68, 0x37, 0xbf, 0x51, 0xf5,
];

pub const RSA_E_65537: [u8; 3] = [0x01, 0x00, 0x01];

/// `length` non-zero bytes beginning with `first`.
pub fn test_value(length: usize, first: u8) -> Vec<u8> {
    (0..length)
        .map(|i| match i {
            0 => first,
            _ => ((i * 37 + 11) % 251) as u8 + 1,
        })
        .collect()
}

pub fn rsa_n() -> Vec<u8> {
    test_value(128, 0xc5)
}

pub fn dlp_p() -> Vec<u8> {
    test_value(128, 0xf3)
}

pub fn dlp_q() -> Vec<u8> {
    test_value(20, 0x9a)
}

pub fn dlp_g() -> Vec<u8> {
    test_value(128, 0x5b)
}

pub fn dlp_y() -> Vec<u8> {
    test_value(128, 0x7c)
}

pub fn p256_point() -> Vec<u8> {
    [&[0x04][..], &P256_X, &P256_Y].concat()
}

pub fn big(value: &[u8]) -> BigUint {
    BigUint::from_bytes_be(value)
}

pub fn der_tlv(tag: u8, content: &[u8]) -> Vec<u8> {
    let mut out = vec![tag];
    let length = content.len();
    match length {
        0..=0x7f => out.push(length as u8),
        0x80..=0xff => out.extend([0x81, length as u8]),
        _ => out.extend([0x82, (length >> 8) as u8, length as u8]),
    }
    out.extend_from_slice(content);
    out
}

pub fn der_sequence(items: &[Vec<u8>]) -> Vec<u8> {
    der_tlv(0x30, &items.concat())
}

/// Encodes a non-negative value, adding a sign octet when needed.
pub fn der_integer(value: &[u8]) -> Vec<u8> {
    der_tlv(0x02, &with_sign_octet(value))
}

pub fn der_oid(oid: &str) -> Vec<u8> {
    let oid: ObjectIdentifier = oid.parse().unwrap();
    der_tlv(0x06, &oid.to_bytes().unwrap())
}

pub fn der_null() -> Vec<u8> {
    vec![0x05, 0x00]
}

pub fn der_bit_string(content: &[u8]) -> Vec<u8> {
    der_tlv(0x03, &[&[0x00][..], content].concat())
}

pub fn ssh_string(value: &[u8]) -> Vec<u8> {
    [&(value.len() as u32).to_be_bytes()[..], value].concat()
}

pub fn ssh_mpint(value: &[u8]) -> Vec<u8> {
    ssh_string(&with_sign_octet(value))
}

pub fn tls_integer(value: &[u8]) -> Vec<u8> {
    [&(value.len() as u16).to_be_bytes()[..], value].concat()
}

pub fn pgp_mpi(value: &[u8]) -> Vec<u8> {
    let bits = big(value).bits() as u16;
    let start = value.iter().position(|&b| b != 0).unwrap_or(value.len());
    [&bits.to_be_bytes()[..], &value[start..]].concat()
}

fn with_sign_octet(value: &[u8]) -> Vec<u8> {
    match value.first() {
        Some(first) if first & 0x80 != 0 => [&[0x00][..], value].concat(),
        _ => value.to_vec(),
    }
}

/// SubjectPublicKeyInfo for an RSA key.
pub fn rsa_spki(n: &[u8], e: &[u8]) -> Vec<u8> {
    der_sequence(&[
        der_sequence(&[der_oid(Algorithm::OID_RSA_ENCRYPTION), der_null()]),
        der_bit_string(&der_sequence(&[der_integer(n), der_integer(e)])),
    ])
}

/// SubjectPublicKeyInfo for a DLP key. The domain parameters are written
/// in the order given.
pub fn dlp_spki(oid: &str, params: [&[u8]; 3], y: &[u8]) -> Vec<u8> {
    let params = params.iter().map(|v| der_integer(v)).collect::<Vec<_>>();
    der_sequence(&[
        der_sequence(&[der_oid(oid), der_sequence(&params)]),
        der_bit_string(&der_integer(y)),
    ])
}

/// SubjectPublicKeyInfo for a named-curve ECC key.
pub fn ecc_spki(curve_oid: &str, point: &[u8]) -> Vec<u8> {
    der_sequence(&[
        der_sequence(&[der_oid(Algorithm::OID_EC_PUBLIC_KEY), der_oid(curve_oid)]),
        der_bit_string(point),
    ])
}

/// SSH public key blob: outer length, algorithm name, then `fields`.
pub fn ssh_key(name: &[u8], fields: &[Vec<u8>]) -> Vec<u8> {
    let body = [ssh_string(name), fields.concat()].concat();
    ssh_string(&body)
}

/// OpenPGP public key packet body.
pub fn pgp_key(version: u8, creation_time: u32, algorithm: u8, mpis: &[&[u8]]) -> Vec<u8> {
    let mut out = vec![version];
    out.extend(creation_time.to_be_bytes());
    if version < 4 {
        out.extend([0x00, 0x00]);
    }
    out.push(algorithm);
    for mpi in mpis {
        out.extend(pgp_mpi(mpi));
    }
    out
}
