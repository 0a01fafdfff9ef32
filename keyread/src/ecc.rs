//! Elliptic-curve (ECDSA, ECDH) public key decoders.
//!
//! Only named curves over prime fields are supported. ECDSA keys may sign
//! and verify, ECDH keys may encrypt and decrypt, always internal-only.

use der::{Stream, Tag};

use crate::algorithm::{Algorithm, Family, KeyFormat, read_algorithm_identifier};
use crate::curve::Curve;
use crate::error::{Error, Result};
use crate::limits::{
    MAX_ECC_POINT, MAX_INTLENGTH_SHORT, MAX_TEXTSIZE, MIN_ECC_POINT, MIN_OID_SIZE,
};
use crate::params::{DecodedKey, EccParams, KeyParams};
use crate::permission::ActionPermissions;
use crate::point::import_ecc_point;

/// TLS ECCurveType `named_curve` (RFC 4492 section 5.4).
const TLS_NAMED_CURVE: u8 = 0x03;

const SSH_ECDH_PREFIX: &[u8] = b"ecdh-sha2-";
const SSH_ECDSA_PREFIX: &[u8] = b"ecdsa-sha2-";
/// Shortest valid name, e.g. `ecdh-sha2-nistp256`.
const SSH_MIN_ALGORITHM_NAME: usize = 18;

/// Reads an ECC public key in `format`.
pub(crate) fn read_ecc_public_key(
    stream: &mut Stream<'_>,
    algorithm: Algorithm,
    format: KeyFormat,
) -> Result<DecodedKey> {
    if algorithm.family() != Family::Ecc {
        return Err(Error::WrongFamily {
            algorithm,
            family: Family::Ecc,
        });
    }
    match format {
        KeyFormat::Certificate => read_ecc_subject_public_key(stream, algorithm),
        KeyFormat::Ssl => read_ssl_ecc_public_key(stream, algorithm),
        KeyFormat::Ssh => read_ssh_ecc_public_key(stream, algorithm),
        KeyFormat::Pgp => Err(Error::UnsupportedFormat {
            family: Family::Ecc,
            format,
        }),
    }
}

fn permissions_for(algorithm: Algorithm) -> ActionPermissions {
    match algorithm {
        Algorithm::Ecdsa => ActionPermissions::internal_sign_verify(),
        _ => ActionPermissions::internal_crypt(),
    }
}

/// ```asn1
/// SubjectPublicKeyInfo ::= SEQUENCE {
///     algorithm  SEQUENCE {
///         algorithm   OBJECT IDENTIFIER,  -- id-ecPublicKey
///         parameters  OBJECT IDENTIFIER   -- namedCurve
///     },
///     subjectPublicKey  BIT STRING  -- ECPoint
/// }
/// ```
///
/// id-ecPublicKey covers both ECDSA and ECDH, so any ECC context accepts it.
fn read_ecc_subject_public_key(
    stream: &mut Stream<'_>,
    algorithm: Algorithm,
) -> Result<DecodedKey> {
    stream.read_generic_hole(8 + MIN_OID_SIZE + MIN_ECC_POINT)?;
    let algorithm_id = read_algorithm_identifier(stream)?;
    if algorithm_id.parameters_len < MIN_OID_SIZE
        || algorithm_id.parameters_len > MAX_INTLENGTH_SHORT
    {
        return Err(Error::InvalidParameters(format!(
            "{} bytes of curve parameters",
            algorithm_id.parameters_len
        )));
    }
    if algorithm_id.algorithm.family() != Family::Ecc {
        return Err(Error::AlgorithmMismatch {
            expected: algorithm,
            actual: algorithm_id.algorithm,
        });
    }

    let curve = match Tag::from(stream.peek_u8()?) {
        Tag::ObjectIdentifier => Curve::from_oid(&stream.read_object_identifier()?)?,
        Tag::Sequence => {
            return Err(Error::UnsupportedCurve(
                "explicit curve parameters".to_string(),
            ));
        }
        tag => {
            return Err(Error::InvalidParameters(format!(
                "unexpected curve parameter tag {:?}",
                tag
            )));
        }
    };

    let length = stream.read_bit_string_hole(MIN_ECC_POINT)?;
    if length > MAX_ECC_POINT {
        return Err(Error::OutOfRange {
            field: "ECC point",
            length,
            min: MIN_ECC_POINT,
            max: MAX_ECC_POINT,
        });
    }
    let point = import_ecc_point(stream.read_bytes(length)?, curve.field_size())?;

    Ok(DecodedKey::new(
        KeyParams::Ecc(EccParams {
            curve,
            point: Some(point),
        }),
        permissions_for(algorithm),
    ))
}

/// ```text
/// byte    curve_type    -- named_curve
/// uint16  named_curve
/// ```
///
/// The ECDH share that follows belongs to the key exchange, so only the
/// curve is recorded.
fn read_ssl_ecc_public_key(stream: &mut Stream<'_>, algorithm: Algorithm) -> Result<DecodedKey> {
    if algorithm != Algorithm::Ecdh {
        return Err(Error::UnsupportedAlgorithmFormat {
            algorithm,
            format: KeyFormat::Ssl,
        });
    }

    let curve_type = stream.read_u8()?;
    if curve_type != TLS_NAMED_CURVE {
        return Err(Error::InvalidCurveType(curve_type));
    }
    let curve = Curve::from_tls_named_curve(stream.read_u16()?)?;

    Ok(DecodedKey::new(
        KeyParams::Ecc(EccParams { curve, point: None }),
        ActionPermissions::internal_crypt(),
    ))
}

/// ```text
/// string  key blob
///     string  "ecdsa-sha2-nistp256" etc.
///     string  "nistp256"
///     string  Q
/// ```
///
/// The curve is taken from the second string. Once the algorithm name
/// checks out, a well-formed but unknown curve name is not-available.
fn read_ssh_ecc_public_key(stream: &mut Stream<'_>, algorithm: Algorithm) -> Result<DecodedKey> {
    let (prefix, display_name) = match algorithm {
        Algorithm::Ecdh => (SSH_ECDH_PREFIX, "ecdh-sha2-*"),
        _ => (SSH_ECDSA_PREFIX, "ecdsa-sha2-*"),
    };

    stream.read_u32()?;
    let name = stream.read_string32(1, MAX_TEXTSIZE)?;
    if name.len() < SSH_MIN_ALGORITHM_NAME || !name.starts_with(prefix) {
        return Err(Error::KeyTypeMismatch(display_name));
    }

    let curve_name = stream.read_string32(1, MAX_TEXTSIZE)?;
    if !curve_name.iter().all(u8::is_ascii_graphic) {
        return Err(Error::InvalidParameters(
            "SSH curve name is not printable".to_string(),
        ));
    }
    let curve = Curve::from_ssh_name(curve_name)?;

    let blob = stream.read_string32(MIN_ECC_POINT, MAX_ECC_POINT)?;
    let point = import_ecc_point(blob, curve.field_size())?;

    Ok(DecodedKey::new(
        KeyParams::Ecc(EccParams {
            curve,
            point: Some(point),
        }),
        permissions_for(algorithm),
    ))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::ErrorKind;
    use crate::params::EccPoint;
    use crate::test_util::{
        P256_X, P256_Y, big, der_bit_string, der_null, der_oid, der_sequence, ecc_spki,
        p256_point, ssh_key, ssh_string, test_value,
    };

    fn p256_params() -> EccParams {
        EccParams {
            curve: Curve::P256,
            point: Some(EccPoint {
                qx: big(&P256_X),
                qy: big(&P256_Y),
            }),
        }
    }

    fn ssh_ecc(name: &[u8], curve_name: &[u8], point: &[u8]) -> Vec<u8> {
        // the outer name is the first string, so pass the rest as fields
        ssh_key(name, &[ssh_string(curve_name), ssh_string(point)])
    }

    fn read(data: &[u8], algorithm: Algorithm, format: KeyFormat) -> Result<DecodedKey> {
        let mut stream = Stream::new(data);
        read_ecc_public_key(&mut stream, algorithm, format)
    }

    #[rstest]
    #[case(Algorithm::Ecdsa)]
    #[case(Algorithm::Ecdh)]
    fn test_read_certificate(#[case] algorithm: Algorithm) {
        let data = ecc_spki(Curve::OID_SECP256R1, &p256_point());
        let decoded = read(&data, algorithm, KeyFormat::Certificate).unwrap();
        assert_eq!(decoded.params, KeyParams::Ecc(p256_params()));
        assert_eq!(decoded.permissions, permissions_for(algorithm));
    }

    #[test]
    fn test_read_certificate_unknown_curve() {
        // secp256k1 is well formed but not supported
        let data = ecc_spki("1.3.132.0.10", &p256_point());
        let err = read(&data, Algorithm::Ecdsa, KeyFormat::Certificate).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotAvailable);
    }

    #[test]
    fn test_read_certificate_explicit_curve() {
        let explicit = der_sequence(&[vec![0x02, 0x01, 0x01], der_oid("1.2.840.10045.1.1")]);
        let data = der_sequence(&[
            der_sequence(&[der_oid(Algorithm::OID_EC_PUBLIC_KEY), explicit]),
            der_bit_string(&p256_point()),
        ]);
        let err = read(&data, Algorithm::Ecdsa, KeyFormat::Certificate).unwrap_err();
        assert!(matches!(err, Error::UnsupportedCurve(_)));
        assert_eq!(err.kind(), ErrorKind::NotAvailable);
    }

    #[test]
    fn test_read_certificate_implicit_curve() {
        let data = der_sequence(&[
            der_sequence(&[der_oid(Algorithm::OID_EC_PUBLIC_KEY), der_null()]),
            der_bit_string(&p256_point()),
        ]);
        let err = read(&data, Algorithm::Ecdsa, KeyFormat::Certificate).unwrap_err();
        assert!(matches!(err, Error::InvalidParameters(_)));
    }

    #[test]
    fn test_read_certificate_point_curve_mismatch() {
        let data = ecc_spki(Curve::OID_SECP384R1, &p256_point());
        let err = read(&data, Algorithm::Ecdsa, KeyFormat::Certificate).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BadData);
    }

    #[test]
    fn test_read_certificate_non_ecc_oid() {
        let data = der_sequence(&[
            der_sequence(&[
                der_oid(Algorithm::OID_RSA_ENCRYPTION),
                der_oid(Curve::OID_SECP256R1),
            ]),
            der_bit_string(&p256_point()),
        ]);
        let err = read(&data, Algorithm::Ecdsa, KeyFormat::Certificate).unwrap_err();
        assert!(matches!(err, Error::AlgorithmMismatch { .. }));
    }

    #[rstest]
    #[case(vec![0x03, 0x00, 23], Curve::P256)]
    #[case(vec![0x03, 0x00, 25], Curve::P521)]
    #[case(vec![0x03, 0x00, 28, 0x41, 0x04], Curve::BrainpoolP512)]
    fn test_read_ssl(#[case] data: Vec<u8>, #[case] curve: Curve) {
        let decoded = read(&data, Algorithm::Ecdh, KeyFormat::Ssl).unwrap();
        assert_eq!(
            decoded.params,
            KeyParams::Ecc(EccParams { curve, point: None })
        );
        assert_eq!(decoded.permissions, ActionPermissions::internal_crypt());
    }

    #[rstest]
    #[case(vec![0x01, 0x00, 23], ErrorKind::BadData)]
    #[case(vec![0x02, 0x00, 23], ErrorKind::BadData)]
    #[case(vec![0x03, 0x00, 22], ErrorKind::NotAvailable)]
    #[case(vec![0x03, 0x01, 23], ErrorKind::NotAvailable)]
    #[case(vec![0x03, 0x00], ErrorKind::BadData)]
    fn test_read_ssl_invalid(#[case] data: Vec<u8>, #[case] kind: ErrorKind) {
        let err = read(&data, Algorithm::Ecdh, KeyFormat::Ssl).unwrap_err();
        assert_eq!(err.kind(), kind);
    }

    #[rstest]
    #[case(Algorithm::Ecdsa, b"ecdsa-sha2-nistp256".as_slice())]
    #[case(Algorithm::Ecdh, b"ecdh-sha2-nistp256".as_slice())]
    fn test_read_ssh(#[case] algorithm: Algorithm, #[case] name: &[u8]) {
        let data = ssh_ecc(name, b"nistp256", &p256_point());
        let decoded = read(&data, algorithm, KeyFormat::Ssh).unwrap();
        assert_eq!(decoded.params, KeyParams::Ecc(p256_params()));
        assert_eq!(decoded.permissions, permissions_for(algorithm));
    }

    #[rstest]
    #[case(Algorithm::Ecdsa, b"ecdh-sha2-nistp256".as_slice())]
    #[case(Algorithm::Ecdh, b"ecdsa-sha2-nistp256".as_slice())]
    #[case(Algorithm::Ecdsa, b"ecdsa-sha2-p256".as_slice())]
    #[case(Algorithm::Ecdsa, b"ssh-ed25519-nistp256".as_slice())]
    fn test_read_ssh_algorithm_name(#[case] algorithm: Algorithm, #[case] name: &[u8]) {
        let data = ssh_ecc(name, b"nistp256", &p256_point());
        let err = read(&data, algorithm, KeyFormat::Ssh).unwrap_err();
        assert!(matches!(err, Error::KeyTypeMismatch(_)));
    }

    #[rstest]
    #[case(b"nistp192".as_slice(), ErrorKind::NotAvailable)]
    #[case(b"curve25519".as_slice(), ErrorKind::NotAvailable)]
    #[case(b"".as_slice(), ErrorKind::BadData)]
    #[case(b"nist\x00256".as_slice(), ErrorKind::BadData)]
    #[case(b"nist p256".as_slice(), ErrorKind::BadData)]
    fn test_read_ssh_curve_name(#[case] curve_name: &[u8], #[case] kind: ErrorKind) {
        let data = ssh_ecc(b"ecdsa-sha2-nistp256", curve_name, &p256_point());
        let err = read(&data, Algorithm::Ecdsa, KeyFormat::Ssh).unwrap_err();
        assert_eq!(err.kind(), kind);
    }

    #[test]
    fn test_read_ssh_short_point() {
        let data = ssh_ecc(b"ecdsa-sha2-nistp256", b"nistp256", &test_value(40, 0x04));
        let err = read(&data, Algorithm::Ecdsa, KeyFormat::Ssh).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BadData);
    }

    #[rstest]
    #[case(ecc_spki(Curve::OID_SECP256R1, &p256_point()), Algorithm::Ecdsa, KeyFormat::Certificate)]
    #[case(vec![0x03, 0x00, 0x17], Algorithm::Ecdh, KeyFormat::Ssl)]
    #[case(ssh_ecc(b"ecdh-sha2-nistp256", b"nistp256", &p256_point()), Algorithm::Ecdh, KeyFormat::Ssh)]
    fn test_every_truncation_fails(
        #[case] data: Vec<u8>,
        #[case] algorithm: Algorithm,
        #[case] format: KeyFormat,
    ) {
        for cut in 0..data.len() {
            assert!(
                read(&data[..cut], algorithm, format).is_err(),
                "accepted {cut} of {} bytes",
                data.len()
            );
        }
    }

    #[rstest]
    #[case(Algorithm::Ecdsa, KeyFormat::Ssl)]
    #[case(Algorithm::Ecdh, KeyFormat::Pgp)]
    #[case(Algorithm::Rsa, KeyFormat::Certificate)]
    fn test_contract_violations(#[case] algorithm: Algorithm, #[case] format: KeyFormat) {
        let err = read(&[0x03, 0x00, 0x17], algorithm, format).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Internal);
    }
}
