//! Public-key and signature value decoding.
//!
//! Reads asymmetric public keys from untrusted wire data, validates every
//! numeric field against its algorithm's bounds, and works out which
//! operations the resulting key may perform.
//!
//! Supported encodings per algorithm family:
//!
//! | Family            | Certificate | SSH | TLS | PGP |
//! |-------------------|-------------|-----|-----|-----|
//! | RSA               | yes         | yes |     | yes |
//! | DSA, DH, Elgamal  | yes         | yes | yes | yes |
//! | ECDSA, ECDH       | yes         | yes | yes |     |
//!
//! Errors fall into three [`ErrorKind`]s: bad data (malformed or out of
//! range), not available (well formed but unsupported, e.g. an unknown
//! curve) and internal (the caller asked for something the API doesn't
//! allow, such as an RSA key in TLS format).
//!
//! ```
//! use der::Stream;
//! use keyread::{Algorithm, ErrorKind, KeyContext, KeyFormat};
//!
//! // TLS ECDH parameters naming secp256r1
//! let mut context = KeyContext::new(Algorithm::Ecdh);
//! context
//!     .read_public_key(&mut Stream::new(&[0x03, 0x00, 0x17]), KeyFormat::Ssl)
//!     .unwrap();
//! assert_eq!(context.params().unwrap().key_size_bits(), 256);
//!
//! // An unregistered curve code is reported as unsupported, not corrupt
//! let mut context = KeyContext::new(Algorithm::Ecdh);
//! let err = context
//!     .read_public_key(&mut Stream::new(&[0x03, 0x00, 0x1d]), KeyFormat::Ssl)
//!     .unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::NotAvailable);
//! ```

#![forbid(unsafe_code)]

pub mod algorithm;
mod bignum;
pub mod context;
pub mod curve;
mod dlp;
mod ecc;
pub mod error;
pub mod limits;
pub mod params;
pub mod permission;
mod pgp;
pub mod point;
mod rsa;
pub mod signature;

#[cfg(test)]
mod test_util;

pub use algorithm::{Algorithm, Family, KeyFormat};
pub use context::{KeyContext, PublicKeyReader};
pub use curve::Curve;
pub use error::{Error, ErrorKind, Result};
pub use params::{DlpParams, EccParams, EccPoint, KeyParams, RsaParams};
pub use permission::{Action, ActionPermissions, PermissionLevel};
pub use point::import_ecc_point;
pub use signature::{decode_dl_values, decode_ecdl_values};
