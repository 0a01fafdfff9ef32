//! OpenPGP public key packet header (RFC 4880 section 5.5.2).
//!
//! ```text
//! byte    version
//! uint32  creation time
//! [uint16 validity period, versions 2 and 3 only]
//! byte    public-key algorithm
//! ```

use der::Stream;

use crate::error::{Error, Result};

pub(crate) const PGP_VERSION_2: u8 = 2;
pub(crate) const PGP_VERSION_3: u8 = 3;
pub(crate) const PGP_VERSION_OPENPGP: u8 = 4;

pub(crate) const PGP_ALGO_RSA: u8 = 1;
pub(crate) const PGP_ALGO_RSA_ENCRYPT: u8 = 2;
pub(crate) const PGP_ALGO_RSA_SIGN: u8 = 3;
pub(crate) const PGP_ALGO_ELGAMAL: u8 = 16;
pub(crate) const PGP_ALGO_DSA: u8 = 17;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PgpKeyHeader {
    /// Seconds since the Unix epoch
    pub creation_time: u32,
    pub algorithm: u8,
}

/// Reads the packet header, accepting only the listed versions.
pub(crate) fn read_key_header(stream: &mut Stream<'_>, versions: &[u8]) -> Result<PgpKeyHeader> {
    let version = stream.read_u8()?;
    if !versions.contains(&version) {
        return Err(Error::InvalidPgpVersion(version));
    }
    let creation_time = stream.read_u32()?;
    if matches!(version, PGP_VERSION_2 | PGP_VERSION_3) {
        // validity period, superseded by signature subpackets in v4
        stream.skip(2)?;
    }
    let algorithm = stream.read_u8()?;
    Ok(PgpKeyHeader {
        creation_time,
        algorithm,
    })
}
