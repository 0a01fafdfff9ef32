//! Key contexts and the per-family reader selection.

use der::Stream;
use num_bigint::BigUint;
use tracing::{debug, error, warn};

use crate::algorithm::{Algorithm, Family, KeyFormat};
use crate::dlp::read_dlp_public_key;
use crate::ecc::read_ecc_public_key;
use crate::error::{Error, ErrorKind, Result};
use crate::params::{DecodedKey, KeyParams};
use crate::permission::ActionPermissions;
use crate::rsa::read_rsa_public_key;
use crate::signature::{decode_dl_values, decode_ecdl_values};

/// Public-key reader and signature value decoder for one algorithm family.
///
/// Chosen once from the algorithm when a [`KeyContext`] is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublicKeyReader {
    Rsa,
    Dlp,
    Ecc,
}

impl PublicKeyReader {
    pub fn for_algorithm(algorithm: Algorithm) -> Self {
        match algorithm.family() {
            Family::Rsa => Self::Rsa,
            Family::Dlp => Self::Dlp,
            Family::Ecc => Self::Ecc,
        }
    }

    pub fn family(self) -> Family {
        match self {
            Self::Rsa => Family::Rsa,
            Self::Dlp => Family::Dlp,
            Self::Ecc => Family::Ecc,
        }
    }

    pub(crate) fn read(
        self,
        stream: &mut Stream<'_>,
        algorithm: Algorithm,
        format: KeyFormat,
    ) -> Result<DecodedKey> {
        if !self.family().supports(format) {
            return Err(Error::UnsupportedFormat {
                family: self.family(),
                format,
            });
        }
        match self {
            Self::Rsa => read_rsa_public_key(stream, algorithm, format),
            Self::Dlp => read_dlp_public_key(stream, algorithm, format),
            Self::Ecc => read_ecc_public_key(stream, algorithm, format),
        }
    }

    /// Decodes a signature value pair `(r, s)`, each less than `bound`.
    pub fn decode_signature_pair(
        self,
        buffer: &[u8],
        min_size: usize,
        bound: &BigUint,
        format: KeyFormat,
    ) -> Result<(BigUint, BigUint)> {
        match self {
            Self::Rsa => Err(Error::NoSignatureDecoder(Algorithm::Rsa)),
            Self::Dlp => decode_dl_values(buffer, min_size, bound, format),
            Self::Ecc => decode_ecdl_values(buffer, min_size, bound, format),
        }
    }
}

/// A public-key context that is populated once from wire data.
///
/// Until [`KeyContext::read_public_key`] succeeds the context has no key
/// parameters and no permitted actions. A failed read leaves it exactly as
/// it was.
///
/// ```
/// use der::Stream;
/// use keyread::{Action, Algorithm, KeyContext, KeyFormat};
///
/// let mut context = KeyContext::new(Algorithm::Ecdh);
/// let mut stream = Stream::new(&[0x03, 0x00, 0x17]);
/// context.read_public_key(&mut stream, KeyFormat::Ssl).unwrap();
/// assert!(context.permissions().allows_internal(Action::Encrypt));
/// assert!(!context.permissions().allows_external(Action::Encrypt));
/// ```
#[derive(Debug, Clone)]
pub struct KeyContext {
    algorithm: Algorithm,
    reader: PublicKeyReader,
    params: Option<KeyParams>,
    permissions: ActionPermissions,
    pgp_creation_time: Option<u32>,
    is_static: bool,
}

impl KeyContext {
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            reader: PublicKeyReader::for_algorithm(algorithm),
            params: None,
            permissions: ActionPermissions::none(),
            pgp_creation_time: None,
            is_static: false,
        }
    }

    /// A context for fixed self-test key data. Reading a key into it sets
    /// the parameters but never grants any actions.
    pub fn new_static(algorithm: Algorithm) -> Self {
        Self {
            is_static: true,
            ..Self::new(algorithm)
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn reader(&self) -> PublicKeyReader {
        self.reader
    }

    pub fn params(&self) -> Option<&KeyParams> {
        self.params.as_ref()
    }

    pub fn permissions(&self) -> ActionPermissions {
        self.permissions
    }

    /// Key creation time from a PGP packet, in seconds since the epoch.
    pub fn pgp_creation_time(&self) -> Option<u32> {
        self.pgp_creation_time
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    /// Reads this context's public key from `stream`.
    ///
    /// `format` must be one the algorithm can be encoded in; anything else
    /// is an [`ErrorKind::Internal`] error. The stream is left at an
    /// unspecified position on failure.
    pub fn read_public_key(&mut self, stream: &mut Stream<'_>, format: KeyFormat) -> Result<()> {
        if self.params.is_some() {
            let err = Error::Contract("public key already read into this context");
            self.log_failure(&err, format);
            return Err(err);
        }
        match self.reader.read(stream, self.algorithm, format) {
            Ok(decoded) => self.complete_read(decoded, format),
            Err(err) => {
                self.log_failure(&err, format);
                Err(err)
            }
        }
    }

    /// Decodes a signature value pair using this context's family layout.
    pub fn decode_signature_pair(
        &self,
        buffer: &[u8],
        min_size: usize,
        bound: &BigUint,
        format: KeyFormat,
    ) -> Result<(BigUint, BigUint)> {
        self.reader
            .decode_signature_pair(buffer, min_size, bound, format)
            .inspect_err(|err| self.log_failure(err, format))
    }

    fn complete_read(&mut self, decoded: DecodedKey, format: KeyFormat) -> Result<()> {
        if decoded.permissions.is_empty() {
            let err = Error::Contract("decoder granted no actions");
            self.log_failure(&err, format);
            return Err(err);
        }
        debug!(
            algorithm = %self.algorithm,
            format = %format,
            key_size_bits = decoded.params.key_size_bits(),
            "Public key decoded"
        );
        self.params = Some(decoded.params);
        self.pgp_creation_time = decoded.pgp_creation_time;

        // Self-test data has no owning object to carry permissions.
        if self.is_static {
            return Ok(());
        }
        self.permissions = decoded.permissions;
        debug!(
            algorithm = %self.algorithm,
            permissions = ?self.permissions,
            "Action permissions set"
        );
        Ok(())
    }

    fn log_failure(&self, err: &Error, format: KeyFormat) {
        match err.kind() {
            ErrorKind::Internal => error!(
                algorithm = %self.algorithm,
                format = %format,
                error = %err,
                "Public key API misuse"
            ),
            ErrorKind::BadData | ErrorKind::NotAvailable => warn!(
                algorithm = %self.algorithm,
                format = %format,
                error = %err,
                "Public key data rejected"
            ),
        }
    }
}
