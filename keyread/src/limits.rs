//! Size bounds for every numeric field read from the wire.
//!
//! Bounds are in bytes and apply to the significant length of a value,
//! i.e. after any sign or padding octets are removed.

/// Inclusive byte-length bounds for one named field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub field: &'static str,
    pub min: usize,
    pub max: usize,
}

impl Bounds {
    pub const fn new(field: &'static str, min: usize, max: usize) -> Self {
        Self { field, min, max }
    }

    pub const fn contains(&self, length: usize) -> bool {
        length >= self.min && length <= self.max
    }
}

/// Smallest public-key modulus accepted (1008 bits, leaving slack for
/// 1024-bit keys that encode a few bits short).
pub const MIN_PKCSIZE: usize = 126;
/// Largest public-key modulus accepted (4096 bits).
pub const MAX_PKCSIZE: usize = 512;

/// Smallest ECC field size accepted (192 bits, less a leading zero byte).
pub const MIN_PKCSIZE_ECC: usize = 23;
/// Largest ECC field size accepted (576 bits, covers P-521).
pub const MAX_PKCSIZE_ECC: usize = 72;

/// Uncompressed point: `0x04 || X || Y`.
pub const MIN_ECC_POINT: usize = 1 + 2 * MIN_PKCSIZE_ECC;
pub const MAX_ECC_POINT: usize = 1 + 2 * MAX_PKCSIZE_ECC;

/// Smallest possible encoded OBJECT IDENTIFIER (tag, length, three octets).
pub const MIN_OID_SIZE: usize = 5;

/// Upper bound on any length-prefixed structure inside a key.
pub const MAX_INTLENGTH_SHORT: usize = 16383;

/// Longest text string accepted in SSH key headers.
pub const MAX_TEXTSIZE: usize = 64;

pub const RSA_N: Bounds = Bounds::new("RSA n", MIN_PKCSIZE, MAX_PKCSIZE);
pub const RSA_E: Bounds = Bounds::new("RSA e", 1, 4);

pub const DLP_P: Bounds = Bounds::new("DLP p", MIN_PKCSIZE, MAX_PKCSIZE);
pub const DLP_Q: Bounds = Bounds::new("DLP q", 16, MAX_PKCSIZE);
pub const DLP_G: Bounds = Bounds::new("DLP g", 1, MAX_PKCSIZE);
pub const DLP_Y: Bounds = Bounds::new("DLP y", MIN_PKCSIZE, MAX_PKCSIZE);

/// Signature values are required to be just over 100 bits.
pub const DLP_SIG_R: Bounds = Bounds::new("signature r", 13, MAX_PKCSIZE);
pub const DLP_SIG_S: Bounds = Bounds::new("signature s", 13, MAX_PKCSIZE);

/// SSH carries DSA signatures as two fixed 20-byte blocks.
pub const SSH_DLP_SIG_COMPONENT: usize = 20;
pub const SSH_DLP_SIG_R: Bounds = Bounds::new("signature r", 13, SSH_DLP_SIG_COMPONENT);
pub const SSH_DLP_SIG_S: Bounds = Bounds::new("signature s", 13, SSH_DLP_SIG_COMPONENT);

pub const ECC_SIG_R: Bounds = Bounds::new("signature r", MIN_PKCSIZE_ECC, MAX_PKCSIZE_ECC);
pub const ECC_SIG_S: Bounds = Bounds::new("signature s", MIN_PKCSIZE_ECC, MAX_PKCSIZE_ECC);

/// Smallest buffer a signature value pair may arrive in.
pub const MIN_SIGNATURE_BUFFER: usize = 32;
