use std::fmt::Display;
use std::str::FromStr;

use crate::error::{Error, Result};

/// A decoded OBJECT IDENTIFIER.
///
/// Lookup tables compare against the dotted-decimal form, e.g.
/// `"1.2.840.10045.3.1.7"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectIdentifier {
    inner: Vec<u64>,
}

impl ObjectIdentifier {
    /// DER contents octets (without tag and length).
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut result = Vec::new();
        let mut arcs = self.inner.iter().copied();
        let first = match (arcs.next(), arcs.next()) {
            (Some(a), Some(b)) => first_subidentifier(a, b)?,
            _ => return Ok(result),
        };
        for value in std::iter::once(first).chain(arcs) {
            let mut encoded = vec![(value & 0x7f) as u8];
            let mut value = value >> 7;
            while value > 0 {
                encoded.push((value & 0x7f) as u8 | 0x80);
                value >>= 7;
            }
            result.extend(encoded.iter().rev());
        }
        Ok(result)
    }
}

/// Packs the first two arcs into one subidentifier (X.690 8.19.4).
fn first_subidentifier(a: u64, b: u64) -> Result<u64> {
    if a > 2 || (a < 2 && b >= 40) {
        return Err(Error::InvalidObjectIdentifier(format!(
            "invalid leading arcs {}.{}",
            a, b
        )));
    }
    a.checked_mul(40)
        .and_then(|n| n.checked_add(b))
        .ok_or_else(|| Error::InvalidObjectIdentifier(format!("arc {} too large", b)))
}

impl TryFrom<&[u8]> for ObjectIdentifier {
    type Error = Error;

    fn try_from(value: &[u8]) -> Result<Self> {
        if value.is_empty() {
            return Err(Error::InvalidObjectIdentifier("no data".to_string()));
        }

        let mut subidentifiers = Vec::new();
        let mut val = 0u64;
        let mut started = false;
        for &v in value {
            if !started && v == 0x80 {
                return Err(Error::InvalidObjectIdentifier(
                    "non-minimal subidentifier".to_string(),
                ));
            }
            if val >> 57 != 0 {
                return Err(Error::InvalidObjectIdentifier(
                    "subidentifier overflow".to_string(),
                ));
            }
            val = (val << 7) | (v as u64 & 0x7f);
            started = true;
            if v & 0x80 == 0 {
                subidentifiers.push(val);
                val = 0;
                started = false;
            }
        }
        if started {
            return Err(Error::InvalidObjectIdentifier(
                "incomplete encoding".to_string(),
            ));
        }

        // The first subidentifier packs the first two arcs.
        let first = subidentifiers[0];
        let (a, b) = match first {
            0..=39 => (0, first),
            40..=79 => (1, first - 40),
            _ => (2, first - 80),
        };
        let mut inner = Vec::with_capacity(subidentifiers.len() + 1);
        inner.push(a);
        inner.push(b);
        inner.extend_from_slice(&subidentifiers[1..]);
        Ok(ObjectIdentifier { inner })
    }
}

impl Display for ObjectIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self.inner.first() {
            Some(n) => self.inner[1..]
                .iter()
                .fold(n.to_string(), |s, n| s + "." + &n.to_string()),
            None => String::new(),
        };
        write!(f, "{}", s)
    }
}

impl FromStr for ObjectIdentifier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let inner = s
            .split('.')
            .map(|arc| {
                arc.parse::<u64>()
                    .map_err(|_| Error::InvalidObjectIdentifier(format!("invalid arc '{}'", arc)))
            })
            .collect::<Result<Vec<u64>>>()?;
        if inner.len() < 2 {
            return Err(Error::InvalidObjectIdentifier(
                "too few arcs (need at least 2)".to_string(),
            ));
        }
        first_subidentifier(inner[0], inner[1])?;
        Ok(ObjectIdentifier { inner })
    }
}

impl PartialEq<&str> for ObjectIdentifier {
    fn eq(&self, other: &&str) -> bool {
        self.to_string() == *other
    }
}
