//! # der
//!
//! A sequential, bounds-checked reader over an immutable byte buffer.
//!
//! [`Stream`] is the cursor every public-key decoder reads through. It
//! covers the primitive shapes that show up on the wire:
//!
//! - big-endian fixed-size integers (`u8`, `u16`, `u32`)
//! - 16-bit and 32-bit length-prefixed strings (TLS and SSH framing)
//! - DER tag-length-value headers, including "holes": a header whose
//!   contents are left in the stream for the caller to read next
//!
//! Every read either advances the cursor by exactly the bytes it consumed
//! or fails. A read never runs past the end of the buffer.
//!
//! ```
//! use der::Stream;
//!
//! let data = [0x00, 0x00, 0x00, 0x03, b'a', b'b', b'c', 0x02, 0x01, 0x05];
//! let mut stream = Stream::new(&data);
//! assert_eq!(stream.read_string32(0, 16).unwrap(), b"abc");
//! assert_eq!(stream.read_integer().unwrap(), &[0x05]);
//! assert!(stream.is_empty());
//! ```

#![forbid(unsafe_code)]

use nom::number::complete::{be_u8, be_u16, be_u32};
use nom::{IResult, Parser};

pub mod error;
mod oid;

use error::{Error, Result};
pub use oid::ObjectIdentifier;

/// Maximum number of bytes in a long-form DER length field.
const MAX_LENGTH_OCTETS: usize = 4;

/// Universal DER tags used by public-key encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Tag {
    Integer,
    BitString,
    Null,
    ObjectIdentifier,
    Sequence,
    Other(u8),
}

impl From<u8> for Tag {
    fn from(value: u8) -> Self {
        match value {
            0x02 => Self::Integer,
            0x03 => Self::BitString,
            0x05 => Self::Null,
            0x06 => Self::ObjectIdentifier,
            0x30 => Self::Sequence,
            _ => Self::Other(value),
        }
    }
}

impl From<Tag> for u8 {
    fn from(tag: Tag) -> Self {
        match tag {
            Tag::Integer => 0x02,
            Tag::BitString => 0x03,
            Tag::Null => 0x05,
            Tag::ObjectIdentifier => 0x06,
            Tag::Sequence => 0x30,
            Tag::Other(value) => value,
        }
    }
}

/// Cursor over an input buffer.
#[derive(Debug, Clone)]
pub struct Stream<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Stream<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Current read offset from the start of the buffer.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Number of unread bytes.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    fn ensure(&self, needed: usize) -> Result<()> {
        let remaining = self.remaining();
        if needed > remaining {
            return Err(Error::Truncated { needed, remaining });
        }
        Ok(())
    }

    fn parse<O>(&mut self, parser: impl FnOnce(&'a [u8]) -> IResult<&'a [u8], O>) -> Result<O> {
        let input = &self.data[self.pos..];
        let (rest, output) = parser(input).map_err(|e| match e {
            nom::Err::Incomplete(_) => Error::Truncated {
                needed: input.len() + 1,
                remaining: input.len(),
            },
            nom::Err::Error(e) | nom::Err::Failure(e) => Error::Parser(e.code),
        })?;
        self.pos = self.data.len() - rest.len();
        Ok(output)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        self.ensure(1)?;
        self.parse(be_u8)
    }

    /// Returns the next byte without consuming it.
    pub fn peek_u8(&self) -> Result<u8> {
        self.ensure(1)?;
        Ok(self.data[self.pos])
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        self.ensure(2)?;
        self.parse(be_u16)
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        self.ensure(4)?;
        self.parse(be_u32)
    }

    pub fn read_bytes(&mut self, length: usize) -> Result<&'a [u8]> {
        self.ensure(length)?;
        self.parse(|input| nom::bytes::complete::take(length).parse(input))
    }

    pub fn skip(&mut self, length: usize) -> Result<()> {
        self.read_bytes(length).map(|_| ())
    }

    /// Reads a string prefixed by a big-endian 16-bit length.
    pub fn read_string16(&mut self, min: usize, max: usize) -> Result<&'a [u8]> {
        let length = self.read_u16()? as usize;
        check_length(length, min, max)?;
        self.read_bytes(length)
    }

    /// Reads a string prefixed by a big-endian 32-bit length.
    pub fn read_string32(&mut self, min: usize, max: usize) -> Result<&'a [u8]> {
        let length = self.read_u32()? as usize;
        check_length(length, min, max)?;
        self.read_bytes(length)
    }

    /// Reads a DER tag and definite length. The contents stay in the stream.
    pub fn read_tag_length(&mut self) -> Result<(Tag, usize)> {
        self.ensure(2)?;
        let tag = self.parse(be_u8)?;
        let length = self.read_length()?;
        Ok((Tag::from(tag), length))
    }

    fn read_length(&mut self) -> Result<usize> {
        let n = self.read_u8()?;
        if n & 0x80 == 0 {
            // short form: 0-127
            return Ok(n as usize);
        }
        // long form
        // Low 7 bits give the number of length octets that follow.
        let octets = (n & 0x7f) as usize;
        if octets == 0 {
            return Err(Error::IndefiniteLength);
        }
        if octets > MAX_LENGTH_OCTETS {
            return Err(Error::LengthTooLong(octets));
        }
        let bs = self.read_bytes(octets)?;
        let length = bs.iter().fold(0usize, |n, &b| (n << 8) | b as usize);
        // DER: the shortest form only
        if bs.first() == Some(&0) || length < 0x80 {
            return Err(Error::NonMinimalLength(length));
        }
        Ok(length)
    }

    /// Reads a header with the given tag and checks that its contents are
    /// present in full.
    pub fn read_header(&mut self, expected: Tag) -> Result<usize> {
        let (tag, length) = self.read_tag_length()?;
        if tag != expected {
            return Err(Error::UnexpectedTag {
                expected: expected.into(),
                actual: tag.into(),
            });
        }
        self.ensure(length)?;
        Ok(length)
    }

    /// Reads a SEQUENCE header and returns the length of its contents.
    pub fn read_sequence(&mut self) -> Result<usize> {
        self.read_header(Tag::Sequence)
    }

    /// Reads a header with any tag, leaving its contents in the stream.
    ///
    /// Used for wrappers that may arrive either universally or
    /// context-specifically tagged.
    pub fn read_generic_hole(&mut self, min_length: usize) -> Result<(Tag, usize)> {
        let (tag, length) = self.read_tag_length()?;
        if length < min_length {
            return Err(Error::LengthOutOfRange {
                length,
                min: min_length,
                max: usize::MAX,
            });
        }
        self.ensure(length)?;
        Ok((tag, length))
    }

    /// Reads a BIT STRING header and its unused-bits octet.
    ///
    /// Returns the length of the remaining contents, which are left in the
    /// stream. The unused-bits count must be zero.
    pub fn read_bit_string_hole(&mut self, min_length: usize) -> Result<usize> {
        let length = self.read_header(Tag::BitString)?;
        if length == 0 {
            return Err(Error::LengthOutOfRange {
                length,
                min: 1,
                max: usize::MAX,
            });
        }
        let unused = self.read_u8()?;
        if unused != 0 {
            return Err(Error::NonZeroUnusedBits(unused));
        }
        let length = length - 1;
        if length < min_length {
            return Err(Error::LengthOutOfRange {
                length,
                min: min_length,
                max: usize::MAX,
            });
        }
        Ok(length)
    }

    /// Reads an INTEGER and returns its raw two's-complement contents.
    pub fn read_integer(&mut self) -> Result<&'a [u8]> {
        let length = self.read_header(Tag::Integer)?;
        if length == 0 {
            return Err(Error::EmptyInteger);
        }
        self.read_bytes(length)
    }

    pub fn read_object_identifier(&mut self) -> Result<ObjectIdentifier> {
        let length = self.read_header(Tag::ObjectIdentifier)?;
        let data = self.read_bytes(length)?;
        ObjectIdentifier::try_from(data)
    }

    pub fn read_null(&mut self) -> Result<()> {
        let length = self.read_header(Tag::Null)?;
        if length != 0 {
            return Err(Error::NonEmptyNull);
        }
        Ok(())
    }
}

fn check_length(length: usize, min: usize, max: usize) -> Result<()> {
    if length < min || length > max {
        return Err(Error::LengthOutOfRange { length, min, max });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest(input, expected,
        case(vec![0x02, 0x00], (Tag::Integer, 0)),
        case(vec![0x30, 0x01, 0x00], (Tag::Sequence, 1)),
        case(vec![0x03, 0x81, 0x80], (Tag::BitString, 0x80)),
        case(vec![0x30, 0x82, 0x02, 0x10], (Tag::Sequence, 256 * 0x02 + 0x10)),
        case(vec![0x30, 0x83, 0x01, 0x00, 0x00], (Tag::Sequence, 256 * 256)),
        case(vec![0xa1, 0x82, 0xff, 0xff], (Tag::Other(0xa1), 256 * 0xff + 0xff)),
    )]
    fn test_read_tag_length(input: Vec<u8>, expected: (Tag, usize)) {
        let mut stream = Stream::new(&input);
        assert_eq!(stream.read_tag_length().unwrap(), expected);
    }

    #[rstest(input, expected,
        case(vec![0x30, 0x80], Error::IndefiniteLength),
        case(vec![0x30, 0x85, 0x01, 0x00, 0x00, 0x00, 0x00], Error::LengthTooLong(5)),
        case(vec![0x30], Error::Truncated { needed: 2, remaining: 1 }),
        case(vec![0x30, 0x82, 0x01], Error::Truncated { needed: 2, remaining: 1 }),
        case(vec![0x02, 0x81, 0x05], Error::NonMinimalLength(5)),
        case(vec![0x02, 0x81, 0x7f], Error::NonMinimalLength(0x7f)),
        case(vec![0x30, 0x82, 0x00, 0x80], Error::NonMinimalLength(0x80)),
        case(vec![0x30, 0x84, 0x00, 0x00, 0x01, 0x00], Error::NonMinimalLength(0x100)),
    )]
    fn test_read_tag_length_invalid(input: Vec<u8>, expected: Error) {
        let mut stream = Stream::new(&input);
        assert_eq!(stream.read_tag_length().unwrap_err(), expected);
    }

    #[test]
    fn test_fixed_width_reads() {
        let data = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07];
        let mut stream = Stream::new(&data);
        assert_eq!(stream.peek_u8().unwrap(), 0x01);
        assert_eq!(stream.read_u8().unwrap(), 0x01);
        assert_eq!(stream.read_u16().unwrap(), 0x0203);
        assert_eq!(stream.read_u32().unwrap(), 0x04050607);
        assert!(stream.is_empty());
        assert_eq!(
            stream.read_u8().unwrap_err(),
            Error::Truncated {
                needed: 1,
                remaining: 0
            }
        );
    }

    #[test]
    fn test_short_read_does_not_advance_past_end() {
        let data = [0x00, 0x01, 0x02];
        let mut stream = Stream::new(&data);
        assert!(stream.read_u32().is_err());
        assert!(stream.position() <= data.len());
        assert!(stream.read_bytes(4).is_err());
    }

    #[rstest(input, min, max, expected,
        case(vec![0x00, 0x00, 0x00, 0x02, 0x61, 0x62], 0, 8, Ok(b"ab".to_vec())),
        case(vec![0x00, 0x00, 0x00, 0x09, 0x61], 0, 8, Err(Error::LengthOutOfRange { length: 9, min: 0, max: 8 })),
        case(vec![0x00, 0x00, 0x00, 0x03, 0x61], 0, 8, Err(Error::Truncated { needed: 3, remaining: 1 })),
        case(vec![0x00, 0x00, 0x00, 0x00], 1, 8, Err(Error::LengthOutOfRange { length: 0, min: 1, max: 8 })),
    )]
    fn test_read_string32(input: Vec<u8>, min: usize, max: usize, expected: Result<Vec<u8>>) {
        let mut stream = Stream::new(&input);
        assert_eq!(stream.read_string32(min, max).map(|s| s.to_vec()), expected);
    }

    #[test]
    fn test_read_string16() {
        let data = [0x00, 0x03, 0x0a, 0x0b, 0x0c, 0xff];
        let mut stream = Stream::new(&data);
        assert_eq!(stream.read_string16(1, 4).unwrap(), &[0x0a, 0x0b, 0x0c]);
        assert_eq!(stream.remaining(), 1);
    }

    #[test]
    fn test_read_sequence_requires_contents() {
        let data = [0x30, 0x05, 0x02, 0x01, 0x01];
        let mut stream = Stream::new(&data);
        assert_eq!(
            stream.read_sequence().unwrap_err(),
            Error::Truncated {
                needed: 5,
                remaining: 3
            }
        );
    }

    #[test]
    fn test_read_sequence_wrong_tag() {
        let data = [0x31, 0x00];
        let mut stream = Stream::new(&data);
        assert_eq!(
            stream.read_sequence().unwrap_err(),
            Error::UnexpectedTag {
                expected: 0x30,
                actual: 0x31
            }
        );
    }

    #[test]
    fn test_read_generic_hole_accepts_any_tag() {
        let data = [0xa0, 0x03, 0x02, 0x01, 0x07];
        let mut stream = Stream::new(&data);
        let (tag, length) = stream.read_generic_hole(3).unwrap();
        assert_eq!(tag, Tag::Other(0xa0));
        assert_eq!(length, 3);
        assert_eq!(stream.read_integer().unwrap(), &[0x07]);

        let mut stream = Stream::new(&data);
        assert!(stream.read_generic_hole(4).is_err());
    }

    #[rstest(input, expected,
        case(vec![0x03, 0x03, 0x00, 0x04, 0x01], Ok(2)),
        case(vec![0x03, 0x03, 0x06, 0x6e, 0x5d], Err(Error::NonZeroUnusedBits(6))),
        case(vec![0x03, 0x00], Err(Error::LengthOutOfRange { length: 0, min: 1, max: usize::MAX })),
        case(vec![0x04, 0x01, 0x00], Err(Error::UnexpectedTag { expected: 0x03, actual: 0x04 })),
    )]
    fn test_read_bit_string_hole(input: Vec<u8>, expected: Result<usize>) {
        let mut stream = Stream::new(&input);
        assert_eq!(stream.read_bit_string_hole(0), expected);
    }

    #[rstest(input, expected,
        case(vec![0x02, 0x01, 0x01], Ok(vec![0x01])),
        case(vec![0x02, 0x02, 0x00, 0x80], Ok(vec![0x00, 0x80])),
        case(vec![0x02, 0x00], Err(Error::EmptyInteger)),
        case(vec![0x02, 0x02, 0x01], Err(Error::Truncated { needed: 2, remaining: 1 })),
    )]
    fn test_read_integer(input: Vec<u8>, expected: Result<Vec<u8>>) {
        let mut stream = Stream::new(&input);
        assert_eq!(stream.read_integer().map(|i| i.to_vec()), expected);
    }

    #[test]
    fn test_read_object_identifier() {
        let data = [0x06, 0x08, 0x2a, 0x86, 0x48, 0xce, 0x3d, 0x03, 0x01, 0x07];
        let mut stream = Stream::new(&data);
        let oid = stream.read_object_identifier().unwrap();
        assert_eq!(oid.to_string(), "1.2.840.10045.3.1.7");
    }

    #[rstest(input, expected,
        case(vec![0x05, 0x00], Ok(())),
        case(vec![0x05, 0x01, 0x00], Err(Error::NonEmptyNull)),
    )]
    fn test_read_null(input: Vec<u8>, expected: Result<()>) {
        let mut stream = Stream::new(&input);
        assert_eq!(stream.read_null(), expected);
    }
}
