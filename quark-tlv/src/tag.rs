//! Wire tags for TLV values.

use crate::error::TlvError;

/// Type tag written as the first byte of every value.
///
/// # Wire Format
/// ```text
/// 0x01 INT32    4 bytes, little-endian two's complement
/// 0x02 FLOAT32  4 bytes, little-endian IEEE-754 bit pattern
/// 0x03 STRING   varint32 length, then that many UTF-8 bytes
/// ```
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    /// Signed 32-bit integer.
    Int32 = 0x01,
    /// 32-bit floating point.
    Float32 = 0x02,
    /// Length-delimited UTF-8 text.
    String = 0x03,
}

impl Tag {
    /// Encoded length of a tag in bytes.
    pub const ENCODED_LENGTH: usize = 1;

    /// Returns the tag's wire byte.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Parses a wire byte.
    #[must_use]
    pub const fn from_u8(byte: u8) -> Option<Self> {
        match byte {
            0x01 => Some(Self::Int32),
            0x02 => Some(Self::Float32),
            0x03 => Some(Self::String),
            _ => None,
        }
    }

    /// Returns the payload size for fixed-width tags.
    #[must_use]
    pub const fn fixed_size(self) -> Option<usize> {
        match self {
            Self::Int32 | Self::Float32 => Some(4),
            Self::String => None,
        }
    }

    /// Returns the tag's name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Int32 => "INT32",
            Self::Float32 => "FLOAT32",
            Self::String => "STRING",
        }
    }
}

impl TryFrom<u8> for Tag {
    type Error = TlvError;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        Self::from_u8(byte).ok_or(TlvError::UnknownTag(byte))
    }
}

impl From<Tag> for u8 {
    fn from(tag: Tag) -> Self {
        tag.as_u8()
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
