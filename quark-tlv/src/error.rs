//! Error types for TLV operations.

use quark_core::{DecodeError, EncodeError};
use thiserror::Error;

use crate::tag::Tag;

/// Error type for TLV encoding and decoding.
///
/// A [`TypeMismatch`](Self::TypeMismatch) means the bytes hold a well-formed
/// value of another type. [`Decode`](Self::Decode) means they are short or
/// corrupt. Callers can tell the two apart without inspecting messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TlvError {
    /// The tag byte names a different type than the one requested.
    #[error("type mismatch: expected {expected}, actual tag {actual:#04x}")]
    TypeMismatch {
        /// Tag the caller asked for.
        expected: Tag,
        /// Tag byte found on the wire.
        actual: u8,
    },

    /// The tag byte is not a known tag.
    #[error("unknown tag {0:#04x}")]
    UnknownTag(u8),

    /// Truncated or malformed input.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Output stream failure.
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

impl TlvError {
    /// Returns true for a tag that does not match the requested type.
    #[must_use]
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, Self::TypeMismatch { .. })
    }

    /// Returns true if the input ran out before the value was complete.
    #[must_use]
    pub fn is_truncated(&self) -> bool {
        matches!(self, Self::Decode(e) if e.is_truncated())
    }
}

/// Result type alias for TLV operations.
pub type Result<T> = std::result::Result<T, TlvError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_mismatch_display() {
        let err = TlvError::TypeMismatch {
            expected: Tag::Int32,
            actual: 0x02,
        };
        assert_eq!(
            err.to_string(),
            "type mismatch: expected INT32, actual tag 0x02"
        );
        assert!(err.is_type_mismatch());
        assert!(!err.is_truncated());
    }

    #[test]
    fn test_decode_is_transparent() {
        let err = TlvError::from(DecodeError::truncated(5, 3));
        assert_eq!(err.to_string(), DecodeError::truncated(5, 3).to_string());
        assert!(err.is_truncated());
        assert!(!err.is_type_mismatch());
    }

    #[test]
    fn test_malformed_is_not_truncated() {
        let err = TlvError::from(DecodeError::VarintTooLong { max_bytes: 5 });
        assert!(!err.is_truncated());
    }

    #[test]
    fn test_unknown_tag_display() {
        assert_eq!(TlvError::UnknownTag(0x7F).to_string(), "unknown tag 0x7f");
    }
}
