//! Error types for Quark stream codecs.
//!
//! Decode and encode failures are ordinary, recoverable results. Misuse of the
//! stream contract (backing up more than was handed out) is not represented
//! here: it panics, because it means the caller's bookkeeping is corrupt.

use thiserror::Error;

/// Error raised while decoding from an [`InputStream`](crate::stream::InputStream).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The stream ended before the value was complete.
    #[error("truncated input: required {required} bytes, available {available} bytes")]
    Truncated {
        /// Bytes the decoder needed.
        required: usize,
        /// Bytes the stream could actually supply.
        available: usize,
    },

    /// A varint kept its continuation bit set past the width guard.
    #[error("malformed varint: continuation past {max_bytes} bytes")]
    VarintTooLong {
        /// Maximum encoded length for the target width.
        max_bytes: usize,
    },

    /// The last permitted varint byte carries bits beyond the target width.
    #[error("varint overflows {bits}-bit target")]
    VarintOverflow {
        /// Target width in bits.
        bits: u32,
    },

    /// A declared length exceeds the configured decode limit.
    #[error("length {length} exceeds limit of {max} bytes")]
    LengthLimitExceeded {
        /// Declared length on the wire.
        length: usize,
        /// Configured maximum.
        max: usize,
    },

    /// Payload bytes are not valid UTF-8.
    #[error("invalid UTF-8 at offset {offset}")]
    InvalidUtf8 {
        /// Offset of the first invalid byte within the payload.
        offset: usize,
    },
}

impl DecodeError {
    /// Creates a truncated input error.
    #[must_use]
    pub fn truncated(required: usize, available: usize) -> Self {
        Self::Truncated {
            required,
            available,
        }
    }

    /// Returns true if the input simply ran out, as opposed to being malformed.
    #[must_use]
    pub fn is_truncated(&self) -> bool {
        matches!(self, Self::Truncated { .. })
    }
}

/// Error raised while encoding into an [`OutputStream`](crate::stream::OutputStream).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// The backend could not hand out another block.
    #[error("output exhausted: wrote {written} of {requested} bytes")]
    OutOfSpace {
        /// Bytes the caller asked to write.
        requested: usize,
        /// Bytes committed before the backend ran out.
        written: usize,
    },

    /// A length-delimited payload does not fit a varint32 length prefix.
    #[error("payload of {length} bytes exceeds the 32-bit length prefix")]
    LengthOverflow {
        /// Payload length in bytes.
        length: usize,
    },
}

impl EncodeError {
    /// Creates an out of space error.
    #[must_use]
    pub fn out_of_space(requested: usize, written: usize) -> Self {
        Self::OutOfSpace { requested, written }
    }
}
