//! Length-delimited byte fields.
//!
//! A field is a varint32 length followed by that many raw bytes. Reading one
//! hands back a view into the stream's own block whenever the bytes are
//! contiguous, and only copies when the field straddles a block boundary.

use std::ops::Deref;

use bytes::{Bytes, BytesMut};

use crate::coded::{read_varint32, write_varint32};
use crate::error::{DecodeError, EncodeError};
use crate::stream::{InputStream, OutputStream};

/// Default cap on a declared field length: anything a varint32 can express.
pub const DEFAULT_MAX_LENGTH: usize = u32::MAX as usize;

/// Largest up-front allocation for a field that spans blocks.
///
/// The copy grows past this only as bytes actually arrive, so a bogus length
/// prefix costs at most this much before the read fails as truncated.
pub const OWNED_PREALLOCATE_LIMIT: usize = 64 * 1024;

/// Limits applied while decoding length-delimited fields.
///
/// By default every length the wire format can carry is accepted. Set a
/// lower [`max_length`](Self::with_max_length) to reject oversized fields
/// before reading any of their bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeLimits {
    max_length: usize,
}

impl DecodeLimits {
    /// Creates limits with default settings.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_length: DEFAULT_MAX_LENGTH,
        }
    }

    /// Sets the largest accepted field length in bytes.
    #[must_use]
    pub const fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    /// Returns the largest accepted field length in bytes.
    #[must_use]
    pub const fn max_length(&self) -> usize {
        self.max_length
    }
}

impl Default for DecodeLimits {
    fn default() -> Self {
        Self::new()
    }
}

/// Bytes of a decoded field.
///
/// `Borrowed` points into the memory the input stream reads from and lives as
/// long as that memory. `Owned` holds a copy made because the field spanned
/// several blocks; the copy is reference counted and cheap to clone.
#[derive(Debug, Clone)]
pub enum Payload<'a> {
    /// View into the stream's underlying memory.
    Borrowed(&'a [u8]),
    /// Materialized copy of a field that crossed a block boundary.
    Owned(Bytes),
}

impl<'a> Payload<'a> {
    /// Returns true if no copy was made.
    #[must_use]
    pub fn is_borrowed(&self) -> bool {
        matches!(self, Self::Borrowed(_))
    }

    /// Returns the payload as bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Borrowed(bytes) => bytes,
            Self::Owned(bytes) => bytes,
        }
    }

    /// Returns the payload as UTF-8 text.
    ///
    /// # Errors
    /// Returns [`DecodeError::InvalidUtf8`] if the bytes are not valid UTF-8.
    pub fn as_str(&self) -> Result<&str, DecodeError> {
        std::str::from_utf8(self.as_bytes()).map_err(|e| DecodeError::InvalidUtf8 {
            offset: e.valid_up_to(),
        })
    }

    /// Converts into shared bytes, copying only if the payload is borrowed.
    #[must_use]
    pub fn into_bytes(self) -> Bytes {
        match self {
            Self::Borrowed(bytes) => Bytes::copy_from_slice(bytes),
            Self::Owned(bytes) => bytes,
        }
    }

    /// Detaches the payload from the input's lifetime.
    #[must_use]
    pub fn into_owned(self) -> Payload<'static> {
        Payload::Owned(self.into_bytes())
    }
}

impl Deref for Payload<'_> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl AsRef<[u8]> for Payload<'_> {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl PartialEq for Payload<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for Payload<'_> {}

impl PartialEq<[u8]> for Payload<'_> {
    fn eq(&self, other: &[u8]) -> bool {
        self.as_bytes() == other
    }
}

impl PartialEq<&[u8]> for Payload<'_> {
    fn eq(&self, other: &&[u8]) -> bool {
        self.as_bytes() == *other
    }
}

/// Writes `bytes` prefixed with its varint32 length.
///
/// # Errors
/// - [`EncodeError::LengthOverflow`] if `bytes` is longer than `u32::MAX`
/// - [`EncodeError::OutOfSpace`] if the stream runs out of blocks
pub fn write_length_delimited<S: OutputStream + ?Sized>(
    output: &mut S,
    bytes: &[u8],
) -> Result<(), EncodeError> {
    let length = u32::try_from(bytes.len()).map_err(|_| EncodeError::LengthOverflow {
        length: bytes.len(),
    })?;
    write_varint32(output, length)?;
    output.write_raw(bytes)
}

/// Reads a length-delimited field with default [`DecodeLimits`].
///
/// # Errors
/// See [`read_length_delimited_with`].
pub fn read_length_delimited<'a, S: InputStream<'a> + ?Sized>(
    input: &mut S,
) -> Result<Payload<'a>, DecodeError> {
    read_length_delimited_with(input, &DecodeLimits::new())
}

/// Reads a length-delimited field.
///
/// Returns [`Payload::Borrowed`] when the current block holds the whole field
/// and backs up the rest of the block. Otherwise copies exactly the declared
/// length across blocks into an owned buffer.
///
/// # Errors
/// - Any varint error from reading the length prefix
/// - [`DecodeError::LengthLimitExceeded`] if the length is over the limit
/// - [`DecodeError::Truncated`] if the stream ends before the field does; the
///   bytes copied so far stay consumed
pub fn read_length_delimited_with<'a, S: InputStream<'a> + ?Sized>(
    input: &mut S,
    limits: &DecodeLimits,
) -> Result<Payload<'a>, DecodeError> {
    let length = read_varint32(input)? as usize;
    if length > limits.max_length {
        tracing::debug!(
            "field length {} exceeds limit {}",
            length,
            limits.max_length
        );
        return Err(DecodeError::LengthLimitExceeded {
            length,
            max: limits.max_length,
        });
    }
    if length == 0 {
        return Ok(Payload::Borrowed(&[]));
    }

    match input.next() {
        Some(block) if block.len() >= length => {
            input.back_up(block.len() - length);
            Ok(Payload::Borrowed(&block[..length]))
        }
        Some(block) => {
            input.back_up(block.len());
            tracing::trace!("field of {} bytes spans blocks, copying", length);
            let mut owned = BytesMut::with_capacity(length.min(OWNED_PREALLOCATE_LIMIT));
            while owned.len() < length {
                let Some(block) = input.next() else {
                    return Err(DecodeError::truncated(length, owned.len()));
                };
                let take = block.len().min(length - owned.len());
                owned.extend_from_slice(&block[..take]);
                input.back_up(block.len() - take);
            }
            Ok(Payload::Owned(owned.freeze()))
        }
        None => Err(DecodeError::truncated(length, 0)),
    }
}
