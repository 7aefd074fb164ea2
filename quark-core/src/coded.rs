//! Varint and fixed-width integer codecs.
//!
//! Everything here goes through the [`InputStream`] / [`OutputStream`] traits
//! and never touches a backend directly.
//!
//! # Wire Format
//! ```text
//! varint:  7 data bits per byte, least significant group first,
//!          high bit set on every byte except the last
//! fixed32: 4 bytes, little-endian
//! fixed64: 8 bytes, little-endian
//! ```

use crate::error::{DecodeError, EncodeError};
use crate::stream::{InputStream, OutputStream};

/// Maximum encoded length of a 32-bit varint.
pub const MAX_VARINT32_BYTES: usize = 5;

/// Maximum encoded length of a 64-bit varint.
pub const MAX_VARINT64_BYTES: usize = 10;

/// Returns the encoded length of `value` as a varint.
#[inline]
#[must_use]
pub const fn varint32_len(value: u32) -> usize {
    ((32 - (value | 1).leading_zeros()) as usize).div_ceil(7)
}

/// Returns the encoded length of `value` as a varint.
#[inline]
#[must_use]
pub const fn varint64_len(value: u64) -> usize {
    ((64 - (value | 1).leading_zeros()) as usize).div_ceil(7)
}

/// Writes `value` as a varint of at most [`MAX_VARINT32_BYTES`] bytes.
///
/// # Errors
/// Returns [`EncodeError::OutOfSpace`] if the stream runs out of blocks.
#[inline]
pub fn write_varint32<S: OutputStream + ?Sized>(
    output: &mut S,
    value: u32,
) -> Result<(), EncodeError> {
    write_varint64(output, u64::from(value))
}

/// Writes `value` as a varint of at most [`MAX_VARINT64_BYTES`] bytes.
///
/// # Errors
/// Returns [`EncodeError::OutOfSpace`] if the stream runs out of blocks.
pub fn write_varint64<S: OutputStream + ?Sized>(
    output: &mut S,
    mut value: u64,
) -> Result<(), EncodeError> {
    let mut tmp = [0u8; MAX_VARINT64_BYTES];
    let mut len = 0;
    while value >= 0x80 {
        tmp[len] = (value as u8) | 0x80;
        value >>= 7;
        len += 1;
    }
    tmp[len] = value as u8;
    output.write_raw(&tmp[..=len])
}

/// Reads a varint into a `u32`.
///
/// # Errors
/// - [`DecodeError::Truncated`] if the stream ends inside the varint
/// - [`DecodeError::VarintTooLong`] if the fifth byte still has its
///   continuation bit set
/// - [`DecodeError::VarintOverflow`] if the fifth byte carries bits above 32
pub fn read_varint32<'a, S: InputStream<'a> + ?Sized>(input: &mut S) -> Result<u32, DecodeError> {
    read_varint(input, 32).map(|value| value as u32)
}

/// Reads a varint into a `u64`.
///
/// # Errors
/// Same as [`read_varint32`] with a ten byte guard.
pub fn read_varint64<'a, S: InputStream<'a> + ?Sized>(input: &mut S) -> Result<u64, DecodeError> {
    read_varint(input, 64)
}

/// Decodes groups straight out of whatever blocks the stream exposes.
///
/// Termination is bounded by the width guard, not by the input.
fn read_varint<'a, S: InputStream<'a> + ?Sized>(
    input: &mut S,
    bits: u32,
) -> Result<u64, DecodeError> {
    let max_bytes = (bits as usize).div_ceil(7);
    let mut value = 0u64;
    let mut consumed = 0usize;

    loop {
        let Some(block) = input.next() else {
            return Err(DecodeError::truncated(consumed + 1, consumed));
        };
        debug_assert!(!block.is_empty());

        for (index, &byte) in block.iter().enumerate() {
            let shift = 7 * consumed as u32;
            let group = u64::from(byte & 0x7F);
            consumed += 1;

            if consumed == max_bytes {
                let error = if byte & 0x80 != 0 {
                    Some(DecodeError::VarintTooLong { max_bytes })
                } else if group >> (bits - shift) != 0 {
                    Some(DecodeError::VarintOverflow { bits })
                } else {
                    None
                };
                if let Some(error) = error {
                    input.back_up(block.len() - index - 1);
                    tracing::debug!("rejecting varint: {}", error);
                    return Err(error);
                }
            }

            value |= group << shift;
            if byte & 0x80 == 0 {
                input.back_up(block.len() - index - 1);
                return Ok(value);
            }
        }
    }
}

/// Writes `value` as 4 little-endian bytes.
///
/// # Errors
/// Returns [`EncodeError::OutOfSpace`] if the stream runs out of blocks.
#[inline]
pub fn write_fixed32<S: OutputStream + ?Sized>(
    output: &mut S,
    value: u32,
) -> Result<(), EncodeError> {
    output.write_raw(&value.to_le_bytes())
}

/// Writes `value` as 8 little-endian bytes.
///
/// # Errors
/// Returns [`EncodeError::OutOfSpace`] if the stream runs out of blocks.
#[inline]
pub fn write_fixed64<S: OutputStream + ?Sized>(
    output: &mut S,
    value: u64,
) -> Result<(), EncodeError> {
    output.write_raw(&value.to_le_bytes())
}

/// Reads 4 little-endian bytes.
///
/// # Errors
/// Returns [`DecodeError::Truncated`] if fewer than 4 bytes remain.
#[inline]
pub fn read_fixed32<'a, S: InputStream<'a> + ?Sized>(input: &mut S) -> Result<u32, DecodeError> {
    read_fixed::<_, 4>(input).map(u32::from_le_bytes)
}

/// Reads 8 little-endian bytes.
///
/// # Errors
/// Returns [`DecodeError::Truncated`] if fewer than 8 bytes remain.
#[inline]
pub fn read_fixed64<'a, S: InputStream<'a> + ?Sized>(input: &mut S) -> Result<u64, DecodeError> {
    read_fixed::<_, 8>(input).map(u64::from_le_bytes)
}

/// Copies `N` bytes out of the current block, or stitches them across
/// blocks when a boundary falls inside the value.
fn read_fixed<'a, S: InputStream<'a> + ?Sized, const N: usize>(
    input: &mut S,
) -> Result<[u8; N], DecodeError> {
    let mut bytes = [0u8; N];
    match input.next() {
        Some(block) if block.len() >= N => {
            bytes.copy_from_slice(&block[..N]);
            input.back_up(block.len() - N);
        }
        Some(block) => {
            input.back_up(block.len());
            input.read_raw(&mut bytes)?;
        }
        None => return Err(DecodeError::truncated(N, 0)),
    }
    Ok(bytes)
}
