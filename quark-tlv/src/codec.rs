//! Typed TLV serialization.
//!
//! Each value is one tag byte followed by its payload:
//!
//! ```text
//! INT32    [0x01][fixed32 LE]
//! FLOAT32  [0x02][fixed32 LE bit pattern]
//! STRING   [0x03][varint32 length][bytes]
//! ```
//!
//! Deserializers check the tag first. A wrong tag is reported as
//! [`TlvError::TypeMismatch`] and the tag byte is left unread, so the caller
//! can retry with the right deserializer.

use quark_core::{
    DecodeError, DecodeLimits, InputStream, OutputStream, Payload, read_fixed32,
    read_length_delimited_with, write_fixed32, write_length_delimited,
};

use crate::error::{Result, TlvError};
use crate::tag::Tag;

/// Writes a single tag byte.
#[inline]
pub(crate) fn write_tag<S: OutputStream + ?Sized>(output: &mut S, tag: Tag) -> Result<()> {
    output.write_raw(&[tag.as_u8()])?;
    Ok(())
}

/// Peeks the next tag byte, returning it with the length of its block.
///
/// The whole block is counted as consumed; callers back up what they do not
/// keep. An empty block from a misbehaving stream reads as end of input.
fn peek_tag_byte<'a, S: InputStream<'a> + ?Sized>(input: &mut S) -> Result<(u8, usize)> {
    match input.next() {
        Some(block) => match block.first() {
            Some(&byte) => Ok((byte, block.len())),
            None => Err(DecodeError::truncated(Tag::ENCODED_LENGTH, 0).into()),
        },
        None => Err(DecodeError::truncated(Tag::ENCODED_LENGTH, 0).into()),
    }
}

/// Reads and parses a tag byte.
///
/// An unknown byte is left unread.
pub(crate) fn read_tag<'a, S: InputStream<'a> + ?Sized>(input: &mut S) -> Result<Tag> {
    let (byte, len) = peek_tag_byte(input)?;
    match Tag::from_u8(byte) {
        Some(tag) => {
            input.back_up(len - 1);
            Ok(tag)
        }
        None => {
            input.back_up(len);
            tracing::debug!("unknown tag byte {:#04x}", byte);
            Err(TlvError::UnknownTag(byte))
        }
    }
}

/// Consumes the tag byte if it matches `expected`.
fn expect_tag<'a, S: InputStream<'a> + ?Sized>(input: &mut S, expected: Tag) -> Result<()> {
    let (actual, len) = peek_tag_byte(input)?;
    if actual != expected.as_u8() {
        input.back_up(len);
        tracing::debug!("expected {} tag, found {:#04x}", expected, actual);
        return Err(TlvError::TypeMismatch { expected, actual });
    }
    input.back_up(len - 1);
    Ok(())
}

/// Serializes an INT32 value.
///
/// # Errors
/// Returns [`TlvError::Encode`] if the output runs out of space.
pub fn serialize_int32<S: OutputStream + ?Sized>(output: &mut S, value: i32) -> Result<()> {
    write_tag(output, Tag::Int32)?;
    write_fixed32(output, value as u32)?;
    Ok(())
}

/// Serializes a FLOAT32 value, preserving its exact bit pattern.
///
/// # Errors
/// Returns [`TlvError::Encode`] if the output runs out of space.
pub fn serialize_float32<S: OutputStream + ?Sized>(output: &mut S, value: f32) -> Result<()> {
    write_tag(output, Tag::Float32)?;
    write_fixed32(output, value.to_bits())?;
    Ok(())
}

/// Serializes a STRING value.
///
/// # Errors
/// Returns [`TlvError::Encode`] if the output runs out of space or the text
/// is longer than a varint32 length can describe.
pub fn serialize_string<S: OutputStream + ?Sized>(output: &mut S, value: &str) -> Result<()> {
    serialize_string_bytes(output, value.as_bytes())
}

/// Serializes already-validated UTF-8 bytes as a STRING value.
pub(crate) fn serialize_string_bytes<S: OutputStream + ?Sized>(
    output: &mut S,
    bytes: &[u8],
) -> Result<()> {
    write_tag(output, Tag::String)?;
    write_length_delimited(output, bytes)?;
    Ok(())
}

/// Deserializes an INT32 value.
///
/// # Errors
/// - [`TlvError::TypeMismatch`] if the tag is not INT32
/// - [`TlvError::Decode`] if the input is truncated
pub fn deserialize_int32<'a, S: InputStream<'a> + ?Sized>(input: &mut S) -> Result<i32> {
    expect_tag(input, Tag::Int32)?;
    Ok(read_fixed32(input)? as i32)
}

/// Deserializes a FLOAT32 value bit for bit, NaN payloads included.
///
/// # Errors
/// - [`TlvError::TypeMismatch`] if the tag is not FLOAT32
/// - [`TlvError::Decode`] if the input is truncated
pub fn deserialize_float32<'a, S: InputStream<'a> + ?Sized>(input: &mut S) -> Result<f32> {
    expect_tag(input, Tag::Float32)?;
    Ok(f32::from_bits(read_fixed32(input)?))
}

/// Deserializes a STRING value with default [`DecodeLimits`].
///
/// # Errors
/// See [`deserialize_string_with`].
pub fn deserialize_string<'a, S: InputStream<'a> + ?Sized>(input: &mut S) -> Result<Payload<'a>> {
    deserialize_string_with(input, &DecodeLimits::new())
}

/// Deserializes a STRING value.
///
/// The returned payload borrows from the input when the text sits in one
/// block and owns a copy otherwise. Its bytes are known to be valid UTF-8.
///
/// # Errors
/// - [`TlvError::TypeMismatch`] if the tag is not STRING
/// - [`TlvError::Decode`] if the input is truncated, the length is over the
///   limit, or the bytes are not UTF-8
pub fn deserialize_string_with<'a, S: InputStream<'a> + ?Sized>(
    input: &mut S,
    limits: &DecodeLimits,
) -> Result<Payload<'a>> {
    expect_tag(input, Tag::String)?;
    read_string_payload(input, limits)
}

/// Reads the payload of a STRING whose tag has already been consumed.
pub(crate) fn read_string_payload<'a, S: InputStream<'a> + ?Sized>(
    input: &mut S,
    limits: &DecodeLimits,
) -> Result<Payload<'a>> {
    let payload = read_length_delimited_with(input, limits)?;
    payload.as_str()?;
    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use quark_core::{BufferInput, BufferOutput, GrowableOutput, MultiBufferInput};

    fn encode_with<F>(f: F) -> Vec<u8>
    where
        F: FnOnce(&mut GrowableOutput) -> Result<()>,
    {
        let mut output = GrowableOutput::new();
        f(&mut output).expect("serialize");
        output.as_slice().to_vec()
    }

    #[test]
    fn test_int32_42() {
        let bytes = encode_with(|out| serialize_int32(out, 42));
        assert_eq!(bytes, vec![0x01, 0x2A, 0x00, 0x00, 0x00]);

        let mut input = BufferInput::new(&bytes);
        assert_eq!(deserialize_int32(&mut input), Ok(42));
        assert!(input.at_end());
    }

    #[test]
    fn test_int32_extremes() {
        for value in [192, i32::MIN, i32::MAX, -1, 0] {
            let bytes = encode_with(|out| serialize_int32(out, value));
            let mut input = BufferInput::new(&bytes);
            assert_eq!(deserialize_int32(&mut input), Ok(value));
        }
    }

    #[test]
    fn test_string_hi() {
        let bytes = encode_with(|out| serialize_string(out, "hi"));
        assert_eq!(bytes, vec![0x03, 0x02, 0x68, 0x69]);

        let mut input = BufferInput::new(&bytes);
        let payload = deserialize_string(&mut input).expect("deserialize");
        assert_eq!(payload.as_str(), Ok("hi"));
        assert!(payload.is_borrowed());
    }

    #[test]
    fn test_string_cases() {
        let long = "x".repeat(10_000);
        for value in ["hello world", "", long.as_str(), "héllo wörld ✓"] {
            let bytes = encode_with(|out| serialize_string(out, value));
            let mut input = BufferInput::new(&bytes);
            let payload = deserialize_string(&mut input).expect("deserialize");
            assert_eq!(payload.as_str(), Ok(value));
        }
    }

    #[test]
    fn test_float32_special_values_bit_exact() {
        let values = [
            std::f32::consts::PI,
            f32::NAN,
            -f32::NAN,
            f32::from_bits(0x7FC0_0001),
            f32::from_bits(0x7F80_0001),
            f32::INFINITY,
            f32::NEG_INFINITY,
            -0.0,
            f32::MIN_POSITIVE,
        ];
        for value in values {
            let bytes = encode_with(|out| serialize_float32(out, value));
            assert_eq!(bytes[0], 0x02);
            assert_eq!(&bytes[1..], &value.to_bits().to_le_bytes());

            let mut input = BufferInput::new(&bytes);
            let decoded = deserialize_float32(&mut input).expect("deserialize");
            assert_eq!(decoded.to_bits(), value.to_bits());
        }
    }

    #[test]
    fn test_tag_mismatch() {
        let bytes = encode_with(|out| serialize_float32(out, 1.5));
        let mut input = BufferInput::new(&bytes);

        let err = deserialize_int32(&mut input).unwrap_err();
        assert_eq!(
            err,
            TlvError::TypeMismatch {
                expected: Tag::Int32,
                actual: 0x02
            }
        );
        assert!(!err.is_truncated());

        // tag byte is left for the right deserializer
        assert_eq!(input.byte_count(), 0);
        assert_eq!(deserialize_float32(&mut input), Ok(1.5));
    }

    #[test]
    fn test_string_tag_mismatch() {
        let bytes = encode_with(|out| serialize_int32(out, 7));
        let mut input = BufferInput::new(&bytes);
        assert!(deserialize_string(&mut input).unwrap_err().is_type_mismatch());
    }

    #[test]
    fn test_truncated_int32() {
        let bytes = [0x01, 0x2A, 0x00];
        let mut input = BufferInput::new(&bytes);

        let err = deserialize_int32(&mut input).unwrap_err();
        assert!(err.is_truncated());
        assert!(!err.is_type_mismatch());
        assert_eq!(err, TlvError::Decode(DecodeError::truncated(4, 2)));
    }

    #[test]
    fn test_empty_input_is_truncated() {
        let mut input = BufferInput::new(&[]);
        assert!(deserialize_int32(&mut input).unwrap_err().is_truncated());
        assert!(deserialize_string(&mut input).unwrap_err().is_truncated());
    }

    #[test]
    fn test_string_straddles_chunks() {
        let chunks: [&[u8]; 4] = [&[0x03, 0x05], b"ab", b"cd", b"ef"];
        let mut input = MultiBufferInput::new(chunks);

        let payload = deserialize_string(&mut input).expect("deserialize");
        assert_eq!(payload.as_str(), Ok("abcde"));
        assert!(!payload.is_borrowed());
        assert_eq!(input.next(), Some(&b"f"[..]));
    }

    #[test]
    fn test_string_starting_mid_chunk() {
        let chunks: [&[u8]; 3] = [&[0x03, 0x05, b'a', b'b'], b"cd", b"ef"];
        let mut input = MultiBufferInput::new(chunks);

        let payload = deserialize_string(&mut input).expect("deserialize");
        assert_eq!(payload.as_str(), Ok("abcde"));
        assert!(!payload.is_borrowed());
    }

    #[test]
    fn test_string_rejects_invalid_utf8() {
        let bytes = [0x03, 0x02, 0xC3, 0x28];
        let mut input = BufferInput::new(&bytes);
        assert_eq!(
            deserialize_string(&mut input),
            Err(TlvError::Decode(DecodeError::InvalidUtf8 { offset: 0 }))
        );
    }

    #[test]
    fn test_string_length_limit() {
        let bytes = encode_with(|out| serialize_string(out, "too long"));
        let limits = DecodeLimits::new().with_max_length(4);
        let mut input = BufferInput::new(&bytes);
        assert!(matches!(
            deserialize_string_with(&mut input, &limits),
            Err(TlvError::Decode(DecodeError::LengthLimitExceeded { .. }))
        ));
    }

    #[test]
    fn test_string_past_64_mib_round_trips_with_default_limits() {
        let value = "x".repeat(65 * 1024 * 1024);
        let bytes = encode_with(|out| serialize_string(out, &value));

        let mut input = BufferInput::new(&bytes);
        let payload = deserialize_string(&mut input).expect("deserialize");
        assert!(payload.is_borrowed());
        assert_eq!(payload.len(), value.len());
        assert_eq!(payload.as_str(), Ok(value.as_str()));
        assert!(input.at_end());
    }

    /// Stream that breaks the non-empty block contract.
    struct EmptyBlocks;

    impl InputStream<'static> for EmptyBlocks {
        fn next(&mut self) -> Option<&'static [u8]> {
            Some(&[])
        }

        fn back_up(&mut self, count: usize) {
            assert_eq!(count, 0, "nothing to back up");
        }

        fn byte_count(&self) -> u64 {
            0
        }
    }

    #[test]
    fn test_empty_block_reads_as_truncated() {
        assert_eq!(
            deserialize_int32(&mut EmptyBlocks),
            Err(TlvError::Decode(DecodeError::truncated(1, 0)))
        );
        assert!(read_tag(&mut EmptyBlocks).is_err_and(|e| e.is_truncated()));
    }

    #[test]
    fn test_serialize_into_full_buffer() {
        let mut buf = [0u8; 3];
        let mut output = BufferOutput::new(&mut buf);
        assert!(matches!(
            serialize_int32(&mut output, 1),
            Err(TlvError::Encode(_))
        ));
    }

    #[test]
    fn test_mixed_sequence() {
        let bytes = encode_with(|out| {
            serialize_int32(out, -5)?;
            serialize_string(out, "quark")?;
            serialize_float32(out, 2.5)
        });

        let mut input = BufferInput::new(&bytes);
        assert_eq!(deserialize_int32(&mut input), Ok(-5));
        assert_eq!(
            deserialize_string(&mut input).expect("string").as_str(),
            Ok("quark")
        );
        assert_eq!(deserialize_float32(&mut input), Ok(2.5));
        assert!(input.at_end());
    }

    proptest! {
        #[test]
        fn int32_round_trip(value in any::<i32>()) {
            let bytes = encode_with(|out| serialize_int32(out, value));
            let mut input = MultiBufferInput::new(bytes.chunks(2));
            prop_assert_eq!(deserialize_int32(&mut input), Ok(value));
        }

        #[test]
        fn float32_round_trip_bits(bits in any::<u32>()) {
            let value = f32::from_bits(bits);
            let bytes = encode_with(|out| serialize_float32(out, value));
            let mut input = BufferInput::new(&bytes);
            let decoded = deserialize_float32(&mut input).expect("deserialize");
            prop_assert_eq!(decoded.to_bits(), bits);
        }

        #[test]
        fn string_round_trip(value in any::<String>(), chunk in 1usize..16) {
            let bytes = encode_with(|out| serialize_string(out, &value));
            let mut input = MultiBufferInput::new(bytes.chunks(chunk));
            let payload = deserialize_string(&mut input).expect("deserialize");
            prop_assert_eq!(payload.as_str(), Ok(value.as_str()));
        }
    }
}
