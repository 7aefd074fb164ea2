//! Dynamically typed TLV values.

use std::marker::PhantomData;

use bytes::Bytes;
use quark_core::{
    BufferInput, DecodeLimits, GrowableOutput, InputStream, OutputStream, Payload, read_fixed32,
    varint64_len,
};

use crate::codec::{
    read_string_payload, read_tag, serialize_float32, serialize_int32, serialize_string_bytes,
};
use crate::error::{Result, TlvError};
use crate::tag::Tag;

/// A decoded value of any supported type.
///
/// Floats compare by bit pattern, so a NaN equals an identical NaN and `0.0`
/// differs from `-0.0`.
#[derive(Debug, Clone)]
pub enum Value<'a> {
    /// INT32 value.
    Int32(i32),
    /// FLOAT32 value.
    Float32(f32),
    /// STRING value; bytes are valid UTF-8.
    String(Payload<'a>),
}

impl<'a> Value<'a> {
    /// Returns the value's tag.
    #[must_use]
    pub const fn tag(&self) -> Tag {
        match self {
            Self::Int32(_) => Tag::Int32,
            Self::Float32(_) => Tag::Float32,
            Self::String(_) => Tag::String,
        }
    }

    /// Returns the number of bytes the value occupies on the wire.
    #[must_use]
    pub fn encoded_len(&self) -> usize {
        let payload = match self {
            Self::String(bytes) => delimited_len(bytes.len()),
            fixed => fixed.tag().fixed_size().unwrap_or_default(),
        };
        Tag::ENCODED_LENGTH + payload
    }

    /// Returns the integer if this is an INT32.
    #[must_use]
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Self::Int32(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the float if this is a FLOAT32.
    #[must_use]
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Self::Float32(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the text if this is a STRING.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(payload) => payload.as_str().ok(),
            _ => None,
        }
    }

    /// Detaches the value from the input's lifetime.
    #[must_use]
    pub fn into_owned(self) -> Value<'static> {
        match self {
            Self::Int32(v) => Value::Int32(v),
            Self::Float32(v) => Value::Float32(v),
            Self::String(payload) => Value::String(payload.into_owned()),
        }
    }
}

/// Length prefix plus payload, without narrowing the length to 32 bits.
fn delimited_len(len: usize) -> usize {
    varint64_len(len as u64) + len
}

impl PartialEq for Value<'_> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Int32(a), Self::Int32(b)) => a == b,
            (Self::Float32(a), Self::Float32(b)) => a.to_bits() == b.to_bits(),
            (Self::String(a), Self::String(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value<'_> {}

impl From<i32> for Value<'_> {
    fn from(value: i32) -> Self {
        Self::Int32(value)
    }
}

impl From<f32> for Value<'_> {
    fn from(value: f32) -> Self {
        Self::Float32(value)
    }
}

impl<'a> From<&'a str> for Value<'a> {
    fn from(value: &'a str) -> Self {
        Self::String(Payload::Borrowed(value.as_bytes()))
    }
}

impl From<String> for Value<'_> {
    fn from(value: String) -> Self {
        Self::String(Payload::Owned(Bytes::from(value)))
    }
}

/// Serializes a value of any type.
///
/// # Errors
/// Returns [`TlvError::Encode`] if the output runs out of space.
pub fn serialize_value<S: OutputStream + ?Sized>(output: &mut S, value: &Value<'_>) -> Result<()> {
    match value {
        Value::Int32(v) => serialize_int32(output, *v),
        Value::Float32(v) => serialize_float32(output, *v),
        Value::String(payload) => serialize_string_bytes(output, payload),
    }
}

/// Deserializes whichever value comes next, with default [`DecodeLimits`].
///
/// # Errors
/// See [`deserialize_value_with`].
pub fn deserialize_value<'a, S: InputStream<'a> + ?Sized>(input: &mut S) -> Result<Value<'a>> {
    deserialize_value_with(input, &DecodeLimits::new())
}

/// Deserializes whichever value comes next, dispatching on its tag.
///
/// # Errors
/// - [`TlvError::UnknownTag`] if the tag byte is not a known tag
/// - [`TlvError::Decode`] if the input is truncated or malformed
pub fn deserialize_value_with<'a, S: InputStream<'a> + ?Sized>(
    input: &mut S,
    limits: &DecodeLimits,
) -> Result<Value<'a>> {
    let value = match read_tag(input)? {
        Tag::Int32 => Value::Int32(read_fixed32(input)? as i32),
        Tag::Float32 => Value::Float32(f32::from_bits(read_fixed32(input)?)),
        Tag::String => Value::String(read_string_payload(input, limits)?),
    };
    Ok(value)
}

/// Encodes one value into a freshly allocated buffer.
///
/// # Errors
/// Returns [`TlvError::Encode`] if a STRING is too long for its length prefix.
pub fn to_bytes(value: &Value<'_>) -> Result<Bytes> {
    let mut output = GrowableOutput::with_block_size(value.encoded_len());
    serialize_value(&mut output, value)?;
    Ok(output.into_bytes())
}

/// Decodes the first value in `data`.
///
/// Returns the value along with the number of bytes it occupied.
///
/// # Errors
/// Same as [`deserialize_value`].
pub fn from_slice(data: &[u8]) -> Result<(Value<'_>, usize)> {
    let mut input = BufferInput::new(data);
    let value = deserialize_value(&mut input)?;
    Ok((value, input.byte_count() as usize))
}

/// Iterator over consecutive values in a stream.
///
/// Stops cleanly at end of stream. After the first error it yields nothing
/// more, since the position is no longer on a value boundary.
///
/// ```
/// use quark_core::BufferInput;
/// use quark_tlv::{Value, ValueIter};
///
/// let wire = [0x01, 0x2A, 0x00, 0x00, 0x00, 0x03, 0x02, b'h', b'i'];
/// let values: Vec<Value<'_>> = ValueIter::new(BufferInput::new(&wire))
///     .collect::<Result<_, _>>()
///     .unwrap();
/// assert_eq!(values, [Value::Int32(42), Value::from("hi")]);
/// ```
#[derive(Debug)]
pub struct ValueIter<'a, S> {
    input: S,
    limits: DecodeLimits,
    done: bool,
    _data: PhantomData<&'a [u8]>,
}

impl<'a, S: InputStream<'a>> ValueIter<'a, S> {
    /// Creates an iterator with default [`DecodeLimits`].
    #[must_use]
    pub fn new(input: S) -> Self {
        Self::with_limits(input, DecodeLimits::new())
    }

    /// Creates an iterator applying `limits` to every STRING.
    #[must_use]
    pub fn with_limits(input: S, limits: DecodeLimits) -> Self {
        Self {
            input,
            limits,
            done: false,
            _data: PhantomData,
        }
    }

    /// Returns the underlying stream.
    #[must_use]
    pub fn into_inner(self) -> S {
        self.input
    }
}

impl<'a, S: InputStream<'a>> Iterator for ValueIter<'a, S> {
    type Item = Result<Value<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if self.input.at_end() {
            self.done = true;
            return None;
        }
        let item = deserialize_value_with(&mut self.input, &self.limits);
        if item.is_err() {
            self.done = true;
        }
        Some(item)
    }
}

impl<'a, S: InputStream<'a>> std::iter::FusedIterator for ValueIter<'a, S> {}

/// Writes every value in `values` in order.
///
/// # Errors
/// Stops at the first value that fails to serialize.
pub fn serialize_all<'v, 'd: 'v, S, I>(output: &mut S, values: I) -> Result<()>
where
    S: OutputStream + ?Sized,
    I: IntoIterator<Item = &'v Value<'d>>,
{
    values
        .into_iter()
        .try_for_each(|value| serialize_value(output, value))
}

/// Checks that `value` has the `expected` type.
///
/// # Errors
/// Returns [`TlvError::TypeMismatch`] naming the actual tag.
pub fn expect_type(value: &Value<'_>, expected: Tag) -> Result<()> {
    if value.tag() == expected {
        Ok(())
    } else {
        Err(TlvError::TypeMismatch {
            expected,
            actual: value.tag().as_u8(),
        })
    }
}
