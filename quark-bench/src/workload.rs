//! Sample data for benchmarks.

use bytes::Bytes;
use quark_core::GrowableOutput;
use quark_tlv::{Value, serialize_all};

/// Varints spanning every encoded length from 1 to 5 bytes.
pub const VARINT32_SAMPLES: [u32; 5] = [1, 300, 70_000, 10_000_000, u32::MAX];

/// Builds a repeating mix of INT32, FLOAT32 and STRING values.
///
/// Strings cycle through lengths up to `max_string_len`.
#[must_use]
pub fn mixed_values(count: usize, max_string_len: usize) -> Vec<Value<'static>> {
    (0..count)
        .map(|i| match i % 3 {
            0 => Value::Int32(i as i32 * 7919),
            1 => Value::Float32(i as f32 * 0.25),
            _ => {
                let len = if max_string_len == 0 {
                    0
                } else {
                    i % (max_string_len + 1)
                };
                Value::from("q".repeat(len))
            }
        })
        .collect()
}

/// Encodes `values` back to back.
///
/// # Errors
/// Fails only for strings longer than `u32::MAX` bytes.
pub fn encode_values(values: &[Value<'_>]) -> quark_tlv::Result<Bytes> {
    let mut output = GrowableOutput::new();
    serialize_all(&mut output, values)?;
    Ok(output.into_bytes())
}

/// Splits `data` into chunks of at most `chunk_size` bytes.
///
/// # Panics
/// Panics if `chunk_size` is zero.
#[must_use]
pub fn split_chunks(data: &[u8], chunk_size: usize) -> Vec<&[u8]> {
    data.chunks(chunk_size).collect()
}
