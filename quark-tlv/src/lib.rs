//! # Quark TLV
//!
//! Self-describing tag/value encoding on top of [`quark_core`] streams.
//!
//! Every value starts with a one-byte [`Tag`] naming its type:
//!
//! ```text
//! INT32    01 | 4 bytes LE
//! FLOAT32  02 | 4 bytes LE (IEEE-754 bits)
//! STRING   03 | varint32 length | UTF-8 bytes
//! ```
//!
//! Typed readers such as [`deserialize_int32`] report a different tag as
//! [`TlvError::TypeMismatch`] and leave the tag unread, so the caller can
//! retry with another type. [`deserialize_value`] and [`ValueIter`] dispatch
//! on the tag instead.
//!
//! ```
//! use quark_core::{BufferInput, GrowableOutput};
//! use quark_tlv::{deserialize_int32, deserialize_string, serialize_int32, serialize_string};
//!
//! let mut output = GrowableOutput::new();
//! serialize_int32(&mut output, 42).unwrap();
//! serialize_string(&mut output, "hi").unwrap();
//! assert_eq!(output.as_slice(), [0x01, 0x2A, 0, 0, 0, 0x03, 0x02, b'h', b'i']);
//!
//! let mut input = BufferInput::new(output.as_slice());
//! assert_eq!(deserialize_int32(&mut input).unwrap(), 42);
//! assert_eq!(deserialize_string(&mut input).unwrap().as_str().unwrap(), "hi");
//! ```

pub mod codec;
pub mod error;
pub mod tag;
pub mod value;

pub use codec::{
    deserialize_float32, deserialize_int32, deserialize_string, deserialize_string_with,
    serialize_float32, serialize_int32, serialize_string,
};
pub use error::{Result, TlvError};
pub use tag::Tag;
pub use value::{
    Value, ValueIter, deserialize_value, deserialize_value_with, expect_type, from_slice,
    serialize_all, serialize_value, to_bytes,
};
