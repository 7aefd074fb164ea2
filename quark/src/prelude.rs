//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types, traits and functions.
//!
//! ```
//! use quark::prelude::*;
//! ```

// Streams
pub use quark_core::stream::{InputStream, OutputStream};
pub use quark_core::{BufferInput, BufferOutput, GrowableOutput, MultiBufferInput};

// Scalar and length-delimited codecs
pub use quark_core::coded::{
    read_fixed32, read_fixed64, read_varint32, read_varint64, write_fixed32, write_fixed64,
    write_varint32, write_varint64,
};
pub use quark_core::delimited::{
    DecodeLimits, Payload, read_length_delimited, write_length_delimited,
};
pub use quark_core::error::{DecodeError, EncodeError};

// TLV
pub use quark_tlv::{
    Tag, TlvError, Value, ValueIter, deserialize_float32, deserialize_int32, deserialize_string,
    deserialize_value, serialize_float32, serialize_int32, serialize_string, serialize_value,
};
