//! # Quark Core
//!
//! Zero-copy block streams and the integer codecs built on them.
//!
//! This crate provides:
//! - [`InputStream`] / [`OutputStream`] traits for handing out contiguous
//!   memory blocks with back-up semantics
//! - Backends: [`BufferInput`], [`BufferOutput`], [`MultiBufferInput`] and
//!   [`GrowableOutput`]
//! - Varint and little-endian fixed-width codecs in [`coded`]
//! - Length-delimited fields with borrowed or owned [`Payload`]s
//! - Error types for encoding/decoding operations
//!
//! Streams are single-threaded: one reader or writer per instance, no
//! internal locking.

pub mod buffer;
pub mod coded;
pub mod delimited;
pub mod error;
pub mod growable;
pub mod multi;
pub mod stream;

pub use buffer::{BufferInput, BufferOutput};
pub use coded::{
    MAX_VARINT32_BYTES, MAX_VARINT64_BYTES, read_fixed32, read_fixed64, read_varint32,
    read_varint64, varint32_len, varint64_len, write_fixed32, write_fixed64, write_varint32,
    write_varint64,
};
pub use delimited::{
    DecodeLimits, Payload, read_length_delimited, read_length_delimited_with,
    write_length_delimited,
};
pub use error::{DecodeError, EncodeError};
pub use growable::{GrowableOutput, GrowableOutputBuilder};
pub use multi::MultiBufferInput;
pub use stream::{InputStream, OutputStream};
