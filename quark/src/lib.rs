//! # Quark
//!
//! Zero-copy block streams, varint codecs and TLV encoding for Rust.
//!
//! Quark moves bytes through contiguous blocks handed out by a stream
//! backend rather than through per-byte calls. Decoders return borrowed views
//! into the caller's memory whenever a value sits in one block and fall back
//! to an owned copy only when it straddles several.
//!
//! ## Features
//!
//! - **Block streams** - [`InputStream`] / [`OutputStream`] with back-up
//! - **Backends** - single buffer, chunk list and growable in-memory output
//! - **Scalar codec** - base-128 varints and little-endian fixed-width integers
//! - **Length-delimited fields** - borrowed or owned [`Payload`]s
//! - **TLV values** - INT32, FLOAT32 and STRING with a one-byte tag
//!
//! ## Quick Start
//!
//! ```
//! use quark::prelude::*;
//!
//! let mut output = GrowableOutput::new();
//! serialize_int32(&mut output, 42)?;
//! serialize_string(&mut output, "hi")?;
//!
//! let bytes = output.into_bytes();
//! let mut input = BufferInput::new(&bytes);
//! assert_eq!(deserialize_int32(&mut input)?, 42);
//! assert!(deserialize_string(&mut input)?.is_borrowed());
//! # Ok::<(), TlvError>(())
//! ```
//!
//! ## Crate Organization
//!
//! - [`core`] - stream traits, backends, varint/fixed and length-delimited codecs
//! - [`tlv`] - tags, typed and dynamic TLV serialization

pub mod prelude;

/// Stream traits, backends and scalar codecs.
pub mod core {
    pub use quark_core::*;
}

/// Tag/value encoding.
pub mod tlv {
    pub use quark_tlv::*;
}

// Re-export commonly used items at the crate root
pub use quark_core::{
    BufferInput, BufferOutput, DecodeError, DecodeLimits, EncodeError, GrowableOutput,
    InputStream, MultiBufferInput, OutputStream, Payload,
};
pub use quark_tlv::{Tag, TlvError, Value, ValueIter};
