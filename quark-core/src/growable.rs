//! Self-owned, growable output backend.

use bytes::{Bytes, BytesMut};

use crate::stream::OutputStream;

/// Default size of each block handed out by [`GrowableOutput::next`].
pub const DEFAULT_BLOCK_SIZE: usize = 8192;

/// Smallest block size a [`GrowableOutput`] will use.
pub const MIN_BLOCK_SIZE: usize = 64;

/// Output stream that owns its storage and grows on demand.
///
/// Every `next` call appends one block of the hinted size. When less than one
/// block of spare capacity remains the storage grows by the larger of its
/// current length and the block size, so reallocation cost is amortized.
///
/// ```
/// use quark_core::growable::GrowableOutput;
/// use quark_core::stream::OutputStream;
///
/// let mut output = GrowableOutput::new();
/// output.write_raw(b"hello").unwrap();
/// assert_eq!(output.into_bytes().as_ref(), b"hello");
/// ```
#[derive(Debug)]
pub struct GrowableOutput {
    buf: BytesMut,
    block_size: usize,
    last_provided: usize,
}

impl GrowableOutput {
    /// Creates an output with the default block size.
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Creates an output handing out blocks of `block_size` bytes.
    ///
    /// Sizes below [`MIN_BLOCK_SIZE`] are raised to it.
    #[must_use]
    pub fn with_block_size(block_size: usize) -> Self {
        Self::builder().block_size(block_size).build()
    }

    /// Returns a builder for configuring the output.
    #[must_use]
    pub fn builder() -> GrowableOutputBuilder {
        GrowableOutputBuilder::new()
    }

    /// Returns the hinted block size.
    #[must_use]
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Returns the committed bytes.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    /// Returns the number of committed bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns true if nothing has been committed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Returns the allocated capacity of the storage.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Discards all committed bytes, keeping the allocation.
    pub fn clear(&mut self) {
        self.buf.clear();
        self.last_provided = 0;
    }

    /// Hands the committed bytes to the caller.
    #[must_use]
    pub fn into_bytes(self) -> Bytes {
        self.buf.freeze()
    }

    fn reserve_block(&mut self) {
        let spare = self.buf.capacity() - self.buf.len();
        if spare >= self.block_size {
            return;
        }
        let before = self.buf.capacity();
        self.buf.reserve(self.buf.len().max(self.block_size));
        tracing::debug!(
            "growable output grew from {} to {} bytes",
            before,
            self.buf.capacity()
        );
    }
}

impl Default for GrowableOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputStream for GrowableOutput {
    fn next(&mut self) -> Option<&mut [u8]> {
        self.reserve_block();
        let start = self.buf.len();
        self.buf.resize(start + self.block_size, 0);
        self.last_provided = self.block_size;
        Some(&mut self.buf[start..])
    }

    fn back_up(&mut self, count: usize) {
        assert!(
            count <= self.last_provided,
            "back_up({count}) exceeds last block of {} bytes",
            self.last_provided
        );
        self.buf.truncate(self.buf.len() - count);
        self.last_provided -= count;
    }

    fn byte_count(&self) -> u64 {
        self.buf.len() as u64
    }
}

/// Builder for [`GrowableOutput`].
#[derive(Debug, Clone)]
pub struct GrowableOutputBuilder {
    block_size: usize,
    initial_capacity: usize,
}

impl GrowableOutputBuilder {
    /// Creates a builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
            initial_capacity: DEFAULT_BLOCK_SIZE,
        }
    }

    /// Sets the hinted block size, clamped to [`MIN_BLOCK_SIZE`].
    #[must_use]
    pub fn block_size(mut self, size: usize) -> Self {
        self.block_size = size.max(MIN_BLOCK_SIZE);
        self
    }

    /// Sets the capacity allocated up front.
    #[must_use]
    pub fn initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Builds the output.
    #[must_use]
    pub fn build(self) -> GrowableOutput {
        GrowableOutput {
            buf: BytesMut::with_capacity(self.initial_capacity),
            block_size: self.block_size,
            last_provided: 0,
        }
    }
}

impl Default for GrowableOutputBuilder {
    fn default() -> Self {
        Self::new()
    }
}
