//! Single-buffer stream backends.
//!
//! This module provides:
//! - [`BufferInput`] reading from one caller-owned slice
//! - [`BufferOutput`] writing into one caller-owned, fixed-size slice
//!
//! Each `next` call hands out everything that is left in one block.

use crate::stream::{InputStream, OutputStream};

/// Zero-copy reader over a single contiguous buffer.
#[derive(Debug, Clone)]
pub struct BufferInput<'a> {
    data: &'a [u8],
    position: usize,
    last_returned: usize,
}

impl<'a> BufferInput<'a> {
    /// Creates a reader positioned at the start of `data`.
    #[must_use]
    pub const fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            position: 0,
            last_returned: 0,
        }
    }

    /// Returns the number of unread bytes.
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.data.len() - self.position
    }
}

impl<'a> InputStream<'a> for BufferInput<'a> {
    #[inline]
    fn next(&mut self) -> Option<&'a [u8]> {
        if self.position >= self.data.len() {
            self.last_returned = 0;
            return None;
        }
        let block = &self.data[self.position..];
        self.position = self.data.len();
        self.last_returned = block.len();
        Some(block)
    }

    #[inline]
    fn back_up(&mut self, count: usize) {
        assert!(
            count <= self.last_returned,
            "back_up({count}) exceeds last block of {} bytes",
            self.last_returned
        );
        self.position -= count;
        self.last_returned -= count;
    }

    fn byte_count(&self) -> u64 {
        self.position as u64
    }
}

/// Zero-copy writer into a single fixed-size buffer.
///
/// Writing past the end of the buffer fails; nothing is reallocated. Use
/// [`GrowableOutput`](crate::growable::GrowableOutput) when the encoded size
/// is not known up front.
#[derive(Debug)]
pub struct BufferOutput<'a> {
    data: &'a mut [u8],
    position: usize,
    last_provided: usize,
}

impl<'a> BufferOutput<'a> {
    /// Creates a writer positioned at the start of `data`.
    #[must_use]
    pub fn new(data: &'a mut [u8]) -> Self {
        Self {
            data,
            position: 0,
            last_provided: 0,
        }
    }

    /// Returns the bytes committed so far.
    #[must_use]
    pub fn written(&self) -> &[u8] {
        &self.data[..self.position]
    }

    /// Returns the number of bytes still available.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.position
    }
}

impl OutputStream for BufferOutput<'_> {
    #[inline]
    fn next(&mut self) -> Option<&mut [u8]> {
        if self.position >= self.data.len() {
            self.last_provided = 0;
            return None;
        }
        let start = self.position;
        self.last_provided = self.data.len() - start;
        self.position = self.data.len();
        Some(&mut self.data[start..])
    }

    #[inline]
    fn back_up(&mut self, count: usize) {
        assert!(
            count <= self.last_provided,
            "back_up({count}) exceeds last block of {} bytes",
            self.last_provided
        );
        self.position -= count;
        self.last_provided -= count;
    }

    fn byte_count(&self) -> u64 {
        self.position as u64
    }
}
