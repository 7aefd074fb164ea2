//! Scatter-list input backend.
//!
//! [`MultiBufferInput`] reads an ordered list of caller-owned chunks, one
//! chunk per `next` call, in the manner of an iovec. Chunks are never copied,
//! mutated or freed.

use crate::stream::InputStream;

/// Zero-copy reader over an ordered sequence of borrowed chunks.
///
/// ```
/// use quark_core::multi::MultiBufferInput;
/// use quark_core::stream::InputStream;
///
/// let mut input = MultiBufferInput::new([&b"abc"[..], b"defg", b"hij"]);
/// let mut joined = Vec::new();
/// while let Some(block) = input.next() {
///     joined.extend_from_slice(block);
/// }
/// assert_eq!(joined, b"abcdefghij");
/// ```
#[derive(Debug, Clone)]
pub struct MultiBufferInput<'a> {
    chunks: Vec<&'a [u8]>,
    chunk: usize,
    offset: usize,
    last_returned: usize,
    total: u64,
}

impl<'a> MultiBufferInput<'a> {
    /// Creates a reader over `chunks`, in order.
    ///
    /// Empty chunks are allowed and are stepped over.
    #[must_use]
    pub fn new<I>(chunks: I) -> Self
    where
        I: IntoIterator<Item = &'a [u8]>,
    {
        Self {
            chunks: chunks.into_iter().collect(),
            chunk: 0,
            offset: 0,
            last_returned: 0,
            total: 0,
        }
    }

    /// Returns the number of chunks, empty ones included.
    #[must_use]
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }
}

impl<'a> InputStream<'a> for MultiBufferInput<'a> {
    fn next(&mut self) -> Option<&'a [u8]> {
        // The cursor stays on a chunk after serving it, so a full back_up
        // re-serves the same chunk from the backed-up offset.
        while self.chunk < self.chunks.len() && self.offset >= self.chunks[self.chunk].len() {
            self.chunk += 1;
            self.offset = 0;
        }
        let Some(&current) = self.chunks.get(self.chunk) else {
            self.last_returned = 0;
            return None;
        };

        let block = &current[self.offset..];
        self.offset = current.len();
        self.last_returned = block.len();
        self.total += block.len() as u64;
        Some(block)
    }

    fn back_up(&mut self, count: usize) {
        assert!(
            count <= self.last_returned,
            "back_up({count}) exceeds last block of {} bytes",
            self.last_returned
        );
        self.offset -= count;
        self.last_returned -= count;
        self.total -= count as u64;
    }

    fn byte_count(&self) -> u64 {
        self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_one_chunk_per_next() {
        let mut input = MultiBufferInput::new([&b"abc"[..], b"defg", b"hij"]);
        assert_eq!(input.chunk_count(), 3);

        assert_eq!(input.next(), Some(&b"abc"[..]));
        assert_eq!(input.next(), Some(&b"defg"[..]));
        assert_eq!(input.next(), Some(&b"hij"[..]));
        assert_eq!(input.next(), None);
        assert_eq!(input.byte_count(), 10);
    }

    #[test]
    fn test_partial_back_up_within_chunk() {
        let mut input = MultiBufferInput::new([&b"abcd"[..], b"ef"]);

        input.next().expect("chunk");
        input.back_up(2);
        assert_eq!(input.byte_count(), 2);

        assert_eq!(input.next(), Some(&b"cd"[..]));
        assert_eq!(input.next(), Some(&b"ef"[..]));
    }

    #[test]
    fn test_full_back_up_reserves_same_chunk() {
        let mut input = MultiBufferInput::new([&b"ab"[..], b"cd"]);

        input.next().expect("first");
        let second = input.next().expect("second");
        assert_eq!(second, b"cd");

        input.back_up(2);
        assert_eq!(input.byte_count(), 2);
        assert_eq!(input.next(), Some(&b"cd"[..]));
        assert_eq!(input.next(), None);
    }

    #[test]
    fn test_back_up_of_re_served_remainder() {
        let mut input = MultiBufferInput::new([&b"abcdef"[..]]);

        input.next().expect("chunk");
        input.back_up(4);
        let rest = input.next().expect("remainder");
        assert_eq!(rest, b"cdef");
        input.back_up(4);
        assert_eq!(input.byte_count(), 2);
        assert_eq!(input.next(), Some(&b"cdef"[..]));
    }

    #[test]
    fn test_empty_chunks_are_skipped() {
        let mut input = MultiBufferInput::new([&b""[..], b"a", b"", b"", b"b", b""]);

        assert_eq!(input.next(), Some(&b"a"[..]));
        assert_eq!(input.next(), Some(&b"b"[..]));
        assert_eq!(input.next(), None);
    }

    #[test]
    fn test_no_chunks() {
        let mut input = MultiBufferInput::new(Vec::<&[u8]>::new());
        assert!(input.next().is_none());
        assert_eq!(input.byte_count(), 0);
    }

    #[test]
    #[should_panic(expected = "exceeds last block")]
    fn test_back_up_beyond_chunk_panics() {
        let mut input = MultiBufferInput::new([&b"ab"[..], b"cd"]);
        input.next().expect("first");
        input.next().expect("second");
        input.back_up(3);
    }

    #[test]
    #[should_panic(expected = "exceeds last block")]
    fn test_back_up_before_next_panics() {
        let mut input = MultiBufferInput::new([&b"ab"[..]]);
        input.back_up(1);
    }

    proptest! {
        #[test]
        fn chunking_preserves_bytes(
            data in prop::collection::vec(any::<u8>(), 0..256),
            cuts in prop::collection::vec(0usize..256, 0..8),
        ) {
            let mut bounds: Vec<usize> = cuts.into_iter().map(|c| c.min(data.len())).collect();
            bounds.push(0);
            bounds.push(data.len());
            bounds.sort_unstable();
            let chunks: Vec<&[u8]> = bounds.windows(2).map(|w| &data[w[0]..w[1]]).collect();

            let mut input = MultiBufferInput::new(chunks);
            let mut joined = Vec::new();
            while let Some(block) = input.next() {
                prop_assert!(!block.is_empty());
                joined.extend_from_slice(block);
            }
            prop_assert_eq!(joined, data.clone());
            prop_assert_eq!(input.byte_count(), data.len() as u64);
        }
    }
}
