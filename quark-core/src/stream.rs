//! Zero-copy block stream traits.
//!
//! This module provides:
//! - [`InputStream`] for pulling contiguous read-only blocks
//! - [`OutputStream`] for pulling contiguous writable blocks
//!
//! Both sides follow the same protocol: `next` hands out a block and counts
//! all of it as consumed, and `back_up` returns an unused tail of that same
//! block. A block is only valid until the next call on the stream.
//!
//! Streams are single-reader or single-writer and do no internal locking.
//! Mutating memory a stream reads from while a read is in progress is the
//! caller's problem.

use crate::error::{DecodeError, EncodeError};

/// Pull-based reader over caller-owned memory.
///
/// The lifetime `'a` belongs to the memory, not to the stream, so a block
/// returned by [`next`](Self::next) can be held across later calls. Decoders
/// rely on this to hand out borrowed views without copying.
pub trait InputStream<'a> {
    /// Returns the next unread block and counts all of it as consumed.
    ///
    /// Returned blocks are never empty. `None` signals end of stream and
    /// leaves the position where it was.
    fn next(&mut self) -> Option<&'a [u8]>;

    /// Returns the last `count` bytes of the most recent block to the stream.
    ///
    /// # Panics
    /// Panics if `count` exceeds what is left of the most recent block. That
    /// is a bookkeeping bug in the caller, not a data error.
    fn back_up(&mut self, count: usize);

    /// Returns the total number of bytes consumed, net of backups.
    fn byte_count(&self) -> u64;

    /// Advances the position by `count` bytes without looking at them.
    ///
    /// # Errors
    /// Returns [`DecodeError::Truncated`] if the stream ends first. The
    /// position is then left after every byte that could be skipped.
    fn skip(&mut self, count: usize) -> Result<(), DecodeError> {
        let mut skipped = 0;
        while skipped < count {
            let Some(block) = self.next() else {
                return Err(DecodeError::truncated(count, skipped));
            };
            let wanted = count - skipped;
            if block.len() > wanted {
                self.back_up(block.len() - wanted);
                return Ok(());
            }
            skipped += block.len();
        }
        Ok(())
    }

    /// Copies exactly `dst.len()` bytes out of the stream.
    ///
    /// Spans as many blocks as needed and backs up the unused tail of the
    /// final one.
    ///
    /// # Errors
    /// Returns [`DecodeError::Truncated`] if the stream ends first. The bytes
    /// copied so far stay consumed and `available` reports how many.
    fn read_raw(&mut self, dst: &mut [u8]) -> Result<(), DecodeError> {
        let mut copied = 0;
        while copied < dst.len() {
            let Some(block) = self.next() else {
                return Err(DecodeError::truncated(dst.len(), copied));
            };
            let take = block.len().min(dst.len() - copied);
            dst[copied..copied + take].copy_from_slice(&block[..take]);
            copied += take;
            if take < block.len() {
                self.back_up(block.len() - take);
            }
        }
        Ok(())
    }

    /// Returns true if no bytes remain. Does not move the position.
    fn at_end(&mut self) -> bool {
        match self.next() {
            Some(block) => {
                self.back_up(block.len());
                false
            }
            None => true,
        }
    }
}

/// Pull-based writer handing out blocks of backend-chosen size.
pub trait OutputStream {
    /// Returns a writable block and counts all of it as committed.
    ///
    /// Returned blocks are never empty. `None` means the backend cannot
    /// produce more capacity.
    fn next(&mut self) -> Option<&mut [u8]>;

    /// Releases the last `count` bytes of the most recent block.
    ///
    /// # Panics
    /// Panics if `count` exceeds what is left of the most recent block.
    fn back_up(&mut self, count: usize);

    /// Returns the total number of bytes committed, net of backups.
    fn byte_count(&self) -> u64;

    /// Pushes buffered bytes to the underlying sink.
    ///
    /// In-memory backends have nothing to do.
    ///
    /// # Errors
    /// Backend specific.
    fn flush(&mut self) -> Result<(), EncodeError> {
        Ok(())
    }

    /// Writes all of `src`, splitting it across blocks as needed.
    ///
    /// # Errors
    /// Returns [`EncodeError::OutOfSpace`] if a block request fails part way.
    /// Bytes written before that point stay committed.
    fn write_raw(&mut self, src: &[u8]) -> Result<(), EncodeError> {
        let mut written = 0;
        while written < src.len() {
            let Some(block) = self.next() else {
                return Err(EncodeError::out_of_space(src.len(), written));
            };
            let len = block.len();
            let take = len.min(src.len() - written);
            block[..take].copy_from_slice(&src[written..written + take]);
            written += take;
            if take < len {
                self.back_up(len - take);
            }
        }
        Ok(())
    }
}

impl<'a, S: InputStream<'a> + ?Sized> InputStream<'a> for &mut S {
    #[inline]
    fn next(&mut self) -> Option<&'a [u8]> {
        (**self).next()
    }

    #[inline]
    fn back_up(&mut self, count: usize) {
        (**self).back_up(count);
    }

    fn byte_count(&self) -> u64 {
        (**self).byte_count()
    }

    fn skip(&mut self, count: usize) -> Result<(), DecodeError> {
        (**self).skip(count)
    }

    fn read_raw(&mut self, dst: &mut [u8]) -> Result<(), DecodeError> {
        (**self).read_raw(dst)
    }
}

impl<S: OutputStream + ?Sized> OutputStream for &mut S {
    #[inline]
    fn next(&mut self) -> Option<&mut [u8]> {
        (**self).next()
    }

    #[inline]
    fn back_up(&mut self, count: usize) {
        (**self).back_up(count);
    }

    fn byte_count(&self) -> u64 {
        (**self).byte_count()
    }

    fn flush(&mut self) -> Result<(), EncodeError> {
        (**self).flush()
    }

    fn write_raw(&mut self, src: &[u8]) -> Result<(), EncodeError> {
        (**self).write_raw(src)
    }
}
