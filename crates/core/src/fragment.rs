//! Frame fragmentation into payload-bounded chunks.
//!
//! A frame of `N` bytes is cut into `ceil(N / M)` chunks of at most `M`
//! bytes. A single chunk is [`Subpackage::Atomic`]; otherwise the first is
//! [`Subpackage::First`], the last [`Subpackage::Last`] and everything in
//! between [`Subpackage::Middle`]. Concatenating the chunks in order gives
//! back the frame.

use crate::wire::Subpackage;

/// One slice of a frame plus its position marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk<'a> {
    pub payload: &'a [u8],
    pub subpackage: Subpackage,
    /// Zero-based position within the frame.
    pub index: usize,
}

/// Iterator over the chunks of one frame.
#[derive(Debug, Clone)]
pub struct Fragments<'a> {
    data: &'a [u8],
    max_payload: usize,
    offset: usize,
    index: usize,
    total: usize,
}

impl<'a> Fragments<'a> {
    /// Split `data` into chunks of at most `max_payload` bytes.
    ///
    /// `max_payload` must be non-zero; [`EncoderConfig`](crate::EncoderConfig)
    /// validation guarantees it.
    pub fn new(data: &'a [u8], max_payload: usize) -> Self {
        debug_assert!(max_payload > 0);
        Self {
            data,
            max_payload,
            offset: 0,
            index: 0,
            total: chunk_count(data.len(), max_payload),
        }
    }

    /// Number of chunks the frame splits into.
    pub fn total(&self) -> usize {
        self.total
    }
}

impl<'a> Iterator for Fragments<'a> {
    type Item = Chunk<'a>;

    fn next(&mut self) -> Option<Chunk<'a>> {
        let len = self.data.len();
        if self.offset >= len {
            return None;
        }

        let chunk_size = self.max_payload.min(len - self.offset);
        let subpackage = if self.total == 1 {
            Subpackage::Atomic
        } else if self.offset == 0 {
            Subpackage::First
        } else if self.offset + chunk_size == len {
            Subpackage::Last
        } else {
            Subpackage::Middle
        };

        let chunk = Chunk {
            payload: &self.data[self.offset..self.offset + chunk_size],
            subpackage,
            index: self.index,
        };

        self.offset += chunk_size;
        self.index += 1;
        Some(chunk)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.total - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Fragments<'_> {}

/// `ceil(len / max_payload)`; zero for an empty frame.
pub fn chunk_count(len: usize, max_payload: usize) -> usize {
    len.div_ceil(max_payload.max(1))
}
