//! buffer/chunked.rs
//! Chunked, shareable byte buffer.
//!
//! Design notes:
//! - Bytes live in an ordered list of fragments; concatenation order is the
//!   logical byte order.
//! - Growth allocates new fragments sized by a `SizeClassTable` instead of
//!   reallocating one contiguous array.
//! - `share` hands out zero-copy views. Shared fragments are frozen and
//!   reference counted; trimming a view only moves that view's boundaries.
//! - Equality is over the logical bytes, never the fragment layout.

use std::collections::VecDeque;
use std::fmt;
use std::io;

use bytes::{Bytes, BytesMut};

use crate::buffer::fragment::Fragment;
use crate::buffer::io::ChunkedReader;
use crate::buffer::size_class::SizeClassTable;
use crate::buffer::types::BufferError;
use crate::utils::chunks_equal;

pub struct ChunkedBuffer {
    frags: VecDeque<Fragment>,
    size: usize,
    classes: &'static SizeClassTable,
}

impl ChunkedBuffer {
    /// Empty buffer using the standard size classes.
    pub fn new() -> Self {
        Self::with_size_classes(SizeClassTable::standard())
    }

    pub fn with_size_classes(classes: &'static SizeClassTable) -> Self {
        Self {
            frags: VecDeque::new(),
            size: 0,
            classes,
        }
    }

    /// Empty buffer whose first fragment can hold at least `capacity` bytes.
    ///
    /// The fragment is sized with [`SizeClassTable::next_size`], so large
    /// requests get a multiple of the largest class rather than many fragments.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut buf = Self::new();
        if capacity > 0 {
            buf.frags
                .push_back(Fragment::with_capacity(buf.classes.next_size(capacity)));
        }
        buf
    }

    /// Total logical length in bytes. O(1).
    #[inline]
    pub fn size_bytes(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Number of non-empty fragments.
    #[inline]
    pub fn fragment_count(&self) -> usize {
        self.frags.iter().filter(|f| f.len() > 0).count()
    }

    #[inline]
    pub fn size_classes(&self) -> &'static SizeClassTable {
        self.classes
    }

    /// Fragments in logical order.
    pub fn fragments(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.frags.iter().map(Fragment::as_slice).filter(|s| !s.is_empty())
    }

    /// Streaming `Read`/`BufRead` cursor over the fragments.
    pub fn reader(&self) -> ChunkedReader<'_> {
        ChunkedReader::new(self.frags.iter())
    }

    /// Copy `data` to the end of the buffer.
    ///
    /// Fills the tail's spare capacity first, then allocates fragments from
    /// the size-class table. The growth hint is the larger of the remaining
    /// input and the current size, capped at the largest class.
    pub fn append(&mut self, mut data: &[u8]) {
        if data.is_empty() {
            return;
        }

        if let Some(tail) = self.frags.back_mut() {
            let n = tail.write(data);
            data = &data[n..];
            self.size += n;
        }

        while !data.is_empty() {
            let hint = data.len().max(self.size);
            let mut frag = Fragment::with_capacity(self.classes.next_fragment_size(hint));
            let n = frag.write(data);
            data = &data[n..];
            self.size += n;
            self.frags.push_back(frag);
        }
    }

    /// Adopt `bytes` as a frozen fragment. Never copies.
    pub fn append_bytes(&mut self, bytes: Bytes) {
        if bytes.is_empty() {
            return;
        }
        self.size += bytes.len();
        self.frags.push_back(Fragment::Frozen(bytes));
    }

    /// Move every fragment of `other` to the end of this buffer. Never copies.
    pub fn append_buffer(&mut self, other: ChunkedBuffer) {
        self.size += other.size;
        self.frags.extend(other.frags.into_iter().filter(|f| f.len() > 0));
    }

    /// Zero-copy view over `[offset, offset + len)`.
    ///
    /// Fragments touched by the range are frozen, so later appends to this
    /// buffer start a new fragment. The bytes themselves never change.
    ///
    /// # Errors
    /// - `BufferError::OutOfRange` if the range does not fit in the buffer.
    pub fn share(&mut self, offset: usize, len: usize) -> Result<ChunkedBuffer, BufferError> {
        let end = offset
            .checked_add(len)
            .filter(|&end| end <= self.size)
            .ok_or(BufferError::OutOfRange {
                offset,
                len,
                size: self.size,
            })?;

        let mut view = ChunkedBuffer::with_size_classes(self.classes);
        if len == 0 {
            return Ok(view);
        }

        let mut frag_start = 0;
        for frag in self.frags.iter_mut() {
            let frag_len = frag.len();
            let frag_end = frag_start + frag_len;
            if frag_end > offset && frag_len > 0 {
                let lo = offset.saturating_sub(frag_start);
                let hi = (end - frag_start).min(frag_len);
                view.append_bytes(frag.freeze().slice(lo..hi));
            }
            if frag_end >= end {
                break;
            }
            frag_start = frag_end;
        }

        debug_assert_eq!(view.size, len);
        Ok(view)
    }

    /// Remove `n` bytes from the end.
    ///
    /// # Errors
    /// - `BufferError::TrimOutOfRange` if `n > size_bytes()`.
    pub fn trim_back(&mut self, n: usize) -> Result<(), BufferError> {
        if n > self.size {
            return Err(BufferError::TrimOutOfRange {
                requested: n,
                size: self.size,
            });
        }

        let mut remaining = n;
        while remaining > 0 {
            let Some(tail) = self.frags.back_mut() else {
                break;
            };
            let len = tail.len();
            if len <= remaining {
                self.frags.pop_back();
                remaining -= len;
            } else {
                tail.trim_back(remaining);
                remaining = 0;
            }
        }
        self.size -= n;
        Ok(())
    }

    /// Remove `n` bytes from the front.
    ///
    /// # Errors
    /// - `BufferError::TrimOutOfRange` if `n > size_bytes()`.
    pub fn trim_front(&mut self, n: usize) -> Result<(), BufferError> {
        if n > self.size {
            return Err(BufferError::TrimOutOfRange {
                requested: n,
                size: self.size,
            });
        }

        let mut remaining = n;
        while remaining > 0 {
            let Some(head) = self.frags.front_mut() else {
                break;
            };
            let len = head.len();
            if len <= remaining {
                self.frags.pop_front();
                remaining -= len;
            } else {
                head.trim_front(remaining);
                remaining = 0;
            }
        }
        self.size -= n;
        Ok(())
    }

    /// Contiguous copy of the logical bytes.
    ///
    /// Zero-copy when the buffer is empty or a single frozen fragment.
    pub fn linearize(&self) -> Bytes {
        let mut live = self.frags.iter().filter(|f| f.len() > 0);
        match (live.next(), live.next()) {
            (None, _) => Bytes::new(),
            (Some(Fragment::Frozen(b)), None) => b.clone(),
            _ => {
                let mut out = BytesMut::with_capacity(self.size);
                for frag in self.fragments() {
                    out.extend_from_slice(frag);
                }
                out.freeze()
            }
        }
    }

    /// Consume into contiguous `Bytes`. Zero-copy for zero or one fragment.
    pub fn into_bytes(mut self) -> Bytes {
        self.frags.retain(|f| f.len() > 0);
        if self.frags.len() <= 1 {
            return self
                .frags
                .pop_front()
                .map(Fragment::into_bytes)
                .unwrap_or_default();
        }
        self.linearize()
    }

    pub fn to_vec(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.size);
        for frag in self.fragments() {
            out.extend_from_slice(frag);
        }
        out
    }

    /// Deep copy into freshly allocated fragments.
    pub fn copy(&self) -> ChunkedBuffer {
        let mut out = ChunkedBuffer::with_size_classes(self.classes);
        for frag in self.fragments() {
            out.append(frag);
        }
        out
    }
}

impl Default for ChunkedBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ChunkedBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChunkedBuffer")
            .field("size", &self.size)
            .field("fragments", &self.fragment_count())
            .finish()
    }
}

impl PartialEq for ChunkedBuffer {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && chunks_equal(self.fragments(), other.fragments())
    }
}

impl Eq for ChunkedBuffer {}

impl PartialEq<[u8]> for ChunkedBuffer {
    fn eq(&self, other: &[u8]) -> bool {
        self.size == other.len() && chunks_equal(self.fragments(), std::iter::once(other))
    }
}

impl PartialEq<&[u8]> for ChunkedBuffer {
    fn eq(&self, other: &&[u8]) -> bool {
        *self == **other
    }
}

impl PartialEq<Vec<u8>> for ChunkedBuffer {
    fn eq(&self, other: &Vec<u8>) -> bool {
        *self == other[..]
    }
}

impl From<&[u8]> for ChunkedBuffer {
    fn from(data: &[u8]) -> Self {
        let mut buf = ChunkedBuffer::new();
        buf.append(data);
        buf
    }
}

impl From<Vec<u8>> for ChunkedBuffer {
    fn from(data: Vec<u8>) -> Self {
        ChunkedBuffer::from(Bytes::from(data))
    }
}

impl From<Bytes> for ChunkedBuffer {
    fn from(data: Bytes) -> Self {
        let mut buf = ChunkedBuffer::new();
        buf.append_bytes(data);
        buf
    }
}

/// Encoders write their output straight into a buffer.
impl io::Write for ChunkedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.append(buf);
        Ok(buf.len())
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.append(buf);
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
