//! buffer/fragment.rs
//! One contiguous byte range inside a chunked buffer.
//!
//! A fragment starts out writable and exclusively owned by its buffer's tail.
//! Sharing freezes it: the bytes become an immutable, reference-counted
//! `Bytes` and each holder can only narrow its own view.

use bytes::{Buf, Bytes, BytesMut};

#[derive(Debug)]
pub(crate) enum Fragment {
    Writable(BytesMut),
    Frozen(Bytes),
}

impl Fragment {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Fragment::Writable(BytesMut::with_capacity(capacity))
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        match self {
            Fragment::Writable(b) => b.len(),
            Fragment::Frozen(b) => b.len(),
        }
    }

    #[inline]
    pub(crate) fn as_slice(&self) -> &[u8] {
        match self {
            Fragment::Writable(b) => &b[..],
            Fragment::Frozen(b) => &b[..],
        }
    }

    /// Bytes that can still be written without reallocating.
    #[inline]
    pub(crate) fn spare_capacity(&self) -> usize {
        match self {
            Fragment::Writable(b) => b.capacity() - b.len(),
            Fragment::Frozen(_) => 0,
        }
    }

    /// Copy as much of `data` as fits in the spare capacity; returns the count.
    pub(crate) fn write(&mut self, data: &[u8]) -> usize {
        let n = self.spare_capacity().min(data.len());
        if let Fragment::Writable(b) = self {
            b.extend_from_slice(&data[..n]);
        }
        n
    }

    /// Freeze in place and hand out a new reference to the bytes.
    pub(crate) fn freeze(&mut self) -> Bytes {
        let frozen = match std::mem::replace(self, Fragment::Frozen(Bytes::new())) {
            Fragment::Writable(b) => b.freeze(),
            Fragment::Frozen(b) => b,
        };
        *self = Fragment::Frozen(frozen.clone());
        frozen
    }

    /// Consume the fragment as `Bytes`. Never copies.
    pub(crate) fn into_bytes(self) -> Bytes {
        match self {
            Fragment::Writable(b) => b.freeze(),
            Fragment::Frozen(b) => b,
        }
    }

    /// Drop `n` bytes from the end of this view. `n` must be `<= len()`.
    pub(crate) fn trim_back(&mut self, n: usize) {
        let keep = self.len() - n;
        match self {
            Fragment::Writable(b) => b.truncate(keep),
            Fragment::Frozen(b) => b.truncate(keep),
        }
    }

    /// Drop `n` bytes from the front of this view. `n` must be `<= len()`.
    pub(crate) fn trim_front(&mut self, n: usize) {
        match self {
            Fragment::Writable(b) => b.advance(n),
            Fragment::Frozen(b) => b.advance(n),
        }
    }
}
