//! buffer/io.rs
//! `Read` / `BufRead` over a chunked buffer's fragments.
//!
//! Lets stream decoders pull input fragment by fragment instead of asking
//! for one contiguous slice.

use std::collections::vec_deque;
use std::io::{self, BufRead, Read};

use crate::buffer::fragment::Fragment;

pub struct ChunkedReader<'a> {
    frags: vec_deque::Iter<'a, Fragment>,
    current: &'a [u8],
}

impl<'a> ChunkedReader<'a> {
    pub(crate) fn new(frags: vec_deque::Iter<'a, Fragment>) -> Self {
        Self { frags, current: &[] }
    }
}

impl BufRead for ChunkedReader<'_> {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        while self.current.is_empty() {
            match self.frags.next() {
                Some(frag) => self.current = frag.as_slice(),
                None => break,
            }
        }
        Ok(self.current)
    }

    fn consume(&mut self, amt: usize) {
        let amt = amt.min(self.current.len());
        self.current = &self.current[amt..];
    }
}

impl Read for ChunkedReader<'_> {
    fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
        let available = self.fill_buf()?;
        let n = available.len().min(out.len());
        out[..n].copy_from_slice(&available[..n]);
        self.consume(n);
        Ok(n)
    }
}
