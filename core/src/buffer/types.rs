//! buffer/types.rs
//! Errors raised by chunked buffer operations.

use thiserror::Error;

/// Range and construction errors for [`ChunkedBuffer`](super::ChunkedBuffer).
///
/// All variants are recoverable: the buffer that raised them is unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BufferError {
    /// `share(offset, len)` reached past the end of the buffer.
    #[error("range [{offset}, {offset}+{len}) out of bounds for buffer of {size} bytes")]
    OutOfRange { offset: usize, len: usize, size: usize },

    /// `trim_back` / `trim_front` asked for more bytes than the buffer holds.
    #[error("cannot trim {requested} bytes from buffer of {size} bytes")]
    TrimOutOfRange { requested: usize, size: usize },

    /// A custom size-class table failed validation.
    #[error("invalid size-class table: {0}")]
    InvalidSizeClasses(String),
}
