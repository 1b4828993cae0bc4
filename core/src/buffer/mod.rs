//! buffer/mod.rs
//! Chunked byte buffers backed by size-classed fragments.

pub mod chunked;
pub mod io;
pub mod size_class;
pub mod types;

mod fragment;

pub use chunked::ChunkedBuffer;
pub use io::ChunkedReader;
pub use size_class::{SizeClassTable, STANDARD_SIZE_CLASSES};
pub use types::BufferError;
