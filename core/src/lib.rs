//! codec-core
//!
//! Chunked, shareable byte buffers and a uniform compression layer
//! (gzip, LZ4 frame, snappy-java, snappy, zstd block and stream) on top.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod utils;

pub mod buffer;
pub mod compression;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::buffer::{BufferError, ChunkedBuffer, SizeClassTable};
    pub use crate::compression::{
        codecs::{ZstdStreamCodec, ZstdStreamSession},
        Codec, CodecId, CodecRegistry, CompressionConfig, CompressionError,
    };
}
