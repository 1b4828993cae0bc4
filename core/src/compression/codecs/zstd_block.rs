//! codecs/zstd_block.rs
//! One-shot Zstandard frames via `zstd::bulk`.
//!
//! Design notes:
//! - Compression records the content size in the frame header.
//! - Decompression sizes its output from that header, bounded by
//!   `max_decompressed_size`; frames without a size (from other producers)
//!   fall back to the streaming decoder.

use tracing::{trace, warn};

use crate::buffer::ChunkedBuffer;
use crate::compression::constants::{DEFAULT_LEVEL_ZSTD, DEFAULT_MAX_DECOMPRESSED_SIZE};
use crate::compression::types::{Codec, CodecId, CompressionError};

pub struct ZstdBlockCodec {
    level: i32,
    max_decompressed_size: usize,
}

impl ZstdBlockCodec {
    pub fn new(level: i32, max_decompressed_size: usize) -> Self {
        Self { level, max_decompressed_size }
    }
}

impl Default for ZstdBlockCodec {
    fn default() -> Self {
        Self::new(DEFAULT_LEVEL_ZSTD, DEFAULT_MAX_DECOMPRESSED_SIZE)
    }
}

fn corrupt(msg: impl std::fmt::Display) -> CompressionError {
    warn!(codec = "zstd-block", error = %msg, "rejecting corrupt frame");
    CompressionError::corrupt(CodecId::ZstdBlock, msg)
}

impl Codec for ZstdBlockCodec {
    fn id(&self) -> CodecId {
        CodecId::ZstdBlock
    }

    fn compress(&self, input: ChunkedBuffer) -> Result<ChunkedBuffer, CompressionError> {
        let data = input.into_bytes();
        let compressed = zstd::bulk::compress(&data, self.level)
            .map_err(|e| CompressionError::process_failed(CodecId::ZstdBlock, e))?;

        trace!(codec = "zstd-block", input_len = data.len(), output_len = compressed.len(), "compressed");
        Ok(ChunkedBuffer::from(compressed))
    }

    fn decompress(&self, input: ChunkedBuffer) -> Result<ChunkedBuffer, CompressionError> {
        if input.is_empty() {
            return Err(corrupt("empty frame"));
        }
        let data = input.into_bytes();

        let content_size = zstd_safe::get_frame_content_size(&data)
            .map_err(|_| corrupt("invalid frame header"))?;

        let decompressed = match content_size {
            Some(size) if size > self.max_decompressed_size as u64 => {
                return Err(corrupt(format!(
                    "declared content size {} exceeds limit {}",
                    size, self.max_decompressed_size
                )));
            }
            Some(size) if size > 0 => {
                let size = size as usize;
                let out = zstd::bulk::decompress(&data, size).map_err(corrupt)?;
                if out.len() != size {
                    return Err(corrupt(format!("decoded {} bytes, header says {}", out.len(), size)));
                }
                out
            }
            _ => {
                let out = zstd::stream::decode_all(&data[..]).map_err(corrupt)?;
                if content_size == Some(0) && !out.is_empty() {
                    return Err(corrupt(format!("decoded {} bytes, header says 0", out.len())));
                }
                out
            }
        };

        trace!(codec = "zstd-block", input_len = data.len(), output_len = decompressed.len(), "decompressed");
        Ok(ChunkedBuffer::from(decompressed))
    }
}
