//! codecs/snappy_standard.rs
//! Raw snappy block format via `snap::raw`.
//!
//! The frame starts with the uncompressed length as a varint, so decoding
//! sizes its output exactly. Snappy blocks are not streamable; both
//! directions work on one contiguous slice (zero-copy when the input is a
//! single fragment).

use tracing::{trace, warn};

use crate::buffer::ChunkedBuffer;
use crate::compression::types::{Codec, CodecId, CompressionError};

#[derive(Default)]
pub struct SnappyStandardCodec;

impl SnappyStandardCodec {
    pub fn new() -> Self {
        Self
    }
}

impl Codec for SnappyStandardCodec {
    fn id(&self) -> CodecId {
        CodecId::SnappyStandard
    }

    fn compress(&self, input: ChunkedBuffer) -> Result<ChunkedBuffer, CompressionError> {
        let data = input.into_bytes();
        let compressed = snap::raw::Encoder::new()
            .compress_vec(&data)
            .map_err(|e| CompressionError::process_failed(CodecId::SnappyStandard, e))?;

        trace!(codec = "snappy-standard", input_len = data.len(), output_len = compressed.len(), "compressed");
        Ok(ChunkedBuffer::from(compressed))
    }

    fn decompress(&self, input: ChunkedBuffer) -> Result<ChunkedBuffer, CompressionError> {
        let data = input.into_bytes();
        let decompressed = snap::raw::Decoder::new().decompress_vec(&data).map_err(|e| {
            warn!(codec = "snappy-standard", error = %e, "rejecting corrupt frame");
            CompressionError::corrupt(CodecId::SnappyStandard, e)
        })?;

        trace!(codec = "snappy-standard", input_len = data.len(), output_len = decompressed.len(), "decompressed");
        Ok(ChunkedBuffer::from(decompressed))
    }
}
