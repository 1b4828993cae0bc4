//! codecs/lz4_frame.rs
//! LZ4 frame format (magic 0x184D2204) via lz4_flex.
//!
//! Frames carry an end mark and, unless disabled, a content checksum.
//! Both directions stream over the fragments. Decoding takes exactly one
//! frame; bytes after its end mark are corrupt.

use std::io::{self, BufRead, Write};

use lz4_flex::frame::{FrameDecoder, FrameEncoder, FrameInfo};
use tracing::{trace, warn};

use crate::buffer::ChunkedBuffer;
use crate::compression::types::{Codec, CodecId, CompressionError};

pub struct Lz4FrameCodec {
    content_checksum: bool,
}

impl Lz4FrameCodec {
    pub fn new(content_checksum: bool) -> Self {
        Self { content_checksum }
    }
}

impl Default for Lz4FrameCodec {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Codec for Lz4FrameCodec {
    fn id(&self) -> CodecId {
        CodecId::Lz4Frame
    }

    fn compress(&self, input: ChunkedBuffer) -> Result<ChunkedBuffer, CompressionError> {
        let info = FrameInfo::new().content_checksum(self.content_checksum);
        let mut encoder = FrameEncoder::with_frame_info(info, ChunkedBuffer::new());
        for frag in input.fragments() {
            encoder
                .write_all(frag)
                .map_err(|e| CompressionError::process_failed(CodecId::Lz4Frame, e))?;
        }
        // finish() emits a complete (header + end mark) frame even for empty input
        let out = encoder
            .finish()
            .map_err(|e| CompressionError::process_failed(CodecId::Lz4Frame, e))?;

        trace!(codec = "lz4-frame", input_len = input.size_bytes(), output_len = out.size_bytes(), "compressed");
        Ok(out)
    }

    fn decompress(&self, input: ChunkedBuffer) -> Result<ChunkedBuffer, CompressionError> {
        if input.is_empty() {
            warn!(codec = "lz4-frame", "rejecting empty frame");
            return Err(CompressionError::corrupt(CodecId::Lz4Frame, "empty frame"));
        }

        let mut decoder = FrameDecoder::new(input.reader());
        let mut out = ChunkedBuffer::new();
        if let Err(e) = io::copy(&mut decoder, &mut out) {
            warn!(codec = "lz4-frame", error = %e, "rejecting corrupt frame");
            return Err(CompressionError::corrupt(CodecId::Lz4Frame, e));
        }
        let trailing = decoder.get_mut().fill_buf().map_or(0, |rest| rest.len());
        if trailing > 0 {
            warn!(codec = "lz4-frame", trailing, "rejecting trailing bytes");
            return Err(CompressionError::corrupt(
                CodecId::Lz4Frame,
                format!("{} trailing bytes after end mark", trailing),
            ));
        }

        trace!(codec = "lz4-frame", input_len = input.size_bytes(), output_len = out.size_bytes(), "decompressed");
        Ok(out)
    }
}
