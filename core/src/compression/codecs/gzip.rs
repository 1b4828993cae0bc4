//! codecs/gzip.rs
//! gzip (RFC 1952) via flate2.
//!
//! The encoder writes straight into a chunked buffer; the decoder streams the
//! input fragments through `BufRead`, so neither side linearizes. flate2
//! checks the CRC32 and ISIZE trailer.
//!
//! Decoding accepts multi-member streams (RFC 1952 2.2) and rejects any
//! bytes that do not form a member.

use std::io::{self, BufRead, Write};

use flate2::{bufread::MultiGzDecoder, write::GzEncoder, Compression};
use tracing::{trace, warn};

use crate::buffer::ChunkedBuffer;
use crate::compression::constants::DEFAULT_LEVEL_GZIP;
use crate::compression::types::{Codec, CodecId, CompressionError};

pub struct GzipCodec {
    level: Compression,
}

impl GzipCodec {
    /// Levels above 9 fall back to flate2's default.
    pub fn new(level: u32) -> Self {
        let level = match level {
            0..=9 => Compression::new(level),
            _ => Compression::default(),
        };
        Self { level }
    }
}

impl Default for GzipCodec {
    fn default() -> Self {
        Self::new(DEFAULT_LEVEL_GZIP)
    }
}

impl Codec for GzipCodec {
    fn id(&self) -> CodecId {
        CodecId::Gzip
    }

    fn compress(&self, input: ChunkedBuffer) -> Result<ChunkedBuffer, CompressionError> {
        let mut encoder = GzEncoder::new(ChunkedBuffer::new(), self.level);
        for frag in input.fragments() {
            encoder
                .write_all(frag)
                .map_err(|e| CompressionError::process_failed(CodecId::Gzip, e))?;
        }
        let out = encoder
            .finish()
            .map_err(|e| CompressionError::process_failed(CodecId::Gzip, e))?;

        trace!(codec = "gzip", input_len = input.size_bytes(), output_len = out.size_bytes(), "compressed");
        Ok(out)
    }

    fn decompress(&self, input: ChunkedBuffer) -> Result<ChunkedBuffer, CompressionError> {
        if input.is_empty() {
            warn!(codec = "gzip", "rejecting empty frame");
            return Err(CompressionError::corrupt(CodecId::Gzip, "empty frame"));
        }

        let mut decoder = MultiGzDecoder::new(input.reader());
        let mut out = ChunkedBuffer::new();
        if let Err(e) = io::copy(&mut decoder, &mut out) {
            warn!(codec = "gzip", error = %e, "rejecting corrupt frame");
            return Err(CompressionError::corrupt(CodecId::Gzip, e));
        }
        if decoder.header().is_none() {
            return Err(CompressionError::corrupt(CodecId::Gzip, "missing gzip header"));
        }
        let trailing = decoder.get_mut().fill_buf().map_or(0, |rest| rest.len());
        if trailing > 0 {
            warn!(codec = "gzip", trailing, "rejecting trailing bytes");
            return Err(CompressionError::corrupt(
                CodecId::Gzip,
                format!("{} trailing bytes after last member", trailing),
            ));
        }

        trace!(codec = "gzip", input_len = input.size_bytes(), output_len = out.size_bytes(), "decompressed");
        Ok(out)
    }
}
