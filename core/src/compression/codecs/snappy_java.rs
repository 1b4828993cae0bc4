//! codecs/snappy_java.rs
//! xerial snappy-java stream framing.
//!
//! Layout:
//! - 8-byte magic `0x82 "SNAPPY" 0x00`
//! - BE i32 version, BE i32 compatible version
//! - zero or more blocks: BE i32 compressed length + raw snappy block
//!
//! An empty payload is the header alone. Decoding trusts no block's
//! declared length past `max_decompressed_size` of total output.

use std::io::Read;

use byteorder::{BigEndian, ByteOrder, WriteBytesExt};
use tracing::{trace, warn};

use crate::buffer::ChunkedBuffer;
use crate::compression::constants::*;
use crate::compression::types::{Codec, CodecId, CompressionError};

pub struct SnappyJavaCodec {
    block_size: usize,
    max_decompressed_size: usize,
}

impl SnappyJavaCodec {
    pub fn new(block_size: usize, max_decompressed_size: usize) -> Self {
        Self {
            block_size: block_size.clamp(1, MAX_SNAPPY_JAVA_BLOCK_SIZE),
            max_decompressed_size,
        }
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }
}

impl Default for SnappyJavaCodec {
    fn default() -> Self {
        Self::new(DEFAULT_SNAPPY_JAVA_BLOCK_SIZE, DEFAULT_MAX_DECOMPRESSED_SIZE)
    }
}

fn corrupt(msg: impl std::fmt::Display) -> CompressionError {
    warn!(codec = "snappy-java", error = %msg, "rejecting corrupt frame");
    CompressionError::corrupt(CodecId::SnappyJava, msg)
}

impl Codec for SnappyJavaCodec {
    fn id(&self) -> CodecId {
        CodecId::SnappyJava
    }

    fn compress(&self, input: ChunkedBuffer) -> Result<ChunkedBuffer, CompressionError> {
        let io_err = |e: std::io::Error| CompressionError::process_failed(CodecId::SnappyJava, e);

        let mut out = ChunkedBuffer::new();
        out.append(&SNAPPY_JAVA_MAGIC);
        out.write_i32::<BigEndian>(SNAPPY_JAVA_VERSION).map_err(io_err)?;
        out.write_i32::<BigEndian>(SNAPPY_JAVA_COMPAT_VERSION).map_err(io_err)?;

        let mut encoder = snap::raw::Encoder::new();
        let mut reader = input.reader();
        let mut block = Vec::with_capacity(self.block_size);
        let mut compressed = vec![0u8; snap::raw::max_compress_len(self.block_size)];

        loop {
            block.clear();
            (&mut reader)
                .take(self.block_size as u64)
                .read_to_end(&mut block)
                .map_err(io_err)?;
            if block.is_empty() {
                break;
            }

            let n = encoder
                .compress(&block, &mut compressed)
                .map_err(|e| CompressionError::process_failed(CodecId::SnappyJava, e))?;
            let len = i32::try_from(n).map_err(|_| {
                CompressionError::process_failed(CodecId::SnappyJava, format!("block of {} bytes overflows i32", n))
            })?;
            out.write_i32::<BigEndian>(len).map_err(io_err)?;
            out.append(&compressed[..n]);
        }

        trace!(codec = "snappy-java", input_len = input.size_bytes(), output_len = out.size_bytes(), "compressed");
        Ok(out)
    }

    fn decompress(&self, input: ChunkedBuffer) -> Result<ChunkedBuffer, CompressionError> {
        let input_len = input.size_bytes();
        let data = input.into_bytes();

        if data.len() < SNAPPY_JAVA_HEADER_LEN {
            return Err(corrupt(format!("truncated header ({} bytes)", data.len())));
        }
        if data[..SNAPPY_JAVA_MAGIC.len()] != SNAPPY_JAVA_MAGIC {
            return Err(corrupt("bad snappy-java magic"));
        }
        let compat = BigEndian::read_i32(&data[12..16]);
        if compat < SNAPPY_JAVA_COMPAT_VERSION {
            return Err(corrupt(format!("unsupported compatible version {}", compat)));
        }

        let mut decoder = snap::raw::Decoder::new();
        let mut out = ChunkedBuffer::new();
        let mut scratch = Vec::new();
        let mut rest = &data[SNAPPY_JAVA_HEADER_LEN..];

        while !rest.is_empty() {
            if rest.len() < 4 {
                return Err(corrupt("truncated block length"));
            }
            let len = BigEndian::read_i32(&rest[..4]);
            rest = &rest[4..];
            let len = usize::try_from(len).map_err(|_| corrupt(format!("negative block length {}", len)))?;
            if len > rest.len() {
                return Err(corrupt(format!("block of {} bytes truncated to {}", len, rest.len())));
            }
            let (block, tail) = rest.split_at(len);
            rest = tail;

            let n = snap::raw::decompress_len(block).map_err(corrupt)?;
            let budget = self.max_decompressed_size.saturating_sub(out.size_bytes());
            if n > budget {
                return Err(corrupt(format!(
                    "block declares {} bytes, over the {} byte limit",
                    n, self.max_decompressed_size
                )));
            }
            scratch.resize(n, 0);
            decoder.decompress(block, &mut scratch).map_err(corrupt)?;
            out.append(&scratch[..n]);
        }

        trace!(codec = "snappy-java", input_len, output_len = out.size_bytes(), "decompressed");
        Ok(out)
    }
}
