//! compression/registry.rs
//! Codec metadata, factory functions, and the id -> adapter table.

use bitflags::bitflags;

use crate::buffer::ChunkedBuffer;
use crate::compression::codecs::{
    GzipCodec, Lz4FrameCodec, SnappyJavaCodec, SnappyStandardCodec, ZstdBlockCodec, ZstdStreamCodec,
};
use crate::compression::config::CompressionConfig;
use crate::compression::types::{Codec, CodecId, CompressionError};

bitflags! {
    /// What a codec's frame guarantees on the wire.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct CodecCaps: u8 {
        /// Adapter can run incrementally across calls.
        const STREAMING    = 0x01;
        /// Frame carries a checksum over the content.
        const CHECKSUMMED  = 0x02;
        /// Frame records the uncompressed length.
        const CONTENT_SIZE = 0x04;
        /// Frame ends with an explicit end marker.
        const END_MARKER   = 0x08;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecInfo {
    pub id: CodecId,
    pub name: &'static str,
    pub caps: CodecCaps,
}

impl CodecInfo {
    #[inline]
    pub fn is_streaming(&self) -> bool {
        self.caps.contains(CodecCaps::STREAMING)
    }
}

/// Static metadata for a raw codec id.
pub fn resolve(codec_id: u16) -> Result<CodecInfo, CompressionError> {
    let id = CodecId::from_raw(codec_id)?;
    let caps = match id {
        CodecId::Gzip => CodecCaps::CHECKSUMMED | CodecCaps::CONTENT_SIZE,
        CodecId::Lz4Frame => CodecCaps::CHECKSUMMED | CodecCaps::END_MARKER,
        CodecId::SnappyJava => CodecCaps::CONTENT_SIZE,
        CodecId::SnappyStandard => CodecCaps::CONTENT_SIZE,
        CodecId::ZstdBlock => CodecCaps::CONTENT_SIZE | CodecCaps::END_MARKER,
        CodecId::ZstdStream => CodecCaps::STREAMING | CodecCaps::END_MARKER,
    };
    Ok(CodecInfo { id, name: id.name(), caps })
}

pub fn create_codec(id: CodecId, config: &CompressionConfig) -> Box<dyn Codec> {
    match id {
        CodecId::Gzip => Box::new(GzipCodec::new(config.gzip_level)),
        CodecId::Lz4Frame => Box::new(Lz4FrameCodec::new(config.lz4_content_checksum)),
        CodecId::SnappyJava => Box::new(SnappyJavaCodec::new(config.snappy_java_block_size, config.max_decompressed_size)),
        CodecId::SnappyStandard => Box::new(SnappyStandardCodec::new()),
        CodecId::ZstdBlock => Box::new(ZstdBlockCodec::new(config.zstd_level, config.max_decompressed_size)),
        CodecId::ZstdStream => Box::new(ZstdStreamCodec::new(config.zstd_level, config.stream_output_chunk)),
    }
}

/// Table of adapters indexed by `CodecId`.
pub struct CodecRegistry {
    codecs: Vec<Box<dyn Codec>>,
}

impl CodecRegistry {
    /// Build every adapter from a validated config.
    pub fn new(config: &CompressionConfig) -> Result<Self, CompressionError> {
        config.validate()?;
        let codecs = CodecId::ALL.iter().map(|&id| create_codec(id, config)).collect();
        Ok(Self { codecs })
    }

    #[inline]
    pub fn get(&self, id: CodecId) -> &dyn Codec {
        self.codecs[id.index()].as_ref()
    }

    pub fn get_raw(&self, codec_id: u16) -> Result<&dyn Codec, CompressionError> {
        Ok(self.get(CodecId::from_raw(codec_id)?))
    }

    pub fn by_name(&self, name: &str) -> Result<&dyn Codec, CompressionError> {
        Ok(self.get(name.parse()?))
    }

    pub fn compress(&self, id: CodecId, input: ChunkedBuffer) -> Result<ChunkedBuffer, CompressionError> {
        self.get(id).compress(input)
    }

    pub fn decompress(&self, id: CodecId, input: ChunkedBuffer) -> Result<ChunkedBuffer, CompressionError> {
        self.get(id).decompress(input)
    }
}

impl Default for CodecRegistry {
    fn default() -> Self {
        let config = CompressionConfig::default();
        let codecs = CodecId::ALL.iter().map(|&id| create_codec(id, &config)).collect();
        Self { codecs }
    }
}
