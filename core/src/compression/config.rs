//! compression/config.rs
//! Per-codec tuning knobs.
//!
//! Deserializable so configuration layers can pick levels and block sizes
//! per use case; every field has a default.

use serde::{Deserialize, Serialize};

use crate::compression::constants::*;
use crate::compression::types::CompressionError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompressionConfig {
    /// gzip level, 0..=9.
    pub gzip_level: u32,
    /// zstd level for both zstd codecs, 1..=22.
    pub zstd_level: i32,
    /// Emit the optional LZ4 frame content checksum.
    pub lz4_content_checksum: bool,
    /// Uncompressed bytes per snappy-java block, 1..=64 MiB.
    pub snappy_java_block_size: usize,
    /// Scratch output size for one zstd-stream step. Defaults to zstd's
    /// recommended stream output size.
    pub stream_output_chunk: usize,
    /// Largest output a zstd-block or snappy-java frame may decode to.
    pub max_decompressed_size: usize,
}

impl Default for CompressionConfig {
    fn default() -> Self {
        Self {
            gzip_level: DEFAULT_LEVEL_GZIP,
            zstd_level: DEFAULT_LEVEL_ZSTD,
            lz4_content_checksum: true,
            snappy_java_block_size: DEFAULT_SNAPPY_JAVA_BLOCK_SIZE,
            stream_output_chunk: default_stream_output_chunk(),
            max_decompressed_size: DEFAULT_MAX_DECOMPRESSED_SIZE,
        }
    }
}

impl CompressionConfig {
    /// Parse and validate a JSON document. Missing fields take defaults.
    pub fn from_json(s: &str) -> Result<Self, CompressionError> {
        let config: CompressionConfig = serde_json::from_str(s)
            .map_err(|e| CompressionError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), CompressionError> {
        if self.gzip_level > 9 {
            return Err(CompressionError::InvalidConfig(format!(
                "gzip_level {} outside 0..=9",
                self.gzip_level
            )));
        }
        if !(MIN_LEVEL_ZSTD..=MAX_LEVEL_ZSTD).contains(&self.zstd_level) {
            return Err(CompressionError::InvalidConfig(format!(
                "zstd_level {} outside {}..={}",
                self.zstd_level, MIN_LEVEL_ZSTD, MAX_LEVEL_ZSTD
            )));
        }
        if self.snappy_java_block_size == 0 {
            return Err(CompressionError::InvalidConfig(
                "snappy_java_block_size must be > 0".into(),
            ));
        }
        if self.snappy_java_block_size > MAX_SNAPPY_JAVA_BLOCK_SIZE {
            return Err(CompressionError::InvalidConfig(format!(
                "snappy_java_block_size {} exceeds {}",
                self.snappy_java_block_size, MAX_SNAPPY_JAVA_BLOCK_SIZE
            )));
        }
        if self.stream_output_chunk == 0 {
            return Err(CompressionError::InvalidConfig(
                "stream_output_chunk must be > 0".into(),
            ));
        }
        if self.max_decompressed_size == 0 {
            return Err(CompressionError::InvalidConfig(
                "max_decompressed_size must be > 0".into(),
            ));
        }
        Ok(())
    }
}
