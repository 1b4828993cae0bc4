//! compression/types.rs
//! Codec identifiers, the adapter contract, and compression errors.
use std::fmt;
use std::str::FromStr;

use num_enum::TryFromPrimitive;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::buffer::{BufferError, ChunkedBuffer};
use crate::compression::constants::codec_ids;
use crate::utils::enum_name_or_hex;

/// Closed set of codecs this crate can dispatch to.
#[repr(u16)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, TryFromPrimitive, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CodecId {
    Gzip           = codec_ids::GZIP,
    Lz4Frame       = codec_ids::LZ4_FRAME,
    SnappyJava     = codec_ids::SNAPPY_JAVA,
    SnappyStandard = codec_ids::SNAPPY_STANDARD,
    ZstdBlock      = codec_ids::ZSTD_BLOCK,
    ZstdStream     = codec_ids::ZSTD_STREAM,
}

impl CodecId {
    /// Every codec, in id order.
    pub const ALL: [CodecId; 6] = [
        CodecId::Gzip,
        CodecId::Lz4Frame,
        CodecId::SnappyJava,
        CodecId::SnappyStandard,
        CodecId::ZstdBlock,
        CodecId::ZstdStream,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            CodecId::Gzip => "gzip",
            CodecId::Lz4Frame => "lz4-frame",
            CodecId::SnappyJava => "snappy-java",
            CodecId::SnappyStandard => "snappy-standard",
            CodecId::ZstdBlock => "zstd-block",
            CodecId::ZstdStream => "zstd-stream",
        }
    }

    /// Dense table index (ids start at 1).
    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize - 1
    }

    pub fn from_raw(raw: u16) -> Result<Self, CompressionError> {
        CodecId::try_from_primitive(raw)
            .map_err(|_| CompressionError::UnsupportedCodec { codec_id: raw })
    }
}

impl fmt::Display for CodecId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CodecId {
    type Err = CompressionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CodecId::ALL
            .into_iter()
            .find(|id| id.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| CompressionError::UnknownCodecName(s.to_string()))
    }
}

/// Lifecycle of a streaming session.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StreamState {
    Idle,
    Compressing,
    Decompressing,
    Finalized,
}

impl fmt::Display for StreamState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StreamState::Idle => "idle",
            StreamState::Compressing => "compressing",
            StreamState::Decompressing => "decompressing",
            StreamState::Finalized => "finalized",
        };
        f.write_str(s)
    }
}

fn codec_label(raw: &u16) -> String {
    enum_name_or_hex::<CodecId>(*raw)
}

#[derive(Debug, Error)]
pub enum CompressionError {
    #[error("unsupported compression codec: {}", codec_label(.codec_id))]
    UnsupportedCodec { codec_id: u16 },

    #[error("unknown compression codec name: {0:?}")]
    UnknownCodecName(String),

    /// Input is not a valid frame for this codec. Nothing was produced.
    #[error("codec {codec} rejected corrupt frame: {msg}")]
    Corrupt { codec: CodecId, msg: String },

    #[error("codec {codec} process failed: {msg}")]
    CodecProcessFailed { codec: CodecId, msg: String },

    /// Streaming session driven outside its valid state.
    #[error("{op} is not allowed while stream is {state}")]
    InvalidState { state: StreamState, op: &'static str },

    #[error("invalid compression config: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Buffer(#[from] BufferError),
}

impl CompressionError {
    pub fn corrupt(codec: CodecId, msg: impl fmt::Display) -> Self {
        CompressionError::Corrupt { codec, msg: msg.to_string() }
    }

    pub fn process_failed(codec: CodecId, msg: impl fmt::Display) -> Self {
        CompressionError::CodecProcessFailed { codec, msg: msg.to_string() }
    }

    #[inline]
    pub fn is_corruption(&self) -> bool {
        matches!(self, CompressionError::Corrupt { .. })
    }
}

/// One codec adapter: a whole-buffer transform and its inverse.
///
/// `compress` output is a self-describing frame in the wrapped library's own
/// format. `decompress` of anything else fails with `Corrupt`. Empty input
/// is valid for `compress` and round-trips to an empty buffer.
// Send + Sync so one registry can serve every thread.
pub trait Codec: Send + Sync {
    fn id(&self) -> CodecId;

    fn compress(&self, input: ChunkedBuffer) -> Result<ChunkedBuffer, CompressionError>;

    fn decompress(&self, input: ChunkedBuffer) -> Result<ChunkedBuffer, CompressionError>;
}
