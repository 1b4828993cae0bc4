/// Stable codec IDs (u16) used by configuration and registry lookups.
pub mod codec_ids {
    pub const GZIP: u16            = 0x0001;
    pub const LZ4_FRAME: u16       = 0x0002;
    pub const SNAPPY_JAVA: u16     = 0x0003;
    pub const SNAPPY_STANDARD: u16 = 0x0004;
    pub const ZSTD_BLOCK: u16      = 0x0005;
    pub const ZSTD_STREAM: u16     = 0x0006;
}

/// Default compression levels (balanced).
pub const DEFAULT_LEVEL_GZIP: u32 = 6;
pub const DEFAULT_LEVEL_ZSTD: i32 = 3;

/// Valid zstd levels accepted by configuration.
pub const MIN_LEVEL_ZSTD: i32 = 1;
pub const MAX_LEVEL_ZSTD: i32 = 22;

/// Uncompressed bytes per snappy-java block.
pub const DEFAULT_SNAPPY_JAVA_BLOCK_SIZE: usize = 32 * 1024;

/// Largest snappy-java block; its compressed length must fit the BE i32 prefix.
pub const MAX_SNAPPY_JAVA_BLOCK_SIZE: usize = 64 * 1024 * 1024;

/// Scratch output size for one zstd stream step: zstd's recommended
/// `ZSTD_CStreamOutSize`, which also covers a full decoded block.
pub fn default_stream_output_chunk() -> usize {
    zstd_safe::CCtx::out_size()
}

/// Upper bound on decompressed output for zstd-block and snappy-java (256 MiB).
pub const DEFAULT_MAX_DECOMPRESSED_SIZE: usize = 256 * 1024 * 1024;

/// snappy-java stream header: magic, then BE i32 version and compatible version.
pub const SNAPPY_JAVA_MAGIC: [u8; 8] = [0x82, b'S', b'N', b'A', b'P', b'P', b'Y', 0x00];
pub const SNAPPY_JAVA_VERSION: i32 = 1;
pub const SNAPPY_JAVA_COMPAT_VERSION: i32 = 1;
pub const SNAPPY_JAVA_HEADER_LEN: usize = SNAPPY_JAVA_MAGIC.len() + 4 + 4;
