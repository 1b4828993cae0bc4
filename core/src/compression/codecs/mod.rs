//! compression/codecs/mod.rs
//! One adapter per codec id, all behind the `Codec` contract.
//!
//! Block adapters (gzip, lz4-frame, snappy-java, snappy-standard, zstd-block)
//! transform a whole buffer per call. `zstd_stream` also exposes an
//! incremental session.

pub mod gzip;
pub mod lz4_frame;
pub mod snappy_java;
pub mod snappy_standard;
pub mod zstd_block;
pub mod zstd_stream;

pub use gzip::*;
pub use lz4_frame::*;
pub use snappy_java::*;
pub use snappy_standard::*;
pub use zstd_block::*;
pub use zstd_stream::*;
