//! compression/mod.rs
//! Interchangeable codecs over chunked buffers.
//!
//! - `types`: codec ids, the `Codec` contract, errors.
//! - `codecs`: one adapter per codec id.
//! - `registry`: metadata and id -> adapter dispatch.
//! - `config`: levels and block sizes, deserializable.

pub mod codecs;
pub mod config;
pub mod constants;
pub mod registry;
pub mod types;

pub use config::*;
pub use constants::*;
pub use registry::*;
pub use types::*;
