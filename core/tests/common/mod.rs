#![allow(dead_code)]

use codec_core::buffer::ChunkedBuffer;
use codec_core::constants::ALLOC_SIZE_CLASSES;
use rand::{distributions::Alphanumeric, Rng};

pub const SIZES: [usize; 16] = [
    0, 1, 2, 3, 8, 9, 16, 32, 64, 512,
    1024, 2 * 1024, 4 * 1024, 6 * 1024, 8 * 1024, 10 * 1024,
];

/// Fixed sizes, every size class, and 2x / 3x the largest class.
pub fn test_sizes() -> Vec<usize> {
    let mut sizes = SIZES.to_vec();
    sizes.extend_from_slice(&ALLOC_SIZE_CLASSES);
    let max = ALLOC_SIZE_CLASSES[ALLOC_SIZE_CLASSES.len() - 1];
    sizes.push(max * 2);
    sizes.push(max * 3);
    sizes
}

pub fn alphanum(len: usize) -> Vec<u8> {
    rand::thread_rng().sample_iter(&Alphanumeric).take(len).collect()
}

/// Random alphanumeric buffer built 512 bytes at a time, then trimmed to size.
pub fn gen(size: usize) -> ChunkedBuffer {
    let mut buf = ChunkedBuffer::new();
    let mut written = 0;
    while written < size {
        buf.append(&alphanum(512));
        written += 512;
    }
    buf.trim_back(buf.size_bytes() - size).unwrap();
    buf
}
