/// Standard fragment size classes.
///
/// Grows by 1.5x from 512 bytes; the last class is clamped to 128 KiB.
/// Requests past the last class round up to whole multiples of it.
pub const ALLOC_SIZE_CLASSES: [usize; 15] = [
    512,
    768,
    1152,
    1728,
    2592,
    3888,
    5832,
    8748,
    13122,
    19683,
    29525,
    44288,
    66432,
    99648,
    128 * 1024,
];

/// Smallest fragment the standard table hands out.
pub const MIN_FRAGMENT_SIZE: usize = ALLOC_SIZE_CLASSES[0];

/// Largest fragment `append` will allocate (128 KiB).
pub const MAX_FRAGMENT_SIZE: usize = ALLOC_SIZE_CLASSES[ALLOC_SIZE_CLASSES.len() - 1];
