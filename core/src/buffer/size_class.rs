//! buffer/size_class.rs
//! Allocation size classes for buffer fragments.
//!
//! A table is an ascending list of capacities. Small and medium requests are
//! rounded up to the next class; requests past the largest class round up to
//! a whole multiple of it (2x, 3x, ...).

use crate::buffer::types::BufferError;
use crate::constants::ALLOC_SIZE_CLASSES;

/// Process-wide standard table. Const-initialized, never mutated.
pub static STANDARD_SIZE_CLASSES: SizeClassTable = SizeClassTable {
    classes: &ALLOC_SIZE_CLASSES,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeClassTable {
    classes: &'static [usize],
}

impl SizeClassTable {
    /// Build a custom table.
    ///
    /// # Errors
    /// - `BufferError::InvalidSizeClasses` if the table is empty, contains a
    ///   zero entry, or is not strictly ascending.
    pub fn new(classes: &'static [usize]) -> Result<Self, BufferError> {
        if classes.is_empty() {
            return Err(BufferError::InvalidSizeClasses("table is empty".into()));
        }
        if classes[0] == 0 {
            return Err(BufferError::InvalidSizeClasses("zero-sized class".into()));
        }
        if let Some(w) = classes.windows(2).find(|w| w[0] >= w[1]) {
            return Err(BufferError::InvalidSizeClasses(format!(
                "classes not strictly ascending at {} >= {}",
                w[0], w[1]
            )));
        }
        Ok(Self { classes })
    }

    #[inline]
    pub fn standard() -> &'static SizeClassTable {
        &STANDARD_SIZE_CLASSES
    }

    #[inline]
    pub fn classes(&self) -> &'static [usize] {
        self.classes
    }

    #[inline]
    pub fn min_class(&self) -> usize {
        self.classes[0]
    }

    #[inline]
    pub fn max_class(&self) -> usize {
        self.classes[self.classes.len() - 1]
    }

    /// Smallest class `>= request`, or the smallest multiple of the largest
    /// class that covers `request` when it falls off the end of the table.
    pub fn next_size(&self, request: usize) -> usize {
        let max = self.max_class();
        if request <= max {
            let idx = self.classes.partition_point(|&class| class < request);
            return self.classes[idx];
        }
        // request > max, so the multiple is at least 2
        request.div_ceil(max).saturating_mul(max)
    }

    /// Same as [`next_size`](Self::next_size) but never larger than the
    /// largest class. Used when growing a buffer fragment by fragment.
    #[inline]
    pub fn next_fragment_size(&self, request: usize) -> usize {
        self.next_size(request.min(self.max_class()))
    }
}
