use std::ops::Range;

/// A contiguous `(offset, len)` span of the backing array.
///
/// Returned by [`RingBuffer::reserve_write`](crate::RingBuffer::reserve_write)
/// and [`RingBuffer::reserve_read`](crate::RingBuffer::reserve_read). The span
/// never crosses the end of the array, so it can be handed as-is to an I/O
/// primitive that accepts a single buffer descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Window {
    /// Physical offset into the backing array.
    pub offset: usize,
    /// Maximum number of bytes available at `offset`.
    pub len: usize,
}

impl Window {
    pub const fn new(offset: usize, len: usize) -> Self {
        Self { offset, len }
    }

    /// The window as an index range into
    /// [`storage`](crate::RingBuffer::storage).
    #[inline]
    pub const fn range(&self) -> Range<usize> {
        self.offset..self.offset + self.len
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}
