//! Error types for ring buffer operations.

use std::io;
use thiserror::Error;

/// Errors returned by [`RingBuffer`](crate::RingBuffer) operations.
///
/// Every failure is synchronous and leaves the cursors unchanged. The only
/// state a rejected `put`/`get` touches is the `rejected_writes` /
/// `rejected_reads` counter in [`Metrics`](crate::Metrics), when enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RingError {
    /// The write is larger than the free space.
    #[error("buffer full: cannot write {requested} bytes, only {surplus} free")]
    BufferFull {
        /// Number of bytes the caller tried to write.
        requested: usize,
        /// Free space at the time of the call.
        surplus: usize,
    },

    /// The read is larger than the unread data.
    #[error("insufficient data: cannot read {requested} bytes, only {occupied} available")]
    InsufficientData {
        /// Number of bytes the caller tried to read.
        requested: usize,
        /// Unread bytes at the time of the call.
        occupied: usize,
    },

    /// A commit acknowledged zero bytes, or more bytes than the capacity.
    #[error("invalid commit length")]
    InvalidCommitLength,

    /// The requested capacity is zero or too large to round to a power of two.
    #[error("invalid capacity: {requested}")]
    InvalidCapacity {
        /// The capacity that was requested.
        requested: usize,
    },

    /// A reservation guard was asked to commit more bytes than its window holds.
    #[error("cannot commit {attempted} bytes, only {available} reserved")]
    CommitExceedsWindow {
        /// Number of bytes attempted to commit.
        attempted: usize,
        /// Length of the reserved window.
        available: usize,
    },
}

impl RingError {
    /// Returns `true` if the caller should defer and retry later
    /// (`BufferFull`, `InsufficientData`).
    #[inline]
    pub fn is_backpressure(&self) -> bool {
        matches!(self, Self::BufferFull { .. } | Self::InsufficientData { .. })
    }

    /// Returns `true` if the error indicates a bug in the calling code.
    #[inline]
    pub fn is_programming_error(&self) -> bool {
        !self.is_backpressure()
    }
}

impl From<RingError> for io::Error {
    fn from(err: RingError) -> Self {
        let kind = if err.is_backpressure() {
            io::ErrorKind::WouldBlock
        } else {
            io::ErrorKind::InvalidInput
        };
        io::Error::new(kind, err)
    }
}
