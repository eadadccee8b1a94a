use crate::{RingBuffer, RingError, Window};

/// Borrowed write window over the free span at `head`.
///
/// The guard holds `&mut RingBuffer`, so nothing else can touch the buffer
/// until it is committed or dropped. Dropping without committing leaves the
/// cursors where they were.
///
/// **Important:** A reservation covers only the contiguous span up to the end
/// of the backing array. If the free space wraps, write the remainder through a
/// second reservation after committing this one.
///
/// # Example
///
/// ```
/// use sockfifo::RingBuffer;
///
/// let mut rb = RingBuffer::new(16).unwrap();
/// let mut reservation = rb.reserve_write_guard();
/// let slice = reservation.as_mut_slice();
/// slice[..5].copy_from_slice(b"hello");
/// reservation.try_commit_n(5).unwrap();
///
/// assert_eq!(rb.get(5).unwrap(), b"hello");
/// ```
pub struct WriteReservation<'a> {
    ring: &'a mut RingBuffer,
    window: Window,
}

impl<'a> WriteReservation<'a> {
    pub(crate) fn new(ring: &'a mut RingBuffer, window: Window) -> Self {
        Self { ring, window }
    }

    /// The reserved span of the backing array.
    #[inline]
    pub fn window(&self) -> Window {
        self.window
    }

    /// Returns a mutable slice for writing data.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.ring.storage_mut()[self.window.range()]
    }

    /// Returns the number of reserved bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.window.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    /// Commits the whole window.
    pub fn commit(self) {
        let len = self.window.len;
        self.ring.advance_head(len);
    }

    /// Commits exactly `n` bytes, failing if `n > len()`.
    pub fn try_commit_n(self, n: usize) -> Result<(), RingError> {
        if n > self.window.len {
            return Err(RingError::CommitExceedsWindow {
                attempted: n,
                available: self.window.len,
            });
        }
        self.ring.advance_head(n);
        Ok(())
    }

    /// Commits `n` bytes, saturating at `len()`. Returns the number committed.
    pub fn commit_up_to(self, n: usize) -> usize {
        let to_commit = n.min(self.window.len);
        self.ring.advance_head(to_commit);
        to_commit
    }
}

/// Borrowed read window over the unread span at `tail`.
///
/// Same contract as [`WriteReservation`], for the consumer side.
pub struct ReadReservation<'a> {
    ring: &'a mut RingBuffer,
    window: Window,
}

impl<'a> ReadReservation<'a> {
    pub(crate) fn new(ring: &'a mut RingBuffer, window: Window) -> Self {
        Self { ring, window }
    }

    #[inline]
    pub fn window(&self) -> Window {
        self.window
    }

    /// Returns the unread bytes in this window.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.ring.storage()[self.window.range()]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.window.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    /// Consumes the whole window.
    pub fn commit(self) {
        let len = self.window.len;
        self.ring.advance_tail(len);
    }

    /// Consumes exactly `n` bytes, failing if `n > len()`.
    pub fn try_commit_n(self, n: usize) -> Result<(), RingError> {
        if n > self.window.len {
            return Err(RingError::CommitExceedsWindow {
                attempted: n,
                available: self.window.len,
            });
        }
        self.ring.advance_tail(n);
        Ok(())
    }

    /// Consumes `n` bytes, saturating at `len()`. Returns the number consumed.
    pub fn commit_up_to(self, n: usize) -> usize {
        let to_commit = n.min(self.window.len);
        self.ring.advance_tail(to_commit);
        to_commit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_guard_commit_all() {
        let mut rb = RingBuffer::new(8).unwrap();
        let mut r = rb.reserve_write_guard();
        assert_eq!(r.len(), 8);
        r.as_mut_slice().copy_from_slice(b"01234567");
        r.commit();

        assert!(rb.is_full());
        assert_eq!(rb.get(8).unwrap(), b"01234567");
    }

    #[test]
    fn test_write_guard_try_commit_too_many() {
        let mut rb = RingBuffer::new(8).unwrap();
        rb.put(&[0; 6]).unwrap();

        let r = rb.reserve_write_guard();
        assert_eq!(r.window(), Window::new(6, 2));
        assert_eq!(
            r.try_commit_n(3),
            Err(RingError::CommitExceedsWindow {
                attempted: 3,
                available: 2
            })
        );
        assert_eq!(rb.head(), 6);
    }

    #[test]
    fn test_write_guard_commit_up_to_saturates() {
        let mut rb = RingBuffer::new(4).unwrap();
        let r = rb.reserve_write_guard();
        assert_eq!(r.commit_up_to(100), 4);
        assert!(rb.is_full());
    }

    #[test]
    fn test_guard_dropped_without_commit() {
        let mut rb = RingBuffer::new(8).unwrap();
        {
            let mut r = rb.reserve_write_guard();
            r.as_mut_slice()[0] = 1;
        }
        assert!(rb.is_empty());
    }

    #[test]
    fn test_empty_guard_commit_is_noop() {
        let mut rb = RingBuffer::new(4).unwrap();
        let r = rb.reserve_read_guard();
        assert!(r.is_empty());
        r.commit();
        assert_eq!(rb.tail(), 0);
    }

    #[test]
    fn test_read_guard_partial_commit() {
        let mut rb = RingBuffer::new(8).unwrap();
        rb.put(b"abcdef").unwrap();

        let r = rb.reserve_read_guard();
        assert_eq!(r.as_slice(), b"abcdef");
        r.try_commit_n(4).unwrap();

        assert_eq!(rb.occupied(), 2);
        assert_eq!(rb.readable(), b"ef");
    }

    #[test]
    fn test_read_guard_commit_up_to() {
        let mut rb = RingBuffer::new(8).unwrap();
        rb.put(b"xy").unwrap();
        let r = rb.reserve_read_guard();
        assert_eq!(r.commit_up_to(10), 2);
        assert!(rb.is_empty());
    }
}
