use crate::invariants::{
    debug_assert_bounded_occupancy, debug_assert_commit_fits, debug_assert_power_of_two,
    debug_assert_tail_not_past_head,
};
use crate::tracing_compat::{debug, trace};
use crate::{Config, Metrics, ReadReservation, RingError, Window, WriteReservation};
use std::fmt;

// =============================================================================
// CURSOR ARITHMETIC
// =============================================================================
//
// `head` counts every byte ever written and `tail` every byte ever read. Both
// are plain u32 counters that only move forward and wrap at 2^32; they are
// never reset.
//
// - occupied = head - tail (wrapping), always in 0..=capacity
// - surplus  = capacity - occupied
// - physical offset of a cursor = cursor & (capacity - 1)
//
// Because capacity is a power of two that divides 2^32, the mask stays
// correct across the u32 wrap. Capacity is capped at 2^31 so the wrapping
// difference is never ambiguous.
//
// There is no synchronization. One writer role and one reader role may share
// a buffer only under external serialization; `&mut self` on every mutating
// method makes the compiler enforce that for safe code.
//
// =============================================================================

/// Fixed-capacity circular byte buffer.
///
/// Supports two write styles and two read styles:
///
/// - copy-in [`put`](Self::put) / copy-out [`get`](Self::get), which move whole
///   payloads and wrap internally;
/// - [`reserve_write`](Self::reserve_write) + [`commit_write`](Self::commit_write)
///   and [`reserve_read`](Self::reserve_read) + [`commit_read`](Self::commit_read),
///   which hand out a contiguous [`Window`] for an external operation (typically
///   an asynchronous send or receive) and advance the cursor only once the caller
///   reports how many bytes were actually transferred.
///
/// Between a reserve and its commit the window's contents belong to the caller;
/// the opposite role must not touch the buffer in that time. This is a
/// convention, not something the type enforces across raw windows.
pub struct RingBuffer {
    /// Backing array, fixed at construction.
    buffer: Box<[u8]>,
    /// `capacity - 1`
    mask: u32,
    /// Total bytes ever written
    head: u32,
    /// Total bytes ever read
    tail: u32,
    config: Config,
    metrics: Metrics,
}

impl RingBuffer {
    /// Creates a buffer of at least `requested_capacity` bytes.
    ///
    /// The capacity is rounded up to the next power of two: 100 becomes 128,
    /// 128 stays 128.
    pub fn new(requested_capacity: usize) -> Result<Self, RingError> {
        Self::with_config(Config::with_capacity(requested_capacity))
    }

    /// Creates a buffer from a [`Config`].
    pub fn with_config(config: Config) -> Result<Self, RingError> {
        let capacity = config.capacity()?;
        let mask = config.mask()?;
        debug_assert_power_of_two!(capacity);

        debug!(
            requested = config.requested_capacity,
            capacity, "ring buffer created"
        );

        Ok(Self {
            buffer: vec![0u8; capacity].into_boxed_slice(),
            mask: mask as u32,
            head: 0,
            tail: 0,
            config,
            metrics: Metrics::new(),
        })
    }

    // ---------------------------------------------------------------------
    // STATUS
    // ---------------------------------------------------------------------

    /// Returns the buffer capacity in bytes (always a power of two).
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Returns the number of unread bytes.
    #[inline]
    pub fn occupied(&self) -> usize {
        self.head.wrapping_sub(self.tail) as usize
    }

    /// Returns the number of bytes free for writing.
    #[inline]
    pub fn surplus(&self) -> usize {
        self.capacity() - self.occupied()
    }

    /// Alias for [`occupied`](Self::occupied).
    #[inline]
    pub fn len(&self) -> usize {
        self.occupied()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.head == self.tail
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.occupied() == self.capacity()
    }

    /// Total bytes ever written, modulo 2^32.
    #[inline]
    pub fn head(&self) -> u32 {
        self.head
    }

    /// Total bytes ever read, modulo 2^32.
    #[inline]
    pub fn tail(&self) -> u32 {
        self.tail
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns a snapshot of the traffic counters.
    ///
    /// All zero unless the buffer was built with `enable_metrics`.
    pub fn metrics(&self) -> Metrics {
        self.metrics
    }

    #[inline]
    fn offset_of(&self, cursor: u32) -> usize {
        (cursor & self.mask) as usize
    }

    // ---------------------------------------------------------------------
    // PRODUCER API
    // ---------------------------------------------------------------------

    /// Copies all of `data` into the buffer.
    ///
    /// Fails with [`RingError::BufferFull`] if `data` is larger than
    /// [`surplus`](Self::surplus); nothing is written in that case.
    pub fn put(&mut self, data: &[u8]) -> Result<(), RingError> {
        let surplus = self.surplus();
        if data.len() > surplus {
            if self.config.enable_metrics {
                self.metrics.rejected_writes += 1;
            }
            trace!(requested = data.len(), surplus, "put rejected");
            return Err(RingError::BufferFull {
                requested: data.len(),
                surplus,
            });
        }
        self.copy_in(data);
        self.advance_head(data.len());
        Ok(())
    }

    /// Copies as much of `data` as fits and returns the number of bytes written.
    pub fn write_some(&mut self, data: &[u8]) -> usize {
        let n = data.len().min(self.surplus());
        self.copy_in(&data[..n]);
        self.advance_head(n);
        n
    }

    /// Returns the contiguous free span at `head` without changing any state.
    ///
    /// `len` is bounded by both the free space and the end of the backing
    /// array. A write that needs more than `len` bytes takes a second
    /// reserve/commit round after committing this one.
    #[inline]
    pub fn reserve_write(&self) -> Window {
        let offset = self.offset_of(self.head);
        Window::new(offset, self.surplus().min(self.capacity() - offset))
    }

    /// Acknowledges `n` bytes written into the last reserved write window.
    ///
    /// Fails with [`RingError::InvalidCommitLength`] if `n` is zero or larger
    /// than the capacity, which no window can ever hold. Otherwise `n` is not
    /// re-checked against the free space; committing more than was reserved
    /// is a caller bug (caught by debug assertions).
    pub fn commit_write(&mut self, n: usize) -> Result<(), RingError> {
        if n == 0 || n > self.capacity() {
            return Err(RingError::InvalidCommitLength);
        }
        self.advance_head(n);
        Ok(())
    }

    /// Returns the contiguous free span as a mutable slice.
    pub fn writable(&mut self) -> &mut [u8] {
        let window = self.reserve_write();
        &mut self.buffer[window.range()]
    }

    /// Reserves the free span behind a guard that commits through the borrow.
    pub fn reserve_write_guard(&mut self) -> WriteReservation<'_> {
        let window = self.reserve_write();
        WriteReservation::new(self, window)
    }

    // ---------------------------------------------------------------------
    // CONSUMER API
    // ---------------------------------------------------------------------

    /// Removes and returns the next `n` bytes.
    ///
    /// Fails with [`RingError::InsufficientData`] if fewer than `n` bytes are
    /// unread; nothing is consumed in that case.
    pub fn get(&mut self, n: usize) -> Result<Vec<u8>, RingError> {
        self.check_readable(n)?;
        let mut out = vec![0u8; n];
        self.copy_out(&mut out);
        self.advance_tail(n);
        Ok(out)
    }

    /// Fills `out` completely from the buffer and consumes those bytes.
    pub fn get_into(&mut self, out: &mut [u8]) -> Result<(), RingError> {
        self.check_readable(out.len())?;
        self.copy_out(out);
        self.advance_tail(out.len());
        Ok(())
    }

    /// Copies the next `out.len()` bytes without consuming them.
    pub fn peek_into(&self, out: &mut [u8]) -> Result<(), RingError> {
        let occupied = self.occupied();
        if out.len() > occupied {
            return Err(RingError::InsufficientData {
                requested: out.len(),
                occupied,
            });
        }
        self.copy_out(out);
        Ok(())
    }

    /// Reads as many bytes as are available into `out` and returns the count.
    pub fn read_some(&mut self, out: &mut [u8]) -> usize {
        let n = out.len().min(self.occupied());
        self.copy_out(&mut out[..n]);
        self.advance_tail(n);
        n
    }

    /// Returns the contiguous unread span at `tail` without changing any state.
    #[inline]
    pub fn reserve_read(&self) -> Window {
        let offset = self.offset_of(self.tail);
        Window::new(offset, self.occupied().min(self.capacity() - offset))
    }

    /// Acknowledges `n` bytes consumed from the last reserved read window.
    ///
    /// Fails with [`RingError::InvalidCommitLength`] if `n` is zero or larger
    /// than the capacity.
    pub fn commit_read(&mut self, n: usize) -> Result<(), RingError> {
        if n == 0 || n > self.capacity() {
            return Err(RingError::InvalidCommitLength);
        }
        self.advance_tail(n);
        Ok(())
    }

    /// Returns the contiguous unread span as a slice.
    pub fn readable(&self) -> &[u8] {
        &self.buffer[self.reserve_read().range()]
    }

    /// Returns all unread data as at most two slices, in order.
    ///
    /// The second slice is empty unless the data wraps past the end of the
    /// backing array.
    pub fn read_slices(&self) -> (&[u8], &[u8]) {
        let first = self.reserve_read();
        let rest = self.occupied() - first.len;
        (&self.buffer[first.range()], &self.buffer[..rest])
    }

    /// Reserves the unread span behind a guard that commits through the borrow.
    pub fn reserve_read_guard(&mut self) -> ReadReservation<'_> {
        let window = self.reserve_read();
        ReadReservation::new(self, window)
    }

    /// Discards all unread data.
    pub fn clear(&mut self) {
        let n = self.occupied();
        self.advance_tail(n);
    }

    // ---------------------------------------------------------------------
    // RAW STORAGE
    // ---------------------------------------------------------------------

    /// The whole backing array, for addressing a [`Window`] directly.
    pub fn storage(&self) -> &[u8] {
        &self.buffer
    }

    /// The whole backing array, mutably, for filling a reserved write window.
    pub fn storage_mut(&mut self) -> &mut [u8] {
        &mut self.buffer
    }

    // ---------------------------------------------------------------------
    // INTERNALS
    // ---------------------------------------------------------------------

    fn check_readable(&mut self, n: usize) -> Result<(), RingError> {
        let occupied = self.occupied();
        if n > occupied {
            if self.config.enable_metrics {
                self.metrics.rejected_reads += 1;
            }
            trace!(requested = n, occupied, "get rejected");
            return Err(RingError::InsufficientData {
                requested: n,
                occupied,
            });
        }
        Ok(())
    }

    /// Copies `data` in at `head`, in at most two spans. Does not move `head`.
    fn copy_in(&mut self, data: &[u8]) {
        let offset = self.offset_of(self.head);
        let first = data.len().min(self.capacity() - offset);
        self.buffer[offset..offset + first].copy_from_slice(&data[..first]);
        self.buffer[..data.len() - first].copy_from_slice(&data[first..]);
    }

    /// Copies out from `tail`, in at most two spans. Does not move `tail`.
    fn copy_out(&self, out: &mut [u8]) {
        let offset = self.offset_of(self.tail);
        let first = out.len().min(self.capacity() - offset);
        out[..first].copy_from_slice(&self.buffer[offset..offset + first]);
        let rest = out.len() - first;
        out[first..].copy_from_slice(&self.buffer[..rest]);
    }

    pub(crate) fn advance_head(&mut self, n: usize) {
        if n == 0 {
            return;
        }
        debug_assert_commit_fits!(n, self.capacity());
        let new_head = self.head.wrapping_add(n as u32);
        debug_assert_bounded_occupancy!(
            new_head.wrapping_sub(self.tail) as usize,
            self.capacity()
        );
        self.head = new_head;

        if self.config.enable_metrics {
            self.metrics.add_written(n);
        }
    }

    pub(crate) fn advance_tail(&mut self, n: usize) {
        if n == 0 {
            return;
        }
        debug_assert_commit_fits!(n, self.capacity());
        debug_assert_tail_not_past_head!(n, self.occupied());
        self.tail = self.tail.wrapping_add(n as u32);

        if self.config.enable_metrics {
            self.metrics.add_read(n);
        }
    }

    /// Places both cursors at `pos` on an empty buffer, so tests can exercise
    /// the u32 wrap without pushing 4 GiB through.
    #[cfg(test)]
    pub(crate) fn set_cursors(&mut self, pos: u32) {
        self.head = pos;
        self.tail = pos;
    }
}

impl fmt::Debug for RingBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RingBuffer")
            .field("capacity", &self.capacity())
            .field("head", &self.head)
            .field("tail", &self.tail)
            .field("occupied", &self.occupied())
            .finish_non_exhaustive()
    }
}
