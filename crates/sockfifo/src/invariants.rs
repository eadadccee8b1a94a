//! Debug assertion macros for ring buffer invariants.
//!
//! Commits trust the caller: the window they acknowledge was bounded when it
//! was reserved, so release builds do not re-validate. These macros catch
//! contract violations in debug builds (`#[cfg(debug_assertions)]`) and cost
//! nothing in release builds.

// =============================================================================
// Bounded occupancy
// =============================================================================

/// Assert that unread data does not exceed capacity.
///
/// **Invariant**: `0 ≤ (head - tail) ≤ capacity`
///
/// Used in: `RingBuffer::advance_head()` after computing the new head
macro_rules! debug_assert_bounded_occupancy {
    ($occupied:expr, $capacity:expr) => {
        debug_assert!(
            $occupied <= $capacity,
            "write commit overruns unread data: occupancy {} exceeds capacity {}",
            $occupied,
            $capacity
        )
    };
}

/// Assert that tail does not advance past head.
///
/// **Invariant**: `n ≤ head - tail` before advancing tail by `n`
///
/// Used in: `RingBuffer::advance_tail()`
macro_rules! debug_assert_tail_not_past_head {
    ($n:expr, $occupied:expr) => {
        debug_assert!(
            $n <= $occupied,
            "read commit of {} bytes passes head: only {} bytes unread",
            $n,
            $occupied
        )
    };
}

/// Assert that a cursor advance fits in the capacity before it is cast to
/// `u32`; a larger `n` would be silently truncated.
///
/// **Invariant**: `n ≤ capacity ≤ 2^31`
///
/// Used in: `RingBuffer::advance_head()`, `RingBuffer::advance_tail()`
macro_rules! debug_assert_commit_fits {
    ($n:expr, $capacity:expr) => {
        debug_assert!(
            $n <= $capacity,
            "cursor advance of {} bytes exceeds capacity {}",
            $n,
            $capacity
        )
    };
}

// =============================================================================
// Power-of-two capacity
// =============================================================================

/// Assert that the capacity is a power of two, so `pos & mask` is a valid
/// offset.
///
/// Used in: `RingBuffer::with_config()`
macro_rules! debug_assert_power_of_two {
    ($capacity:expr) => {
        debug_assert!(
            $capacity.is_power_of_two(),
            "capacity {} is not a power of two",
            $capacity
        )
    };
}

pub(crate) use debug_assert_bounded_occupancy;
pub(crate) use debug_assert_commit_fits;
pub(crate) use debug_assert_power_of_two;
pub(crate) use debug_assert_tail_not_past_head;
