use crate::RingError;

/// Largest capacity a buffer may have.
///
/// Cursors are `u32` and occupancy is `head - tail` in wrapping arithmetic, so
/// the distance between them must never exceed half the cursor space.
pub const MAX_CAPACITY: usize = 1 << 31;

/// Rounds `x` up to the next power of two.
///
/// An exact power of two is returned unchanged and `1` maps to `1`. Returns
/// `None` for `0` and for anything above `2^31`, which has no `u32` power of
/// two at or above it.
///
/// ```
/// use sockfifo::round_up_pow2;
///
/// assert_eq!(round_up_pow2(100), Some(128));
/// assert_eq!(round_up_pow2(128), Some(128));
/// assert_eq!(round_up_pow2(129), Some(256));
/// assert_eq!(round_up_pow2(0), None);
/// ```
#[inline]
pub const fn round_up_pow2(x: u32) -> Option<u32> {
    if x == 0 {
        return None;
    }
    // bit length of x - 1
    let bits = u32::BITS - (x - 1).leading_zeros();
    if bits >= u32::BITS {
        None
    } else {
        Some(1 << bits)
    }
}

/// Configuration for [`RingBuffer`](crate::RingBuffer).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Requested capacity in bytes, rounded up to a power of two at construction
    /// (default: 8 KiB)
    pub requested_capacity: usize,
    /// Enable metrics collection (slight overhead)
    pub enable_metrics: bool,
}

impl Config {
    /// Creates a new configuration with custom settings.
    pub const fn new(requested_capacity: usize, enable_metrics: bool) -> Self {
        Self {
            requested_capacity,
            enable_metrics,
        }
    }

    /// Creates a configuration for `requested_capacity` bytes with metrics off.
    pub const fn with_capacity(requested_capacity: usize) -> Self {
        Self::new(requested_capacity, false)
    }

    /// Enables or disables metrics collection.
    pub const fn with_metrics(mut self, enable_metrics: bool) -> Self {
        self.enable_metrics = enable_metrics;
        self
    }

    /// Returns the actual capacity a buffer built from this configuration gets.
    ///
    /// Fails with [`RingError::InvalidCapacity`] when the request is zero or
    /// exceeds [`MAX_CAPACITY`].
    pub fn capacity(&self) -> Result<usize, RingError> {
        u32::try_from(self.requested_capacity)
            .ok()
            .and_then(round_up_pow2)
            .map(|cap| cap as usize)
            .ok_or(RingError::InvalidCapacity {
                requested: self.requested_capacity,
            })
    }

    /// Returns the offset mask, `capacity - 1`.
    pub fn mask(&self) -> Result<usize, RingError> {
        self.capacity().map(|cap| cap - 1)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            requested_capacity: 8 * 1024,
            enable_metrics: false,
        }
    }
}

/// Small per-connection buffer (4 KiB), one page on most targets
pub const SMALL_SOCKET_CONFIG: Config = Config::new(4 * 1024, false);

/// Large per-connection buffer (64 KiB), matches a typical socket send buffer
pub const LARGE_SOCKET_CONFIG: Config = Config::new(64 * 1024, false);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_up_pow2_examples() {
        assert_eq!(round_up_pow2(1), Some(1));
        assert_eq!(round_up_pow2(2), Some(2));
        assert_eq!(round_up_pow2(3), Some(4));
        assert_eq!(round_up_pow2(100), Some(128));
        assert_eq!(round_up_pow2(128), Some(128));
        assert_eq!(round_up_pow2(129), Some(256));
        assert_eq!(round_up_pow2(1000), Some(1024));
    }

    #[test]
    fn test_round_up_pow2_bounds() {
        assert_eq!(round_up_pow2(0), None);
        assert_eq!(round_up_pow2(1 << 31), Some(1 << 31));
        assert_eq!(round_up_pow2((1 << 31) + 1), None);
        assert_eq!(round_up_pow2(u32::MAX), None);
    }

    #[test]
    fn test_round_up_pow2_is_smallest() {
        for x in 1u32..=4096 {
            let p = round_up_pow2(x).unwrap();
            assert!(p.is_power_of_two());
            assert!(p >= x);
            assert!(p / 2 < x, "{} is not the smallest power of two >= {}", p, x);
        }
    }

    #[test]
    fn test_config_capacity() {
        assert_eq!(Config::default().capacity(), Ok(8192));
        assert_eq!(SMALL_SOCKET_CONFIG.capacity(), Ok(4096));
        assert_eq!(LARGE_SOCKET_CONFIG.capacity(), Ok(65536));
        assert_eq!(Config::with_capacity(5000).capacity(), Ok(8192));
    }

    #[test]
    fn test_config_rejects_degenerate_capacity() {
        assert_eq!(
            Config::with_capacity(0).capacity(),
            Err(RingError::InvalidCapacity { requested: 0 })
        );
        let too_big = MAX_CAPACITY + 1;
        assert_eq!(
            Config::with_capacity(too_big).capacity(),
            Err(RingError::InvalidCapacity { requested: too_big })
        );
    }

    #[test]
    fn test_config_mask() {
        assert_eq!(Config::with_capacity(100).mask(), Ok(127));
        assert_eq!(Config::with_capacity(1).mask(), Ok(0));
        assert_eq!(SMALL_SOCKET_CONFIG.mask(), Ok(4095));
        assert_eq!(
            Config::with_capacity(0).mask(),
            Err(RingError::InvalidCapacity { requested: 0 })
        );
    }

    #[test]
    fn test_with_metrics() {
        let config = Config::with_capacity(64).with_metrics(true);
        assert!(config.enable_metrics);
        assert_eq!(config.requested_capacity, 64);
    }
}
