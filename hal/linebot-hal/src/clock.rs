//! Monotonic time source
//!
//! Echo pulse timing needs microsecond resolution; the control loop and the
//! remote override freshness check work in milliseconds.

/// Free-running monotonic clock
pub trait MonotonicClock {
    /// Microseconds since an arbitrary fixed origin (boot)
    fn now_us(&self) -> u64;

    /// Milliseconds since boot, wrapping at `u32::MAX`
    ///
    /// Consumers compare timestamps with `wrapping_sub`.
    fn now_ms(&self) -> u32 {
        (self.now_us() / 1_000) as u32
    }

    /// Microseconds elapsed since `start_us`
    fn elapsed_us(&self, start_us: u64) -> u64 {
        self.now_us().saturating_sub(start_us)
    }
}

impl<T: MonotonicClock + ?Sized> MonotonicClock for &T {
    fn now_us(&self) -> u64 {
        (**self).now_us()
    }
}
