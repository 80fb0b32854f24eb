//! Monotonic clock on the embassy time driver

use embassy_time::Instant;

/// Clock reading `embassy_time::Instant` (1 MHz tick on RP2040)
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl linebot_hal::MonotonicClock for EmbassyClock {
    fn now_us(&self) -> u64 {
        Instant::now().as_micros()
    }
}
