//! HC-SR04 ultrasonic rangefinder
//!
//! A 10 us trigger pulse starts a burst; the echo line then stays HIGH for
//! the round-trip time. The wait for the rising edge and the pulse itself
//! share one deadline taken right after the trigger, so a measurement
//! never spins for longer than the echo timeout in total.

use embedded_hal::delay::DelayNs;
use linebot_core::sensor::Distance;
use linebot_core::traits::RangeSensor;
use linebot_hal::{InputPin, MonotonicClock, OutputPin};

/// Trigger settle time before the pulse
const TRIGGER_SETTLE_US: u32 = 2;

/// Trigger pulse width
const TRIGGER_PULSE_US: u32 = 10;

/// HC-SR04 driver
pub struct HcSr04<T, E, C, D> {
    trigger: T,
    echo: E,
    clock: C,
    delay: D,
    timeout_us: u32,
}

impl<T, E, C, D> HcSr04<T, E, C, D>
where
    T: OutputPin,
    E: InputPin,
    C: MonotonicClock,
    D: DelayNs,
{
    /// Create a rangefinder with the given echo timeout
    pub fn new(trigger: T, echo: E, clock: C, delay: D, timeout_us: u32) -> Self {
        Self {
            trigger,
            echo,
            clock,
            delay,
            timeout_us,
        }
    }

    /// Get the echo timeout
    pub fn timeout_us(&self) -> u32 {
        self.timeout_us
    }

    fn pulse_trigger(&mut self) {
        self.trigger.set_low();
        self.delay.delay_us(TRIGGER_SETTLE_US);
        self.trigger.set_high();
        self.delay.delay_us(TRIGGER_PULSE_US);
        self.trigger.set_low();
    }

    /// Spin until the echo line reaches `level`; false once `deadline_us`
    /// has passed
    fn wait_for(&self, level: bool, deadline_us: u64) -> bool {
        while self.echo.is_high() != level {
            if self.clock.now_us() > deadline_us {
                return false;
            }
        }
        true
    }

    /// Measure the echo pulse width in microseconds
    ///
    /// Returns `None` if the echo has not both risen and fallen within
    /// `timeout_us` of the trigger.
    pub fn echo_us(&mut self) -> Option<u32> {
        self.pulse_trigger();

        let deadline = self.clock.now_us().saturating_add(self.timeout_us as u64);
        if !self.wait_for(true, deadline) {
            return None;
        }

        let rise = self.clock.now_us();
        if !self.wait_for(false, deadline) {
            return None;
        }

        Some(self.clock.elapsed_us(rise) as u32)
    }
}

impl<T, E, C, D> RangeSensor for HcSr04<T, E, C, D>
where
    T: OutputPin,
    E: InputPin,
    C: MonotonicClock,
    D: DelayNs,
{
    fn measure(&mut self) -> Distance {
        match self.echo_us() {
            Some(width) => Distance::from_echo_us(width),
            None => Distance::NoEcho,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    /// Simulated time shared by all fakes (us)
    type Time = Cell<u64>;

    /// Advances one microsecond per read
    struct FakeClock<'a>(&'a Time);

    impl MonotonicClock for FakeClock<'_> {
        fn now_us(&self) -> u64 {
            let t = self.0.get();
            self.0.set(t + 1);
            t
        }
    }

    struct FakeDelay<'a>(&'a Time);

    impl DelayNs for FakeDelay<'_> {
        fn delay_ns(&mut self, ns: u32) {
            self.0.set(self.0.get() + (ns as u64).div_ceil(1_000));
        }
    }

    /// Echo HIGH during [rise, fall)
    struct FakeEcho<'a> {
        time: &'a Time,
        rise: u64,
        fall: u64,
    }

    impl InputPin for FakeEcho<'_> {
        fn is_high(&self) -> bool {
            let t = self.time.get();
            t >= self.rise && t < self.fall
        }
    }

    struct FakeTrigger<'a> {
        level: &'a Cell<bool>,
        pulses: &'a Cell<u8>,
    }

    impl OutputPin for FakeTrigger<'_> {
        fn set_high(&mut self) {
            self.level.set(true);
            self.pulses.set(self.pulses.get() + 1);
        }

        fn set_low(&mut self) {
            self.level.set(false);
        }

        fn is_set_high(&self) -> bool {
            self.level.get()
        }
    }

    /// Returns the reading, the final trigger level, the trigger pulse
    /// count and the simulated time spent inside `measure`
    fn measure(rise: u64, fall: u64) -> (Distance, bool, u8, u64) {
        let time = Time::new(0);
        let level = Cell::new(false);
        let pulses = Cell::new(0);
        let mut sensor = HcSr04::new(
            FakeTrigger {
                level: &level,
                pulses: &pulses,
            },
            FakeEcho {
                time: &time,
                rise,
                fall,
            },
            FakeClock(&time),
            FakeDelay(&time),
            25_000,
        );
        let distance = sensor.measure();
        (distance, level.get(), pulses.get(), time.get())
    }

    #[test]
    fn test_distance_from_pulse() {
        // 2960 us round trip is 50.3 cm
        let (distance, trigger_high, pulses, _) = measure(100, 100 + 2_960);
        assert_eq!(distance, Distance::Cm(50));
        assert!(!trigger_high);
        assert_eq!(pulses, 1);
    }

    #[test]
    fn test_close_obstacle() {
        // 294 us round trip is 4.99 cm, truncated
        let (distance, _, _, _) = measure(50, 50 + 294);
        assert_eq!(distance.cm().map(|cm| cm <= 5), Some(true));
    }

    #[test]
    fn test_no_rising_edge_times_out() {
        let (distance, trigger_high, _, elapsed) = measure(u64::MAX, u64::MAX);
        assert_eq!(distance, Distance::NoEcho);
        assert!(!trigger_high);
        assert!(elapsed <= 25_000 + 100, "blocked for {} us", elapsed);
    }

    #[test]
    fn test_stuck_high_echo_times_out() {
        let (distance, _, _, _) = measure(100, u64::MAX);
        assert_eq!(distance, Distance::NoEcho);
    }

    #[test]
    fn test_late_echo_shares_one_deadline() {
        // Rises just before the timeout and never falls
        let (distance, _, _, elapsed) = measure(24_990, u64::MAX);
        assert_eq!(distance, Distance::NoEcho);
        assert!(elapsed <= 25_000 + 100, "blocked for {} us", elapsed);
    }

    #[test]
    fn test_pulse_ending_past_deadline_is_no_echo() {
        // 20 ms pulse starting at 10 ms would end at 30 ms
        let (distance, _, _, elapsed) = measure(10_000, 30_000);
        assert_eq!(distance, Distance::NoEcho);
        assert!(elapsed < 30_000);
    }
}
