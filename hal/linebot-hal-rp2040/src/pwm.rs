//! Motor PWM channels
//!
//! Each H-bridge speed input sits on channel A of its own PWM slice.

use embassy_rp::pwm::{ChannelAPin, Config, Pwm, PwmOutput, Slice};
use embassy_rp::Peri;

/// Counter top; 125 MHz / 6250 = 20 kHz, above audible range
pub const MOTOR_PWM_TOP: u16 = 6_250;

/// Set up channel A of `slice` on `pin` at 0 % duty
///
/// Returns `None` only if the slice hands out no channel A output.
pub fn motor_channel<'d, T: Slice>(
    slice: Peri<'d, T>,
    pin: Peri<'d, impl ChannelAPin<T>>,
) -> Option<PwmOutput<'d>> {
    let mut config = Config::default();
    config.top = MOTOR_PWM_TOP;
    config.compare_a = 0;
    let (a, _) = Pwm::new_output_a(slice, pin, config).split();
    a
}
