//! TB6612FNG dual H-bridge driver
//!
//! Motor A is the left wheel, motor B the right wheel. Direction truth
//! table (IN1, IN2 per channel):
//!
//! | command   | AIN1 | AIN2 | BIN1 | BIN2 |
//! |-----------|------|------|------|------|
//! | Forward   | H    | L    | H    | L    |
//! | Backward  | L    | H    | L    | H    |
//! | TurnLeft  | L    | H    | H    | L    |
//! | TurnRight | H    | L    | L    | H    |
//! | Stop      | L    | L    | L    | L    |
//!
//! Both PWM channels get the same duty, `speed / 255` of full scale. The
//! standby line must be HIGH for the bridge to respond.
//!
//! # Usage
//!
//! ```ignore
//! let mut drive = Tb6612::new(pins, pwm_a, pwm_b);
//! drive.drive(DriveCommand::new(DriveDirection::Forward, 150));
//! ```

use embedded_hal::pwm::SetDutyCycle;
use linebot_core::command::{DriveCommand, DriveDirection, MAX_SPEED};
use linebot_core::traits::DriveActuator;
use linebot_hal::OutputPin;

/// Direction and standby lines of the bridge
pub struct Tb6612Pins<P> {
    pub ain1: P,
    pub ain2: P,
    pub bin1: P,
    pub bin2: P,
    pub stby: P,
}

/// Per-channel direction levels (IN1, IN2)
type Levels = ((bool, bool), (bool, bool));

const FWD: (bool, bool) = (true, false);
const REV: (bool, bool) = (false, true);
const COAST: (bool, bool) = (false, false);

/// Direction pin levels for a command: (motor A, motor B)
fn levels(direction: DriveDirection) -> Levels {
    match direction {
        DriveDirection::Forward => (FWD, FWD),
        DriveDirection::Backward => (REV, REV),
        DriveDirection::TurnLeft => (REV, FWD),
        DriveDirection::TurnRight => (FWD, REV),
        DriveDirection::Stop => (COAST, COAST),
    }
}

/// TB6612FNG driver
pub struct Tb6612<P, PWM> {
    pins: Tb6612Pins<P>,
    pwm_a: PWM,
    pwm_b: PWM,
    current: DriveCommand,
    enabled: bool,
}

impl<P, PWM> Tb6612<P, PWM>
where
    P: OutputPin,
    PWM: SetDutyCycle,
{
    /// Create the driver, stopped and out of standby
    pub fn new(pins: Tb6612Pins<P>, pwm_a: PWM, pwm_b: PWM) -> Self {
        let mut driver = Self {
            pins,
            pwm_a,
            pwm_b,
            current: DriveCommand::STOP,
            enabled: false,
        };
        driver.apply(DriveCommand::STOP);
        driver.enable(true);
        driver
    }

    fn apply(&mut self, command: DriveCommand) {
        let ((a1, a2), (b1, b2)) = levels(command.direction);
        self.pins.ain1.set_level(a1);
        self.pins.ain2.set_level(a2);
        self.pins.bin1.set_level(b1);
        self.pins.bin2.set_level(b2);

        let speed = if command.is_stop() { 0 } else { command.speed };
        // Bridge faults are not observable; PWM errors are ignored
        let _ = self
            .pwm_a
            .set_duty_cycle_fraction(speed as u16, MAX_SPEED as u16);
        let _ = self
            .pwm_b
            .set_duty_cycle_fraction(speed as u16, MAX_SPEED as u16);

        self.current = command;
    }
}

impl<P, PWM> DriveActuator for Tb6612<P, PWM>
where
    P: OutputPin,
    PWM: SetDutyCycle,
{
    fn drive(&mut self, command: DriveCommand) {
        self.apply(command);
    }

    fn current(&self) -> DriveCommand {
        self.current
    }

    fn enable(&mut self, enabled: bool) {
        if !enabled {
            self.apply(DriveCommand::STOP);
        }
        self.pins.stby.set_level(enabled);
        self.enabled = enabled;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}
