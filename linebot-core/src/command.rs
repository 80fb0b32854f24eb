//! Drive commands
//!
//! The single value type that flows from the arbiter to motor actuation.

/// Maximum PWM speed magnitude (8-bit duty)
pub const MAX_SPEED: u8 = 255;

/// Direction of travel for the whole robot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriveDirection {
    /// Both motors forward
    Forward,
    /// Both motors backward
    Backward,
    /// Spin left: left motor backward, right motor forward
    TurnLeft,
    /// Spin right: left motor forward, right motor backward
    TurnRight,
    /// Both motors coasting
    #[default]
    Stop,
}

impl DriveDirection {
    /// Check if this direction moves the robot towards whatever is ahead
    pub fn is_forward(self) -> bool {
        self == DriveDirection::Forward
    }

    /// Short lowercase name, matching the remote command vocabulary
    pub fn as_str(self) -> &'static str {
        match self {
            DriveDirection::Forward => "forward",
            DriveDirection::Backward => "backward",
            DriveDirection::TurnLeft => "left",
            DriveDirection::TurnRight => "right",
            DriveDirection::Stop => "stop",
        }
    }
}

/// A direction paired with a speed magnitude
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DriveCommand {
    /// Direction of travel
    pub direction: DriveDirection,
    /// PWM magnitude (0 to [`MAX_SPEED`])
    pub speed: u8,
}

impl DriveCommand {
    /// Stop command (always zero speed)
    pub const STOP: Self = Self {
        direction: DriveDirection::Stop,
        speed: 0,
    };

    /// Create a command; `Stop` always carries zero speed
    pub const fn new(direction: DriveDirection, speed: u8) -> Self {
        match direction {
            DriveDirection::Stop => Self::STOP,
            _ => Self { direction, speed },
        }
    }

    /// Check if this is a stop command
    pub fn is_stop(&self) -> bool {
        self.direction == DriveDirection::Stop
    }
}
