//! Line-follow policy
//!
//! Two binary IR sensors straddle the line. Seeing black on one side means
//! the robot drifted the other way, so it turns towards the sensor that
//! sees the line.

use crate::command::DriveDirection;

/// What to do when both sensors see black (line end or intersection)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum JunctionAction {
    /// Stop and wait (no unique track to follow)
    #[default]
    Stop,
    /// Drive straight across
    Forward,
}

/// Line-follow policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LineFollowPolicy {
    junction: JunctionAction,
}

impl LineFollowPolicy {
    /// Create a policy with the given junction behavior
    pub const fn new(junction: JunctionAction) -> Self {
        Self { junction }
    }

    /// Get the junction behavior
    pub fn junction(&self) -> JunctionAction {
        self.junction
    }

    /// Steering decision for the two IR readings (true = black line)
    pub fn steer(&self, left_ir: bool, right_ir: bool) -> DriveDirection {
        match (left_ir, right_ir) {
            (false, false) => DriveDirection::Forward,
            (true, false) => DriveDirection::TurnLeft,
            (false, true) => DriveDirection::TurnRight,
            (true, true) => match self.junction {
                JunctionAction::Stop => DriveDirection::Stop,
                JunctionAction::Forward => DriveDirection::Forward,
            },
        }
    }
}
