//! Obstacle policy
//!
//! Forward motion is forbidden while something is closer than the
//! configured threshold. A missing echo counts as a clear path.

use crate::sensor::Distance;

/// Default stopping distance in centimeters
pub const DEFAULT_THRESHOLD_CM: u16 = 15;

/// Obstacle policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ObstaclePolicy {
    threshold_cm: u16,
}

impl Default for ObstaclePolicy {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD_CM)
    }
}

impl ObstaclePolicy {
    /// Create a policy that blocks forward motion below `threshold_cm`
    pub const fn new(threshold_cm: u16) -> Self {
        Self { threshold_cm }
    }

    /// Get the stopping threshold
    pub fn threshold_cm(&self) -> u16 {
        self.threshold_cm
    }

    /// Check if forward motion is currently permitted
    pub fn forward_allowed(&self, distance: Distance) -> bool {
        match distance {
            Distance::Cm(cm) => cm >= self.threshold_cm,
            Distance::NoEcho => true,
        }
    }
}
