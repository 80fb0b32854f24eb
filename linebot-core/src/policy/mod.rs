//! Local navigation policies
//!
//! Both policies are pure functions of the current sensor frame.

pub mod line_follow;
pub mod obstacle;

pub use line_follow::{JunctionAction, LineFollowPolicy};
pub use obstacle::{ObstaclePolicy, DEFAULT_THRESHOLD_CM};
