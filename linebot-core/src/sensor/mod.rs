//! Sensor snapshots
//!
//! A [`SensorFrame`] is the only sensor input the navigation policies see.

pub mod builder;
pub mod frame;

pub use builder::SensorFrameBuilder;
pub use frame::{Distance, InertialReading, SensorFrame, Vector3};
