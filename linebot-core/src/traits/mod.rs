//! Hardware abstraction traits
//!
//! These traits define the interface between the navigation logic
//! and the concrete sensor and motor drivers.

pub mod motor;
pub mod sensor;

pub use motor::DriveActuator;
pub use sensor::{InertialSensor, LineSensor, RangeSensor, SensorError};
