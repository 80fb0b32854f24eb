//! Sensor traits
//!
//! The frame builder polls one of each per control cycle.

use crate::sensor::{Distance, InertialReading};

/// Errors that can occur while reading a sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Device did not acknowledge on the bus
    NotFound,
    /// Device answered with an unexpected identity
    WrongDevice,
    /// Bus transfer failed
    Bus,
}

/// Binary reflectance sensor looking at the floor
pub trait LineSensor {
    /// Check if the sensor currently sees the black line
    fn line_detected(&mut self) -> bool;
}

/// Time-of-flight rangefinder
pub trait RangeSensor {
    /// Measure the distance ahead
    ///
    /// Must return within a bounded time; a missing echo is reported as
    /// [`Distance::NoEcho`], never by blocking.
    fn measure(&mut self) -> Distance;
}

/// Accelerometer / gyroscope
pub trait InertialSensor {
    /// Read the current acceleration and angular rate
    fn read(&mut self) -> Result<InertialReading, SensorError>;
}
