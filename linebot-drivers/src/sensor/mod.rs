//! Sensor drivers
//!
//! - Digital IR reflectance modules for line detection
//! - HC-SR04 ultrasonic rangefinder
//! - MPU6050 accelerometer/gyroscope

pub mod ir;
pub mod mpu6050;
pub mod ultrasonic;

pub use ir::IrLineSensor;
pub use mpu6050::{ImuError, Mpu6050};
pub use ultrasonic::HcSr04;
