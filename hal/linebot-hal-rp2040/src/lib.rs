//! RP2040-specific HAL for the line-following robot
//!
//! This crate provides RP2040-specific implementations of the shared
//! `linebot-hal` traits, plus board-level setup:
//!
//! - GPIO wrappers for direction, standby, trigger and sensor lines
//! - Blocking I2C bus for the inertial sensor
//! - Monotonic clock backed by the embassy time driver
//! - Motor PWM channel setup
//! - Board pin map

#![no_std]

pub mod clock;
pub mod gpio;
pub mod i2c;
pub mod pins;
pub mod pwm;

pub use clock::EmbassyClock;
pub use gpio::{RpInput, RpOutput};
pub use i2c::RpI2c;
pub use pins::Board;

// Re-export shared traits from linebot-hal for convenience
pub use linebot_hal::{I2cBus, InputPin, MonotonicClock, OutputPin};
