//! Board-agnostic core logic for the line-following robot
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (drive actuator, line/range/inertial sensors)
//! - Sensor frame assembly
//! - Obstacle and line-follow policies
//! - Command arbitration and the navigation step
//! - Remote operating state and bridge link health
//! - Configuration types and the `robot.toml` parser

#![no_std]
#![deny(unsafe_code)]

pub mod command;
pub mod config;
pub mod control;
pub mod policy;
pub mod remote;
pub mod sensor;
pub mod telemetry;
pub mod traits;

pub use command::{DriveCommand, DriveDirection, MAX_SPEED};
pub use telemetry::Telemetry;
