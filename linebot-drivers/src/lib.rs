//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in linebot-core for the robot's hardware:
//!
//! - Motor drivers (TB6612FNG dual H-bridge)
//! - Line sensors (digital IR reflectance modules)
//! - Rangefinder (HC-SR04 ultrasonic)
//! - Inertial sensor (MPU6050 over I2C)

#![no_std]
#![deny(unsafe_code)]

pub mod motor;
pub mod sensor;
