//! Linebot Hardware Abstraction Layer
//!
//! This crate defines the hardware traits the drivers are written against.
//! Chip-specific HALs (currently RP2040) implement them, so the drivers and
//! the navigation core can be tested on the host with fake pins and clocks.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  linebot-firmware (embassy tasks)       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  linebot-drivers (TB6612, HC-SR04, ...) │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  linebot-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  linebot-hal-rp2040                     │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`i2c::I2cBus`] - I2C register access
//! - [`clock::MonotonicClock`] - Microsecond timebase for pulse timing

#![no_std]
#![deny(unsafe_code)]

pub mod clock;
pub mod gpio;
pub mod i2c;

// Re-export key traits at crate root for convenience
pub use clock::MonotonicClock;
pub use gpio::{InputPin, OutputPin};
pub use i2c::I2cBus;
