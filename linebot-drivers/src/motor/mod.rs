//! Motor driver implementations
//!
//! Two brushed DC motors behind a TB6612FNG dual H-bridge: direction on
//! two GPIOs per channel, speed on one PWM per channel, shared standby.

pub mod tb6612;

pub use tb6612::{Tb6612, Tb6612Pins};
