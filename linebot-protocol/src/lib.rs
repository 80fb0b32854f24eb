//! Network Bridge Protocol
//!
//! This crate defines the UART-based protocol between the robot controller
//! and the network co-processor that talks to the cloud database. The
//! bridge forwards database writes under `/robot/...` to the robot and
//! publishes the robot's telemetry back.
//!
//! # Protocol Overview
//!
//! All messages use a simple binary frame format:
//! ```text
//! ┌───────┬────────┬──────┬─────────────┬───────┐
//! │ START │ LENGTH │ TYPE │ PAYLOAD     │ CRC-8 │
//! │ 1B    │ 1B     │ 1B   │ 0–250B      │ 1B    │
//! └───────┴────────┴──────┴─────────────┴───────┘
//! ```
//!
//! Key/value payloads are `[path_len][path bytes][value bytes]`, both UTF-8.

#![no_std]
#![deny(unsafe_code)]

pub mod frame;
pub mod keys;
pub mod messages;

pub use frame::{Frame, FrameError, FrameParser, FRAME_START, MAX_PAYLOAD_SIZE};
pub use keys::{parse_update, UpdateError};
pub use messages::{BridgeCommand, RobotMessage};
