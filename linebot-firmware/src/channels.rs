//! Inter-task communication channels
//!
//! Defines the static signals used between Embassy tasks. Shared state
//! lives in [`crate::context::SyncContext`]; these only carry wake-ups.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

/// Signal that a heartbeat (PING) was received from the bridge
pub static PONG_REQUEST: Signal<CriticalSectionRawMutex, ()> = Signal::new();
