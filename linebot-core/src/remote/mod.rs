//! Remote operating state
//!
//! The only state shared between the control loop and the remote sync
//! side: operating mode, the latest manual command with its receive time,
//! the station release counter, and bridge link health.

pub mod link;
pub mod state;

pub use link::LinkMonitor;
pub use state::{
    OperatingMode, RemoteOverride, RemoteState, RemoteUpdate, DEFAULT_STALENESS_WINDOW_MS,
};
