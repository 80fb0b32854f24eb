//! State shared between the control loop and the bridge tasks
//!
//! Every field sits behind a blocking critical-section mutex and is only
//! ever copied in or out whole, so a reader never sees a half-applied
//! update.

use core::cell::{Cell, RefCell};

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;

use linebot_core::remote::{LinkMonitor, RemoteState, RemoteUpdate};
use linebot_core::Telemetry;

/// Context handed to the control and bridge tasks
pub struct SyncContext {
    remote: Mutex<CriticalSectionRawMutex, Cell<RemoteState>>,
    telemetry: Mutex<CriticalSectionRawMutex, Cell<Option<Telemetry>>>,
    link: Mutex<CriticalSectionRawMutex, RefCell<LinkMonitor>>,
}

impl SyncContext {
    /// Boot state: manual mode, no override, no telemetry yet
    pub fn new(cruise_speed: u8) -> Self {
        Self {
            remote: Mutex::new(Cell::new(RemoteState::new(cruise_speed))),
            telemetry: Mutex::new(Cell::new(None)),
            link: Mutex::new(RefCell::new(LinkMonitor::new())),
        }
    }

    /// Snapshot of the remote state
    pub fn remote(&self) -> RemoteState {
        self.remote.lock(|cell| cell.get())
    }

    /// Apply a parsed remote update received at `now_ms`
    ///
    /// Command updates install a fresh override stamped with `now_ms`.
    pub fn apply(&self, update: RemoteUpdate, now_ms: u32) {
        self.remote.lock(|cell| {
            let mut state = cell.get();
            state.apply(update, now_ms);
            cell.set(state);
        });
    }

    /// Store the result of the latest control cycle
    pub fn publish_telemetry(&self, telemetry: Telemetry) {
        self.telemetry.lock(|cell| cell.set(Some(telemetry)));
    }

    /// Result of the latest control cycle, if one has run
    pub fn latest_telemetry(&self) -> Option<Telemetry> {
        self.telemetry.lock(|cell| cell.get())
    }

    /// Record a bridge heartbeat
    pub fn heartbeat(&self) {
        self.link.lock(|link| link.borrow_mut().heartbeat_received());
    }

    /// Advance the link monitor; returns whether the link is up
    pub fn tick_link(&self, delta_ms: u32) -> bool {
        self.link.lock(|link| {
            let mut link = link.borrow_mut();
            link.update_time(delta_ms);
            link.is_healthy()
        })
    }
}
