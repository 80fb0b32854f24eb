//! Bridge link health
//!
//! The network co-processor pings periodically. Missing pings do not stop
//! the robot by themselves (stale commands already do that) but they are
//! reported in telemetry and logs.

/// Ping interval expected from the bridge
pub const HEARTBEAT_TIMEOUT_MS: u32 = 1_000;

/// Missed pings before the link counts as lost
pub const MAX_MISSED_HEARTBEATS: u8 = 3;

/// Bridge link monitor
#[derive(Debug, Clone)]
pub struct LinkMonitor {
    /// Missed heartbeat count
    missed_heartbeats: u8,
    /// Time since last heartbeat (ms)
    time_since_heartbeat_ms: u32,
    /// At least one heartbeat seen since boot
    seen: bool,
}

impl Default for LinkMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl LinkMonitor {
    /// Create a new monitor; the link starts out down
    pub fn new() -> Self {
        Self {
            missed_heartbeats: 0,
            time_since_heartbeat_ms: 0,
            seen: false,
        }
    }

    /// Record a heartbeat received
    pub fn heartbeat_received(&mut self) {
        self.missed_heartbeats = 0;
        self.time_since_heartbeat_ms = 0;
        self.seen = true;
    }

    /// Advance time by `delta_ms`
    pub fn update_time(&mut self, delta_ms: u32) {
        self.time_since_heartbeat_ms = self.time_since_heartbeat_ms.saturating_add(delta_ms);

        while self.time_since_heartbeat_ms >= HEARTBEAT_TIMEOUT_MS {
            self.missed_heartbeats = self.missed_heartbeats.saturating_add(1);
            self.time_since_heartbeat_ms -= HEARTBEAT_TIMEOUT_MS;
        }
    }

    /// Check if the link is up
    pub fn is_healthy(&self) -> bool {
        self.seen && self.missed_heartbeats < MAX_MISSED_HEARTBEATS
    }

    /// Get number of missed heartbeats
    pub fn missed_heartbeats(&self) -> u8 {
        self.missed_heartbeats
    }
}
