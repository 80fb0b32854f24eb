//! Remote operating state
//!
//! Written by the remote sync side, read by the control loop once per
//! cycle. [`RemoteState`] is a small `Copy` value so that writers can
//! replace it as a whole and readers never observe a half-applied update.

use crate::command::{DriveCommand, DriveDirection};

/// Default maximum age of a remote command in milliseconds
pub const DEFAULT_STALENESS_WINDOW_MS: u32 = 2_000;

/// Who decides the drive command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OperatingMode {
    /// Remote commands drive the robot
    #[default]
    Manual,
    /// Line-follow policy drives the robot
    Autonomous,
}

impl OperatingMode {
    /// Lowercase name, matching the remote mode vocabulary
    pub fn as_str(self) -> &'static str {
        match self {
            OperatingMode::Manual => "manual",
            OperatingMode::Autonomous => "autonomous",
        }
    }
}

/// A remote drive command with the time it was received
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RemoteOverride {
    /// Requested direction
    pub direction: DriveDirection,
    /// Requested speed
    pub speed: u8,
    /// Receive timestamp (monotonic ms)
    pub received_ms: u32,
}

impl RemoteOverride {
    /// Age of this override at `now_ms`
    pub fn age_ms(&self, now_ms: u32) -> u32 {
        now_ms.wrapping_sub(self.received_ms)
    }

    /// Check if the override is still within the staleness window
    pub fn is_fresh(&self, now_ms: u32, window_ms: u32) -> bool {
        self.age_ms(now_ms) <= window_ms
    }

    /// The drive command this override requests
    pub fn command(&self) -> DriveCommand {
        DriveCommand::new(self.direction, self.speed)
    }
}

/// A typed update received from the remote side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RemoteUpdate {
    /// Switch operating mode
    Mode(OperatingMode),
    /// New (or repeated) manual drive command
    Command(DriveDirection),
    /// New speed for cruising and manual commands
    Speed(u8),
    /// The station helper finished its task and releases the robot
    TaskDone,
}

/// Shared remote state snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RemoteState {
    /// Current operating mode
    pub mode: OperatingMode,
    /// Latest manual command, if any was received
    pub remote_override: Option<RemoteOverride>,
    /// Speed used for autonomous driving and new manual commands
    pub cruise_speed: u8,
    /// Bumped on every `task_done`; compared, never interpreted
    pub task_done_seq: u16,
}

impl RemoteState {
    /// Boot state: manual mode, no override
    pub const fn new(cruise_speed: u8) -> Self {
        Self {
            mode: OperatingMode::Manual,
            remote_override: None,
            cruise_speed,
            task_done_seq: 0,
        }
    }

    /// Install a manual command stamped with `now_ms`
    pub fn inject_override(&mut self, direction: DriveDirection, speed: u8, now_ms: u32) {
        self.remote_override = Some(RemoteOverride {
            direction,
            speed,
            received_ms: now_ms,
        });
    }

    /// Apply a remote update received at `now_ms`
    ///
    /// A command update always refreshes the override timestamp, even when
    /// the command is unchanged. A speed update also rescales the current
    /// override without refreshing it.
    pub fn apply(&mut self, update: RemoteUpdate, now_ms: u32) {
        match update {
            RemoteUpdate::Mode(mode) => self.mode = mode,
            RemoteUpdate::Command(direction) => {
                self.inject_override(direction, self.cruise_speed, now_ms);
            }
            RemoteUpdate::Speed(speed) => {
                self.cruise_speed = speed;
                if let Some(ref mut pending) = self.remote_override {
                    pending.speed = speed;
                }
            }
            RemoteUpdate::TaskDone => {
                self.task_done_seq = self.task_done_seq.wrapping_add(1);
            }
        }
    }
}

impl Default for RemoteState {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_CRUISE_SPEED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boot_state() {
        let state = RemoteState::new(150);
        assert_eq!(state.mode, OperatingMode::Manual);
        assert_eq!(state.remote_override, None);
        assert_eq!(state.cruise_speed, 150);
        assert_eq!(state.task_done_seq, 0);
    }

    #[test]
    fn test_command_update_uses_cruise_speed() {
        let mut state = RemoteState::new(150);
        state.apply(RemoteUpdate::Command(DriveDirection::Forward), 1000);

        let pending = state.remote_override.unwrap();
        assert_eq!(pending.direction, DriveDirection::Forward);
        assert_eq!(pending.speed, 150);
        assert_eq!(pending.received_ms, 1000);
    }

    #[test]
    fn test_repeated_command_refreshes() {
        let mut state = RemoteState::new(150);
        state.apply(RemoteUpdate::Command(DriveDirection::TurnLeft), 1000);
        state.apply(RemoteUpdate::Command(DriveDirection::TurnLeft), 2500);
        assert_eq!(state.remote_override.unwrap().received_ms, 2500);
    }

    #[test]
    fn test_speed_update_rescales_without_refresh() {
        let mut state = RemoteState::new(150);
        state.apply(RemoteUpdate::Command(DriveDirection::Backward), 1000);
        state.apply(RemoteUpdate::Speed(90), 1800);

        let pending = state.remote_override.unwrap();
        assert_eq!(pending.speed, 90);
        assert_eq!(pending.received_ms, 1000);
        assert_eq!(state.cruise_speed, 90);
    }

    #[test]
    fn test_mode_update() {
        let mut state = RemoteState::new(150);
        state.apply(RemoteUpdate::Mode(OperatingMode::Autonomous), 0);
        assert_eq!(state.mode, OperatingMode::Autonomous);
    }

    #[test]
    fn test_freshness_window() {
        let mut state = RemoteState::new(150);
        state.inject_override(DriveDirection::Forward, 100, 1000);
        let pending = state.remote_override.unwrap();

        assert!(pending.is_fresh(1000, 2000));
        assert!(pending.is_fresh(3000, 2000));
        assert!(!pending.is_fresh(3001, 2000));
    }

    #[test]
    fn test_freshness_across_timer_wrap() {
        let mut state = RemoteState::new(150);
        state.inject_override(DriveDirection::Forward, 100, u32::MAX - 100);
        assert_eq!(state.remote_override.unwrap().age_ms(400), 501);
        assert!(state.remote_override.unwrap().is_fresh(400, 2000));
    }

    #[test]
    fn test_task_done_bumps_sequence_only() {
        let mut state = RemoteState::new(150);
        state.apply(RemoteUpdate::Mode(OperatingMode::Autonomous), 0);
        let before = state;

        state.apply(RemoteUpdate::TaskDone, 10);
        assert_eq!(state.task_done_seq, 1);
        assert_eq!(state.mode, before.mode);
        assert_eq!(state.remote_override, before.remote_override);

        state.task_done_seq = u16::MAX;
        state.apply(RemoteUpdate::TaskDone, 20);
        assert_eq!(state.task_done_seq, 0);
    }
}
