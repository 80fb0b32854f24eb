//! Latest control-loop result, as exposed to the remote side

use core::fmt::Write;

use heapless::String;

use crate::command::DriveCommand;
use crate::control::{CheckpointPhase, Decision, DecisionReason};
use crate::remote::OperatingMode;
use crate::sensor::SensorFrame;

/// Capacity of the free-text status line
pub const STATUS_LEN: usize = 64;

/// Snapshot of one control cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Telemetry {
    /// Sensor readings the decision was taken on
    pub frame: SensorFrame,
    /// Command actuated this cycle
    pub command: DriveCommand,
    /// Operating mode in effect this cycle
    pub mode: OperatingMode,
    /// Arbiter rule behind `command`
    pub reason: DecisionReason,
    /// Station handshake phase
    pub checkpoint: CheckpointPhase,
}

impl Telemetry {
    /// Build from a frame and the decision taken on it
    pub fn new(frame: SensorFrame, decision: &Decision, mode: OperatingMode) -> Self {
        Self {
            frame,
            command: decision.command,
            mode,
            reason: decision.reason,
            checkpoint: decision.checkpoint,
        }
    }

    /// "moving" or "stopped"
    pub fn motion_state(&self) -> &'static str {
        if self.command.is_stop() {
            "stopped"
        } else {
            "moving"
        }
    }

    /// Handshake token for `/robot/status`: `waiting` while held at a
    /// station, otherwise the motion state
    pub fn status(&self) -> &'static str {
        match self.checkpoint {
            CheckpointPhase::Waiting => "waiting",
            _ => self.motion_state(),
        }
    }

    /// Free-text status line, e.g. `moving left 150 (autonomous/line)`
    pub fn status_text(&self) -> String<STATUS_LEN> {
        let mut text = String::new();
        // Worst case is well under STATUS_LEN
        let _ = write!(
            text,
            "{} {} {} ({}/{})",
            self.status(),
            self.command.direction.as_str(),
            self.command.speed,
            self.mode.as_str(),
            self.reason.as_str(),
        );
        text
    }
}
