//! Command arbiter
//!
//! Merges the operating mode, the remote override and both local policies
//! into exactly one drive command. Rules, in order:
//!
//! 1. Manual mode with a fresh override: the override wins, except that a
//!    forward command is turned into Stop while an obstacle is ahead.
//! 2. Autonomous mode holding at a station: Stop.
//! 3. Autonomous mode: the line-follow decision at cruise speed, with the
//!    same forward downgrade.
//! 4. Manual mode with a stale or missing override: Stop.

use crate::command::{DriveCommand, DriveDirection};
use crate::remote::{OperatingMode, RemoteOverride, DEFAULT_STALENESS_WINDOW_MS};

/// Why the arbiter chose its command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecisionReason {
    /// Fresh manual command passed through
    RemoteOverride,
    /// Line-follow decision passed through
    LineFollow,
    /// Forward motion blocked by an obstacle
    ObstacleStop,
    /// Manual mode but the last command is too old
    StaleOverride,
    /// Manual mode and no command received yet
    NoOverride,
    /// Autonomous mode holding at a station
    Checkpoint,
}

impl DecisionReason {
    /// Short name for telemetry
    pub fn as_str(self) -> &'static str {
        match self {
            DecisionReason::RemoteOverride => "remote",
            DecisionReason::LineFollow => "line",
            DecisionReason::ObstacleStop => "obstacle",
            DecisionReason::StaleOverride => "stale",
            DecisionReason::NoOverride => "idle",
            DecisionReason::Checkpoint => "checkpoint",
        }
    }
}

/// Everything the arbiter looks at in one cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArbiterInputs {
    /// Current operating mode
    pub mode: OperatingMode,
    /// Latest manual command, fresh or not
    pub remote_override: Option<RemoteOverride>,
    /// Obstacle policy output
    pub forward_allowed: bool,
    /// Line-follow policy output
    pub line_command: DriveDirection,
    /// Holding at a station
    pub checkpoint_hold: bool,
    /// Speed for autonomous driving
    pub cruise_speed: u8,
    /// Current monotonic time (ms)
    pub now_ms: u32,
}

/// Arbiter output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Arbitration {
    /// Command to actuate this cycle
    pub command: DriveCommand,
    /// Rule that produced it
    pub reason: DecisionReason,
}

impl Arbitration {
    const fn new(command: DriveCommand, reason: DecisionReason) -> Self {
        Self { command, reason }
    }

    const fn stop(reason: DecisionReason) -> Self {
        Self::new(DriveCommand::STOP, reason)
    }
}

/// Command arbiter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CommandArbiter {
    staleness_window_ms: u32,
}

impl Default for CommandArbiter {
    fn default() -> Self {
        Self::new(DEFAULT_STALENESS_WINDOW_MS)
    }
}

impl CommandArbiter {
    /// Create an arbiter that ignores overrides older than `staleness_window_ms`
    pub const fn new(staleness_window_ms: u32) -> Self {
        Self {
            staleness_window_ms,
        }
    }

    /// Get the staleness window
    pub fn staleness_window_ms(&self) -> u32 {
        self.staleness_window_ms
    }

    /// Decide this cycle's drive command
    pub fn arbitrate(&self, inputs: &ArbiterInputs) -> Arbitration {
        match inputs.mode {
            OperatingMode::Manual => match inputs.remote_override {
                Some(pending) if pending.is_fresh(inputs.now_ms, self.staleness_window_ms) => {
                    Self::guard_forward(
                        pending.command(),
                        inputs.forward_allowed,
                        DecisionReason::RemoteOverride,
                    )
                }
                Some(_) => Arbitration::stop(DecisionReason::StaleOverride),
                None => Arbitration::stop(DecisionReason::NoOverride),
            },
            OperatingMode::Autonomous if inputs.checkpoint_hold => {
                Arbitration::stop(DecisionReason::Checkpoint)
            }
            OperatingMode::Autonomous => Self::guard_forward(
                DriveCommand::new(inputs.line_command, inputs.cruise_speed),
                inputs.forward_allowed,
                DecisionReason::LineFollow,
            ),
        }
    }

    /// Downgrade a forward command to Stop when forward motion is blocked
    fn guard_forward(
        command: DriveCommand,
        forward_allowed: bool,
        reason: DecisionReason,
    ) -> Arbitration {
        if command.direction.is_forward() && !forward_allowed {
            Arbitration::stop(DecisionReason::ObstacleStop)
        } else {
            Arbitration::new(command, reason)
        }
    }
}
