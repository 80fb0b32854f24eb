//! Navigation controller
//!
//! One `step` per control cycle: both policies, the station checkpoint,
//! then the arbiter.

use crate::command::{DriveCommand, DriveDirection};
use crate::config::NavigationConfig;
use crate::policy::{LineFollowPolicy, ObstaclePolicy};
use crate::remote::RemoteState;
use crate::sensor::SensorFrame;

use super::arbiter::{ArbiterInputs, Arbitration, CommandArbiter, DecisionReason};
use super::checkpoint::{Checkpoint, CheckpointPhase};

/// Result of one control cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Decision {
    /// Command to actuate
    pub command: DriveCommand,
    /// Arbiter rule that produced the command
    pub reason: DecisionReason,
    /// Obstacle policy output for this frame
    pub forward_allowed: bool,
    /// Line-follow policy output for this frame, after the checkpoint
    pub line_command: DriveDirection,
    /// Station handshake phase after this frame
    pub checkpoint: CheckpointPhase,
    /// Command differs from the previous cycle
    pub changed: bool,
}

/// Navigation controller
#[derive(Debug, Clone)]
pub struct NavigationController {
    obstacle: ObstaclePolicy,
    line_follow: LineFollowPolicy,
    arbiter: CommandArbiter,
    checkpoint: Checkpoint,
    last_command: Option<DriveCommand>,
}

impl Default for NavigationController {
    fn default() -> Self {
        Self::new(
            ObstaclePolicy::default(),
            LineFollowPolicy::default(),
            CommandArbiter::default(),
        )
    }
}

impl NavigationController {
    /// Create a controller from its parts
    pub fn new(
        obstacle: ObstaclePolicy,
        line_follow: LineFollowPolicy,
        arbiter: CommandArbiter,
    ) -> Self {
        Self {
            obstacle,
            checkpoint: Checkpoint::new(line_follow.junction()),
            line_follow,
            arbiter,
            last_command: None,
        }
    }

    /// Create a controller from the navigation config section
    pub fn from_config(config: &NavigationConfig) -> Self {
        Self::new(
            ObstaclePolicy::new(config.obstacle_threshold_cm),
            LineFollowPolicy::new(config.junction),
            CommandArbiter::new(config.staleness_window_ms),
        )
    }

    /// Run policies and arbitration for one frame
    pub fn step(&mut self, frame: &SensorFrame, remote: &RemoteState, now_ms: u32) -> Decision {
        let forward_allowed = self.obstacle.forward_allowed(frame.distance);
        let on_junction = frame.left_ir && frame.right_ir;
        let checkpoint = self
            .checkpoint
            .update(remote.mode, on_junction, remote.task_done_seq);
        let line_command = match checkpoint {
            CheckpointPhase::Leaving => DriveDirection::Forward,
            _ => self.line_follow.steer(frame.left_ir, frame.right_ir),
        };

        let Arbitration { command, reason } = self.arbiter.arbitrate(&ArbiterInputs {
            mode: remote.mode,
            remote_override: remote.remote_override,
            forward_allowed,
            line_command,
            checkpoint_hold: checkpoint == CheckpointPhase::Waiting,
            cruise_speed: remote.cruise_speed,
            now_ms,
        });

        let changed = self.last_command != Some(command);
        self.last_command = Some(command);

        Decision {
            command,
            reason,
            forward_allowed,
            line_command,
            checkpoint,
            changed,
        }
    }

    /// Command issued by the previous step, if any
    pub fn last_command(&self) -> Option<DriveCommand> {
        self.last_command
    }

    /// Get the obstacle policy
    pub fn obstacle_policy(&self) -> &ObstaclePolicy {
        &self.obstacle
    }

    /// Get the line-follow policy
    pub fn line_follow_policy(&self) -> &LineFollowPolicy {
        &self.line_follow
    }

    /// Get the arbiter
    pub fn arbiter(&self) -> &CommandArbiter {
        &self.arbiter
    }

    /// Current station handshake phase
    pub fn checkpoint(&self) -> CheckpointPhase {
        self.checkpoint.phase()
    }
}
