//! Station checkpoint
//!
//! With junctions set to stop, a junction is a station: the robot holds
//! there and reports `waiting` until the station helper writes
//! `task_done`, then drives straight until it is off the junction.

use crate::policy::JunctionAction;
use crate::remote::OperatingMode;

/// Where the robot is in the station handshake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CheckpointPhase {
    /// Normal line following
    #[default]
    Following,
    /// Holding on a station until released
    Waiting,
    /// Released; crossing the junction
    Leaving,
}

impl CheckpointPhase {
    /// Short name for logs
    pub fn as_str(self) -> &'static str {
        match self {
            CheckpointPhase::Following => "following",
            CheckpointPhase::Waiting => "waiting",
            CheckpointPhase::Leaving => "leaving",
        }
    }
}

/// Station handshake state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint {
    enabled: bool,
    phase: CheckpointPhase,
    seen_release: Option<u16>,
}

impl Checkpoint {
    /// Stations exist only when junctions stop the robot
    pub const fn new(junction: JunctionAction) -> Self {
        Self {
            enabled: matches!(junction, JunctionAction::Stop),
            phase: CheckpointPhase::Following,
            seen_release: None,
        }
    }

    /// Current phase
    pub fn phase(&self) -> CheckpointPhase {
        self.phase
    }

    /// Advance one control cycle
    ///
    /// `release_seq` is the remote `task_done` counter. Only a change seen
    /// while waiting releases the robot; releases that arrive earlier are
    /// absorbed.
    pub fn update(
        &mut self,
        mode: OperatingMode,
        on_junction: bool,
        release_seq: u16,
    ) -> CheckpointPhase {
        let released = self.seen_release.is_some_and(|seen| seen != release_seq);
        self.seen_release = Some(release_seq);

        if !self.enabled || mode != OperatingMode::Autonomous {
            self.phase = CheckpointPhase::Following;
            return self.phase;
        }

        self.phase = match self.phase {
            CheckpointPhase::Following if on_junction => CheckpointPhase::Waiting,
            CheckpointPhase::Waiting if released && on_junction => CheckpointPhase::Leaving,
            CheckpointPhase::Waiting if released => CheckpointPhase::Following,
            CheckpointPhase::Leaving if !on_junction => CheckpointPhase::Following,
            phase => phase,
        };
        self.phase
    }
}

impl Default for Checkpoint {
    fn default() -> Self {
        Self::new(JunctionAction::Stop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AUTO: OperatingMode = OperatingMode::Autonomous;

    #[test]
    fn test_station_round_trip() {
        let mut cp = Checkpoint::default();
        assert_eq!(cp.update(AUTO, false, 0), CheckpointPhase::Following);
        assert_eq!(cp.update(AUTO, true, 0), CheckpointPhase::Waiting);
        assert_eq!(cp.update(AUTO, true, 0), CheckpointPhase::Waiting);

        // Helper writes task_done
        assert_eq!(cp.update(AUTO, true, 1), CheckpointPhase::Leaving);
        assert_eq!(cp.update(AUTO, true, 1), CheckpointPhase::Leaving);
        assert_eq!(cp.update(AUTO, false, 1), CheckpointPhase::Following);

        // Next station waits again
        assert_eq!(cp.update(AUTO, true, 1), CheckpointPhase::Waiting);
    }

    #[test]
    fn test_early_release_is_absorbed() {
        let mut cp = Checkpoint::default();
        cp.update(AUTO, false, 0);
        cp.update(AUTO, false, 1);
        assert_eq!(cp.update(AUTO, true, 1), CheckpointPhase::Waiting);
        assert_eq!(cp.update(AUTO, true, 1), CheckpointPhase::Waiting);
    }

    #[test]
    fn test_release_after_drifting_off() {
        let mut cp = Checkpoint::default();
        cp.update(AUTO, true, 7);
        assert_eq!(cp.update(AUTO, false, 8), CheckpointPhase::Following);
    }

    #[test]
    fn test_manual_mode_resets() {
        let mut cp = Checkpoint::default();
        cp.update(AUTO, true, 0);
        assert_eq!(cp.phase(), CheckpointPhase::Waiting);

        assert_eq!(cp.update(OperatingMode::Manual, true, 0), CheckpointPhase::Following);
        // Back in autonomous on the same junction: a fresh stop
        assert_eq!(cp.update(AUTO, true, 0), CheckpointPhase::Waiting);
    }

    #[test]
    fn test_forward_junctions_have_no_stations() {
        let mut cp = Checkpoint::new(JunctionAction::Forward);
        assert_eq!(cp.update(AUTO, true, 0), CheckpointPhase::Following);
        assert_eq!(cp.update(AUTO, true, 1), CheckpointPhase::Following);
    }
}
