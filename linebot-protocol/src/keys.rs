//! Database key paths and value text
//!
//! Remote values arrive as free text. They are parsed here, once, into
//! typed [`RemoteUpdate`]s; nothing past this module sees raw strings.
//!
//! `/robot/status` is shared with the station helper: the robot writes
//! `waiting`, `moving` or `stopped`, the helper answers `task_done`.

use core::fmt::Write;

use heapless::{String, Vec};
use linebot_core::command::DriveDirection;
use linebot_core::remote::{OperatingMode, RemoteUpdate};
use linebot_core::sensor::Distance;
use linebot_core::telemetry::{Telemetry, STATUS_LEN};

// Written by the cloud
pub const PATH_MODE: &str = "/robot/mode";
pub const PATH_COMMAND: &str = "/robot/command";
pub const PATH_SPEED: &str = "/robot/speed";

// Written by both: robot status, station helper `task_done`
pub const PATH_STATUS: &str = "/robot/status";

// Written by the robot
pub const PATH_STATE: &str = "/robot/telemetry/state";
pub const PATH_IR_LEFT: &str = "/robot/telemetry/ir_left";
pub const PATH_IR_RIGHT: &str = "/robot/telemetry/ir_right";
pub const PATH_DISTANCE: &str = "/robot/telemetry/distance";

/// Text value of a publication
pub type Value = String<STATUS_LEN>;

/// A batch of key/value publications
pub type Publications = Vec<(&'static str, Value), 5>;

/// Status the robot writes at boot
pub const STATUS_AT_BOOT: &str = "stopped";

/// Status token the station helper writes to release the robot
pub const STATUS_TASK_DONE: &str = "task_done";

/// Rejected remote write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UpdateError {
    /// Path is not one the robot listens to
    UnknownPath,
    /// Mode is neither manual nor autonomous
    InvalidMode,
    /// Speed is not an integer
    InvalidSpeed,
    /// Status write other than `task_done`, normally our own echo
    InvalidStatus,
}

/// Parse an operating mode (case-insensitive, surrounding whitespace ignored)
pub fn parse_mode(value: &str) -> Option<OperatingMode> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("manual") {
        Some(OperatingMode::Manual)
    } else if value.eq_ignore_ascii_case("autonomous") {
        Some(OperatingMode::Autonomous)
    } else {
        None
    }
}

/// Parse a direction; anything unrecognized means Stop
pub fn parse_direction(value: &str) -> DriveDirection {
    let value = value.trim();
    [
        DriveDirection::Forward,
        DriveDirection::Backward,
        DriveDirection::TurnLeft,
        DriveDirection::TurnRight,
    ]
    .into_iter()
    .find(|direction| value.eq_ignore_ascii_case(direction.as_str()))
    .unwrap_or(DriveDirection::Stop)
}

/// Parse a speed, clamped into 0..=255
pub fn parse_speed(value: &str) -> Option<u8> {
    let value = value.trim();
    let digits = value.strip_prefix(['-', '+']).unwrap_or(value);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    if value.starts_with('-') {
        return Some(0);
    }
    // Anything too long for u32 is far above 255 anyway
    Some(digits.parse::<u32>().map_or(u8::MAX, |n| n.min(u8::MAX as u32) as u8))
}

/// Parse a remote write into a typed update
pub fn parse_update(path: &str, value: &str) -> Result<RemoteUpdate, UpdateError> {
    match path {
        PATH_MODE => parse_mode(value)
            .map(RemoteUpdate::Mode)
            .ok_or(UpdateError::InvalidMode),
        PATH_COMMAND => Ok(RemoteUpdate::Command(parse_direction(value))),
        PATH_SPEED => parse_speed(value)
            .map(RemoteUpdate::Speed)
            .ok_or(UpdateError::InvalidSpeed),
        PATH_STATUS if value.trim().eq_ignore_ascii_case(STATUS_TASK_DONE) => {
            Ok(RemoteUpdate::TaskDone)
        }
        PATH_STATUS => Err(UpdateError::InvalidStatus),
        _ => Err(UpdateError::UnknownPath),
    }
}

/// IR reading as shown to the operator
pub fn surface_text(line_detected: bool) -> &'static str {
    if line_detected {
        "Black"
    } else {
        "White"
    }
}

/// Distance as shown to the operator: whole centimeters or `none`
pub fn distance_text(distance: Distance) -> Value {
    let mut text = Value::new();
    match distance {
        Distance::Cm(cm) => {
            let _ = write!(text, "{}", cm);
        }
        Distance::NoEcho => {
            let _ = text.push_str("none");
        }
    }
    text
}

fn text(value: &str) -> Value {
    let mut out = Value::new();
    // Callers only pass short literals
    let _ = out.push_str(value);
    out
}

fn push(batch: &mut Publications, path: &'static str, value: Value) {
    // Capacity matches the largest batch built below
    let _ = batch.push((path, value));
}

/// Last `/robot/status` value written
///
/// The status is a handshake key, so it is only rewritten when it changes:
/// repeating `waiting` would restart the helper's task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusLatch {
    last: Option<&'static str>,
}

impl Default for StatusLatch {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusLatch {
    /// Latch holding the boot status
    pub const fn new() -> Self {
        Self {
            last: Some(STATUS_AT_BOOT),
        }
    }

    /// Force the next status to be written
    pub fn forget(&mut self) {
        self.last = None;
    }

    /// Record `status`; true if it differs from the last one written
    pub fn update(&mut self, status: &'static str) -> bool {
        if self.last == Some(status) {
            return false;
        }
        self.last = Some(status);
        true
    }
}

/// Values written once at boot
pub fn initial_publications(cruise_speed: u8) -> Publications {
    let mut speed = Value::new();
    let _ = write!(speed, "{}", cruise_speed);

    let mut batch = Publications::new();
    push(&mut batch, PATH_MODE, text(OperatingMode::Manual.as_str()));
    push(&mut batch, PATH_COMMAND, text(DriveDirection::Stop.as_str()));
    push(&mut batch, PATH_SPEED, speed);
    push(&mut batch, PATH_STATUS, text(STATUS_AT_BOOT));
    batch
}

/// Values written on a telemetry tick
///
/// `/robot/status` is included only when `latch` says it changed.
pub fn telemetry_publications(telemetry: &Telemetry, latch: &mut StatusLatch) -> Publications {
    let mut batch = Publications::new();
    let status = telemetry.status();
    if latch.update(status) {
        push(&mut batch, PATH_STATUS, text(status));
    }
    push(&mut batch, PATH_STATE, telemetry.status_text());
    push(&mut batch, PATH_IR_LEFT, text(surface_text(telemetry.frame.left_ir)));
    push(&mut batch, PATH_IR_RIGHT, text(surface_text(telemetry.frame.right_ir)));
    push(&mut batch, PATH_DISTANCE, distance_text(telemetry.frame.distance));
    batch
}

#[cfg(test)]
mod tests {
    use super::*;
    use linebot_core::command::DriveCommand;
    use linebot_core::control::{CheckpointPhase, DecisionReason};
    use linebot_core::sensor::SensorFrame;

    #[test]
    fn test_mode_parsing() {
        assert_eq!(
            parse_update(PATH_MODE, "autonomous"),
            Ok(RemoteUpdate::Mode(OperatingMode::Autonomous))
        );
        assert_eq!(
            parse_update(PATH_MODE, "  Manual \n"),
            Ok(RemoteUpdate::Mode(OperatingMode::Manual))
        );
        assert_eq!(parse_update(PATH_MODE, "auto"), Err(UpdateError::InvalidMode));
        assert_eq!(parse_update(PATH_MODE, ""), Err(UpdateError::InvalidMode));
    }

    #[test]
    fn test_command_parsing() {
        let cases = [
            ("forward", DriveDirection::Forward),
            ("backward", DriveDirection::Backward),
            ("left", DriveDirection::TurnLeft),
            ("RIGHT", DriveDirection::TurnRight),
            ("stop", DriveDirection::Stop),
        ];
        for (text, direction) in cases {
            assert_eq!(
                parse_update(PATH_COMMAND, text),
                Ok(RemoteUpdate::Command(direction))
            );
        }
    }

    #[test]
    fn test_unknown_command_is_stop() {
        for text in ["jump", "", "forwards", "\"forward\""] {
            assert_eq!(
                parse_update(PATH_COMMAND, text),
                Ok(RemoteUpdate::Command(DriveDirection::Stop))
            );
        }
    }

    #[test]
    fn test_speed_parsing() {
        assert_eq!(parse_update(PATH_SPEED, "150"), Ok(RemoteUpdate::Speed(150)));
        assert_eq!(parse_update(PATH_SPEED, " 0 "), Ok(RemoteUpdate::Speed(0)));
        assert_eq!(parse_update(PATH_SPEED, "300"), Ok(RemoteUpdate::Speed(255)));
        assert_eq!(parse_update(PATH_SPEED, "-20"), Ok(RemoteUpdate::Speed(0)));
        assert_eq!(
            parse_update(PATH_SPEED, "99999999999999999999"),
            Ok(RemoteUpdate::Speed(255))
        );
        assert_eq!(parse_update(PATH_SPEED, "fast"), Err(UpdateError::InvalidSpeed));
        assert_eq!(parse_update(PATH_SPEED, "12.5"), Err(UpdateError::InvalidSpeed));
        assert_eq!(parse_update(PATH_SPEED, "-"), Err(UpdateError::InvalidSpeed));
    }

    #[test]
    fn test_unknown_path() {
        assert_eq!(
            parse_update("/robot/telemetry/state", "moving"),
            Err(UpdateError::UnknownPath)
        );
    }

    #[test]
    fn test_status_handshake_parsing() {
        assert_eq!(parse_update(PATH_STATUS, "task_done"), Ok(RemoteUpdate::TaskDone));
        assert_eq!(parse_update(PATH_STATUS, " Task_Done\n"), Ok(RemoteUpdate::TaskDone));
        for echo in ["waiting", "moving", "stopped", ""] {
            assert_eq!(parse_update(PATH_STATUS, echo), Err(UpdateError::InvalidStatus));
        }
    }

    #[test]
    fn test_initial_publications() {
        let batch = initial_publications(150);
        let values: Vec<(&str, &str), 5> = batch.iter().map(|(p, v)| (*p, v.as_str())).collect();
        assert_eq!(
            values.as_slice(),
            &[
                (PATH_MODE, "manual"),
                (PATH_COMMAND, "stop"),
                (PATH_SPEED, "150"),
                (PATH_STATUS, "stopped"),
            ]
        );
    }

    fn telemetry(command: DriveCommand, checkpoint: CheckpointPhase) -> Telemetry {
        Telemetry {
            frame: SensorFrame {
                left_ir: false,
                right_ir: true,
                distance: Distance::NoEcho,
                orientation: None,
                timestamp_ms: 0,
            },
            command,
            mode: OperatingMode::Autonomous,
            reason: DecisionReason::LineFollow,
            checkpoint,
        }
    }

    #[test]
    fn test_telemetry_publications() {
        let mut latch = StatusLatch::new();
        let moving = telemetry(
            DriveCommand::new(DriveDirection::TurnRight, 150),
            CheckpointPhase::Following,
        );

        let batch = telemetry_publications(&moving, &mut latch);
        assert_eq!(batch.len(), 5);
        assert_eq!(batch[0], (PATH_STATUS, text("moving")));
        assert_eq!(batch[1], (PATH_STATE, text("moving right 150 (autonomous/line)")));
        assert_eq!(batch[2], (PATH_IR_LEFT, text("White")));
        assert_eq!(batch[3], (PATH_IR_RIGHT, text("Black")));
        assert_eq!(batch[4], (PATH_DISTANCE, text("none")));

        // Unchanged status is not rewritten
        let batch = telemetry_publications(&moving, &mut latch);
        assert_eq!(batch.len(), 4);
        assert_eq!(batch[0].0, PATH_STATE);
    }

    #[test]
    fn test_station_status_sequence() {
        let forward = DriveCommand::new(DriveDirection::Forward, 150);
        let cycles = [
            telemetry(forward, CheckpointPhase::Following),
            telemetry(DriveCommand::STOP, CheckpointPhase::Waiting),
            telemetry(DriveCommand::STOP, CheckpointPhase::Waiting),
            telemetry(DriveCommand::STOP, CheckpointPhase::Waiting),
            telemetry(forward, CheckpointPhase::Leaving),
            telemetry(forward, CheckpointPhase::Following),
        ];

        let mut latch = StatusLatch::new();
        let mut written = Vec::<Value, 8>::new();
        for t in &cycles {
            for (path, value) in telemetry_publications(t, &mut latch).iter() {
                if *path == PATH_STATUS {
                    written.push(value.clone()).unwrap();
                }
            }
        }
        assert_eq!(
            written.as_slice(),
            &[text("moving"), text("waiting"), text("moving")]
        );

        // Helper's answer parses; our own writes do not
        assert_eq!(
            parse_update(PATH_STATUS, STATUS_TASK_DONE),
            Ok(RemoteUpdate::TaskDone)
        );
        for status in written.iter() {
            assert_eq!(
                parse_update(PATH_STATUS, status),
                Err(UpdateError::InvalidStatus)
            );
        }
    }

    #[test]
    fn test_latch_forget_rewrites() {
        let mut latch = StatusLatch::new();
        assert!(!latch.update(STATUS_AT_BOOT));
        latch.forget();
        assert!(latch.update(STATUS_AT_BOOT));
        assert!(!latch.update(STATUS_AT_BOOT));
    }

    #[test]
    fn test_distance_text() {
        assert_eq!(distance_text(Distance::Cm(42)).as_str(), "42");
        assert_eq!(distance_text(Distance::NoEcho).as_str(), "none");
    }
}
