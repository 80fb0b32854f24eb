//! Motor actuation trait
//!
//! The drivetrain is a pair of DC motors behind a dual H-bridge. The
//! navigation core only ever hands it one [`DriveCommand`] per cycle.

use crate::command::DriveCommand;

/// Drivetrain that executes drive commands
///
/// Implementations translate a command into direction pins and PWM duty.
/// They give no feedback: hardware faults are not signalled.
pub trait DriveActuator {
    /// Apply a drive command
    ///
    /// Must be idempotent: applying the same command repeatedly leaves the
    /// outputs unchanged.
    fn drive(&mut self, command: DriveCommand);

    /// Get the last applied command
    fn current(&self) -> DriveCommand;

    /// Enable or disable the driver (standby line)
    ///
    /// When disabled, both motors coast regardless of the last command.
    fn enable(&mut self, enabled: bool);

    /// Check if the driver is enabled
    fn is_enabled(&self) -> bool;

    /// Convenience: stop both motors
    fn stop(&mut self) {
        self.drive(DriveCommand::STOP);
    }
}
