//! Configuration type definitions
//!
//! These types represent the robot configuration. The firmware embeds a
//! `robot.toml` and parses it at boot with [`super::parse_config`].

use crate::policy::{JunctionAction, DEFAULT_THRESHOLD_CM};
use crate::remote::DEFAULT_STALENESS_WINDOW_MS;

/// Default control loop period
pub const DEFAULT_CONTROL_PERIOD_MS: u32 = 50;

/// Default autonomous speed
pub const DEFAULT_CRUISE_SPEED: u8 = 150;

/// Default ultrasonic echo timeout (about 4.25 m)
pub const DEFAULT_ECHO_TIMEOUT_US: u32 = 25_000;

/// Default telemetry publish interval
pub const DEFAULT_TELEMETRY_INTERVAL_MS: u32 = 500;

/// Configuration validation error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Control period outside 10..=1000 ms
    ControlPeriod,
    /// Obstacle threshold outside 1..=400 cm
    ObstacleThreshold,
    /// Staleness window shorter than one control period
    StalenessWindow,
    /// Echo timeout outside 1000..=60000 us
    EchoTimeout,
    /// Echo timeout longer than half a control period
    EchoBudget,
    /// Telemetry interval below 100 ms
    TelemetryInterval,
}

/// Navigation loop settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NavigationConfig {
    /// Control loop period (ms)
    pub control_period_ms: u32,
    /// Stop distance for forward motion (cm)
    pub obstacle_threshold_cm: u16,
    /// Maximum age of a remote command (ms)
    pub staleness_window_ms: u32,
    /// Speed for autonomous driving and new manual commands
    pub cruise_speed: u8,
    /// Behavior when both IR sensors see the line
    pub junction: JunctionAction,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            control_period_ms: DEFAULT_CONTROL_PERIOD_MS,
            obstacle_threshold_cm: DEFAULT_THRESHOLD_CM,
            staleness_window_ms: DEFAULT_STALENESS_WINDOW_MS,
            cruise_speed: DEFAULT_CRUISE_SPEED,
            junction: JunctionAction::Stop,
        }
    }
}

/// Sensor front-end settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorConfig {
    /// Left IR module reads HIGH on black
    pub ir_left_inverted: bool,
    /// Right IR module reads HIGH on black
    pub ir_right_inverted: bool,
    /// Bound for one ultrasonic measurement, trigger to falling edge (us)
    pub echo_timeout_us: u32,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            ir_left_inverted: false,
            ir_right_inverted: false,
            echo_timeout_us: DEFAULT_ECHO_TIMEOUT_US,
        }
    }
}

/// Network bridge settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BridgeConfig {
    /// Telemetry publish interval (ms)
    pub telemetry_interval_ms: u32,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            telemetry_interval_ms: DEFAULT_TELEMETRY_INTERVAL_MS,
        }
    }
}

/// Complete robot configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RobotConfig {
    /// `[navigation]` section
    pub navigation: NavigationConfig,
    /// `[sensors]` section
    pub sensors: SensorConfig,
    /// `[bridge]` section
    pub bridge: BridgeConfig,
}

impl RobotConfig {
    /// Check all ranges and cross-field constraints
    pub fn validate(&self) -> Result<(), ConfigError> {
        let nav = &self.navigation;
        if !(10..=1000).contains(&nav.control_period_ms) {
            return Err(ConfigError::ControlPeriod);
        }
        if !(1..=400).contains(&nav.obstacle_threshold_cm) {
            return Err(ConfigError::ObstacleThreshold);
        }
        if nav.staleness_window_ms < nav.control_period_ms {
            return Err(ConfigError::StalenessWindow);
        }
        if !(1_000..=60_000).contains(&self.sensors.echo_timeout_us) {
            return Err(ConfigError::EchoTimeout);
        }
        // The echo wait spins inside the control cycle
        if self.sensors.echo_timeout_us as u64 * 2 > nav.control_period_ms as u64 * 1000 {
            return Err(ConfigError::EchoBudget);
        }
        if self.bridge.telemetry_interval_ms < 100 {
            return Err(ConfigError::TelemetryInterval);
        }
        Ok(())
    }
}
