//! Simple TOML parser for robot configuration
//!
//! This is a minimal TOML parser that handles only the subset needed for
//! `robot.toml`. It does NOT support the full TOML spec.
//!
//! Supported features:
//! - Key = value pairs (string, integer, boolean)
//! - [section] headers
//! - Comments (# ...), including trailing comments
//!
//! Unknown keys are ignored; unknown sections are an error.

use crate::policy::JunctionAction;

use super::types::{ConfigError, RobotConfig};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Invalid section header
    InvalidSection,
    /// Invalid value type
    InvalidValue,
    /// Key/value outside any section
    MissingSection,
    /// Values parsed but out of range
    Invalid(ConfigError),
}

impl From<ConfigError> for ParseError {
    fn from(err: ConfigError) -> Self {
        ParseError::Invalid(err)
    }
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Navigation,
    Sensors,
    Bridge,
}

/// Parse and validate TOML configuration into RobotConfig
///
/// Missing keys keep their defaults.
pub fn parse_config(input: &str) -> Result<RobotConfig, ParseError> {
    let mut config = RobotConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            section = parse_section_header(&line[1..line.len() - 1])?;
            continue;
        }

        match parse_key_value(line) {
            Some((key, value)) => apply_value(section, key, value, &mut config)?,
            None => return Err(ParseError::InvalidValue),
        }
    }

    config.validate()?;
    Ok(config)
}

fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "navigation" => Ok(Section::Navigation),
        "sensors" => Ok(Section::Sensors),
        "bridge" => Ok(Section::Bridge),
        _ => Err(ParseError::InvalidSection),
    }
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    // Remove inline comments
    let value = match value.find('#') {
        // # inside a string is kept
        Some(hash_pos) if value[..hash_pos].matches('"').count() % 2 == 0 => {
            value[..hash_pos].trim()
        }
        _ => value,
    };

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

fn parse_string(value: &str) -> &str {
    if value.starts_with('"') && value.ends_with('"') && value.len() >= 2 {
        &value[1..value.len() - 1]
    } else {
        // Allow unquoted strings for simple values
        value
    }
}

fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    // TOML allows 1_000 style separators
    let mut digits: heapless::String<16> = heapless::String::new();
    for c in value.chars().filter(|c| *c != '_') {
        digits.push(c).map_err(|_| ParseError::InvalidValue)?;
    }
    digits.parse().map_err(|_| ParseError::InvalidValue)
}

fn parse_bool(value: &str) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidValue),
    }
}

fn parse_junction(value: &str) -> Result<JunctionAction, ParseError> {
    match parse_string(value) {
        "stop" | "Stop" => Ok(JunctionAction::Stop),
        "forward" | "Forward" => Ok(JunctionAction::Forward),
        _ => Err(ParseError::InvalidValue),
    }
}

fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut RobotConfig,
) -> Result<(), ParseError> {
    match section {
        Section::Root => return Err(ParseError::MissingSection),
        Section::Navigation => {
            let nav = &mut config.navigation;
            match key {
                "control_period_ms" => nav.control_period_ms = parse_int(value)?,
                "obstacle_threshold_cm" => nav.obstacle_threshold_cm = parse_int(value)?,
                "staleness_window_ms" => nav.staleness_window_ms = parse_int(value)?,
                "cruise_speed" => nav.cruise_speed = parse_int(value)?,
                "junction" => nav.junction = parse_junction(value)?,
                _ => {} // Ignore unknown keys
            }
        }
        Section::Sensors => {
            let sensors = &mut config.sensors;
            match key {
                "ir_left_inverted" => sensors.ir_left_inverted = parse_bool(value)?,
                "ir_right_inverted" => sensors.ir_right_inverted = parse_bool(value)?,
                "echo_timeout_us" => sensors.echo_timeout_us = parse_int(value)?,
                _ => {}
            }
        }
        Section::Bridge => {
            if key == "telemetry_interval_ms" {
                config.bridge.telemetry_interval_ms = parse_int(value)?;
            }
        }
    }
    Ok(())
}
