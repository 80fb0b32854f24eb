//! Build script for linebot-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates robot.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate robot.toml at compile time
///
/// The firmware parses the same file at boot with a smaller parser; catching
/// mistakes here keeps the boot-time fallback to defaults a rare event.
fn validate_config() {
    println!("cargo:rerun-if-changed=robot.toml");

    let config_path = Path::new("robot.toml");
    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: robot.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds robot.toml as its configuration.            ║\n\
            ║  Please create one in the linebot-firmware directory.            ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail("Failed to read robot.toml", &[e.to_string()]),
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => fail(
            "Invalid TOML syntax in robot.toml",
            &e.to_string().lines().map(str::to_string).collect::<Vec<_>>(),
        ),
    };

    let mut errors = Vec::new();
    validate_sections(&config, &mut errors);
    let period = validate_navigation(&config, &mut errors);
    validate_sensors(&config, period, &mut errors);
    validate_bridge(&config, &mut errors);

    if !errors.is_empty() {
        fail("Invalid configuration in robot.toml", &errors);
    }

    println!("cargo:warning=robot.toml validated successfully");
}

/// Abort the build with a boxed error listing
fn fail(title: &str, lines: &[String]) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        lines
            .iter()
            .map(|line| {
                let truncated = if line.len() > 62 {
                    format!("{}...", &line[..59])
                } else {
                    line.clone()
                };
                format!("║  • {:<62} ║", truncated)
            })
            .collect::<Vec<_>>()
            .join("\n")
    );
}

const SECTIONS: &[&str] = &["navigation", "sensors", "bridge"];

fn validate_sections(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(table) = config.as_table() else {
        errors.push("top level must be a table".to_string());
        return;
    };

    for (name, value) in table {
        if !SECTIONS.contains(&name.as_str()) {
            errors.push(format!("unknown section [{}]", name));
        } else if !value.is_table() {
            errors.push(format!("[{}] must be a table", name));
        }
    }
}

/// Check an optional integer key against an inclusive range
fn check_int(
    config: &toml::Value,
    section: &str,
    key: &str,
    min: i64,
    max: i64,
    errors: &mut Vec<String>,
) -> Option<i64> {
    match config.get(section).and_then(|s| s.get(key)) {
        None => None,
        Some(toml::Value::Integer(v)) if (min..=max).contains(v) => Some(*v),
        Some(toml::Value::Integer(_)) => {
            errors.push(format!("[{}] {} must be {}-{}", section, key, min, max));
            None
        }
        Some(_) => {
            errors.push(format!("[{}] {} must be an integer", section, key));
            None
        }
    }
}

fn check_bool(config: &toml::Value, section: &str, key: &str, errors: &mut Vec<String>) {
    if let Some(value) = config.get(section).and_then(|s| s.get(key)) {
        if !value.is_bool() {
            errors.push(format!("[{}] {} must be true or false", section, key));
        }
    }
}

/// Returns the control period (ms) the other sections are checked against
fn validate_navigation(config: &toml::Value, errors: &mut Vec<String>) -> i64 {
    let period = check_int(config, "navigation", "control_period_ms", 10, 1000, errors)
        .unwrap_or(50);
    check_int(config, "navigation", "obstacle_threshold_cm", 1, 400, errors);
    check_int(config, "navigation", "cruise_speed", 0, 255, errors);

    let staleness =
        check_int(config, "navigation", "staleness_window_ms", 0, u32::MAX as i64, errors)
            .unwrap_or(2000);
    if staleness < period {
        errors.push("[navigation] staleness_window_ms must be >= control_period_ms".to_string());
    }

    if let Some(junction) = config.get("navigation").and_then(|s| s.get("junction")) {
        if !matches!(junction.as_str(), Some("stop" | "forward")) {
            errors.push("[navigation] junction must be 'stop' or 'forward'".to_string());
        }
    }

    period
}

fn validate_sensors(config: &toml::Value, period_ms: i64, errors: &mut Vec<String>) {
    check_bool(config, "sensors", "ir_left_inverted", errors);
    check_bool(config, "sensors", "ir_right_inverted", errors);

    let echo = check_int(config, "sensors", "echo_timeout_us", 1_000, 60_000, errors)
        .unwrap_or(25_000);
    if echo * 2 > period_ms * 1000 {
        errors.push(format!(
            "[sensors] echo_timeout_us ({}) must be at most half of control_period_ms ({} ms)",
            echo, period_ms
        ));
    }
}

fn validate_bridge(config: &toml::Value, errors: &mut Vec<String>) {
    check_int(config, "bridge", "telemetry_interval_ms", 100, u32::MAX as i64, errors);
}
