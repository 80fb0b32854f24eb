//! Robot configuration
//!
//! Typed configuration plus the small line parser used for the embedded
//! `robot.toml`.

pub mod toml;
pub mod types;

pub use self::toml::{parse_config, ParseError};
pub use types::*;
