use thiserror::Error;

use super::models::Mode;

/// Errors raised while building a session configuration from outside input.
///
/// The session model itself never fails: out-of-range adjustments made while
/// the timer is in use are ignored instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{mode} duration must be between {min} and {max} minutes, got {value}")]
    DurationOutOfRange {
        mode: Mode,
        value: u32,
        min: u32,
        max: u32,
    },
    #[error("unknown alarm tone '{0}' (expected rooster, foghorn, japanese-bell or woop-woop)")]
    UnknownTone(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
