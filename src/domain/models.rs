use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::{ConfigError, ConfigResult};

/// Shortest duration a session can be configured to, in minutes.
pub const MIN_MINUTES: u32 = 1;
/// Longest duration a session can be configured to, in minutes.
pub const MAX_MINUTES: u32 = 100;

/// The two alternating interval types of a pomodoro cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    Work,
    Rest,
}

impl Mode {
    /// Returns the mode that follows this one.
    pub fn toggled(self) -> Self {
        match self {
            Mode::Work => Mode::Rest,
            Mode::Rest => Mode::Work,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Mode::Work => "work",
            Mode::Rest => "rest",
        }
    }

    /// RGB colour of the progress indicator while this mode is active.
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            Mode::Work => (0xAA, 0xDB, 0x18),
            Mode::Rest => (0xE7, 0x4C, 0x3C),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Alarm tones offered by the tone selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlarmTone {
    #[default]
    Rooster,
    Foghorn,
    JapaneseBell,
    WoopWoop,
}

impl AlarmTone {
    pub const ALL: [AlarmTone; 4] = [
        AlarmTone::Rooster,
        AlarmTone::Foghorn,
        AlarmTone::JapaneseBell,
        AlarmTone::WoopWoop,
    ];

    pub fn name(self) -> &'static str {
        match self {
            AlarmTone::Rooster => "rooster",
            AlarmTone::Foghorn => "foghorn",
            AlarmTone::JapaneseBell => "japanese-bell",
            AlarmTone::WoopWoop => "woop-woop",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|tone| *tone == self).unwrap_or(0)
    }

    /// Next tone in selector order, wrapping around.
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Previous tone in selector order, wrapping around.
    pub fn previous(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for AlarmTone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AlarmTone {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|tone| tone.name() == wanted)
            .ok_or_else(|| ConfigError::UnknownTone(s.to_string()))
    }
}

/// Configured length of each mode, in whole minutes.
///
/// Both values always lie in [`MIN_MINUTES`, `MAX_MINUTES`].
///
/// # Examples
///
/// ```
/// use tpomo::domain::{Mode, SessionConfig};
///
/// let config = SessionConfig::new(50, 10).unwrap();
/// assert_eq!(config.minutes(Mode::Work), 50);
/// assert_eq!(config.seconds(Mode::Rest), 600);
/// assert!(SessionConfig::new(0, 10).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    work_minutes: u32,
    rest_minutes: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            work_minutes: 25,
            rest_minutes: 5,
        }
    }
}

impl SessionConfig {
    pub fn new(work_minutes: u32, rest_minutes: u32) -> ConfigResult<Self> {
        Ok(Self {
            work_minutes: Self::validate(Mode::Work, work_minutes)?,
            rest_minutes: Self::validate(Mode::Rest, rest_minutes)?,
        })
    }

    fn validate(mode: Mode, value: u32) -> ConfigResult<u32> {
        if (MIN_MINUTES..=MAX_MINUTES).contains(&value) {
            Ok(value)
        } else {
            Err(ConfigError::DurationOutOfRange {
                mode,
                value,
                min: MIN_MINUTES,
                max: MAX_MINUTES,
            })
        }
    }

    pub fn minutes(&self, mode: Mode) -> u32 {
        match mode {
            Mode::Work => self.work_minutes,
            Mode::Rest => self.rest_minutes,
        }
    }

    pub fn seconds(&self, mode: Mode) -> u32 {
        self.minutes(mode) * 60
    }

    /// Stores `minutes` for `mode` if it is in range. Returns whether the
    /// stored value changed.
    pub(crate) fn set_minutes(&mut self, mode: Mode, minutes: u32) -> bool {
        if !(MIN_MINUTES..=MAX_MINUTES).contains(&minutes) || self.minutes(mode) == minutes {
            return false;
        }
        match mode {
            Mode::Work => self.work_minutes = minutes,
            Mode::Rest => self.rest_minutes = minutes,
        }
        true
    }
}

/// Live countdown state.
///
/// `remaining_seconds` never exceeds the configured duration of `mode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerState {
    pub mode: Mode,
    pub remaining_seconds: u32,
    pub running: bool,
}

impl TimerState {
    pub fn initial(config: &SessionConfig) -> Self {
        Self {
            mode: Mode::Work,
            remaining_seconds: config.seconds(Mode::Work),
            running: false,
        }
    }
}

/// Formats a second count as `mm:ss`.
///
/// Minutes are not wrapped at the hour, so a 100 minute session reads
/// `100:00`.
///
/// ```
/// use tpomo::domain::format_clock;
///
/// assert_eq!(format_clock(1500), "25:00");
/// assert_eq!(format_clock(59), "00:59");
/// assert_eq!(format_clock(6000), "100:00");
/// ```
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
