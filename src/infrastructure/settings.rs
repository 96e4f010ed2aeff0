use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::domain::{AlarmTone, ConfigError, SessionConfig};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid settings file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid settings in {}: {source}", path.display())]
    Invalid {
        path: PathBuf,
        #[source]
        source: ConfigError,
    },
}

/// External player used for alarm sound files.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlayerSettings {
    pub program: String,
    pub tones: HashMap<AlarmTone, PathBuf>,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            program: "paplay".to_string(),
            tones: HashMap::new(),
        }
    }
}

/// Startup settings, read from a JSON file. Never written back.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub work_minutes: u32,
    pub rest_minutes: u32,
    pub alarm: AlarmTone,
    pub mute: bool,
    pub player: PlayerSettings,
}

/// Values given on the command line. Each one that is set wins over the
/// settings file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub work_minutes: Option<u32>,
    pub rest_minutes: Option<u32>,
    pub alarm: Option<AlarmTone>,
    /// Muting can only be switched on from the command line.
    pub mute: bool,
}

impl Default for Settings {
    fn default() -> Self {
        let config = SessionConfig::default();
        Self {
            work_minutes: config.minutes(crate::domain::Mode::Work),
            rest_minutes: config.minutes(crate::domain::Mode::Rest),
            alarm: AlarmTone::default(),
            mute: false,
            player: PlayerSettings::default(),
        }
    }
}

impl Settings {
    /// Loads and validates a settings file. Missing keys take their defaults.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let content = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: Settings = serde_json::from_str(&content).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        settings.session_config().map_err(|source| SettingsError::Invalid {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(settings)
    }

    /// Reads `path` if given, otherwise starts from the defaults, then
    /// applies `overrides`.
    pub fn resolve(path: Option<&Path>, overrides: &Overrides) -> Result<Self, SettingsError> {
        let settings = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        Ok(settings.with_overrides(overrides))
    }

    /// The result is not validated; call [`Settings::session_config`] on it.
    pub fn with_overrides(mut self, overrides: &Overrides) -> Self {
        if let Some(work) = overrides.work_minutes {
            self.work_minutes = work;
        }
        if let Some(rest) = overrides.rest_minutes {
            self.rest_minutes = rest;
        }
        if let Some(alarm) = overrides.alarm {
            self.alarm = alarm;
        }
        self.mute |= overrides.mute;
        self
    }

    pub fn session_config(&self) -> Result<SessionConfig, ConfigError> {
        SessionConfig::new(self.work_minutes, self.rest_minutes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Mode;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_settings(json: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.work_minutes, 25);
        assert_eq!(settings.rest_minutes, 5);
        assert_eq!(settings.alarm, AlarmTone::Rooster);
        assert_eq!(settings.player.program, "paplay");
        assert!(!settings.mute);
    }

    #[test]
    fn test_load_full_file() {
        let file = write_settings(
            r#"{
                "work_minutes": 50,
                "rest_minutes": 10,
                "alarm": "japanese-bell",
                "mute": true,
                "player": {
                    "program": "aplay",
                    "tones": { "foghorn": "/usr/share/sounds/foghorn.wav" }
                }
            }"#,
        );

        let settings = Settings::load(file.path()).unwrap();
        assert_eq!(settings.work_minutes, 50);
        assert_eq!(settings.alarm, AlarmTone::JapaneseBell);
        assert!(settings.mute);
        assert_eq!(settings.player.program, "aplay");
        assert_eq!(
            settings.player.tones.get(&AlarmTone::Foghorn),
            Some(&PathBuf::from("/usr/share/sounds/foghorn.wav"))
        );
        let config = settings.session_config().unwrap();
        assert_eq!(config.minutes(Mode::Rest), 10);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let file = write_settings(r#"{ "rest_minutes": 15 }"#);
        let settings = Settings::load(file.path()).unwrap();
        assert_eq!(settings.work_minutes, 25);
        assert_eq!(settings.rest_minutes, 15);
        assert_eq!(settings.player, PlayerSettings::default());
    }

    #[test]
    fn test_out_of_range_duration_rejected() {
        let file = write_settings(r#"{ "work_minutes": 120 }"#);
        let err = Settings::load(file.path()).unwrap_err();
        assert!(matches!(
            err,
            SettingsError::Invalid {
                source: ConfigError::DurationOutOfRange { mode: Mode::Work, value: 120, .. },
                ..
            }
        ));
        assert!(err.to_string().contains(&file.path().display().to_string()));
    }

    #[test]
    fn test_unknown_tone_rejected() {
        let file = write_settings(r#"{ "alarm": "gong" }"#);
        assert!(matches!(Settings::load(file.path()), Err(SettingsError::Parse { .. })));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let file = write_settings(r#"{ "long_break_minutes": 15 }"#);
        assert!(matches!(Settings::load(file.path()), Err(SettingsError::Parse { .. })));
    }

    #[test]
    fn test_overrides_win_over_file() {
        let file = write_settings(r#"{ "work_minutes": 50, "rest_minutes": 10, "alarm": "foghorn" }"#);
        let overrides = Overrides {
            work_minutes: Some(30),
            alarm: Some(AlarmTone::WoopWoop),
            ..Overrides::default()
        };

        let settings = Settings::resolve(Some(file.path()), &overrides).unwrap();
        assert_eq!(settings.work_minutes, 30);
        assert_eq!(settings.rest_minutes, 10);
        assert_eq!(settings.alarm, AlarmTone::WoopWoop);
    }

    #[test]
    fn test_overrides_without_file() {
        let overrides = Overrides {
            rest_minutes: Some(7),
            ..Overrides::default()
        };
        let settings = Settings::resolve(None, &overrides).unwrap();
        assert_eq!(settings.work_minutes, 25);
        assert_eq!(settings.rest_minutes, 7);
        assert_eq!(settings.alarm, AlarmTone::Rooster);
    }

    #[test]
    fn test_mute_combines_with_file() {
        let muted_file = write_settings(r#"{ "mute": true }"#);
        let settings = Settings::resolve(Some(muted_file.path()), &Overrides::default()).unwrap();
        assert!(settings.mute);

        let loud_file = write_settings(r#"{ "mute": false }"#);
        let overrides = Overrides {
            mute: true,
            ..Overrides::default()
        };
        let settings = Settings::resolve(Some(loud_file.path()), &overrides).unwrap();
        assert!(settings.mute);

        let settings = Settings::resolve(Some(loud_file.path()), &Overrides::default()).unwrap();
        assert!(!settings.mute);
    }

    #[test]
    fn test_out_of_range_override_rejected_by_session_config() {
        let overrides = Overrides {
            work_minutes: Some(0),
            ..Overrides::default()
        };
        let settings = Settings::resolve(None, &overrides).unwrap();
        assert_eq!(
            settings.session_config(),
            Err(ConfigError::DurationOutOfRange {
                mode: Mode::Work,
                value: 0,
                min: 1,
                max: 100
            })
        );
    }

    #[test]
    fn test_override_cannot_rescue_invalid_file() {
        let file = write_settings(r#"{ "work_minutes": 500 }"#);
        let overrides = Overrides {
            work_minutes: Some(25),
            ..Overrides::default()
        };
        assert!(matches!(
            Settings::resolve(Some(file.path()), &overrides),
            Err(SettingsError::Invalid { .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");
        assert!(matches!(Settings::load(&path), Err(SettingsError::Io { .. })));
    }
}
