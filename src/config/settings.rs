//! Configuration settings for focusflow.
//!
//! Settings are loaded from `~/.focusflow/config.yaml`. Timer durations are
//! stored in minutes and validated here before the focus machine sees them.

use serde::{Deserialize, Serialize};

use crate::cli::args::OutputFormat;
use crate::config::Paths;
use crate::error::FocusFlowError;
use crate::features::focus::TimerConfiguration;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// General settings.
    pub general: GeneralConfig,
    /// Focus timer settings.
    pub timer: TimerConfig,
    /// Sound cue settings.
    pub sound: SoundConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GeneralConfig {
    /// Default output format.
    #[serde(default = "default_output_format")]
    pub default_output: OutputFormat,
}

/// Focus timer settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TimerConfig {
    /// Focus phase length in minutes.
    #[serde(default = "default_focus_minutes")]
    pub focus_minutes: u32,
    /// Short break length in minutes.
    #[serde(default = "default_short_break")]
    pub short_break_minutes: u32,
    /// Long break length in minutes.
    #[serde(default = "default_long_break")]
    pub long_break_minutes: u32,
    /// Focus rounds before a long break.
    #[serde(default = "default_rounds_until_long_break")]
    pub rounds_until_long_break: u32,
    /// Start breaks automatically when a focus phase ends.
    #[serde(default)]
    pub auto_start_breaks: bool,
    /// Start focus automatically when a break ends.
    #[serde(default = "default_true")]
    pub auto_start_focus: bool,
}

/// Sound cue settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SoundConfig {
    /// Play cues on start, pause, stop and phase end.
    #[serde(default = "default_true")]
    pub enabled: bool,
}

/// Named duration presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// 25/5/15
    Classic,
    /// 50/10/20
    Extended,
    /// 90/10/30
    Deep,
}

impl Preset {
    /// Parse a preset from user input.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "classic" | "25" | "25/5/15" => Some(Self::Classic),
            "extended" | "50" | "50/10/20" => Some(Self::Extended),
            "deep" | "90" | "90/10/30" => Some(Self::Deep),
            _ => None,
        }
    }

    /// Focus, short break and long break minutes.
    #[must_use]
    pub const fn minutes(self) -> (u32, u32, u32) {
        match self {
            Self::Classic => (25, 5, 15),
            Self::Extended => (50, 10, 20),
            Self::Deep => (90, 10, 30),
        }
    }
}

const FOCUS_MINUTES_MAX: u32 = 180;
const BREAK_MINUTES_MAX: u32 = 60;
const ROUNDS_MAX: u32 = 10;

// Default value functions for serde
const fn default_output_format() -> OutputFormat {
    OutputFormat::Pretty
}

const fn default_focus_minutes() -> u32 {
    25
}

const fn default_short_break() -> u32 {
    5
}

const fn default_long_break() -> u32 {
    15
}

const fn default_rounds_until_long_break() -> u32 {
    4
}

const fn default_true() -> bool {
    true
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_output: default_output_format(),
        }
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            focus_minutes: default_focus_minutes(),
            short_break_minutes: default_short_break(),
            long_break_minutes: default_long_break(),
            rounds_until_long_break: default_rounds_until_long_break(),
            auto_start_breaks: false,
            auto_start_focus: default_true(),
        }
    }
}

impl Default for SoundConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
        }
    }
}

fn check_range(field: &'static str, value: u32, max: u32) -> Result<(), FocusFlowError> {
    if value == 0 || value > max {
        return Err(FocusFlowError::InvalidSetting {
            field,
            reason: format!("{value} is outside 1..={max}"),
        });
    }
    Ok(())
}

fn parse_bool(field: &'static str, value: &str) -> Result<bool, FocusFlowError> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(FocusFlowError::InvalidSetting {
            field,
            reason: format!("expected true or false, got '{value}'"),
        }),
    }
}

fn parse_count(field: &'static str, value: &str) -> Result<u32, FocusFlowError> {
    value
        .trim()
        .parse()
        .map_err(|_| FocusFlowError::InvalidSetting {
            field,
            reason: format!("expected a whole number, got '{value}'"),
        })
}

impl TimerConfig {
    /// Check every field against its allowed range.
    ///
    /// # Errors
    ///
    /// Returns `FocusFlowError::InvalidSetting` for the first bad field.
    pub fn validate(&self) -> Result<(), FocusFlowError> {
        check_range("focus_minutes", self.focus_minutes, FOCUS_MINUTES_MAX)?;
        check_range(
            "short_break_minutes",
            self.short_break_minutes,
            BREAK_MINUTES_MAX,
        )?;
        check_range(
            "long_break_minutes",
            self.long_break_minutes,
            BREAK_MINUTES_MAX,
        )?;
        check_range(
            "rounds_until_long_break",
            self.rounds_until_long_break,
            ROUNDS_MAX,
        )
    }

    /// Validated machine configuration in seconds.
    ///
    /// # Errors
    ///
    /// Returns an error if any field is out of range.
    pub fn timer_configuration(&self) -> Result<TimerConfiguration, FocusFlowError> {
        self.validate()?;
        let config = TimerConfiguration {
            focus_duration_seconds: self.focus_minutes * 60,
            short_break_duration_seconds: self.short_break_minutes * 60,
            long_break_duration_seconds: self.long_break_minutes * 60,
            rounds_until_long_break: self.rounds_until_long_break,
            auto_start_breaks: self.auto_start_breaks,
            auto_start_focus: self.auto_start_focus,
        };
        config.validate()?;
        Ok(config)
    }

    /// Apply a duration preset, leaving rounds and auto-start alone.
    pub fn apply_preset(&mut self, preset: Preset) {
        let (focus, short, long) = preset.minutes();
        self.focus_minutes = focus;
        self.short_break_minutes = short;
        self.long_break_minutes = long;
    }
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed or
    /// holds out-of-range timer settings.
    pub fn load() -> Result<Self, FocusFlowError> {
        let paths = Paths::new()?;
        Self::load_from_path(&paths.config_file)
    }

    /// Load configuration from the default path without range checks.
    ///
    /// Used by the `config` commands so a file with bad values can still be
    /// shown and repaired.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load_unvalidated() -> Result<Self, FocusFlowError> {
        let paths = Paths::new()?;
        Self::read_from_path(&paths.config_file)
    }

    /// Load configuration from a specific path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed or
    /// holds out-of-range timer settings.
    pub fn load_from_path(path: &std::path::Path) -> Result<Self, FocusFlowError> {
        let config = Self::read_from_path(path)?;
        config.timer.validate()?;
        Ok(config)
    }

    /// Parse the file at `path`, defaulting when it is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn read_from_path(path: &std::path::Path) -> Result<Self, FocusFlowError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            FocusFlowError::Config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        serde_yaml::from_str(&contents).map_err(|e| {
            FocusFlowError::Config(format!(
                "Failed to parse config file {}: {e}",
                path.display()
            ))
        })
    }

    /// Save configuration to a specific path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be written.
    pub fn save_to_path(&self, path: &std::path::Path) -> Result<(), FocusFlowError> {
        let contents = serde_yaml::to_string(self)
            .map_err(|e| FocusFlowError::Config(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, contents).map_err(|e| {
            FocusFlowError::Config(format!(
                "Failed to write config file {}: {e}",
                path.display()
            ))
        })
    }

    /// Set a single value by its dotted key, e.g. `timer.focus_minutes`.
    ///
    /// The section prefix may be omitted for timer keys.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown keys or invalid values. On error the
    /// configuration is left unchanged.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), FocusFlowError> {
        let mut next = self.clone();
        let key = key.trim().to_lowercase();
        let bare = key.strip_prefix("timer.").unwrap_or(&key);

        match bare {
            "focus_minutes" | "focus" => {
                next.timer.focus_minutes = parse_count("focus_minutes", value)?;
            }
            "short_break_minutes" | "short" => {
                next.timer.short_break_minutes = parse_count("short_break_minutes", value)?;
            }
            "long_break_minutes" | "long" => {
                next.timer.long_break_minutes = parse_count("long_break_minutes", value)?;
            }
            "rounds_until_long_break" | "rounds" => {
                next.timer.rounds_until_long_break =
                    parse_count("rounds_until_long_break", value)?;
            }
            "auto_start_breaks" => {
                next.timer.auto_start_breaks = parse_bool("auto_start_breaks", value)?;
            }
            "auto_start_focus" => {
                next.timer.auto_start_focus = parse_bool("auto_start_focus", value)?;
            }
            "sound.enabled" | "sound" => {
                next.sound.enabled = parse_bool("sound.enabled", value)?;
            }
            "general.default_output" | "output" => {
                next.general.default_output = match value.trim().to_lowercase().as_str() {
                    "pretty" => OutputFormat::Pretty,
                    "json" => OutputFormat::Json,
                    _ => {
                        return Err(FocusFlowError::InvalidSetting {
                            field: "general.default_output",
                            reason: format!("expected pretty or json, got '{value}'"),
                        })
                    }
                };
            }
            _ => {
                return Err(FocusFlowError::NotFound(format!(
                    "Unknown setting '{key}'"
                )))
            }
        }

        next.timer.validate()?;
        *self = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.general.default_output, OutputFormat::Pretty);
        assert_eq!(config.timer.focus_minutes, 25);
        assert_eq!(config.timer.short_break_minutes, 5);
        assert_eq!(config.timer.long_break_minutes, 15);
        assert_eq!(config.timer.rounds_until_long_break, 4);
        assert!(!config.timer.auto_start_breaks);
        assert!(config.timer.auto_start_focus);
        assert!(config.sound.enabled);
    }

    #[test]
    fn test_default_timer_configuration() {
        let config = Config::default().timer.timer_configuration().unwrap();
        assert_eq!(config, TimerConfiguration::default());
    }

    #[test]
    fn test_load_missing_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let config = Config::load_from_path(&config_path).unwrap();

        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut config = Config::default();
        config.timer.focus_minutes = 30;
        config.sound.enabled = false;

        config.save_to_path(&config_path).unwrap();

        let loaded = Config::load_from_path(&config_path).unwrap();

        assert_eq!(loaded.timer.focus_minutes, 30);
        assert!(!loaded.sound.enabled);
    }

    #[test]
    fn test_partial_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let partial_yaml = r#"
timer:
  focus_minutes: 45
"#;
        std::fs::write(&config_path, partial_yaml).unwrap();

        let config = Config::load_from_path(&config_path).unwrap();

        assert_eq!(config.timer.focus_minutes, 45);
        assert_eq!(config.timer.short_break_minutes, 5);
        assert!(config.timer.auto_start_focus);
        assert_eq!(config.general.default_output, OutputFormat::Pretty);
    }

    #[test]
    fn test_load_rejects_zero_duration() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        std::fs::write(&config_path, "timer:\n  short_break_minutes: 0\n").unwrap();

        let err = Config::load_from_path(&config_path).unwrap_err();
        assert!(matches!(
            err,
            FocusFlowError::InvalidSetting {
                field: "short_break_minutes",
                ..
            }
        ));
    }

    #[test]
    fn test_read_keeps_out_of_range_values() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        std::fs::write(&config_path, "timer:\n  focus_minutes: 0\n").unwrap();

        let mut config = Config::read_from_path(&config_path).unwrap();
        assert_eq!(config.timer.focus_minutes, 0);

        config.set("focus", "25").unwrap();
        assert!(config.timer.validate().is_ok());
    }

    #[test]
    fn test_validate_upper_bounds() {
        let mut timer = TimerConfig::default();
        timer.focus_minutes = 181;
        assert!(timer.validate().is_err());

        timer.focus_minutes = 180;
        timer.rounds_until_long_break = 11;
        assert!(timer.timer_configuration().is_err());
    }

    #[test]
    fn test_set_values() {
        let mut config = Config::default();

        config.set("timer.focus_minutes", "50").unwrap();
        config.set("rounds", "2").unwrap();
        config.set("auto_start_breaks", "yes").unwrap();
        config.set("sound.enabled", "off").unwrap();
        config.set("output", "json").unwrap();

        assert_eq!(config.timer.focus_minutes, 50);
        assert_eq!(config.timer.rounds_until_long_break, 2);
        assert!(config.timer.auto_start_breaks);
        assert!(!config.sound.enabled);
        assert_eq!(config.general.default_output, OutputFormat::Json);
    }

    #[test]
    fn test_set_rejects_bad_values_atomically() {
        let mut config = Config::default();

        assert!(config.set("focus", "0").is_err());
        assert!(config.set("focus", "abc").is_err());
        assert!(config.set("auto_start_focus", "maybe").is_err());
        assert!(matches!(
            config.set("theme", "dark"),
            Err(FocusFlowError::NotFound(_))
        ));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_apply_preset() {
        let mut timer = TimerConfig::default();
        timer.rounds_until_long_break = 3;

        timer.apply_preset(Preset::parse("deep").unwrap());

        assert_eq!(timer.focus_minutes, 90);
        assert_eq!(timer.short_break_minutes, 10);
        assert_eq!(timer.long_break_minutes, 30);
        assert_eq!(timer.rounds_until_long_break, 3);
        assert!(Preset::parse("huge").is_none());
    }
}
