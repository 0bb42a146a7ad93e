//! Focus session state.
//!
//! The timer and the stopwatch keep independent progress; `active_mode`
//! only selects which of them the tick driver advances.

use serde::{Deserialize, Serialize};

use super::machine::TimerConfiguration;

/// Which sub-state machine is live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActiveMode {
    /// Pomodoro countdown through focus and break phases.
    #[default]
    Timer,
    /// Open-ended count-up.
    Stopwatch,
}

impl ActiveMode {
    /// The other mode.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Timer => Self::Stopwatch,
            Self::Stopwatch => Self::Timer,
        }
    }

    /// Get display name.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Timer => "Timer",
            Self::Stopwatch => "Stopwatch",
        }
    }
}

impl std::fmt::Display for ActiveMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Timer phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Phase {
    /// Focused work.
    #[default]
    #[serde(rename = "focus")]
    Focus,
    /// Break between focus rounds.
    #[serde(rename = "short")]
    ShortBreak,
    /// Break after the last round of a cycle.
    #[serde(rename = "long")]
    LongBreak,
}

impl Phase {
    /// Configured duration of this phase in seconds.
    #[must_use]
    pub const fn duration_seconds(self, config: &TimerConfiguration) -> u32 {
        match self {
            Self::Focus => config.focus_duration_seconds,
            Self::ShortBreak => config.short_break_duration_seconds,
            Self::LongBreak => config.long_break_duration_seconds,
        }
    }

    /// Check if this is a break phase.
    #[must_use]
    pub const fn is_break(&self) -> bool {
        matches!(self, Self::ShortBreak | Self::LongBreak)
    }

    /// Get display name.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Focus => "Focus",
            Self::ShortBreak => "Short Break",
            Self::LongBreak => "Long Break",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Live state of the focus timer and stopwatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSession {
    /// Which branch the tick driver advances
    pub active_mode: ActiveMode,
    /// Current timer phase
    pub phase: Phase,
    /// Focus round within the current cycle, starting at 1
    pub current_round: u32,
    /// Seconds left in the current phase
    pub remaining_seconds: u32,
    /// Whether the countdown is running
    pub is_running: bool,
    /// Seconds counted by the stopwatch since its last reset
    pub stopwatch_elapsed_seconds: u64,
    /// Whether the stopwatch is counting
    pub stopwatch_running: bool,
    /// Whether the stopwatch has an uncounted session
    pub stopwatch_session_active: bool,
}

impl TimerSession {
    /// Fresh state at the start of a focus phase.
    #[must_use]
    pub const fn new(config: &TimerConfiguration) -> Self {
        Self {
            active_mode: ActiveMode::Timer,
            phase: Phase::Focus,
            current_round: 1,
            remaining_seconds: config.focus_duration_seconds,
            is_running: false,
            stopwatch_elapsed_seconds: 0,
            stopwatch_running: false,
            stopwatch_session_active: false,
        }
    }

    /// Configured duration of the current phase.
    #[must_use]
    pub const fn phase_duration(&self, config: &TimerConfiguration) -> u32 {
        self.phase.duration_seconds(config)
    }

    /// Whether the active branch is counting.
    #[must_use]
    pub const fn active_running(&self) -> bool {
        match self.active_mode {
            ActiveMode::Timer => self.is_running,
            ActiveMode::Stopwatch => self.stopwatch_running,
        }
    }

    /// Fraction of the current phase still ahead, in `0.0..=1.0`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn remaining_ratio(&self, config: &TimerConfiguration) -> f64 {
        let total = self.phase_duration(config);
        if total == 0 {
            return 0.0;
        }
        (f64::from(self.remaining_seconds) / f64::from(total)).clamp(0.0, 1.0)
    }
}

impl Default for TimerSession {
    fn default() -> Self {
        Self::new(&TimerConfiguration::default())
    }
}
