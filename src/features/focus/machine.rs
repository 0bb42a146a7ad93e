//! The focus session state machine.
//!
//! Owns a [`TimerSession`] and applies user operations and one-second ticks
//! to it. Collaborators are handed in per call as a [`FocusEvents`]
//! implementation; their failures are logged and never abort an operation.

use serde::{Deserialize, Serialize};

use super::events::FocusEvents;
use super::session::{ActiveMode, Phase, TimerSession};
use crate::error::FocusFlowError;

/// Durations and auto-start policy for the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerConfiguration {
    /// Length of a focus phase in seconds
    pub focus_duration_seconds: u32,
    /// Length of a short break in seconds
    pub short_break_duration_seconds: u32,
    /// Length of a long break in seconds
    pub long_break_duration_seconds: u32,
    /// Focus rounds per cycle; the last one is followed by a long break
    pub rounds_until_long_break: u32,
    /// Start breaks without waiting for the user
    pub auto_start_breaks: bool,
    /// Start focus phases without waiting for the user
    pub auto_start_focus: bool,
}

impl Default for TimerConfiguration {
    fn default() -> Self {
        Self {
            focus_duration_seconds: 25 * 60,
            short_break_duration_seconds: 5 * 60,
            long_break_duration_seconds: 15 * 60,
            rounds_until_long_break: 4,
            auto_start_breaks: false,
            auto_start_focus: true,
        }
    }
}

impl TimerConfiguration {
    /// Check that every duration and the round count are positive.
    ///
    /// # Errors
    ///
    /// Returns `FocusFlowError::InvalidSetting` naming the first bad field.
    pub fn validate(&self) -> Result<(), FocusFlowError> {
        let checks = [
            ("focus_duration_seconds", self.focus_duration_seconds),
            (
                "short_break_duration_seconds",
                self.short_break_duration_seconds,
            ),
            (
                "long_break_duration_seconds",
                self.long_break_duration_seconds,
            ),
            ("rounds_until_long_break", self.rounds_until_long_break),
        ];

        for (field, value) in checks {
            if value == 0 {
                return Err(FocusFlowError::InvalidSetting {
                    field,
                    reason: "must be greater than zero".to_string(),
                });
            }
        }

        Ok(())
    }
}

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The active branch is not running; nothing changed.
    Idle,
    /// One second was counted.
    Counted,
    /// The countdown reached zero and the timer moved to the next phase.
    PhaseCompleted {
        /// Phase that ran out
        finished: Phase,
        /// Phase now loaded
        next: Phase,
    },
}

/// Focus timer and stopwatch state machine.
#[derive(Debug, Clone)]
pub struct FocusMachine {
    session: TimerSession,
    config: TimerConfiguration,
}

impl FocusMachine {
    /// Create a machine in its initial state.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: TimerConfiguration) -> Result<Self, FocusFlowError> {
        config.validate()?;
        Ok(Self {
            session: TimerSession::new(&config),
            config,
        })
    }

    /// Resume from previously persisted state.
    ///
    /// Fields are taken verbatim except that the remaining time is clamped to
    /// the current phase's duration and the round to at least 1.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn restore(
        config: TimerConfiguration,
        mut session: TimerSession,
    ) -> Result<Self, FocusFlowError> {
        config.validate()?;
        session.remaining_seconds = session.remaining_seconds.min(session.phase_duration(&config));
        session.current_round = session.current_round.max(1);
        Ok(Self { session, config })
    }

    /// Current state.
    #[must_use]
    pub const fn session(&self) -> &TimerSession {
        &self.session
    }

    /// Current configuration.
    #[must_use]
    pub const fn config(&self) -> &TimerConfiguration {
        &self.config
    }

    /// Consume the machine, returning its state.
    #[must_use]
    pub fn into_session(self) -> TimerSession {
        self.session
    }

    /// Replace the configuration.
    ///
    /// A running countdown keeps its remaining time; an idle one is
    /// resynchronised to the new phase duration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid; the old one is kept.
    pub fn set_config(&mut self, config: TimerConfiguration) -> Result<(), FocusFlowError> {
        config.validate()?;
        self.config = config;
        if !self.session.is_running {
            self.session.remaining_seconds = self.session.phase_duration(&self.config);
        }
        Ok(())
    }

    /// Select which branch is live. Both keep their progress and run flags.
    pub fn switch_active_mode(&mut self, mode: ActiveMode) {
        tracing::debug!(from = %self.session.active_mode, to = %mode, "switch mode");
        self.session.active_mode = mode;
    }

    /// Jump to a timer phase, stopping the countdown.
    ///
    /// Entering focus starts a new cycle at round 1.
    pub fn switch_phase(&mut self, next: Phase) {
        tracing::debug!(from = %self.session.phase, to = %next, "switch phase");
        self.session.is_running = false;
        if next == Phase::Focus {
            self.session.current_round = 1;
        }
        self.enter_phase(next);
    }

    /// Start the active branch.
    pub fn start<E: FocusEvents + ?Sized>(&mut self, events: &mut E) {
        match self.session.active_mode {
            ActiveMode::Timer => {
                if self.session.remaining_seconds == 0 {
                    self.session.remaining_seconds = self.session.phase_duration(&self.config);
                }
                self.session.is_running = true;
            }
            ActiveMode::Stopwatch => {
                self.session.stopwatch_running = true;
                self.session.stopwatch_session_active = true;
            }
        }
        notify(events, "start", |e| e.on_start());
    }

    /// Pause the active branch.
    ///
    /// Pausing a stopwatch that accrued time counts one completed session,
    /// once per start.
    pub fn pause<E: FocusEvents + ?Sized>(&mut self, events: &mut E) {
        let was_running = self.session.active_running();
        match self.session.active_mode {
            ActiveMode::Timer => self.session.is_running = false,
            ActiveMode::Stopwatch => {
                self.session.stopwatch_running = false;
                self.close_stopwatch_session(events);
            }
        }
        if was_running {
            notify(events, "pause", |e| e.on_pause());
        }
    }

    /// Rewind the active branch without counting anything.
    pub fn reset(&mut self) {
        match self.session.active_mode {
            ActiveMode::Timer => {
                self.session.is_running = false;
                self.session.remaining_seconds = self.session.phase_duration(&self.config);
            }
            ActiveMode::Stopwatch => self.clear_stopwatch(),
        }
    }

    /// Stop and rewind the active branch.
    ///
    /// A stopwatch with an open session counts it before clearing.
    pub fn stop<E: FocusEvents + ?Sized>(&mut self, events: &mut E) {
        match self.session.active_mode {
            ActiveMode::Timer => {
                self.session.is_running = false;
                self.session.remaining_seconds = self.session.phase_duration(&self.config);
            }
            ActiveMode::Stopwatch => {
                self.close_stopwatch_session(events);
                self.clear_stopwatch();
            }
        }
        notify(events, "stop", |e| e.on_stop());
    }

    /// Advance the active branch by one second.
    pub fn tick<E: FocusEvents + ?Sized>(&mut self, events: &mut E) -> TickOutcome {
        match self.session.active_mode {
            ActiveMode::Timer => {
                if !self.session.is_running {
                    return TickOutcome::Idle;
                }
                if self.session.phase == Phase::Focus {
                    notify(events, "focus_second", |e| e.on_focus_second_elapsed());
                }
                if self.session.remaining_seconds > 1 {
                    self.session.remaining_seconds -= 1;
                    return TickOutcome::Counted;
                }
                self.session.remaining_seconds = 0;
                let finished = self.session.phase;
                let next = self.complete_phase(events);
                TickOutcome::PhaseCompleted { finished, next }
            }
            ActiveMode::Stopwatch => {
                if !self.session.stopwatch_running {
                    return TickOutcome::Idle;
                }
                self.session.stopwatch_elapsed_seconds =
                    self.session.stopwatch_elapsed_seconds.saturating_add(1);
                notify(events, "focus_second", |e| e.on_focus_second_elapsed());
                TickOutcome::Counted
            }
        }
    }

    fn complete_phase<E: FocusEvents + ?Sized>(&mut self, events: &mut E) -> Phase {
        notify(events, "session_end", |e| e.on_session_end());
        self.session.is_running = false;

        let (next, auto_start) = if self.session.phase == Phase::Focus {
            notify(events, "session_completed", |e| e.on_session_completed());
            if self.session.current_round >= self.config.rounds_until_long_break {
                self.session.current_round = 1;
                (Phase::LongBreak, self.config.auto_start_breaks)
            } else {
                self.session.current_round += 1;
                (Phase::ShortBreak, self.config.auto_start_breaks)
            }
        } else {
            (Phase::Focus, self.config.auto_start_focus)
        };

        tracing::debug!(
            finished = %self.session.phase,
            next = %next,
            round = self.session.current_round,
            auto_start,
            "phase completed"
        );

        self.enter_phase(next);
        self.session.is_running = auto_start;
        next
    }

    fn enter_phase(&mut self, phase: Phase) {
        self.session.phase = phase;
        self.session.remaining_seconds = phase.duration_seconds(&self.config);
    }

    fn close_stopwatch_session<E: FocusEvents + ?Sized>(&mut self, events: &mut E) {
        if self.session.stopwatch_elapsed_seconds > 0 && self.session.stopwatch_session_active {
            notify(events, "session_completed", |e| e.on_session_completed());
            self.session.stopwatch_session_active = false;
        }
    }

    fn clear_stopwatch(&mut self) {
        self.session.stopwatch_running = false;
        self.session.stopwatch_elapsed_seconds = 0;
        self.session.stopwatch_session_active = false;
    }
}

fn notify<E: FocusEvents + ?Sized>(
    events: &mut E,
    event: &'static str,
    f: impl FnOnce(&mut E) -> Result<(), FocusFlowError>,
) {
    if let Err(e) = f(events) {
        tracing::warn!(event, error = %e, "focus listener failed");
    }
}
