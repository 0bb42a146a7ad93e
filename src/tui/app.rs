//! Application state for the TUI.

use std::io::Stderr;
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::error::FocusFlowError;
use crate::features::focus::{
    advance, ActiveMode, Fanout, FocusMachine, Phase, SessionStore, Ticker, TimerConfiguration,
    TimerSession,
};
use crate::features::sound::Chime;
use crate::features::stats::{local_today, DailyStatsStore, DayStats, StatsRecorder};
use crate::storage::Database;

/// Longest the loop waits for a key while nothing is ticking.
const IDLE_POLL: Duration = Duration::from_millis(250);

/// Application state.
pub struct App<'a> {
    db: &'a Database,
    machine: FocusMachine,
    recorder: StatsRecorder<'a>,
    chime: Chime<Stderr>,
    ticker: Ticker,
    /// Today's focus totals.
    pub today: DayStats,
    /// Status message to display.
    pub status: Option<String>,
    /// Whether the app should quit.
    pub should_quit: bool,
}

impl<'a> App<'a> {
    /// Create a new app instance, resuming the saved timer state.
    ///
    /// A timer that was saved running keeps running from where it was.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the saved state
    /// cannot be read.
    pub fn new(db: &'a Database, config: &Config, now: Instant) -> Result<Self, FocusFlowError> {
        let timer = config.timer.timer_configuration()?;
        let machine = SessionStore::new(db).restore(timer)?;

        let mut app = Self {
            db,
            machine,
            recorder: StatsRecorder::new(db),
            chime: Chime::stderr(config.sound.enabled),
            ticker: Ticker::every_second(),
            today: DailyStatsStore::new(db).get_day(local_today())?,
            status: Some("Press ? for help".to_string()),
            should_quit: false,
        };
        app.sync_ticker(now);
        Ok(app)
    }

    /// Current timer state.
    pub const fn session(&self) -> &TimerSession {
        self.machine.session()
    }

    /// Active timer settings.
    pub const fn config(&self) -> &TimerConfiguration {
        self.machine.config()
    }

    /// How long the loop may block waiting for input.
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        self.ticker
            .time_until_due(now)
            .map_or(IDLE_POLL, |due| due.min(IDLE_POLL))
    }

    /// Start the active mode if it is idle, pause it otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the state cannot be saved.
    pub fn toggle_running(&mut self, now: Instant) -> Result<(), FocusFlowError> {
        let mode = self.session().active_mode;
        let was_running = self.session().active_running();
        {
            let mut events = Fanout::new().with(&mut self.recorder).with(&mut self.chime);
            if was_running {
                self.machine.pause(&mut events);
            } else {
                self.machine.start(&mut events);
            }
        }
        let verb = if was_running { "paused" } else { "started" };
        self.status = Some(format!("{} {verb}", mode.display_name()));
        self.after_mutation(now)
    }

    /// Rewind the active mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the state cannot be saved.
    pub fn reset(&mut self, now: Instant) -> Result<(), FocusFlowError> {
        self.machine.reset();
        self.status = Some(format!("{} reset", self.session().active_mode.display_name()));
        self.after_mutation(now)
    }

    /// Stop and rewind the active mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the state cannot be saved.
    pub fn stop(&mut self, now: Instant) -> Result<(), FocusFlowError> {
        {
            let mut events = Fanout::new().with(&mut self.recorder).with(&mut self.chime);
            self.machine.stop(&mut events);
        }
        self.status = Some(format!("{} stopped", self.session().active_mode.display_name()));
        self.after_mutation(now)
    }

    /// Switch between timer and stopwatch.
    ///
    /// # Errors
    ///
    /// Returns an error if the state cannot be saved.
    pub fn toggle_mode(&mut self, now: Instant) -> Result<(), FocusFlowError> {
        let next = self.session().active_mode.toggled();
        self.machine.switch_active_mode(next);
        self.status = Some(format!("Switched to {}", next.display_name()));
        self.after_mutation(now)
    }

    /// Jump to a timer phase.
    ///
    /// # Errors
    ///
    /// Returns an error if the state cannot be saved.
    pub fn switch_phase(&mut self, phase: Phase, now: Instant) -> Result<(), FocusFlowError> {
        self.machine.switch_phase(phase);
        self.status = Some(format!("Switched to {}", phase.display_name()));
        self.after_mutation(now)
    }

    /// Apply any ticks that fell due by `now`.
    ///
    /// # Errors
    ///
    /// Returns an error if the state cannot be saved.
    pub fn on_tick(&mut self, now: Instant) -> Result<(), FocusFlowError> {
        let due = self.ticker.due_ticks(now);
        if due == 0 {
            return Ok(());
        }

        let result = {
            let mut events = Fanout::new().with(&mut self.recorder).with(&mut self.chime);
            advance(&mut self.machine, &mut events, due)
        };

        if let Some((finished, next)) = result.completions.last() {
            self.status = Some(format!(
                "{} complete, {} next",
                finished.display_name(),
                next.display_name()
            ));
        }

        if result.changed() {
            self.after_mutation(now)?;
        } else {
            self.sync_ticker(now);
        }
        Ok(())
    }

    /// Show the key help.
    pub fn show_help(&mut self) {
        self.status = Some(
            "space:start/pause | r:reset | s:stop | t:mode | 1/2/3:phase | q:quit".to_string(),
        );
    }

    fn after_mutation(&mut self, now: Instant) -> Result<(), FocusFlowError> {
        self.sync_ticker(now);
        SessionStore::new(self.db).save(&self.machine)?;
        self.today = DailyStatsStore::new(self.db).get_day(local_today())?;
        Ok(())
    }

    /// Attach the ticker exactly while the active mode is counting.
    fn sync_ticker(&mut self, now: Instant) {
        if self.machine.session().active_running() {
            self.ticker.attach(now);
        } else {
            self.ticker.detach();
        }
    }

    /// Whether the stopwatch is the active mode.
    pub fn stopwatch_active(&self) -> bool {
        self.session().active_mode == ActiveMode::Stopwatch
    }
}
