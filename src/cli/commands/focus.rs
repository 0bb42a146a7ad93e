//! Timer command implementation.
//!
//! Each command restores the machine from the database, applies one
//! operation with the stats recorder and chime listening, and saves it back.

use crate::cli::args::OutputFormat;
use crate::config::Config;
use crate::error::FocusFlowError;
use crate::features::focus::{
    advance, parse_duration, ActiveMode, Fanout, FocusEvents, FocusMachine, Phase,
    SessionStore,
};
use crate::features::sound::Chime;
use crate::features::stats::{local_today, DailyStatsStore, StatsRecorder};
use crate::output::{format_status, StatusView};
use crate::storage::Database;

/// One timer operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusOperation {
    /// Show state only
    Status,
    /// Start the active mode
    Start,
    /// Pause the active mode
    Pause,
    /// Rewind the active mode
    Reset,
    /// Stop and rewind the active mode
    Stop,
    /// Select timer or stopwatch
    Mode(ActiveMode),
    /// Jump to a phase
    Phase(Phase),
    /// Apply one-second ticks
    Tick(u32),
}

impl FocusOperation {
    const fn mutates(self) -> bool {
        !matches!(self, Self::Status)
    }
}

/// Work out how many ticks `tick` should apply.
///
/// # Errors
///
/// Returns `FocusFlowError::Parse` if `span` is not a duration.
pub fn tick_count(count: u32, span: Option<&str>) -> Result<u32, FocusFlowError> {
    let Some(span) = span else {
        return Ok(count);
    };

    let duration = parse_duration(span, true)
        .ok_or_else(|| FocusFlowError::Parse(format!("Invalid duration '{span}'")))?;

    u32::try_from(duration.num_seconds())
        .map_err(|_| FocusFlowError::Parse(format!("Duration '{span}' is too long")))
}

/// Execute a timer operation.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the state cannot be
/// read or written, or output formatting fails.
pub fn focus(
    db: &Database,
    config: &Config,
    op: FocusOperation,
    format: OutputFormat,
) -> Result<String, FocusFlowError> {
    let timer = config.timer.timer_configuration()?;
    let store = SessionStore::new(db);
    let mut machine = store.restore(timer)?;

    let mut recorder = StatsRecorder::new(db);
    let mut chime = Chime::stderr(config.sound.enabled);
    let mut events = Fanout::new().with(&mut recorder).with(&mut chime);

    let message = apply(&mut machine, &mut events, op);

    if op.mutates() {
        store.save(&machine)?;
    }

    let today = DailyStatsStore::new(db).get_day(local_today())?;
    let view = StatusView::new(machine.into_session(), &timer, today, message);
    format_status(&view, format)
}

/// Apply `op` and describe what happened.
fn apply<E: FocusEvents + ?Sized>(
    machine: &mut FocusMachine,
    events: &mut E,
    op: FocusOperation,
) -> Option<String> {
    let mode = machine.session().active_mode;

    match op {
        FocusOperation::Status => None,
        FocusOperation::Start => {
            machine.start(events);
            Some(format!("{} started", mode.display_name()))
        }
        FocusOperation::Pause => {
            let was_running = machine.session().active_running();
            machine.pause(events);
            Some(if was_running {
                format!("{} paused", mode.display_name())
            } else {
                format!("{} was not running", mode.display_name())
            })
        }
        FocusOperation::Reset => {
            machine.reset();
            Some(format!("{} reset", mode.display_name()))
        }
        FocusOperation::Stop => {
            machine.stop(events);
            Some(format!("{} stopped", mode.display_name()))
        }
        FocusOperation::Mode(next) => {
            machine.switch_active_mode(next);
            Some(format!("Switched to {}", next.display_name()))
        }
        FocusOperation::Phase(next) => {
            machine.switch_phase(next);
            Some(format!("Switched to {}", next.display_name()))
        }
        FocusOperation::Tick(count) => {
            let result = advance(machine, events, count);
            if !result.changed() {
                return Some(format!("{} is not running", mode.display_name()));
            }

            let mut lines = vec![format!(
                "Advanced {} second{}",
                result.counted,
                if result.counted == 1 { "" } else { "s" }
            )];
            for (finished, next) in &result.completions {
                lines.push(format!(
                    "{} complete, {} next",
                    finished.display_name(),
                    next.display_name()
                ));
            }
            Some(lines.join("\n"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::focus::{NoEvents, TimerConfiguration};

    fn quiet_config() -> Config {
        let mut config = Config::default();
        config.sound.enabled = false;
        config
    }

    #[test]
    fn test_tick_count() {
        assert_eq!(tick_count(3, None).unwrap(), 3);
        assert_eq!(tick_count(1, Some("90")).unwrap(), 90);
        assert_eq!(tick_count(1, Some("5m")).unwrap(), 300);
        assert!(matches!(
            tick_count(1, Some("soon")),
            Err(FocusFlowError::Parse(_))
        ));
        assert!(matches!(
            tick_count(1, Some("9223372036854775807")),
            Err(FocusFlowError::Parse(_))
        ));
        assert!(matches!(
            tick_count(1, Some("5000000000000000h")),
            Err(FocusFlowError::Parse(_))
        ));
        assert!(matches!(
            tick_count(1, Some("5000000000s")),
            Err(FocusFlowError::Parse(_))
        ));
    }

    #[test]
    fn test_status_does_not_persist() {
        let db = Database::open_in_memory().unwrap();
        focus(&db, &quiet_config(), FocusOperation::Status, OutputFormat::Json).unwrap();

        let count: i64 = db
            .connection()
            .query_row("SELECT COUNT(*) FROM focus_state", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_operations_persist_between_calls() {
        let db = Database::open_in_memory().unwrap();
        let config = quiet_config();

        focus(&db, &config, FocusOperation::Start, OutputFormat::Json).unwrap();
        focus(&db, &config, FocusOperation::Tick(10), OutputFormat::Json).unwrap();
        let json = focus(&db, &config, FocusOperation::Pause, OutputFormat::Json).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["remaining_seconds"], 1490);
        assert_eq!(parsed["is_running"], false);
        assert_eq!(parsed["today"]["seconds"], 10);
        assert_eq!(parsed["message"], "Timer paused");
    }

    #[test]
    fn test_full_focus_phase_records_session() {
        let db = Database::open_in_memory().unwrap();
        let config = quiet_config();

        focus(&db, &config, FocusOperation::Start, OutputFormat::Json).unwrap();
        let json = focus(&db, &config, FocusOperation::Tick(1500), OutputFormat::Json).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["phase"], "short");
        assert_eq!(parsed["remaining_seconds"], 300);
        assert_eq!(parsed["is_running"], false);
        assert_eq!(parsed["today"]["seconds"], 1500);
        assert_eq!(parsed["today"]["sessions"], 1);
    }

    #[test]
    fn test_stopwatch_session_counted_on_pause() {
        let db = Database::open_in_memory().unwrap();
        let config = quiet_config();

        focus(
            &db,
            &config,
            FocusOperation::Mode(ActiveMode::Stopwatch),
            OutputFormat::Json,
        )
        .unwrap();
        focus(&db, &config, FocusOperation::Start, OutputFormat::Json).unwrap();
        focus(&db, &config, FocusOperation::Tick(42), OutputFormat::Json).unwrap();
        let json = focus(&db, &config, FocusOperation::Pause, OutputFormat::Json).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["active_mode"], "stopwatch");
        assert_eq!(parsed["stopwatch_elapsed_seconds"], 42);
        assert_eq!(parsed["today"]["sessions"], 1);
    }

    #[test]
    fn test_hand_edited_settings_apply_to_idle_timer() {
        let db = Database::open_in_memory().unwrap();
        focus(&db, &quiet_config(), FocusOperation::Reset, OutputFormat::Json).unwrap();

        let mut edited = quiet_config();
        edited.timer.focus_minutes = 50;
        let json = focus(&db, &edited, FocusOperation::Status, OutputFormat::Json).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["remaining_seconds"], 3000);
        assert_eq!(parsed["phase_duration_seconds"], 3000);
    }

    #[test]
    fn test_tick_message_when_idle() {
        let mut machine = FocusMachine::new(TimerConfiguration::default()).unwrap();
        let message = apply(&mut machine, &mut NoEvents, FocusOperation::Tick(5));
        assert_eq!(message.as_deref(), Some("Timer is not running"));
    }

    #[test]
    fn test_tick_message_lists_completions() {
        let mut machine = FocusMachine::new(TimerConfiguration::default()).unwrap();
        machine.switch_phase(Phase::ShortBreak);
        machine.start(&mut NoEvents);

        let message = apply(&mut machine, &mut NoEvents, FocusOperation::Tick(300)).unwrap();

        assert!(message.contains("Advanced 300 seconds"));
        assert!(message.contains("Short Break complete, Focus next"));
    }
}
