//! Timer state storage.
//!
//! Each [`TimerSession`] field is stored as a JSON value under its own key in
//! the `focus_state` table. A missing or unreadable key falls back to the
//! field's default instead of failing the whole load.
//!
//! The timer settings in force at save time are kept alongside, so a session
//! restored under different settings is resynchronised the same way a live
//! configuration change would be.

use std::collections::HashMap;

use chrono::Utc;
use rusqlite::params;
use serde::de::DeserializeOwned;

use super::machine::{FocusMachine, TimerConfiguration};
use super::session::TimerSession;
use crate::error::FocusFlowError;
use crate::storage::Database;

const KEY_MODE: &str = "timer:type";
const KEY_PHASE: &str = "timer:mode";
const KEY_ROUND: &str = "timer:round";
const KEY_REMAINING: &str = "timer:remaining";
const KEY_RUNNING: &str = "timer:running";
const KEY_SW_ELAPSED: &str = "stopwatch:elapsed";
const KEY_SW_RUNNING: &str = "stopwatch:running";
const KEY_SW_ACTIVE: &str = "stopwatch:active";
const KEY_CONFIG: &str = "timer:config";

/// Storage for the live timer state.
pub struct SessionStore<'a> {
    db: &'a Database,
}

impl<'a> SessionStore<'a> {
    /// Create a store on an open database.
    #[must_use]
    pub const fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Load the saved state, defaulting every missing field.
    ///
    /// # Errors
    ///
    /// Returns an error if the table cannot be read.
    pub fn load(&self, config: &TimerConfiguration) -> Result<TimerSession, FocusFlowError> {
        let values = self.values()?;
        Ok(session_from(&values, config))
    }

    /// Rebuild the machine from the saved state under `config`.
    ///
    /// When the state was saved under other settings, `config` is applied as
    /// a configuration change: an idle countdown picks up the new phase
    /// length and a running one keeps its remaining time.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` is invalid or the table cannot be read.
    pub fn restore(&self, config: TimerConfiguration) -> Result<FocusMachine, FocusFlowError> {
        let values = self.values()?;
        let session = session_from(&values, &config);
        let applied = values
            .get(KEY_CONFIG)
            .and_then(|raw| serde_json::from_str::<TimerConfiguration>(raw).ok())
            .filter(|applied| applied.validate().is_ok());

        match applied {
            Some(applied) if applied != config => {
                let mut machine = FocusMachine::restore(applied, session)?;
                machine.set_config(config)?;
                tracing::debug!(
                    remaining = machine.session().remaining_seconds,
                    "timer settings changed since last save"
                );
                Ok(machine)
            }
            _ => FocusMachine::restore(config, session),
        }
    }

    fn values(&self) -> Result<HashMap<String, String>, FocusFlowError> {
        let conn = self.db.connection();

        let mut stmt = conn
            .prepare("SELECT key, value FROM focus_state")
            .map_err(|e| FocusFlowError::Database(format!("Failed to prepare query: {e}")))?;

        let rows = stmt
            .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))
            .map_err(|e| FocusFlowError::Database(format!("Failed to query timer state: {e}")))?;

        let mut values = HashMap::new();
        for row in rows {
            let (key, value) = row.map_err(|e| FocusFlowError::Database(e.to_string()))?;
            values.insert(key, value);
        }
        Ok(values)
    }

    /// Save every field of the machine's state and its settings.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save(&self, machine: &FocusMachine) -> Result<(), FocusFlowError> {
        let session = machine.session();
        let entries = [
            (KEY_MODE, serde_json::to_string(&session.active_mode)?),
            (KEY_PHASE, serde_json::to_string(&session.phase)?),
            (KEY_ROUND, serde_json::to_string(&session.current_round)?),
            (KEY_REMAINING, serde_json::to_string(&session.remaining_seconds)?),
            (KEY_RUNNING, serde_json::to_string(&session.is_running)?),
            (
                KEY_SW_ELAPSED,
                serde_json::to_string(&session.stopwatch_elapsed_seconds)?,
            ),
            (KEY_SW_RUNNING, serde_json::to_string(&session.stopwatch_running)?),
            (
                KEY_SW_ACTIVE,
                serde_json::to_string(&session.stopwatch_session_active)?,
            ),
            (KEY_CONFIG, serde_json::to_string(machine.config())?),
        ];

        let tx = self
            .db
            .connection()
            .unchecked_transaction()
            .map_err(|e| FocusFlowError::Database(format!("Failed to begin transaction: {e}")))?;

        let now = Utc::now().to_rfc3339();
        for (key, value) in &entries {
            tx.execute(
                r"INSERT INTO focus_state (key, value, updated_at)
                  VALUES (?1, ?2, ?3)
                  ON CONFLICT(key) DO UPDATE SET value = excluded.value,
                                                 updated_at = excluded.updated_at",
                params![key, value, now],
            )
            .map_err(|e| FocusFlowError::Database(format!("Failed to save {key}: {e}")))?;
        }

        tx.commit()
            .map_err(|e| FocusFlowError::Database(format!("Failed to save timer state: {e}")))
    }
}

fn session_from(values: &HashMap<String, String>, config: &TimerConfiguration) -> TimerSession {
    let defaults = TimerSession::new(config);
    TimerSession {
        active_mode: read(values, KEY_MODE, defaults.active_mode),
        phase: read(values, KEY_PHASE, defaults.phase),
        current_round: read(values, KEY_ROUND, defaults.current_round),
        remaining_seconds: read(values, KEY_REMAINING, defaults.remaining_seconds),
        is_running: read(values, KEY_RUNNING, defaults.is_running),
        stopwatch_elapsed_seconds: read(
            values,
            KEY_SW_ELAPSED,
            defaults.stopwatch_elapsed_seconds,
        ),
        stopwatch_running: read(values, KEY_SW_RUNNING, defaults.stopwatch_running),
        stopwatch_session_active: read(
            values,
            KEY_SW_ACTIVE,
            defaults.stopwatch_session_active,
        ),
    }
}

fn read<T: DeserializeOwned>(
    values: &HashMap<String, String>,
    key: &str,
    default: T,
) -> T {
    let Some(raw) = values.get(key) else {
        return default;
    };

    match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(key, error = %e, "ignoring unreadable timer state");
            default
        }
    }
}
