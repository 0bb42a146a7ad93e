//! Per-day focus totals.
//!
//! Days are keyed by the device-local calendar date, not UTC, so a late
//! evening session lands on the day the user sees on their clock.

use chrono::{Duration, Local, NaiveDate};
use rusqlite::{params, OptionalExtension};
use serde::{Deserialize, Serialize};

use crate::error::FocusFlowError;
use crate::features::focus::FocusEvents;
use crate::storage::Database;

/// Focus totals for one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayStats {
    /// Local calendar date
    pub date: NaiveDate,
    /// Seconds of focus time
    pub seconds: u64,
    /// Completed focus phases and stopwatch sessions
    pub sessions: u64,
}

impl DayStats {
    /// An empty day.
    #[must_use]
    pub const fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            seconds: 0,
            sessions: 0,
        }
    }

    /// Heat level 0-4 of this day relative to the busiest day shown.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn intensity(&self, max_seconds: u64) -> u8 {
        if self.seconds == 0 {
            return 0;
        }
        let ratio = self.seconds as f64 / max_seconds.max(1) as f64;
        if ratio < 0.25 {
            1
        } else if ratio < 0.5 {
            2
        } else if ratio < 0.75 {
            3
        } else {
            4
        }
    }
}

/// Totals over a window of days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSummary {
    /// Each day in the window, oldest first
    pub days: Vec<DayStats>,
    /// Focus seconds over the window
    pub total_seconds: u64,
    /// Sessions over the window
    pub total_sessions: u64,
    /// The last day of the window
    pub today: DayStats,
}

impl StatsSummary {
    /// Busiest day's focus seconds, at least 1.
    #[must_use]
    pub fn max_seconds(&self) -> u64 {
        self.days.iter().map(|d| d.seconds).max().unwrap_or(0).max(1)
    }
}

/// Storage for per-day focus totals.
pub struct DailyStatsStore<'a> {
    db: &'a Database,
}

impl<'a> DailyStatsStore<'a> {
    /// Create a store on an open database.
    #[must_use]
    pub const fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Add focused seconds to a day.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn add_seconds(&self, date: NaiveDate, seconds: u32) -> Result<(), FocusFlowError> {
        self.db
            .connection()
            .execute(
                r"INSERT INTO focus_daily (date, seconds, sessions) VALUES (?1, ?2, 0)
                  ON CONFLICT(date) DO UPDATE SET seconds = seconds + excluded.seconds",
                params![date_key(date), seconds],
            )
            .map_err(|e| FocusFlowError::Database(format!("Failed to record focus time: {e}")))?;
        Ok(())
    }

    /// Count one completed session on a day.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn add_session(&self, date: NaiveDate) -> Result<(), FocusFlowError> {
        self.db
            .connection()
            .execute(
                r"INSERT INTO focus_daily (date, seconds, sessions) VALUES (?1, 0, 1)
                  ON CONFLICT(date) DO UPDATE SET sessions = sessions + 1",
                params![date_key(date)],
            )
            .map_err(|e| FocusFlowError::Database(format!("Failed to record session: {e}")))?;
        Ok(())
    }

    /// Totals for one day; zero if nothing was recorded.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_day(&self, date: NaiveDate) -> Result<DayStats, FocusFlowError> {
        let row: Option<(i64, i64)> = self
            .db
            .connection()
            .query_row(
                "SELECT seconds, sessions FROM focus_daily WHERE date = ?1",
                params![date_key(date)],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()
            .map_err(|e| FocusFlowError::Database(format!("Failed to query day: {e}")))?;

        Ok(row.map_or_else(
            || DayStats::empty(date),
            |(seconds, sessions)| to_day(date, seconds, sessions),
        ))
    }

    /// Totals for every day from `start` to `end` inclusive, oldest first.
    ///
    /// Days without records are included as zero.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DayStats>, FocusFlowError> {
        let conn = self.db.connection();

        let mut stmt = conn
            .prepare(
                r"SELECT date, seconds, sessions FROM focus_daily
                  WHERE date >= ?1 AND date <= ?2",
            )
            .map_err(|e| FocusFlowError::Database(format!("Failed to prepare query: {e}")))?;

        let rows = stmt
            .query_map(params![date_key(start), date_key(end)], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, i64>(1)?,
                    row.get::<_, i64>(2)?,
                ))
            })
            .map_err(|e| FocusFlowError::Database(format!("Failed to query stats: {e}")))?;

        let mut recorded = std::collections::HashMap::new();
        for row in rows {
            let (key, seconds, sessions) =
                row.map_err(|e| FocusFlowError::Database(e.to_string()))?;
            recorded.insert(key, (seconds, sessions));
        }

        let mut days = Vec::new();
        let mut date = start;
        while date <= end {
            let day = recorded
                .get(&date_key(date))
                .map_or_else(|| DayStats::empty(date), |&(s, n)| to_day(date, s, n));
            days.push(day);
            date += Duration::days(1);
        }

        Ok(days)
    }

    /// Summarise the `days` days ending on `today`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn summary(&self, today: NaiveDate, days: u32) -> Result<StatsSummary, FocusFlowError> {
        let start = today - Duration::days(i64::from(days.max(1)) - 1);
        let days = self.get_range(start, today)?;

        Ok(StatsSummary {
            total_seconds: days.iter().map(|d| d.seconds).sum(),
            total_sessions: days.iter().map(|d| d.sessions).sum(),
            today: days.last().copied().unwrap_or_else(|| DayStats::empty(today)),
            days,
        })
    }
}

/// Records machine notifications against the current local day.
pub struct StatsRecorder<'a> {
    store: DailyStatsStore<'a>,
    today: fn() -> NaiveDate,
}

impl<'a> StatsRecorder<'a> {
    /// Record into `db` using the local clock.
    #[must_use]
    pub const fn new(db: &'a Database) -> Self {
        Self::with_clock(db, local_today)
    }

    /// Record into `db` using a custom clock.
    #[must_use]
    pub const fn with_clock(db: &'a Database, today: fn() -> NaiveDate) -> Self {
        Self {
            store: DailyStatsStore::new(db),
            today,
        }
    }
}

impl FocusEvents for StatsRecorder<'_> {
    fn on_focus_second_elapsed(&mut self) -> Result<(), FocusFlowError> {
        self.store.add_seconds((self.today)(), 1)
    }

    fn on_session_completed(&mut self) -> Result<(), FocusFlowError> {
        self.store.add_session((self.today)())
    }
}

/// Today's date on the device clock.
#[must_use]
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn to_day(date: NaiveDate, seconds: i64, sessions: i64) -> DayStats {
    DayStats {
        date,
        seconds: u64::try_from(seconds).unwrap_or(0),
        sessions: u64::try_from(sessions).unwrap_or(0),
    }
}
