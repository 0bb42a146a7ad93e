//! Daily focus statistics.
//!
//! Accumulates focused seconds and completed sessions per local calendar
//! day, fed by the focus machine's notifications.

mod daily;

pub use daily::{local_today, DailyStatsStore, DayStats, StatsRecorder, StatsSummary};
