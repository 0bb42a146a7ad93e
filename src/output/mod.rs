//! Output formatting for focusflow.
//!
//! This module provides formatters for displaying timer state and stats in
//! various formats.

mod json;
mod pretty;

use serde::Serialize;

use crate::cli::args::OutputFormat;
use crate::config::Config;
use crate::error::FocusFlowError;
use crate::features::focus::{TimerConfiguration, TimerSession};
use crate::features::stats::{DayStats, StatsSummary};

pub use json::*;
pub use pretty::*;

/// Snapshot of the timer shown by `status` and every timer command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusView {
    /// Machine state
    #[serde(flatten)]
    pub session: TimerSession,
    /// Full length of the current phase
    pub phase_duration_seconds: u32,
    /// Rounds in a cycle
    pub rounds_until_long_break: u32,
    /// Today's focus totals
    pub today: DayStats,
    /// What the command did, if anything worth saying
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl StatusView {
    /// Build a view of `session` under `config`.
    #[must_use]
    pub fn new(
        session: TimerSession,
        config: &TimerConfiguration,
        today: DayStats,
        message: Option<String>,
    ) -> Self {
        Self {
            phase_duration_seconds: session.phase.duration_seconds(config),
            rounds_until_long_break: config.rounds_until_long_break,
            session,
            today,
            message,
        }
    }
}

/// Format the timer status based on output format
///
/// # Errors
///
/// Returns `FocusFlowError::Parse` if JSON serialization fails.
pub fn format_status(status: &StatusView, format: OutputFormat) -> Result<String, FocusFlowError> {
    match format {
        OutputFormat::Pretty => Ok(format_status_pretty(status)),
        OutputFormat::Json => format_status_json(status),
    }
}

/// Format daily stats based on output format
///
/// # Errors
///
/// Returns `FocusFlowError::Parse` if JSON serialization fails.
pub fn format_stats(summary: &StatsSummary, format: OutputFormat) -> Result<String, FocusFlowError> {
    match format {
        OutputFormat::Pretty => Ok(format_stats_pretty(summary)),
        OutputFormat::Json => format_stats_json(summary),
    }
}

/// Format the configuration based on output format
///
/// # Errors
///
/// Returns `FocusFlowError::Parse` if JSON serialization fails.
pub fn format_config(config: &Config, format: OutputFormat) -> Result<String, FocusFlowError> {
    match format {
        OutputFormat::Pretty => Ok(format_config_pretty(config)),
        OutputFormat::Json => to_json(config),
    }
}
