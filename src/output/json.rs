//! JSON output formatting for focusflow.

use serde::Serialize;
use serde_json::json;

use crate::error::FocusFlowError;
use crate::features::stats::StatsSummary;

use super::StatusView;

/// Format the timer status as JSON.
///
/// # Errors
///
/// Returns `FocusFlowError::Parse` if JSON serialization fails.
pub fn format_status_json(status: &StatusView) -> Result<String, FocusFlowError> {
    to_json(status)
}

/// Format a stats summary as JSON.
///
/// # Errors
///
/// Returns `FocusFlowError::Parse` if JSON serialization fails.
pub fn format_stats_json(summary: &StatsSummary) -> Result<String, FocusFlowError> {
    let output = json!({
        "count": summary.days.len(),
        "total_seconds": summary.total_seconds,
        "total_sessions": summary.total_sessions,
        "today": summary.today,
        "days": summary.days
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Generic JSON formatter for any serializable type
///
/// # Errors
///
/// Returns `FocusFlowError::Parse` if JSON serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, FocusFlowError> {
    Ok(serde_json::to_string_pretty(value)?)
}
