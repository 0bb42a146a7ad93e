//! Statistics command implementation.

use crate::cli::args::OutputFormat;
use crate::error::FocusFlowError;
use crate::features::stats::{local_today, DailyStatsStore};
use crate::output::format_stats;
use crate::storage::Database;

/// Show focus totals for the last `days` days.
///
/// # Errors
///
/// Returns an error if the stats cannot be read or output formatting fails.
pub fn stats(db: &Database, days: u32, format: OutputFormat) -> Result<String, FocusFlowError> {
    let summary = DailyStatsStore::new(db).summary(local_today(), days)?;
    format_stats(&summary, format)
}
