//! Configuration command implementation.

use chrono::Duration;
use colored::Colorize;
use serde_json::json;

use crate::cli::args::{ConfigCommands, OutputFormat};
use crate::config::{Config, Paths, Preset};
use crate::error::FocusFlowError;
use crate::features::focus::{format_duration, SessionStore};
use crate::output::{format_config, to_json};
use crate::storage::Database;

/// Execute config subcommands.
///
/// # Errors
///
/// Returns an error for unknown keys, invalid values, or if the config file
/// or timer state cannot be written.
pub fn config(
    paths: &Paths,
    current: Config,
    cmd: ConfigCommands,
    format: OutputFormat,
) -> Result<String, FocusFlowError> {
    match cmd {
        ConfigCommands::Show => format_config(&current, format),

        ConfigCommands::Set { key, value } => {
            let mut next = current.clone();
            next.set(&key, &value)?;
            apply(paths, &current, &next)?;

            match format {
                OutputFormat::Json => to_json(&next),
                OutputFormat::Pretty => Ok(format!("{} {key} = {value}", "Set".green())),
            }
        }

        ConfigCommands::Preset { name } => {
            let preset = Preset::parse(&name).ok_or_else(|| FocusFlowError::InvalidSetting {
                field: "preset",
                reason: format!("expected classic, extended or deep, got '{name}'"),
            })?;

            let mut next = current.clone();
            next.timer.apply_preset(preset);
            apply(paths, &current, &next)?;

            match format {
                OutputFormat::Json => to_json(&next),
                OutputFormat::Pretty => {
                    let (focus, short, long) = preset.minutes();
                    let minutes = |m: u32| format_duration(Duration::minutes(i64::from(m)));
                    Ok(format!(
                        "{} {name} preset: {} focus, {} short break, {} long break",
                        "Applied".green(),
                        minutes(focus),
                        minutes(short),
                        minutes(long)
                    ))
                }
            }
        }

        ConfigCommands::Path => match format {
            OutputFormat::Json => to_json(&json!({
                "config_file": paths.config_file,
                "database": paths.database,
            })),
            OutputFormat::Pretty => Ok(paths.config_file.display().to_string()),
        },
    }
}

/// Write the new config and bring an idle countdown in line with it.
///
/// `before` may hold out-of-range values read from a hand-edited file; only
/// `after` has to be valid.
fn apply(paths: &Paths, before: &Config, after: &Config) -> Result<(), FocusFlowError> {
    let timer = after.timer.timer_configuration()?;
    paths.ensure_dirs()?;
    after.save_to_path(&paths.config_file)?;

    if before.timer == after.timer {
        return Ok(());
    }

    let db = Database::open_at(&paths.database)?;
    let store = SessionStore::new(&db);
    let machine = store.restore(timer)?;
    store.save(&machine)?;

    tracing::debug!(
        remaining = machine.session().remaining_seconds,
        "timer state resynchronised to new settings"
    );
    Ok(())
}
