use colored::Colorize;

use crate::config::Config;
use crate::features::focus::{format_focus_time, format_mmss, render_progress_bar, ActiveMode};
use crate::features::stats::StatsSummary;

use super::StatusView;

const BAR_WIDTH: usize = 24;

/// Format the timer status as pretty output
pub fn format_status_pretty(status: &StatusView) -> String {
    let session = &status.session;
    let mut output = String::new();

    if let Some(message) = &status.message {
        output.push_str(&format!("{}\n\n", message.green()));
    }

    let timer_icon = if session.is_running { "▶" } else { "⏸" };
    let phase_name = if session.phase.is_break() {
        session.phase.display_name().cyan().bold()
    } else {
        session.phase.display_name().red().bold()
    };
    let timer_marker = marker(session.active_mode == ActiveMode::Timer);
    output.push_str(&format!(
        "{timer_marker} {timer_icon} {phase_name}  {}\n",
        format!(
            "round {}/{}",
            session.current_round, status.rounds_until_long_break
        )
        .dimmed()
    ));

    let elapsed = status
        .phase_duration_seconds
        .saturating_sub(session.remaining_seconds);
    let progress = if status.phase_duration_seconds == 0 {
        0.0
    } else {
        f64::from(elapsed) / f64::from(status.phase_duration_seconds)
    };
    output.push_str(&format!(
        "    {}  {}\n",
        format_mmss(u64::from(session.remaining_seconds)).bold(),
        render_progress_bar(progress, BAR_WIDTH)
    ));

    let stopwatch_marker = marker(session.active_mode == ActiveMode::Stopwatch);
    let stopwatch_state = if session.stopwatch_running {
        "running".green()
    } else {
        "paused".dimmed()
    };
    output.push_str(&format!(
        "{stopwatch_marker} {}  {}  {stopwatch_state}\n",
        "Stopwatch".bold(),
        format_mmss(session.stopwatch_elapsed_seconds)
    ));

    output.push_str(&"─".repeat(40));
    output.push('\n');
    output.push_str(&format!(
        "  {}: {} focused, {} session{}\n",
        "Today".dimmed(),
        format_focus_time(status.today.seconds),
        status.today.sessions,
        if status.today.sessions == 1 { "" } else { "s" }
    ));

    output
}

fn marker(active: bool) -> colored::ColoredString {
    if active {
        "●".yellow()
    } else {
        " ".normal()
    }
}

/// Format daily stats as pretty output
pub fn format_stats_pretty(summary: &StatsSummary) -> String {
    let mut output = format!("Focus time (last {} days)\n", summary.days.len());
    output.push_str(&"─".repeat(40));
    output.push('\n');

    let max = summary.max_seconds();
    for day in &summary.days {
        let level = usize::from(day.intensity(max));
        let heat = format!("{}{}", "█".repeat(level), "░".repeat(4 - level));
        let heat = if level == 0 {
            heat.dimmed()
        } else {
            heat.green()
        };

        let mut line = format!(
            "{} {}  {}  {:>7}",
            day.date.format("%Y-%m-%d"),
            day.date.format("%a").to_string().dimmed(),
            heat,
            format_focus_time(day.seconds)
        );
        if day.sessions > 0 {
            line.push_str(&format!(
                "  {} session{}",
                day.sessions,
                if day.sessions == 1 { "" } else { "s" }
            ));
        }
        if day.date == summary.today.date {
            line = line.bold().to_string();
        }

        output.push_str(&line);
        output.push('\n');
    }

    output.push_str(&"─".repeat(40));
    output.push('\n');
    output.push_str(&format!(
        "{}: {}, {} session{}\n",
        "Total".bold(),
        format_focus_time(summary.total_seconds),
        summary.total_sessions,
        if summary.total_sessions == 1 { "" } else { "s" }
    ));

    output
}

/// Format the configuration as pretty output
pub fn format_config_pretty(config: &Config) -> String {
    let timer = &config.timer;
    let rows = [
        ("focus_minutes", timer.focus_minutes.to_string()),
        ("short_break_minutes", timer.short_break_minutes.to_string()),
        ("long_break_minutes", timer.long_break_minutes.to_string()),
        (
            "rounds_until_long_break",
            timer.rounds_until_long_break.to_string(),
        ),
        ("auto_start_breaks", timer.auto_start_breaks.to_string()),
        ("auto_start_focus", timer.auto_start_focus.to_string()),
    ];

    let mut output = format!("{}\n", "Timer".bold());
    for (key, value) in rows {
        output.push_str(&format!("  {:<26}{}\n", key.dimmed(), value));
    }

    output.push_str(&format!("{}\n", "Sound".bold()));
    output.push_str(&format!("  {:<26}{}\n", "enabled".dimmed(), config.sound.enabled));

    output.push_str(&format!("{}\n", "General".bold()));
    let default_output = match config.general.default_output {
        crate::cli::args::OutputFormat::Pretty => "pretty",
        crate::cli::args::OutputFormat::Json => "json",
    };
    output.push_str(&format!(
        "  {:<26}{}\n",
        "default_output".dimmed(),
        default_output
    ));

    output
}
