//! UI rendering for the TUI.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use crate::features::focus::{format_focus_time, format_mmss, ActiveMode, Phase};
use crate::tui::app::App;

/// Render the application UI.
pub fn render(frame: &mut Frame<'_>, app: &App<'_>) {
    // Create layout: header, timer, stopwatch, today, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(7),    // Timer
            Constraint::Length(3), // Stopwatch
            Constraint::Length(1), // Today
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_timer(frame, app, chunks[1]);
    render_stopwatch(frame, app, chunks[2]);
    render_today(frame, app, chunks[3]);
    render_status_bar(frame, app, chunks[4]);
}

const fn phase_color(phase: Phase) -> Color {
    match phase {
        Phase::Focus => Color::Red,
        Phase::ShortBreak => Color::Cyan,
        Phase::LongBreak => Color::Blue,
    }
}

fn active_style(active: bool) -> Style {
    if active {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

/// Render the mode selector.
fn render_header(frame: &mut Frame<'_>, app: &App<'_>, area: Rect) {
    let mode = app.session().active_mode;
    let line = Line::from(vec![
        Span::styled(" Timer ", active_style(mode == ActiveMode::Timer)),
        Span::raw(" | "),
        Span::styled(" Stopwatch ", active_style(mode == ActiveMode::Stopwatch)),
    ]);

    let header = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" focusflow ")
            .border_style(Style::default().fg(Color::Cyan)),
    );

    frame.render_widget(header, area);
}

/// Render the countdown.
fn render_timer(frame: &mut Frame<'_>, app: &App<'_>, area: Rect) {
    let session = app.session();
    let color = phase_color(session.phase);
    let border = if app.stopwatch_active() {
        Color::DarkGray
    } else {
        color
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(
            " {} - round {}/{} ",
            session.phase.display_name(),
            session.current_round,
            app.config().rounds_until_long_break
        ))
        .border_style(Style::default().fg(border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // Time
            Constraint::Length(1), // State
            Constraint::Length(1), // Gauge
        ])
        .split(inner);

    let time = Paragraph::new(format_mmss(u64::from(session.remaining_seconds)))
        .alignment(Alignment::Center)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD));
    frame.render_widget(time, rows[0]);

    let state = if session.is_running {
        "running"
    } else {
        "paused"
    };
    frame.render_widget(
        Paragraph::new(state)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray)),
        rows[1],
    );

    let elapsed_ratio = 1.0 - session.remaining_ratio(app.config());
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(color))
        .ratio(elapsed_ratio.clamp(0.0, 1.0))
        .label("");
    frame.render_widget(gauge, rows[2]);
}

/// Render the stopwatch.
fn render_stopwatch(frame: &mut Frame<'_>, app: &App<'_>, area: Rect) {
    let session = app.session();
    let state = if session.stopwatch_running {
        Span::styled("running", Style::default().fg(Color::Green))
    } else {
        Span::styled("paused", Style::default().fg(Color::DarkGray))
    };

    let line = Line::from(vec![
        Span::styled(
            format_mmss(session.stopwatch_elapsed_seconds),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        state,
    ]);

    let border = if app.stopwatch_active() {
        Color::Yellow
    } else {
        Color::DarkGray
    };
    let stopwatch = Paragraph::new(line).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Stopwatch ")
            .border_style(Style::default().fg(border)),
    );

    frame.render_widget(stopwatch, area);
}

/// Render today's totals.
fn render_today(frame: &mut Frame<'_>, app: &App<'_>, area: Rect) {
    let text = format!(
        " Today: {} focused, {} session{}",
        format_focus_time(app.today.seconds),
        app.today.sessions,
        if app.today.sessions == 1 { "" } else { "s" }
    );

    frame.render_widget(
        Paragraph::new(text).style(Style::default().fg(Color::Green)),
        area,
    );
}

/// Render the status bar.
fn render_status_bar(frame: &mut Frame<'_>, app: &App<'_>, area: Rect) {
    let status_text = app
        .status
        .as_deref()
        .unwrap_or("space:start/pause | r:reset | s:stop | t:mode | ?:help | q:quit");

    let status = Paragraph::new(status_text).style(Style::default().fg(Color::DarkGray));

    frame.render_widget(status, area);
}
