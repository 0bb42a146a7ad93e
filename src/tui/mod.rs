//! Terminal User Interface (TUI) for focusflow.
//!
//! Provides the interactive focus timer. Built with ratatui and crossterm.

mod app;
mod event;
mod ui;

pub use app::App;

use std::io;
use std::time::Instant;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

use crate::config::Config;
use crate::error::FocusFlowError;
use crate::storage::Database;

/// Run the TUI application.
///
/// # Errors
///
/// Returns an error if the TUI fails to initialize or run.
pub fn run(db: &Database, config: &Config) -> Result<(), FocusFlowError> {
    let mut app = App::new(db, config, Instant::now())?;

    // Setup terminal
    enable_raw_mode()
        .map_err(|e| FocusFlowError::Config(format!("Failed to enable raw mode: {e}")))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| FocusFlowError::Config(format!("Failed to setup terminal: {e}")))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)
        .map_err(|e| FocusFlowError::Config(format!("Failed to create terminal: {e}")))?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    result
}

/// Run the main application loop.
///
/// Each pass draws, waits for a key no longer than the next tick deadline,
/// applies the key, then applies the ticks that fell due. Everything runs
/// on this thread, so ticks never interleave with a key's operation.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App<'_>) -> Result<(), FocusFlowError> {
    while !app.should_quit {
        terminal
            .draw(|frame| ui::render(frame, app))
            .map_err(|e| FocusFlowError::Config(format!("Failed to draw: {e}")))?;

        if let Some(action) = event::next_action(app.poll_timeout(Instant::now()))? {
            let now = Instant::now();
            match action {
                event::Action::Quit => app.should_quit = true,
                event::Action::Toggle => app.toggle_running(now)?,
                event::Action::Reset => app.reset(now)?,
                event::Action::Stop => app.stop(now)?,
                event::Action::SwitchMode => app.toggle_mode(now)?,
                event::Action::Phase(phase) => app.switch_phase(phase, now)?,
                event::Action::Help => app.show_help(),
            }
        }

        app.on_tick(Instant::now())?;
    }

    tracing::debug!("interactive timer closed");
    Ok(())
}
