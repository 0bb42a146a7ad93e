//! Focus timer and stopwatch.
//!
//! Provides the Pomodoro state machine and what it needs around it:
//! - Focus / short break / long break phases with round counting
//! - An independent stopwatch
//! - A one-second tick driver
//! - Persistence of the live state

pub mod driver;
pub mod events;
pub mod machine;
pub mod session;
pub mod storage;
pub mod timer;

pub use driver::{advance, Advance, Ticker};
pub use events::{Fanout, FocusEvents, NoEvents};
pub use machine::{FocusMachine, TickOutcome, TimerConfiguration};
pub use session::{ActiveMode, Phase, TimerSession};
pub use storage::SessionStore;
pub use timer::{
    format_duration, format_focus_time, format_mmss, parse_duration, render_progress_bar,
};
