//! focusflow - A Pomodoro focus timer for the terminal
//!
//! This crate provides a focus timer state machine with an independent
//! stopwatch, daily focus statistics, and a command-line and interactive
//! interface on top.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod error;
pub mod features;
pub mod logging;
pub mod output;
pub mod storage;
pub mod tui;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::FocusFlowError;
pub use features::focus::{FocusEvents, FocusMachine, TimerConfiguration, TimerSession};
pub use logging::init_tracing;
