//! Command implementations for focusflow.
//!
//! This module contains the implementation of all CLI commands.

mod config;
mod focus;
mod stats;

pub use config::config;
pub use focus::{focus, tick_count, FocusOperation};
pub use stats::stats;
