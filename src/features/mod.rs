//! Feature implementations for focusflow.
//!
//! - Focus timer and stopwatch
//! - Daily statistics
//! - Sound cues

pub mod focus;
pub mod sound;
pub mod stats;
