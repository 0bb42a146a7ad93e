//! Configuration management for focusflow.
//!
//! This module handles loading and saving configuration from `~/.focusflow/`.

mod paths;
mod settings;

pub use paths::{Paths, HOME_ENV};
pub use settings::{Config, GeneralConfig, Preset, SoundConfig, TimerConfig};
