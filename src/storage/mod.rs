//! Storage layer for focusflow.
//!
//! This module provides SQLite-based persistence for:
//! - Timer state (restored on the next launch)
//! - Daily focus statistics

mod database;
mod migrations;

pub use database::Database;
