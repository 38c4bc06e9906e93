//! Command orchestration layer.
//!
//! Provides high-level command functions that coordinate between
//! the history core and the persistence layer.

pub mod config;
pub mod history;
