//! infrahist engine - orchestration layer
//!
//! Provides high-level command orchestration that coordinates between
//! the history core and the persistence layer.

pub mod commands;
pub mod home;

pub use home::Home;
