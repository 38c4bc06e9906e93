//! infrahist store - persistence for snapshots and defaults
//!
//! Provides:
//! - A git-backed revision store holding one snapshot per commit
//! - SQLite defaults database with a migrations framework
//! - The region source consulted by `infrahist history`

pub mod db;
pub mod defaults;
pub mod errors;
pub mod migrations;
pub mod revisions;

// Re-export key types
pub use defaults::{SqliteDefaults, KEY_REGION};
pub use errors::Result;
pub use revisions::{git_installed, GitRevisionStore, GIT_MISSING_REASON};
