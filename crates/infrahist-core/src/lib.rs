//! infrahist core - revision walk and diff presentation
//!
//! This crate provides the in-memory half of `infrahist history`:
//! - Resource graph and snapshot models
//! - Domain-separated graph diffing (infrastructure vs. access)
//! - Tree and table renderers for graph diffs
//! - The revision walker pairing consecutive snapshots
//! - The diff presenter deciding what to print for each diff and domain
//! - Error and structured logging facilities shared by the other crates
//!
//! Storage of snapshots and region defaults lives in `infrahist-store`;
//! the command orchestration lives in `infrahist-engine`.

pub mod diff;
pub mod errors;
pub mod history;
pub mod logging_facility;
pub mod model;
pub mod render;

// Re-export commonly used types
pub use diff::{DiffEngine, GraphDiff, GraphDiffEngine};
pub use errors::{ExError, ExErrorKind, GraphError, Result};
pub use history::{
    present_history, walk_revisions, DiffOrigin, Domain, Granularity, PresentOptions,
    RegionSource, RevisionDiff, RevisionStore, StoreAvailability,
};
pub use model::{Graph, Resource, RevisionId, Snapshot, SnapshotDescriptor};
pub use render::{DisplayFormat, Renderer, TextRenderer};
