//! Graph diff engine.
//!
//! Compares the two domain graphs of consecutive snapshots and produces a
//! structured, deterministic difference per domain.
//!
//! ## Entry point
//!
//! ```ignore
//! use infrahist_core::diff::{DiffEngine, GraphDiffEngine};
//!
//! let diffs = GraphDiffEngine.build_diff(&from, &to, &root)?;
//! if diffs.infra.has_diff() { /* render */ }
//! ```
//!
//! ## Guarantees
//!
//! - **Determinism**: changes are sorted by resource kind then id, property
//!   changes by name, so identical inputs render byte-identically.
//! - **Domain separation**: infrastructure and access graphs are diffed
//!   independently; a change in one never shows in the other.
//! - **Fail fast**: structurally invalid graphs (duplicate ids, parent
//!   cycles) are errors, not partial diffs.

pub mod engine;
pub mod model;

pub use engine::{diff_graphs, GraphDiffEngine};
pub use model::{
    ChangeStatus, DomainDiffs, GraphDiff, ParentChange, PropertyChange, PropertyRow,
    PropertyValue, ResourceChange, PARENT_PROPERTY,
};

use crate::errors::Result;
use crate::model::{Resource, Snapshot};

/// Produces the domain-separated difference between two materialized snapshots
pub trait DiffEngine {
    /// Diff `from` against `to`, positioned relative to `root`.
    ///
    /// # Errors
    ///
    /// Returns `ExErrorKind::InvalidGraph` if either snapshot holds a
    /// structurally invalid graph.
    fn build_diff(&self, from: &Snapshot, to: &Snapshot, root: &Resource) -> Result<DomainDiffs>;
}
