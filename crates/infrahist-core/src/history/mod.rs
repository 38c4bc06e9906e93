//! Revision history: walking recorded snapshots and presenting their diffs.
//!
//! The flow is compute-all-then-render-all:
//!
//! 1. [`walk_revisions`] pairs consecutive snapshots and asks a
//!    [`DiffEngine`](crate::diff::DiffEngine) for each pair's diff. Any
//!    failure aborts the walk and no diff is returned.
//! 2. [`present_history`] prints every diff, infrastructure then access,
//!    following the [`PresentOptions`] of the run.

pub mod presenter;
pub mod revision_diff;
pub mod store;
pub mod walker;

pub use presenter::{
    origin_label, present_history, present_revision_diff, revision_label, Granularity,
    PresentOptions, CREATION_LABEL, NO_CHANGES, NO_RESOURCE_CHANGES,
};
pub use revision_diff::{DiffOrigin, Domain, RevisionDiff};
pub use store::{RegionSource, RevisionStore, StoreAvailability};
pub use walker::walk_revisions;
