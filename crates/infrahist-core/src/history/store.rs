//! Collaborator interfaces consumed by the history core.

use crate::errors::Result;
use crate::model::{RevisionId, Snapshot, SnapshotDescriptor};

/// Whether a revision store can serve history in this environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreAvailability {
    Available,
    /// A prerequisite is missing; `reason` is shown to the user verbatim
    Unavailable { reason: String },
}

/// Versioned storage of snapshots
pub trait RevisionStore {
    /// Check environment prerequisites (e.g. the version-control tool).
    fn availability(&self) -> StoreAvailability {
        StoreAvailability::Available
    }

    /// List recorded revisions, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot enumerate its revisions.
    fn list(&self) -> Result<Vec<SnapshotDescriptor>>;

    /// Materialize both domain graphs of a revision.
    ///
    /// # Errors
    ///
    /// Returns `ExErrorKind::NotFound` for an unknown revision, or the
    /// backend's error if the revision cannot be read or decoded.
    fn load(&self, id: &RevisionId) -> Result<Snapshot>;
}

/// Persisted configuration providing the default region
pub trait RegionSource {
    /// The configured default region, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration backend cannot be read.
    fn default_region(&self) -> Result<Option<String>>;
}
