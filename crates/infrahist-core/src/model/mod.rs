pub mod graph;
pub mod resource;
pub mod snapshot;

pub use graph::Graph;
pub use resource::{Resource, ResourceRef, REGION_KIND};
pub use snapshot::{RevisionId, Snapshot, SnapshotDescriptor};
