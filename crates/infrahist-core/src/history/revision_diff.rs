use crate::diff::{DomainDiffs, GraphDiff};
use crate::model::SnapshotDescriptor;

/// The older side of a [`RevisionDiff`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffOrigin {
    /// The first revision of a history: the repository's creation state
    RepositoryCreation,
    /// A recorded revision
    Revision(SnapshotDescriptor),
}

/// The two independent domains of a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Domain {
    /// Infrastructure topology
    Infrastructure,
    /// Access relationships
    Access,
}

impl Domain {
    /// Presentation order within one diff
    pub const ALL: [Domain; 2] = [Domain::Infrastructure, Domain::Access];

    pub fn name(&self) -> &'static str {
        match self {
            Domain::Infrastructure => "infra",
            Domain::Access => "access",
        }
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Diff between two consecutive revisions
#[derive(Debug, Clone, PartialEq)]
pub struct RevisionDiff {
    pub from: DiffOrigin,
    pub to: SnapshotDescriptor,
    infra: GraphDiff,
    access: GraphDiff,
}

impl RevisionDiff {
    pub fn new(from: DiffOrigin, to: SnapshotDescriptor, diffs: DomainDiffs) -> Self {
        Self {
            from,
            to,
            infra: diffs.infra,
            access: diffs.access,
        }
    }

    /// The diff result of one domain
    pub fn domain(&self, domain: Domain) -> &GraphDiff {
        match domain {
            Domain::Infrastructure => &self.infra,
            Domain::Access => &self.access,
        }
    }
}
