use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::graph::Graph;

/// Number of characters shown for an abbreviated revision id
pub const SHORT_ID_LEN: usize = 7;

/// Opaque identifier of a recorded revision
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RevisionId(String);

impl RevisionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First seven characters of the id, or the whole id when shorter
    pub fn short(&self) -> &str {
        match self.0.char_indices().nth(SHORT_ID_LEN) {
            Some((end, _)) => &self.0[..end],
            None => &self.0,
        }
    }
}

impl std::fmt::Display for RevisionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RevisionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A listed revision: identity and capture time
///
/// Produced by the revision store, immutable once listed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotDescriptor {
    pub id: RevisionId,
    pub timestamp: DateTime<Utc>,
}

impl SnapshotDescriptor {
    pub fn new(id: impl Into<RevisionId>, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            timestamp,
        }
    }
}

/// A materialized revision: both domain graphs at one point in time
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub descriptor: SnapshotDescriptor,
    /// Infrastructure topology (networks, instances, ...)
    pub infra: Graph,
    /// Access relationships (users, groups, roles, policies, ...)
    pub access: Graph,
}

impl Snapshot {
    pub fn new(descriptor: SnapshotDescriptor, infra: Graph, access: Graph) -> Self {
        Self {
            descriptor,
            infra,
            access,
        }
    }
}
