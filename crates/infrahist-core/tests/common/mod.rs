use chrono::{TimeZone, Utc};
use infrahist_core::errors::{ExError, ExErrorKind, Result};
use infrahist_core::{Graph, RevisionId, RevisionStore, Snapshot, SnapshotDescriptor};
use std::collections::BTreeMap;

/// In-memory revision store for driving the history core in tests
#[allow(dead_code)]
#[derive(Default)]
pub struct MemoryStore {
    order: Vec<SnapshotDescriptor>,
    snapshots: BTreeMap<RevisionId, Snapshot>,
}

#[allow(dead_code)]
impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a revision `minutes` after 2026-03-02 09:00 UTC (a Monday)
    pub fn record(&mut self, id: &str, minutes: i64, infra: Graph, access: Graph) {
        let at = Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap()
            + chrono::Duration::minutes(minutes);
        let descriptor = SnapshotDescriptor::new(id, at);
        self.order.push(descriptor.clone());
        self.snapshots
            .insert(descriptor.id.clone(), Snapshot::new(descriptor, infra, access));
    }
}

impl RevisionStore for MemoryStore {
    fn list(&self) -> Result<Vec<SnapshotDescriptor>> {
        Ok(self.order.clone())
    }

    fn load(&self, id: &RevisionId) -> Result<Snapshot> {
        self.snapshots.get(id).cloned().ok_or_else(|| {
            ExError::new(ExErrorKind::NotFound)
                .with_op("load")
                .with_entity_id(id.as_str())
                .with_message("revision not found")
        })
    }
}
