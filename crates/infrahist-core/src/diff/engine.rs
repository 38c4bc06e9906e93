//! Graph diff computation engine.
//!
//! The core entry point is [`diff_graphs`], which compares two graphs of
//! the same domain. [`GraphDiffEngine`] applies it to both domains of a
//! snapshot pair.

use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

use crate::diff::model::{
    ChangeStatus, DomainDiffs, GraphDiff, ParentChange, PropertyChange, ResourceChange,
};
use crate::diff::DiffEngine;
use crate::errors::{ExError, GraphError, Result};
use crate::model::{Graph, Resource, Snapshot};

/// Diff engine comparing resource presence, parents and properties
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphDiffEngine;

impl DiffEngine for GraphDiffEngine {
    fn build_diff(&self, from: &Snapshot, to: &Snapshot, _root: &Resource) -> Result<DomainDiffs> {
        let infra = diff_graphs(&from.infra, &to.infra).map_err(|e| {
            ExError::from(e.clone())
                .with_op("build_diff")
                .with_message(format!(
                    "infra diff {} -> {}: {}",
                    from.descriptor.id.short(),
                    to.descriptor.id.short(),
                    e
                ))
        })?;
        let access = diff_graphs(&from.access, &to.access).map_err(|e| {
            ExError::from(e.clone())
                .with_op("build_diff")
                .with_message(format!(
                    "access diff {} -> {}: {}",
                    from.descriptor.id.short(),
                    to.descriptor.id.short(),
                    e
                ))
        })?;
        Ok(DomainDiffs { infra, access })
    }
}

/// Compare two graphs of the same domain.
///
/// # Errors
///
/// - `DuplicateResource` / `EmptyResourceId` if either graph fails indexing
/// - `ParentCycle` if a changed resource's ancestor chain loops
///
/// A resource keeping its id but changing kind is reported as the old
/// resource removed and the new one added.
pub fn diff_graphs(from: &Graph, to: &Graph) -> std::result::Result<GraphDiff, GraphError> {
    let old = from.index()?;
    let new = to.index()?;
    let mut changes = Vec::new();

    // Identity is (kind, id): a resource whose kind changed is replaced.
    let replaced = |r: &Resource| new.get(&r.id).is_some_and(|n| n.kind != r.kind);

    for removed in old.iter().filter(|r| !new.contains(&r.id) || replaced(*r)) {
        changes.push(ResourceChange {
            resource: removed.to_ref(),
            ancestors: old.ancestors(&removed.id)?,
            status: ChangeStatus::Removed,
            parent_change: None,
            properties: property_changes(&removed.properties, &BTreeMap::new()),
        });
    }

    for current in new.iter() {
        let previous = old.get(&current.id).filter(|p| p.kind == current.kind);
        let Some(previous) = previous else {
            changes.push(ResourceChange {
                resource: current.to_ref(),
                ancestors: new.ancestors(&current.id)?,
                status: ChangeStatus::Added,
                parent_change: None,
                properties: property_changes(&BTreeMap::new(), &current.properties),
            });
            continue;
        };

        let properties = property_changes(&previous.properties, &current.properties);
        let parent_change = (previous.parent != current.parent).then(|| ParentChange {
            from: previous.parent.clone(),
            to: current.parent.clone(),
        });
        let status = match (&parent_change, properties.is_empty()) {
            (Some(_), _) => ChangeStatus::Moved,
            (None, false) => ChangeStatus::Modified,
            (None, true) => continue,
        };

        changes.push(ResourceChange {
            resource: current.to_ref(),
            ancestors: new.ancestors(&current.id)?,
            status,
            parent_change,
            properties,
        });
    }

    Ok(GraphDiff::new(changes))
}

fn property_changes(
    old: &BTreeMap<String, Value>,
    new: &BTreeMap<String, Value>,
) -> Vec<PropertyChange> {
    let names: BTreeSet<&String> = old.keys().chain(new.keys()).collect();
    names
        .into_iter()
        .filter_map(|name| {
            let (before, after) = (old.get(name), new.get(name));
            (before != after).then(|| PropertyChange {
                name: name.clone(),
                old: before.cloned(),
                new: after.cloned(),
            })
        })
        .collect()
}
