use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::resource::{Resource, ResourceRef};
use crate::errors::GraphError;

/// A resource graph for one domain of one snapshot
///
/// Stored as `{"resources": [...]}`. Resource order in the file carries no
/// meaning; lookups go through [`GraphIndex`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    #[serde(default)]
    pub resources: Vec<Resource>,
}

impl Graph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a graph from resources
    pub fn from_resources(resources: impl IntoIterator<Item = Resource>) -> Self {
        Self {
            resources: resources.into_iter().collect(),
        }
    }

    /// Add a resource
    pub fn with_resource(mut self, resource: Resource) -> Self {
        self.resources.push(resource);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Index resources by id, rejecting empty and duplicate ids
    pub fn index(&self) -> Result<GraphIndex<'_>, GraphError> {
        let mut by_id = BTreeMap::new();
        for resource in &self.resources {
            if resource.id.is_empty() {
                return Err(GraphError::EmptyResourceId {
                    kind: resource.kind.clone(),
                });
            }
            if by_id.insert(resource.id.as_str(), resource).is_some() {
                return Err(GraphError::DuplicateResource {
                    resource_id: resource.id.clone(),
                });
            }
        }
        Ok(GraphIndex { by_id })
    }
}

/// Id lookup over a validated [`Graph`]
#[derive(Debug)]
pub struct GraphIndex<'a> {
    by_id: BTreeMap<&'a str, &'a Resource>,
}

impl<'a> GraphIndex<'a> {
    pub fn get(&self, id: &str) -> Option<&'a Resource> {
        self.by_id.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// Iterate resources in id order
    pub fn iter(&self) -> impl Iterator<Item = &'a Resource> + '_ {
        self.by_id.values().copied()
    }

    /// Ancestors of a resource, outermost first, excluding the resource itself
    ///
    /// The chain stops at a resource without parent or at a parent id the
    /// graph does not know; such resources attach to the root anchor.
    pub fn ancestors(&self, id: &str) -> Result<Vec<ResourceRef>, GraphError> {
        let mut chain = Vec::new();
        let mut seen = BTreeSet::from([id]);
        let mut current = self.get(id).and_then(|r| r.parent.as_deref());

        while let Some(parent_id) = current {
            if !seen.insert(parent_id) {
                return Err(GraphError::ParentCycle {
                    resource_id: parent_id.to_string(),
                });
            }
            let Some(parent) = self.get(parent_id) else {
                break;
            };
            chain.push(parent.to_ref());
            current = parent.parent.as_deref();
        }

        chain.reverse();
        Ok(chain)
    }
}
