use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Kind of the resource anchoring every diff rendering.
pub const REGION_KIND: &str = "region";

/// A managed resource: one node of an infrastructure or access graph
///
/// Resources form a forest through `parent`; a resource without parent (or
/// whose parent is absent from its graph) hangs directly under the root
/// anchor when rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    /// Identifier, unique within one graph
    pub id: String,

    /// Resource type (`vpc`, `subnet`, `instance`, `user`, `group`, ...)
    pub kind: String,

    /// Optional parent resource id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,

    /// Attribute values, ordered by name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, Value>,
}

impl Resource {
    /// Create a resource with no parent and no properties
    pub fn new(id: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            parent: None,
            properties: BTreeMap::new(),
        }
    }

    /// Build the root anchor for a region
    pub fn region(region: impl Into<String>) -> Self {
        Self::new(region, REGION_KIND)
    }

    /// Set the parent resource id
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Set one property value
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    /// Lightweight reference to this resource
    pub fn to_ref(&self) -> ResourceRef {
        ResourceRef {
            kind: self.kind.clone(),
            id: self.id.clone(),
        }
    }
}

/// Identity of a resource without its attributes
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ResourceRef {
    pub kind: String,
    pub id: String,
}

impl std::fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.kind, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_anchor() {
        let root = Resource::region("eu-west-1");
        assert_eq!(root.id, "eu-west-1");
        assert_eq!(root.kind, REGION_KIND);
        assert!(root.parent.is_none());
    }

    #[test]
    fn test_resource_json_shape() {
        let res = Resource::new("subnet-1", "subnet")
            .with_parent("vpc-1")
            .with_property("cidr", "10.0.1.0/24");
        let json = serde_json::to_value(&res).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "subnet-1",
                "kind": "subnet",
                "parent": "vpc-1",
                "properties": {"cidr": "10.0.1.0/24"}
            })
        );

        let bare: Resource =
            serde_json::from_value(serde_json::json!({"id": "u1", "kind": "user"})).unwrap();
        assert!(bare.parent.is_none());
        assert!(bare.properties.is_empty());
    }
}
