//! Graph diff output types.
//!
//! Collections are sorted `Vec`s so that rendering a diff is deterministic.

use serde::Serialize;
use serde_json::Value;

use crate::model::ResourceRef;

/// The two per-domain results of diffing one pair of snapshots
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DomainDiffs {
    /// Infrastructure topology changes
    pub infra: GraphDiff,
    /// Access relationship changes
    pub access: GraphDiff,
}

/// Difference between two graphs of the same domain
///
/// Can be read at two granularities: which resources appeared, disappeared,
/// moved or changed ([`GraphDiff::resource_changes`]), or which attributes of
/// which resources changed ([`GraphDiff::property_changes`]).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GraphDiff {
    changes: Vec<ResourceChange>,
}

impl GraphDiff {
    /// Build from changes, sorting them by kind then id
    pub fn new(mut changes: Vec<ResourceChange>) -> Self {
        changes.sort_by(|a, b| {
            (&a.resource.kind, &a.resource.id).cmp(&(&b.resource.kind, &b.resource.id))
        });
        Self { changes }
    }

    /// True if at least one resource changed
    pub fn has_diff(&self) -> bool {
        !self.changes.is_empty()
    }

    /// Presence-level view
    pub fn resource_changes(&self) -> &[ResourceChange] {
        &self.changes
    }

    /// Property-level view: one row per changed attribute, parent moves
    /// included as a `parent` row
    pub fn property_changes(&self) -> impl Iterator<Item = PropertyRow<'_>> + '_ {
        self.changes.iter().flat_map(|change| change.property_rows())
    }
}

/// Name of the pseudo-property reporting a parent move
pub const PARENT_PROPERTY: &str = "parent";

/// Classification of a changed resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChangeStatus {
    /// Present only in the newer graph
    Added,
    /// Present only in the older graph
    Removed,
    /// Present in both under different parents
    Moved,
    /// Present in both under the same parent with different properties
    Modified,
}

impl ChangeStatus {
    /// Single-character marker used by the renderers
    pub fn marker(&self) -> char {
        match self {
            ChangeStatus::Added => '+',
            ChangeStatus::Removed => '-',
            ChangeStatus::Moved => '>',
            ChangeStatus::Modified => '~',
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ChangeStatus::Added => "added",
            ChangeStatus::Removed => "removed",
            ChangeStatus::Moved => "moved",
            ChangeStatus::Modified => "modified",
        }
    }
}

/// One changed resource
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceChange {
    pub resource: ResourceRef,
    /// Ancestors outermost first, resolved in the graph holding the resource
    pub ancestors: Vec<ResourceRef>,
    pub status: ChangeStatus,
    /// Set when the parent differs between the two graphs
    pub parent_change: Option<ParentChange>,
    /// Attribute changes sorted by name
    pub properties: Vec<PropertyChange>,
}

impl ResourceChange {
    /// Attribute rows of this change, the parent move (if any) first
    pub fn property_rows(&self) -> impl Iterator<Item = PropertyRow<'_>> + '_ {
        let moved = self.parent_change.as_ref().map(|pc| PropertyRow {
            change: self,
            property: PARENT_PROPERTY,
            old: Some(PropertyValue::Parent(pc.from.as_deref())),
            new: Some(PropertyValue::Parent(pc.to.as_deref())),
        });
        moved
            .into_iter()
            .chain(self.properties.iter().map(move |p| PropertyRow {
                change: self,
                property: &p.name,
                old: p.old.as_ref().map(PropertyValue::Value),
                new: p.new.as_ref().map(PropertyValue::Value),
            }))
    }
}

/// Parent ids before and after a move; `None` means attached to the root
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParentChange {
    pub from: Option<String>,
    pub to: Option<String>,
}

/// Old/new values of one attribute; `None` means absent on that side
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyChange {
    pub name: String,
    pub old: Option<Value>,
    pub new: Option<Value>,
}

/// A borrowed row of the property-level view
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropertyRow<'a> {
    pub change: &'a ResourceChange,
    pub property: &'a str,
    pub old: Option<PropertyValue<'a>>,
    pub new: Option<PropertyValue<'a>>,
}

/// A value in a [`PropertyRow`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PropertyValue<'a> {
    /// Parent resource id; `None` is the root anchor
    Parent(Option<&'a str>),
    /// Attribute value
    Value(&'a Value),
}

impl std::fmt::Display for PropertyValue<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PropertyValue::Parent(Some(id)) => write!(f, "{}", id),
            PropertyValue::Parent(None) => write!(f, "(root)"),
            PropertyValue::Value(Value::String(s)) => write!(f, "{}", s),
            PropertyValue::Value(v) => write!(f, "{}", v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn change(kind: &str, id: &str, status: ChangeStatus) -> ResourceChange {
        ResourceChange {
            resource: ResourceRef {
                id: id.to_string(),
                kind: kind.to_string(),
            },
            ancestors: Vec::new(),
            status,
            parent_change: None,
            properties: Vec::new(),
        }
    }

    #[test]
    fn test_empty_diff_reports_no_changes() {
        assert!(!GraphDiff::default().has_diff());
        assert_eq!(GraphDiff::default().property_changes().count(), 0);
    }

    #[test]
    fn test_changes_sorted_by_kind_then_id() {
        let diff = GraphDiff::new(vec![
            change("vpc", "vpc-2", ChangeStatus::Added),
            change("instance", "i-9", ChangeStatus::Removed),
            change("vpc", "vpc-1", ChangeStatus::Modified),
        ]);
        let order: Vec<_> = diff
            .resource_changes()
            .iter()
            .map(|c| c.resource.id.as_str())
            .collect();
        assert_eq!(order, vec!["i-9", "vpc-1", "vpc-2"]);
    }

    #[test]
    fn test_property_rows_put_parent_move_first() {
        let mut moved = change("subnet", "subnet-1", ChangeStatus::Moved);
        moved.parent_change = Some(ParentChange {
            from: Some("vpc-1".to_string()),
            to: None,
        });
        moved.properties.push(PropertyChange {
            name: "cidr".to_string(),
            old: Some(json!("10.0.0.0/24")),
            new: Some(json!("10.0.1.0/24")),
        });
        let diff = GraphDiff::new(vec![moved]);

        let rows: Vec<_> = diff
            .property_changes()
            .map(|row| {
                (
                    row.property.to_string(),
                    row.old.map(|v| v.to_string()),
                    row.new.map(|v| v.to_string()),
                )
            })
            .collect();
        assert_eq!(
            rows,
            vec![
                (
                    "parent".to_string(),
                    Some("vpc-1".to_string()),
                    Some("(root)".to_string())
                ),
                (
                    "cidr".to_string(),
                    Some("10.0.0.0/24".to_string()),
                    Some("10.0.1.0/24".to_string())
                ),
            ]
        );
    }

    #[test]
    fn test_non_string_values_render_as_json() {
        let value = json!(3);
        assert_eq!(PropertyValue::Value(&value).to_string(), "3");
        let flag = json!(true);
        assert_eq!(PropertyValue::Value(&flag).to_string(), "true");
    }
}
