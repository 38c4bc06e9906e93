//! Tree layout for graph diffs.

use std::collections::BTreeMap;

use crate::diff::GraphDiff;
use crate::model::{Resource, ResourceRef};

#[derive(Default)]
struct Node<'a> {
    marker: Option<char>,
    children: BTreeMap<&'a ResourceRef, Node<'a>>,
}

/// Render the changed resources of `diff` as a tree rooted at `root`.
///
/// Changed resources carry their status marker (`+` added, `-` removed,
/// `>` moved, `~` modified); unchanged ancestors are shown bare to give the
/// changes their position in the topology.
///
/// A removed resource is drawn where it was, under its ancestors in the
/// older graph. If one of those ancestors moved in the same diff, that
/// ancestor shows twice: bare at its old position, above the removal, and
/// with `>` at its new position.
///
/// ```text
/// region eu-west-1
/// ├── vpc vpc-1
/// │   └── + subnet subnet-2
/// └── - instance i-9
/// ```
pub fn render_tree(diff: &GraphDiff, root: &Resource) -> String {
    let mut top = Node::default();

    for change in diff.resource_changes() {
        let mut node = &mut top;
        for ancestor in &change.ancestors {
            node = node.children.entry(ancestor).or_default();
        }
        node.children.entry(&change.resource).or_default().marker = Some(change.status.marker());
    }

    let mut out = format!("{} {}\n", root.kind, root.id);
    write_children(&mut out, &top, "");
    out
}

fn write_children(out: &mut String, node: &Node<'_>, prefix: &str) {
    let last = node.children.len().saturating_sub(1);
    for (i, (reference, child)) in node.children.iter().enumerate() {
        let (branch, indent) = if i == last {
            ("└── ", "    ")
        } else {
            ("├── ", "│   ")
        };
        out.push_str(prefix);
        out.push_str(branch);
        if let Some(marker) = child.marker {
            out.push(marker);
            out.push(' ');
        }
        out.push_str(&reference.to_string());
        out.push('\n');
        write_children(out, child, &format!("{prefix}{indent}"));
    }
}
