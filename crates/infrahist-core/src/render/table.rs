//! Table layout for graph diffs.

use crate::diff::{GraphDiff, PropertyValue};
use crate::model::Resource;

const HEADERS: [&str; 6] = ["TYPE", "NAME/ID", "CHANGE", "PROPERTY", "FROM", "TO"];

/// Render `diff` as a table with one row per changed attribute.
///
/// Resources whose change carries no attribute (e.g. an added resource
/// without properties) get a single row with an empty property cell. A
/// parent that is absent on one side is shown as the root anchor's id.
pub fn render_table(diff: &GraphDiff, root: &Resource) -> String {
    let mut rows: Vec<[String; 6]> = Vec::new();

    for change in diff.resource_changes() {
        let base = |property: &str, old: String, new: String| {
            [
                change.resource.kind.clone(),
                change.resource.id.clone(),
                change.status.label().to_string(),
                property.to_string(),
                old,
                new,
            ]
        };
        let before = rows.len();
        for row in change.property_rows() {
            rows.push(base(
                row.property,
                cell(row.old, root),
                cell(row.new, root),
            ));
        }
        if rows.len() == before {
            rows.push(base("", String::new(), String::new()));
        }
    }

    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        for (width, value) in widths.iter_mut().zip(row) {
            *width = (*width).max(value.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &HEADERS.map(str::to_string), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&rule.join("-+-"));
    out.push('\n');
    for row in &rows {
        push_line(&mut out, row, &widths);
    }
    out
}

fn cell(value: Option<PropertyValue<'_>>, root: &Resource) -> String {
    match value {
        Some(PropertyValue::Parent(None)) => root.id.clone(),
        Some(v) => v.to_string(),
        None => String::new(),
    }
}

fn push_line(out: &mut String, cells: &[String; 6], widths: &[usize; 6]) {
    let used = cells.iter().rposition(|c| !c.is_empty()).map_or(0, |i| i + 1);
    let padded: Vec<String> = cells[..used]
        .iter()
        .zip(widths)
        .map(|(c, w)| format!("{:<width$}", c, width = *w))
        .collect();
    out.push_str(padded.join(" | ").trim_end());
    out.push('\n');
}
