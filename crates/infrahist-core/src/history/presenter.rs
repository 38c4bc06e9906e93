//! Diff presenter: decides, per diff and domain, whether and how to print.
//!
//! | domain has changes | verbose | output                                  |
//! |--------------------|---------|-----------------------------------------|
//! | yes                | any     | header, rendered tree/table, blank line |
//! | no                 | yes     | header, "no changes" literal            |
//! | no                 | no      | nothing                                 |

use std::io::Write;

use chrono::{DateTime, Utc};

use super::revision_diff::{DiffOrigin, Domain, RevisionDiff};
use crate::errors::{ExError, ExErrorKind, Result};
use crate::model::{Resource, SnapshotDescriptor};
use crate::render::{DisplayFormat, Renderer};

/// Label of the origin of the first diff of a history
pub const CREATION_LABEL: &str = "repository creation";

/// Printed for an unchanged domain at resource granularity
pub const NO_RESOURCE_CHANGES: &str = "No resource changes.";

/// Printed for an unchanged domain at property granularity
pub const NO_CHANGES: &str = "No changes.";

const TIMESTAMP_FORMAT: &str = "%A %B %-d, %H:%M UTC";

/// Level of detail of every diff in a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Granularity {
    /// Which resources appeared, disappeared, moved or changed (tree)
    #[default]
    Resources,
    /// Which attributes of which resources changed (table)
    Properties,
}

impl Granularity {
    /// Word used in block headers
    pub fn noun(&self) -> &'static str {
        match self {
            Granularity::Resources => "resources",
            Granularity::Properties => "properties",
        }
    }

    pub fn display_format(&self) -> DisplayFormat {
        match self {
            Granularity::Resources => DisplayFormat::Tree,
            Granularity::Properties => DisplayFormat::Table,
        }
    }

    pub fn no_changes_literal(&self) -> &'static str {
        match self {
            Granularity::Resources => NO_RESOURCE_CHANGES,
            Granularity::Properties => NO_CHANGES,
        }
    }
}

/// Presentation settings fixed for a whole run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PresentOptions {
    pub granularity: Granularity,
    /// Print a block for unchanged domains too
    pub verbose: bool,
}

/// Print every diff in order, infrastructure then access within each diff.
///
/// Returns the number of blocks written.
///
/// # Errors
///
/// The first write or render failure aborts; blocks already written stay
/// on `out`.
pub fn present_history(
    out: &mut dyn Write,
    diffs: &[RevisionDiff],
    root: &Resource,
    options: PresentOptions,
    renderer: &dyn Renderer,
) -> Result<usize> {
    let mut blocks = 0;
    for diff in diffs {
        for domain in Domain::ALL {
            if present_revision_diff(out, diff, domain, root, options, renderer)? {
                blocks += 1;
            }
        }
    }
    Ok(blocks)
}

/// Print the block for one domain of one diff, if any.
///
/// Returns whether a block was written.
///
/// # Errors
///
/// Returns `ExErrorKind::Io` if writing fails, or the renderer's error.
pub fn present_revision_diff(
    out: &mut dyn Write,
    diff: &RevisionDiff,
    domain: Domain,
    root: &Resource,
    options: PresentOptions,
    renderer: &dyn Renderer,
) -> Result<bool> {
    let graph_diff = diff.domain(domain);
    let has_diff = graph_diff.has_diff();
    if !has_diff && !options.verbose {
        return Ok(false);
    }

    let granularity = options.granularity;
    writeln!(
        out,
        "▶ {} {}, from {} to {}",
        domain,
        granularity.noun(),
        origin_label(&diff.from),
        revision_label(&diff.to)
    )
    .map_err(write_error)?;

    if has_diff {
        renderer.render(out, graph_diff, granularity.display_format(), root)?;
        writeln!(out).map_err(write_error)?;
    } else {
        writeln!(out, "{}", granularity.no_changes_literal()).map_err(write_error)?;
    }
    Ok(true)
}

/// `repository creation`, or the revision label
pub fn origin_label(origin: &DiffOrigin) -> String {
    match origin {
        DiffOrigin::RepositoryCreation => CREATION_LABEL.to_string(),
        DiffOrigin::Revision(descriptor) => revision_label(descriptor),
    }
}

/// `<short id> on <Weekday Month Day, HH:MM UTC>`
pub fn revision_label(descriptor: &SnapshotDescriptor) -> String {
    format!(
        "{} on {}",
        descriptor.id.short(),
        format_timestamp(&descriptor.timestamp)
    )
}

fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

fn write_error(err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op("present_revision_diff")
        .with_message(err.to_string())
}
