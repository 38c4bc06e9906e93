//! Revision walker: consecutive snapshot pairs to an ordered diff sequence.

use std::time::Instant;

use tracing::debug;

use super::revision_diff::{DiffOrigin, RevisionDiff};
use super::store::RevisionStore;
use crate::diff::DiffEngine;
use crate::errors::Result;
use crate::model::{Resource, SnapshotDescriptor};

/// Diff every pair of consecutive revisions, oldest pair first.
///
/// `revisions` must be ordered oldest first, as listed by the store. The
/// result holds exactly `revisions.len() - 1` diffs (none for fewer than
/// two revisions); diff `i` spans `revisions[i]` to `revisions[i + 1]`.
/// The first diff's origin is [`DiffOrigin::RepositoryCreation`].
///
/// Each revision is materialized once: the newer side of one pair is
/// reused as the older side of the next.
///
/// # Errors
///
/// The first load or diff failure aborts the walk; diffs computed for
/// earlier pairs are discarded.
pub fn walk_revisions<S, E>(
    store: &S,
    engine: &E,
    revisions: &[SnapshotDescriptor],
    root: &Resource,
) -> Result<Vec<RevisionDiff>>
where
    S: RevisionStore + ?Sized,
    E: DiffEngine + ?Sized,
{
    let start = Instant::now();
    crate::log_op_start!("walk_revisions", revision_count = revisions.len());

    let result = walk_pairs(store, engine, revisions, root);
    let duration_ms = start.elapsed().as_millis() as u64;
    match &result {
        Ok(diffs) => {
            crate::log_op_end!(
                "walk_revisions",
                duration_ms = duration_ms,
                diff_count = diffs.len()
            );
        }
        Err(e) => {
            crate::log_op_error!("walk_revisions", e.clone(), duration_ms = duration_ms);
        }
    }
    result
}

fn walk_pairs<S, E>(
    store: &S,
    engine: &E,
    revisions: &[SnapshotDescriptor],
    root: &Resource,
) -> Result<Vec<RevisionDiff>>
where
    S: RevisionStore + ?Sized,
    E: DiffEngine + ?Sized,
{
    let Some(first) = revisions.first() else {
        return Ok(Vec::new());
    };
    if revisions.len() < 2 {
        debug!(revision_id = %first.id, "single revision, nothing to diff");
        return Ok(Vec::new());
    }

    let mut diffs = Vec::with_capacity(revisions.len() - 1);
    let mut from = store.load(&first.id)?;

    for (i, pair) in revisions.windows(2).enumerate() {
        let to = store.load(&pair[1].id)?;
        debug!(
            from_revision = %pair[0].id,
            to_revision = %pair[1].id,
            "diffing revision pair"
        );

        let domains = engine.build_diff(&from, &to, root)?;
        let origin = if i == 0 {
            DiffOrigin::RepositoryCreation
        } else {
            DiffOrigin::Revision(pair[0].clone())
        };
        diffs.push(RevisionDiff::new(origin, pair[1].clone(), domains));
        from = to;
    }

    Ok(diffs)
}
