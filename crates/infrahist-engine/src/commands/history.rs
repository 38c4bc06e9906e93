//! `history`: walk every recorded revision, then print the diffs.
//!
//! All diffs are computed before anything is written, so a store or diff
//! failure leaves the output untouched. A render failure keeps the blocks
//! already written.

use std::io::Write;
use std::time::Instant;

use infrahist_core::errors::{ExError, ExErrorKind, Result};
use infrahist_core::{
    log_op_end, log_op_error, log_op_start, present_history, walk_revisions, DiffEngine,
    PresentOptions, RegionSource, Renderer, Resource, RevisionStore, StoreAvailability,
};
use tracing::debug;

/// Collaborators of one history run
pub struct HistoryContext<'a> {
    pub store: &'a dyn RevisionStore,
    pub regions: &'a dyn RegionSource,
    pub engine: &'a dyn DiffEngine,
    pub renderer: &'a dyn Renderer,
}

/// Counts describing a completed run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryReport {
    pub revisions: usize,
    pub diffs: usize,
    pub blocks: usize,
}

/// Outcome of the history command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryOutcome {
    /// A prerequisite is missing; nothing was written. Not a failure.
    Unavailable { reason: String },
    Completed(HistoryReport),
}

/// Run the history command, writing the report to `out`.
///
/// # Errors
///
/// - `ExErrorKind::ConfigMissing` if no default region is set
/// - the store's error if listing or loading a revision fails
/// - the diff engine's error for the first failing pair
/// - the renderer's or writer's error while printing
pub fn execute_history(
    out: &mut dyn Write,
    ctx: &HistoryContext<'_>,
    options: PresentOptions,
) -> Result<HistoryOutcome> {
    let start = Instant::now();
    log_op_start!(
        "history",
        granularity = options.granularity.noun(),
        verbose = options.verbose
    );

    let result = run_history(out, ctx, options);
    let duration_ms = start.elapsed().as_millis() as u64;

    match &result {
        Ok(HistoryOutcome::Completed(report)) => {
            log_op_end!(
                "history",
                duration_ms = duration_ms,
                revision_count = report.revisions,
                diff_count = report.diffs,
                block_count = report.blocks
            );
        }
        Ok(HistoryOutcome::Unavailable { reason }) => {
            log_op_end!(
                "history",
                duration_ms = duration_ms,
                unavailable = reason.as_str()
            );
        }
        Err(e) => {
            log_op_error!("history", e.clone(), duration_ms = duration_ms);
        }
    }
    result
}

fn run_history(
    out: &mut dyn Write,
    ctx: &HistoryContext<'_>,
    options: PresentOptions,
) -> Result<HistoryOutcome> {
    if let StoreAvailability::Unavailable { reason } = ctx.store.availability() {
        return Ok(HistoryOutcome::Unavailable { reason });
    }

    let region = resolve_region(ctx.regions)?;
    let root = Resource::region(region);

    let revisions = ctx.store.list()?;
    debug!(revision_count = revisions.len(), region = %root.id, "walking revisions");

    let diffs = walk_revisions(ctx.store, ctx.engine, &revisions, &root)?;
    let blocks = present_history(out, &diffs, &root, options, ctx.renderer)?;
    out.flush().map_err(|e| {
        ExError::new(ExErrorKind::Io)
            .with_op("history")
            .with_message(e.to_string())
    })?;

    Ok(HistoryOutcome::Completed(HistoryReport {
        revisions: revisions.len(),
        diffs: diffs.len(),
        blocks,
    }))
}

fn resolve_region(regions: &dyn RegionSource) -> Result<String> {
    match regions.default_region()? {
        Some(region) if !region.trim().is_empty() => Ok(region),
        _ => Err(ExError::new(ExErrorKind::ConfigMissing)
            .with_op("history")
            .with_entity_id("region")
            .with_message("no default region set (run `infrahist config set region <REGION>`)")),
    }
}
