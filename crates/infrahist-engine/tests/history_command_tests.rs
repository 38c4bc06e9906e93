//! `execute_history` with in-memory collaborators.

use std::cell::Cell;
use std::collections::BTreeMap;
use std::io::Write;

use chrono::{Duration, TimeZone, Utc};
use infrahist_core::diff::DomainDiffs;
use infrahist_core::errors::{ExError, ExErrorKind, Result};
use infrahist_core::logging_facility::init_test_capture;
use infrahist_core::{
    DiffEngine, DisplayFormat, Graph, GraphDiff, GraphDiffEngine, Granularity, PresentOptions,
    RegionSource, Renderer, Resource, RevisionId, RevisionStore, Snapshot, SnapshotDescriptor,
    StoreAvailability, TextRenderer,
};
use infrahist_core_types::schema::{EVENT_END, EVENT_END_ERROR, EVENT_START};
use infrahist_engine::commands::history::{
    execute_history, HistoryContext, HistoryOutcome, HistoryReport,
};

const S0: &str = "0a1b2c3d4e5f60718293a4b5c6d7e8f901234567";
const S1: &str = "1a1b2c3d4e5f60718293a4b5c6d7e8f901234567";
const S2: &str = "2a1b2c3d4e5f60718293a4b5c6d7e8f901234567";

// ---------------------------------------------------------------------------
// Fakes
// ---------------------------------------------------------------------------

#[derive(Default)]
struct FakeStore {
    unavailable: Option<String>,
    order: Vec<SnapshotDescriptor>,
    snapshots: BTreeMap<RevisionId, Snapshot>,
    fail_load: Option<RevisionId>,
    lists: Cell<usize>,
}

impl FakeStore {
    fn record(mut self, id: &str, minutes: i64, infra: Graph) -> Self {
        let at = Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap() + Duration::minutes(minutes);
        let descriptor = SnapshotDescriptor::new(id, at);
        self.order.push(descriptor.clone());
        self.snapshots
            .insert(descriptor.id.clone(), Snapshot::new(descriptor, infra, Graph::new()));
        self
    }
}

impl RevisionStore for FakeStore {
    fn availability(&self) -> StoreAvailability {
        match &self.unavailable {
            Some(reason) => StoreAvailability::Unavailable {
                reason: reason.clone(),
            },
            None => StoreAvailability::Available,
        }
    }

    fn list(&self) -> Result<Vec<SnapshotDescriptor>> {
        self.lists.set(self.lists.get() + 1);
        Ok(self.order.clone())
    }

    fn load(&self, id: &RevisionId) -> Result<Snapshot> {
        if self.fail_load.as_ref() == Some(id) {
            return Err(ExError::new(ExErrorKind::ExternalService)
                .with_op("load_revision")
                .with_entity_id(id.as_str()));
        }
        self.snapshots
            .get(id)
            .cloned()
            .ok_or_else(|| ExError::new(ExErrorKind::NotFound).with_entity_id(id.as_str()))
    }
}

struct FixedRegion(Option<&'static str>, Cell<usize>);

impl FixedRegion {
    fn new(region: Option<&'static str>) -> Self {
        Self(region, Cell::new(0))
    }
}

impl RegionSource for FixedRegion {
    fn default_region(&self) -> Result<Option<String>> {
        self.1.set(self.1.get() + 1);
        Ok(self.0.map(str::to_string))
    }
}

/// Fails on the pair whose newer side is `fail_to`
struct FailingEngine {
    fail_to: RevisionId,
}

impl DiffEngine for FailingEngine {
    fn build_diff(&self, from: &Snapshot, to: &Snapshot, root: &Resource) -> Result<DomainDiffs> {
        if to.descriptor.id == self.fail_to {
            return Err(ExError::new(ExErrorKind::InvalidGraph).with_op("build_diff"));
        }
        GraphDiffEngine.build_diff(from, to, root)
    }
}

struct BrokenRenderer;

impl Renderer for BrokenRenderer {
    fn render(
        &self,
        _out: &mut dyn Write,
        _diff: &GraphDiff,
        _format: DisplayFormat,
        _root: &Resource,
    ) -> Result<()> {
        Err(ExError::new(ExErrorKind::Io).with_op("render"))
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn vpc() -> Graph {
    Graph::new().with_resource(Resource::new("vpc-1", "vpc"))
}

/// S0 and S1 identical, S2 adds a subnet
fn three_revisions() -> FakeStore {
    FakeStore::default()
        .record(S0, 0, vpc())
        .record(S1, 30, vpc())
        .record(
            S2,
            90,
            vpc().with_resource(Resource::new("subnet-1", "subnet").with_parent("vpc-1")),
        )
}

fn run(
    store: &dyn RevisionStore,
    regions: &dyn RegionSource,
    engine: &dyn DiffEngine,
    renderer: &dyn Renderer,
    options: PresentOptions,
) -> (Result<HistoryOutcome>, String) {
    let ctx = HistoryContext {
        store,
        regions,
        engine,
        renderer,
    };
    let mut out = Vec::new();
    let result = execute_history(&mut out, &ctx, options);
    (result, String::from_utf8(out).unwrap())
}

fn resources() -> PresentOptions {
    PresentOptions {
        granularity: Granularity::Resources,
        verbose: false,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn test_completed_run_prints_changed_block_only() {
    let store = three_revisions();
    let region = FixedRegion::new(Some("eu-west-1"));

    let (result, output) = run(&store, &region, &GraphDiffEngine, &TextRenderer, resources());

    assert_eq!(
        result.unwrap(),
        HistoryOutcome::Completed(HistoryReport {
            revisions: 3,
            diffs: 2,
            blocks: 1,
        })
    );
    assert_eq!(
        output,
        "▶ infra resources, from 1a1b2c3 on Monday March 2, 09:30 UTC to 2a1b2c3 on Monday March 2, 10:30 UTC\n\
         region eu-west-1\n\
         └── vpc vpc-1\n    \
             └── + subnet subnet-1\n\
         \n"
    );
}

#[test]
fn test_unavailable_store_writes_nothing() {
    let store = FakeStore {
        unavailable: Some("No history available. You need to install git".to_string()),
        ..three_revisions()
    };
    let region = FixedRegion::new(None);

    let (result, output) = run(&store, &region, &GraphDiffEngine, &TextRenderer, resources());

    assert_eq!(
        result.unwrap(),
        HistoryOutcome::Unavailable {
            reason: "No history available. You need to install git".to_string()
        }
    );
    assert!(output.is_empty());
    assert_eq!(region.1.get(), 0, "region is not consulted");
    assert_eq!(store.lists.get(), 0, "store is not listed");
}

#[test]
fn test_missing_region_is_config_error() {
    let store = three_revisions();
    let region = FixedRegion::new(None);

    let (result, output) = run(&store, &region, &GraphDiffEngine, &TextRenderer, resources());

    let err = result.unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::ConfigMissing);
    assert_eq!(err.code(), "ERR_CONFIG_MISSING");
    assert_eq!(err.entity_id(), Some("region"));
    assert!(output.is_empty());
    assert_eq!(store.lists.get(), 0);
}

#[test]
fn test_blank_region_is_config_error() {
    let (result, _) = run(
        &three_revisions(),
        &FixedRegion::new(Some("  ")),
        &GraphDiffEngine,
        &TextRenderer,
        resources(),
    );
    assert_eq!(result.unwrap_err().kind(), ExErrorKind::ConfigMissing);
}

#[test]
fn test_load_failure_prints_nothing() {
    let store = FakeStore {
        fail_load: Some(RevisionId::new(S2)),
        ..three_revisions()
    };
    let verbose = PresentOptions {
        granularity: Granularity::Resources,
        verbose: true,
    };

    let (result, output) = run(
        &store,
        &FixedRegion::new(Some("eu-west-1")),
        &GraphDiffEngine,
        &TextRenderer,
        verbose,
    );

    assert_eq!(result.unwrap_err().kind(), ExErrorKind::ExternalService);
    assert!(output.is_empty(), "earlier diffs are discarded: {output}");
}

#[test]
fn test_diff_failure_discards_earlier_diffs() {
    let engine = FailingEngine {
        fail_to: RevisionId::new(S2),
    };
    let verbose = PresentOptions {
        granularity: Granularity::Properties,
        verbose: true,
    };

    let (result, output) = run(
        &three_revisions(),
        &FixedRegion::new(Some("eu-west-1")),
        &engine,
        &TextRenderer,
        verbose,
    );

    assert_eq!(result.unwrap_err().kind(), ExErrorKind::InvalidGraph);
    assert!(output.is_empty());
}

#[test]
fn test_render_failure_keeps_blocks_already_written() {
    let store = three_revisions();
    let verbose = PresentOptions {
        granularity: Granularity::Resources,
        verbose: true,
    };

    let (result, output) = run(
        &store,
        &FixedRegion::new(Some("eu-west-1")),
        &GraphDiffEngine,
        &BrokenRenderer,
        verbose,
    );

    assert_eq!(result.unwrap_err().op(), Some("render"));
    // Both S0 -> S1 blocks are unchanged literals; the S1 -> S2 infra header
    // is written before its render fails.
    assert_eq!(output.matches("No resource changes.").count(), 2);
    assert!(output.ends_with("to 2a1b2c3 on Monday March 2, 10:30 UTC\n"));
}

#[test]
fn test_empty_history_completes_silently() {
    let (result, output) = run(
        &FakeStore::default(),
        &FixedRegion::new(Some("eu-west-1")),
        &GraphDiffEngine,
        &TextRenderer,
        PresentOptions {
            granularity: Granularity::Properties,
            verbose: true,
        },
    );

    assert_eq!(
        result.unwrap(),
        HistoryOutcome::Completed(HistoryReport {
            revisions: 0,
            diffs: 0,
            blocks: 0,
        })
    );
    assert!(output.is_empty());
}

#[test]
fn test_rerun_is_byte_identical() {
    let store = three_revisions();
    let region = FixedRegion::new(Some("eu-west-1"));
    let options = PresentOptions {
        granularity: Granularity::Properties,
        verbose: true,
    };

    let (_, first) = run(&store, &region, &GraphDiffEngine, &TextRenderer, options);
    let (_, second) = run(&store, &region, &GraphDiffEngine, &TextRenderer, options);

    assert!(!first.is_empty());
    assert_eq!(first, second);
}

#[test]
fn test_history_logs_lifecycle_events() {
    let capture = init_test_capture();

    let (result, _) = run(
        &three_revisions(),
        &FixedRegion::new(Some("eu-west-1")),
        &GraphDiffEngine,
        &TextRenderer,
        resources(),
    );
    assert!(result.is_ok());
    capture.assert_event_exists("history", EVENT_START);
    capture.assert_event_exists("history", EVENT_END);

    let (result, _) = run(
        &three_revisions(),
        &FixedRegion::new(None),
        &GraphDiffEngine,
        &TextRenderer,
        resources(),
    );
    assert!(result.is_err());
    // Other tests share the global capture; match on the error code.
    let config_failure = capture.events_for("history").into_iter().any(|e| {
        e.event.as_deref() == Some(EVENT_END_ERROR)
            && e.field("err_code") == Some("ERR_CONFIG_MISSING")
    });
    assert!(config_failure, "missing end_error event for ERR_CONFIG_MISSING");
}
