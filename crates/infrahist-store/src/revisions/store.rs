use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone, Utc};
use infrahist_core::errors::{ExError, ExErrorKind};
use infrahist_core::{
    Graph, RevisionId, RevisionStore, Snapshot, SnapshotDescriptor, StoreAvailability,
};
use tracing::debug;

use super::atomic::atomic_write;
use super::git::{git_installed, Git};
use crate::errors::{git_error, invalid_snapshot, io_error, revision_not_found, Result};

/// Snapshot file holding the infrastructure graph
pub const INFRA_FILE: &str = "infra.json";
/// Snapshot file holding the access graph
pub const ACCESS_FILE: &str = "access.json";
/// Message of the first, empty commit of a history repository
pub const CREATION_MESSAGE: &str = "repository creation";
/// Shown instead of a history when git is not installed
pub const GIT_MISSING_REASON: &str = "No history available. You need to install git";

/// Revision store over a git working tree
#[derive(Debug, Clone)]
pub struct GitRevisionStore {
    dir: PathBuf,
}

impl GitRevisionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn git(&self) -> Git<'_> {
        Git::new(&self.dir)
    }

    fn is_repository(&self) -> bool {
        self.dir.join(".git").exists()
    }

    fn has_commits(&self, op: &str) -> Result<bool> {
        self.git()
            .succeeds(op, &["rev-parse", "--verify", "--quiet", "HEAD"])
    }

    /// Create the repository and its empty creation commit, if missing.
    ///
    /// # Errors
    ///
    /// Returns `ExErrorKind::Io` if the directory cannot be created, or
    /// `ExErrorKind::ExternalService` if git fails.
    pub fn init(&self) -> Result<()> {
        std::fs::create_dir_all(&self.dir).map_err(|e| io_error("init_history", e))?;
        let git = self.git();
        if !self.is_repository() {
            git.run("init_history", &["init", "--quiet"])?;
            debug!(dir = %self.dir.display(), "history repository created");
        }
        if !self.has_commits("init_history")? {
            git.run(
                "init_history",
                &["commit", "--allow-empty", "--quiet", "-m", CREATION_MESSAGE],
            )?;
        }
        Ok(())
    }

    /// Commit both graphs as a new snapshot dated `at`.
    ///
    /// Initializes the repository first if needed.
    ///
    /// # Errors
    ///
    /// Returns the first write or git failure.
    pub fn record_snapshot(
        &self,
        infra: &Graph,
        access: &Graph,
        at: DateTime<Utc>,
    ) -> Result<RevisionId> {
        self.init()?;

        atomic_write(&self.dir.join(INFRA_FILE), &serde_json::to_vec_pretty(infra)?)?;
        atomic_write(&self.dir.join(ACCESS_FILE), &serde_json::to_vec_pretty(access)?)?;

        let git = self.git();
        git.run("record_snapshot", &["add", "--", INFRA_FILE, ACCESS_FILE])?;

        let date = format!("{} +0000", at.timestamp());
        let message = format!("snapshot {}", at.to_rfc3339());
        git.run_with_env(
            "record_snapshot",
            &["commit", "--allow-empty", "--quiet", "-m", &message],
            &[
                ("GIT_AUTHOR_DATE", date.clone()),
                ("GIT_COMMITTER_DATE", date),
            ],
        )?;

        let id = git.run_text("record_snapshot", &["rev-parse", "HEAD"])?;
        debug!(revision_id = %id, "snapshot recorded");
        Ok(RevisionId::new(id))
    }

    fn read_graph(&self, id: &RevisionId, file: &str, present: &BTreeSet<String>) -> Result<Graph> {
        if !present.contains(file) {
            return Ok(Graph::new());
        }
        let object = format!("{}:{}", id, file);
        let bytes = self.git().run("load_revision", &["show", &object])?;
        serde_json::from_slice(&bytes)
            .map_err(|e| invalid_snapshot(id.as_str(), file, &e.to_string()))
    }
}

impl RevisionStore for GitRevisionStore {
    fn availability(&self) -> StoreAvailability {
        if git_installed() {
            StoreAvailability::Available
        } else {
            StoreAvailability::Unavailable {
                reason: GIT_MISSING_REASON.to_string(),
            }
        }
    }

    fn list(&self) -> Result<Vec<SnapshotDescriptor>> {
        if !self.is_repository() || !self.has_commits("list_revisions")? {
            return Ok(Vec::new());
        }

        let log = self
            .git()
            .run_text("list_revisions", &["log", "--reverse", "--format=%H %ct"])?;
        let mut revisions = log
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(parse_log_line)
            .collect::<Result<Vec<_>>>()?;
        revisions.sort_by_key(|descriptor| descriptor.timestamp);

        debug!(revision_count = revisions.len(), "revisions listed");
        Ok(revisions)
    }

    fn load(&self, id: &RevisionId) -> Result<Snapshot> {
        validate_revision_id(id)?;
        if !self.is_repository() {
            return Err(revision_not_found(id.as_str()));
        }

        let git = self.git();
        let commit = format!("{}^{{commit}}", id);
        if !git.succeeds("load_revision", &["cat-file", "-e", &commit])? {
            return Err(revision_not_found(id.as_str()));
        }

        let ct = git.run_text("load_revision", &["show", "-s", "--format=%ct", id.as_str()])?;
        let timestamp = parse_epoch("load_revision", &ct)?;

        let present: BTreeSet<String> = git
            .run_text("load_revision", &["ls-tree", "--name-only", id.as_str()])?
            .lines()
            .map(str::to_string)
            .collect();

        let infra = self.read_graph(id, INFRA_FILE, &present)?;
        let access = self.read_graph(id, ACCESS_FILE, &present)?;
        debug!(revision_id = %id, "revision loaded");

        Ok(Snapshot::new(
            SnapshotDescriptor::new(id.clone(), timestamp),
            infra,
            access,
        ))
    }
}

/// Parse one `%H %ct` line of `git log`
fn parse_log_line(line: &str) -> Result<SnapshotDescriptor> {
    let (hash, ct) = line
        .trim()
        .split_once(' ')
        .ok_or_else(|| git_error("list_revisions", &format!("unexpected log line '{}'", line)))?;
    Ok(SnapshotDescriptor::new(hash, parse_epoch("list_revisions", ct)?))
}

fn parse_epoch(op: &str, text: &str) -> Result<DateTime<Utc>> {
    text.trim()
        .parse::<i64>()
        .ok()
        .and_then(|secs| Utc.timestamp_opt(secs, 0).single())
        .ok_or_else(|| git_error(op, &format!("unexpected commit timestamp '{}'", text)))
}

/// Revision ids are object hashes; anything else never reaches git's argv
fn validate_revision_id(id: &RevisionId) -> Result<()> {
    let raw = id.as_str();
    if raw.is_empty() || !raw.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ExError::new(ExErrorKind::InvalidInput)
            .with_op("load_revision")
            .with_entity_id(raw)
            .with_message("revision id must be a hexadecimal object hash"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_log_line() {
        let descriptor =
            parse_log_line("3f2a9c1d8e7b6a5f4e3d2c1b0a9f8e7d6c5b4a39 1772442000").unwrap();
        assert_eq!(descriptor.id.short(), "3f2a9c1");
        assert_eq!(
            descriptor.timestamp,
            Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_parse_log_line_rejects_garbage() {
        let err = parse_log_line("no-timestamp").unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::ExternalService);
        assert!(parse_log_line("abc notanumber").is_err());
    }

    #[test]
    fn test_revision_id_must_be_hex() {
        assert!(validate_revision_id(&RevisionId::new("0123abcdef")).is_ok());
        for bad in ["", "--all", "HEAD", "abc:infra.json"] {
            let err = validate_revision_id(&RevisionId::new(bad)).unwrap_err();
            assert_eq!(err.kind(), ExErrorKind::InvalidInput);
        }
    }

    #[test]
    fn test_missing_repository_lists_empty() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = GitRevisionStore::new(dir.path().join("history"));
        assert!(store.list().unwrap().is_empty());
        assert_eq!(
            store.load(&RevisionId::new("abc1234")).unwrap_err().kind(),
            ExErrorKind::NotFound
        );
    }
}
