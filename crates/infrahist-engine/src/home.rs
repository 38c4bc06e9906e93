//! Home directory layout: `history/` repository and `defaults.db`

use infrahist_core::errors::{ExError, ExErrorKind, Result};
use infrahist_core::RegionSource;
use infrahist_store::{GitRevisionStore, SqliteDefaults};
use std::path::{Path, PathBuf};

/// Default home directory, relative to the working directory
pub const DEFAULT_HOME: &str = ".infrahist";

const HISTORY_DIR: &str = "history";
const DEFAULTS_DB: &str = "defaults.db";

/// Locates the revision repository and the defaults database
#[derive(Debug, Clone)]
pub struct Home {
    root: PathBuf,
}

impl Home {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn history_dir(&self) -> PathBuf {
        self.root.join(HISTORY_DIR)
    }

    pub fn defaults_path(&self) -> PathBuf {
        self.root.join(DEFAULTS_DB)
    }

    /// Revision store over `<home>/history`; nothing is created
    pub fn revision_store(&self) -> GitRevisionStore {
        GitRevisionStore::new(self.history_dir())
    }

    /// Open the defaults database, creating the home directory if needed
    pub fn open_defaults(&self) -> Result<SqliteDefaults> {
        std::fs::create_dir_all(&self.root).map_err(|e| {
            ExError::new(ExErrorKind::Io)
                .with_op("open_defaults")
                .with_entity_id(self.root.display().to_string())
                .with_message(e.to_string())
        })?;
        SqliteDefaults::open(self.defaults_path())
    }
}

/// Reads the region without creating the home or the database
impl RegionSource for Home {
    fn default_region(&self) -> Result<Option<String>> {
        let path = self.defaults_path();
        if !path.exists() {
            return Ok(None);
        }
        SqliteDefaults::open(path)?.default_region()
    }
}

impl Default for Home {
    fn default() -> Self {
        Self::new(DEFAULT_HOME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_under_root() {
        let home = Home::new("/tmp/h");
        assert_eq!(home.history_dir(), PathBuf::from("/tmp/h/history"));
        assert_eq!(home.defaults_path(), PathBuf::from("/tmp/h/defaults.db"));
        assert_eq!(Home::default().root(), Path::new(".infrahist"));
    }

    #[test]
    fn test_region_lookup_leaves_missing_home_alone() {
        let dir = tempfile::TempDir::new().unwrap();
        let home = Home::new(dir.path().join("absent"));
        assert_eq!(home.default_region().unwrap(), None);
        assert!(!home.root().exists());
    }

    #[test]
    fn test_region_read_through_home() {
        let dir = tempfile::TempDir::new().unwrap();
        let home = Home::new(dir.path());
        home.open_defaults()
            .unwrap()
            .set(infrahist_store::KEY_REGION, "ap-south-1")
            .unwrap();
        assert_eq!(home.default_region().unwrap().as_deref(), Some("ap-south-1"));
    }

    #[test]
    fn test_open_defaults_creates_home() {
        let dir = tempfile::TempDir::new().unwrap();
        let home = Home::new(dir.path().join("nested"));
        home.open_defaults().unwrap();
        assert!(home.defaults_path().exists());
    }
}
