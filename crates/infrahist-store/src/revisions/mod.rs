//! Git-backed revision store
//!
//! Each commit of the history repository is one snapshot, with the
//! infrastructure and access graphs as JSON files at the tree root.

mod atomic;
mod git;
mod store;

pub use atomic::atomic_write;
pub use git::git_installed;
pub use store::{GitRevisionStore, ACCESS_FILE, CREATION_MESSAGE, GIT_MISSING_REASON, INFRA_FILE};
