//! Repository discovery and the active-repository resolver.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use git2::Repository;
use tracing::debug;

/// A working-copy root together with its current branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryHandle {
    /// Working-copy root directory.
    pub root: PathBuf,
    /// Short name of the checked-out branch; `None` when HEAD is detached.
    pub branch: Option<String>,
}

impl RepositoryHandle {
    /// Creates a handle for `root` on `branch`.
    pub fn new(root: impl Into<PathBuf>, branch: Option<String>) -> Self {
        Self {
            root: root.into(),
            branch,
        }
    }

    /// Opens the repository containing `path` and reads its current branch.
    pub fn discover<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let repo = Repository::discover(path)
            .with_context(|| format!("Not in a git repository: {}", path.display()))?;

        let root = repo
            .workdir()
            .with_context(|| format!("Repository has no working copy: {}", path.display()))?
            .to_path_buf();

        Ok(Self {
            root,
            branch: current_branch(&repo),
        })
    }
}

/// Reads the branch HEAD points at.
///
/// An unborn branch still counts as the current branch; only a detached
/// HEAD yields `None`.
fn current_branch(repo: &Repository) -> Option<String> {
    let head = repo.find_reference("HEAD").ok()?;
    let target = head.symbolic_target()?;
    Some(
        target
            .strip_prefix("refs/heads/")
            .unwrap_or(target)
            .to_string(),
    )
}

/// The set of repositories the host environment knows about.
pub trait RepositoryEnvironment: Send + Sync {
    /// Returns every known repository, in priority order.
    fn repositories(&self) -> Vec<RepositoryHandle>;
}

/// Returns the repository the action should target, if any.
///
/// Side-effect free and cheap enough to call from both the availability
/// check and the workflow itself.
pub fn resolve(environment: &dyn RepositoryEnvironment) -> Option<RepositoryHandle> {
    environment.repositories().into_iter().next()
}

/// Environment backed by a list of filesystem paths.
///
/// Each path is resolved to its enclosing repository on every query, so the
/// reported branch always reflects the current on-disk state.
#[derive(Debug, Clone)]
pub struct WorkspaceEnvironment {
    paths: Vec<PathBuf>,
}

impl WorkspaceEnvironment {
    /// Creates an environment over `paths`.
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }

    /// Creates an environment over the current directory.
    pub fn current_dir() -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to determine current directory")?;
        Ok(Self::new(vec![cwd]))
    }
}

impl RepositoryEnvironment for WorkspaceEnvironment {
    fn repositories(&self) -> Vec<RepositoryHandle> {
        let mut handles: Vec<RepositoryHandle> = Vec::new();

        for path in &self.paths {
            match RepositoryHandle::discover(path) {
                Ok(handle) => {
                    if !handles.iter().any(|h| h.root == handle.root) {
                        handles.push(handle);
                    }
                }
                Err(e) => debug!(path = %path.display(), error = %e, "Skipping path"),
            }
        }

        handles
    }
}
