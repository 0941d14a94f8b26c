//! Git command execution.

use std::path::Path;
use std::process::Command;

use tracing::debug;

use crate::utils::settings::get_env_var;

/// Environment variable (or settings key) naming the git binary.
pub const GIT_BINARY_VAR: &str = "RENAME_COMMIT_GIT";

/// Outcome of a single git invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitCommandResult {
    /// Whether the command exited successfully.
    pub success: bool,
    /// Captured standard output.
    pub output: String,
    /// Error text reported by git, or the reason the command could not run.
    pub error_detail: String,
}

impl GitCommandResult {
    /// Creates a successful result carrying `output`.
    pub fn ok(output: impl Into<String>) -> Self {
        Self {
            success: true,
            output: output.into(),
            error_detail: String::new(),
        }
    }

    /// Creates a failed result carrying `error_detail`.
    pub fn failed(error_detail: impl Into<String>) -> Self {
        Self {
            success: false,
            output: String::new(),
            error_detail: error_detail.into(),
        }
    }
}

/// Executes git commands against a working-copy root.
///
/// Implementations report every failure through [`GitCommandResult`]
/// rather than returning an error, so callers decide how each failure
/// maps onto their own error taxonomy.
pub trait GitBackend: Send + Sync {
    /// Runs `git <command> <args..>` inside `root`.
    fn run_command(&self, root: &Path, command: &str, args: &[&str]) -> GitCommandResult;
}

/// Backend that shells out to the git executable.
#[derive(Debug, Clone)]
pub struct CliGitBackend {
    git_binary: String,
}

impl CliGitBackend {
    /// Creates a backend using the given git executable.
    pub fn new(git_binary: impl Into<String>) -> Self {
        Self {
            git_binary: git_binary.into(),
        }
    }

    /// Creates a backend using the configured git executable, falling back to `git`.
    pub fn from_settings() -> Self {
        let git_binary = get_env_var(GIT_BINARY_VAR).unwrap_or_else(|_| "git".to_string());
        Self::new(git_binary)
    }

    /// Returns the git executable this backend invokes.
    pub fn git_binary(&self) -> &str {
        &self.git_binary
    }
}

impl Default for CliGitBackend {
    fn default() -> Self {
        Self::new("git")
    }
}

impl GitBackend for CliGitBackend {
    fn run_command(&self, root: &Path, command: &str, args: &[&str]) -> GitCommandResult {
        debug!(
            root = %root.display(),
            command,
            ?args,
            "Running git command"
        );

        let output = match Command::new(&self.git_binary)
            .arg("-C")
            .arg(root)
            .arg(command)
            .args(args)
            .output()
        {
            Ok(output) => output,
            Err(e) => {
                debug!(error = %e, "Failed to spawn git");
                return GitCommandResult::failed(format!(
                    "Failed to execute {}: {e}",
                    self.git_binary
                ));
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        if output.status.success() {
            GitCommandResult::ok(stdout)
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            debug!(status = ?output.status.code(), stderr = %stderr, "git command failed");
            GitCommandResult {
                success: false,
                output: stdout,
                error_detail: stderr,
            }
        }
    }
}
