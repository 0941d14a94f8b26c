//! Reading and amending the HEAD commit message.

use std::io::Write;

use thiserror::Error;
use tracing::{debug, warn};

use crate::git::backend::GitBackend;
use crate::git::repository::RepositoryHandle;

/// Detail shown to the user when a git command fails.
pub const GIT_COMMAND_FAILED: &str = "There was a problem executing a git command.";

/// Reasons the HEAD commit message could not be read.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// HEAD is detached, so there is no branch to amend on.
    #[error("No current branch")]
    NoBranch,

    /// The current branch has no commits yet.
    #[error("No commits found")]
    NoCommits,

    /// The git query itself failed.
    #[error("There was a problem executing a git command.")]
    BackendError(String),
}

/// Failure of the amend command.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("There was a problem executing a git command.")]
pub struct AmendError {
    /// Error text reported by git.
    pub detail: String,
}

/// How the new message is handed to `git commit --amend`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MessagePolicy {
    /// Newlines are replaced by spaces and the message is passed with `-m`.
    #[default]
    Flatten,
    /// Newlines are kept and the message is passed through a file with `-F`.
    PreserveLines,
}

/// Returns the full message of the HEAD commit.
///
/// Only issues read-only queries, so it is safe to call speculatively.
pub fn fetch_head_message(
    backend: &dyn GitBackend,
    handle: &RepositoryHandle,
) -> Result<String, FetchError> {
    if handle.branch.is_none() {
        return Err(FetchError::NoBranch);
    }

    // With --quiet an unresolvable HEAD fails silently; anything on stderr
    // means git itself could not answer.
    let head = backend.run_command(&handle.root, "rev-parse", &["--verify", "--quiet", "HEAD"]);
    if !head.success {
        if head.error_detail.trim().is_empty() {
            return Err(FetchError::NoCommits);
        }
        return Err(FetchError::BackendError(head.error_detail));
    }

    let log = backend.run_command(&handle.root, "log", &["-1", "--format=%B", "HEAD"]);
    if !log.success {
        return Err(FetchError::BackendError(log.error_detail));
    }

    let message = log.output.trim_end().to_string();
    debug!(root = %handle.root.display(), len = message.len(), "Fetched HEAD message");
    Ok(message)
}

/// Rewrites the HEAD commit message.
pub fn amend_head_message(
    backend: &dyn GitBackend,
    handle: &RepositoryHandle,
    message: &str,
    policy: MessagePolicy,
) -> Result<(), AmendError> {
    let result = match policy {
        MessagePolicy::Flatten => {
            backend.run_command(&handle.root, "commit", &["--amend", "-m", message])
        }
        MessagePolicy::PreserveLines => {
            let file = write_message_file(message).map_err(|e| AmendError {
                detail: format!("Failed to write message file: {e}"),
            })?;
            let path = file.path().to_string_lossy().into_owned();
            backend.run_command(&handle.root, "commit", &["--amend", "-F", &path])
        }
    };

    if result.success {
        Ok(())
    } else {
        warn!(
            root = %handle.root.display(),
            detail = %result.error_detail,
            "git commit --amend failed"
        );
        Err(AmendError {
            detail: result.error_detail,
        })
    }
}

fn write_message_file(message: &str) -> std::io::Result<tempfile::NamedTempFile> {
    let mut file = tempfile::Builder::new()
        .prefix("rename-commit-")
        .suffix(".txt")
        .tempfile()?;
    file.write_all(message.as_bytes())?;
    file.flush()?;
    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::backend::GitCommandResult;
    use crate::test_utils::FakeGitBackend;

    fn on_branch() -> RepositoryHandle {
        RepositoryHandle::new("/repo", Some("main".to_string()))
    }

    #[test]
    fn fetch_detached_head_is_no_branch() {
        let backend = FakeGitBackend::with_head("msg");
        let handle = RepositoryHandle::new("/repo", None);
        assert_eq!(
            fetch_head_message(&backend, &handle),
            Err(FetchError::NoBranch)
        );
        assert!(backend.calls().is_empty());
    }

    #[test]
    fn fetch_without_commits_is_no_commits() {
        let backend = FakeGitBackend::empty();
        assert_eq!(
            fetch_head_message(&backend, &on_branch()),
            Err(FetchError::NoCommits)
        );
    }

    #[test]
    fn fetch_rev_parse_error_is_backend_error() {
        let backend = FakeGitBackend::with_head("msg");
        backend.fail_command(
            "rev-parse",
            "fatal: detected dubious ownership in repository at '/repo'",
        );
        assert_eq!(
            fetch_head_message(&backend, &on_branch()),
            Err(FetchError::BackendError(
                "fatal: detected dubious ownership in repository at '/repo'".to_string()
            ))
        );
    }

    #[test]
    fn fetch_with_missing_git_binary_is_backend_error() {
        let dir = tempfile::tempdir().unwrap();
        git2::Repository::init(dir.path()).unwrap();
        let handle = RepositoryHandle::discover(dir.path()).unwrap();

        let backend = crate::git::CliGitBackend::new("rename-commit-no-such-git-binary");
        assert!(matches!(
            fetch_head_message(&backend, &handle),
            Err(FetchError::BackendError(_))
        ));
    }

    #[test]
    fn fetch_log_failure_is_backend_error() {
        let backend = FakeGitBackend::with_head("msg");
        backend.fail_command("log", "fatal: bad object");
        assert_eq!(
            fetch_head_message(&backend, &on_branch()),
            Err(FetchError::BackendError("fatal: bad object".to_string()))
        );
    }

    #[test]
    fn fetch_trims_trailing_newlines() {
        let backend = FakeGitBackend::with_head("fix bug\n\nmore detail");
        assert_eq!(
            fetch_head_message(&backend, &on_branch()).unwrap(),
            "fix bug\n\nmore detail"
        );
    }

    #[test]
    fn fetch_is_read_only() {
        let backend = FakeGitBackend::with_head("msg");
        fetch_head_message(&backend, &on_branch()).unwrap();
        fetch_head_message(&backend, &on_branch()).unwrap();
        assert!(backend.amend_messages().is_empty());
        assert_eq!(backend.head_message().as_deref(), Some("msg"));
    }

    #[test]
    fn amend_flatten_uses_message_flag() {
        let backend = FakeGitBackend::with_head("old");
        amend_head_message(&backend, &on_branch(), "new", MessagePolicy::Flatten).unwrap();

        let calls = backend.calls();
        let last = calls.last().unwrap();
        assert_eq!(last.command, "commit");
        assert_eq!(last.args, vec!["--amend", "-m", "new"]);
        assert_eq!(backend.head_message().as_deref(), Some("new"));
    }

    #[test]
    fn amend_preserve_lines_uses_file_flag() {
        let backend = FakeGitBackend::with_head("old");
        amend_head_message(
            &backend,
            &on_branch(),
            "subject\n\nbody",
            MessagePolicy::PreserveLines,
        )
        .unwrap();

        let calls = backend.calls();
        let last = calls.last().unwrap();
        assert_eq!(last.args[0], "--amend");
        assert_eq!(last.args[1], "-F");
        assert_eq!(backend.head_message().as_deref(), Some("subject\n\nbody"));
    }

    #[test]
    fn amend_failure_keeps_git_detail() {
        let backend = FakeGitBackend::with_head("old");
        backend.set_response(
            "commit",
            GitCommandResult::failed("error: unable to write"),
        );
        let err =
            amend_head_message(&backend, &on_branch(), "new", MessagePolicy::Flatten).unwrap_err();
        assert_eq!(err.detail, "error: unable to write");
        assert_eq!(err.to_string(), GIT_COMMAND_FAILED);
    }
}
