//! Shared test doubles for the git backend and user-facing collaborators.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::git::backend::{GitBackend, GitCommandResult};
use crate::ui::notify::{Notification, Notifier};

/// A git invocation captured by [`FakeGitBackend`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RecordedCall {
    pub(crate) command: String,
    pub(crate) args: Vec<String>,
}

#[derive(Default)]
struct FakeState {
    head: Option<String>,
    overrides: HashMap<String, GitCommandResult>,
    calls: Vec<RecordedCall>,
    amends: Vec<String>,
}

/// In-memory git backend holding a single HEAD commit message.
///
/// Understands `rev-parse`, `log` and `commit --amend` (both `-m` and `-F`).
/// Any command can be forced to a canned result with
/// [`set_response`](Self::set_response).
#[derive(Clone, Default)]
pub(crate) struct FakeGitBackend {
    state: Arc<Mutex<FakeState>>,
}

impl FakeGitBackend {
    /// A repository whose branch has no commits.
    pub(crate) fn empty() -> Self {
        Self::default()
    }

    /// A repository whose HEAD commit carries `message`.
    pub(crate) fn with_head(message: &str) -> Self {
        let backend = Self::default();
        backend.state.lock().unwrap().head = Some(message.to_string());
        backend
    }

    pub(crate) fn set_response(&self, command: &str, result: GitCommandResult) {
        self.state
            .lock()
            .unwrap()
            .overrides
            .insert(command.to_string(), result);
    }

    pub(crate) fn fail_command(&self, command: &str, detail: &str) {
        self.set_response(command, GitCommandResult::failed(detail));
    }

    pub(crate) fn calls(&self) -> Vec<RecordedCall> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Messages passed to successful `commit --amend` calls, in order.
    pub(crate) fn amend_messages(&self) -> Vec<String> {
        self.state.lock().unwrap().amends.clone()
    }

    pub(crate) fn head_message(&self) -> Option<String> {
        self.state.lock().unwrap().head.clone()
    }
}

impl GitBackend for FakeGitBackend {
    fn run_command(&self, _root: &Path, command: &str, args: &[&str]) -> GitCommandResult {
        let mut state = self.state.lock().unwrap();
        state.calls.push(RecordedCall {
            command: command.to_string(),
            args: args.iter().map(ToString::to_string).collect(),
        });

        if let Some(result) = state.overrides.get(command) {
            return result.clone();
        }

        match command {
            "rev-parse" => match state.head {
                Some(_) => GitCommandResult::ok("0123456789abcdef0123456789abcdef01234567\n"),
                None => GitCommandResult::failed(""),
            },
            "log" => match &state.head {
                Some(message) => GitCommandResult::ok(format!("{message}\n\n")),
                None => GitCommandResult::failed("fatal: your current branch does not have any commits yet"),
            },
            "commit" => {
                if state.head.is_none() {
                    return GitCommandResult::failed("fatal: You have nothing to amend.");
                }
                let message = match args {
                    ["--amend", "-m", message] => (*message).to_string(),
                    ["--amend", "-F", path] => match std::fs::read_to_string(path) {
                        Ok(contents) => contents,
                        Err(e) => return GitCommandResult::failed(e.to_string()),
                    },
                    _ => return GitCommandResult::failed("unsupported commit arguments"),
                };
                state.head = Some(message.clone());
                state.amends.push(message);
                GitCommandResult::ok("")
            }
            other => GitCommandResult::failed(format!("unsupported command: {other}")),
        }
    }
}

/// Notifier that keeps every notification for later inspection.
#[derive(Clone, Default)]
pub(crate) struct RecordingNotifier {
    notifications: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingNotifier {
    pub(crate) fn notifications(&self) -> Vec<Notification> {
        self.notifications.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.notifications.lock().unwrap().push(notification);
    }
}
