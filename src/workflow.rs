//! The amend workflow: resolve, fetch, prompt, validate, amend.
//!
//! The workflow is a strictly linear pipeline. It runs on a worker thread;
//! only the prompt stage hops to the UI thread, and the worker blocks until
//! the prompt's single answer comes back. Every failure is converted into a
//! [`WorkflowResult`] plus, where the operator needs to know, a notification.

pub mod message;

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::git::{
    amend_head_message, fetch_head_message, resolve, FetchError, GitBackend, MessagePolicy,
    RepositoryEnvironment,
};
use crate::ui::{EditPrompt, Notification, Notifier, UiThread, GIT_ERROR_GROUP};

pub use message::{normalize, prepare, ValidationError};

/// Title of notifications about reading the HEAD commit.
pub const FETCH_ERROR_TITLE: &str = "Error fetching last commit";

/// Title of notifications about changing the message.
pub const AMEND_ERROR_TITLE: &str = "Error changing commit message";

/// How one workflow run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowResult {
    /// The HEAD message was rewritten.
    Success,
    /// The operator dismissed the prompt.
    Cancelled,
    /// No repository is available; the action does not apply.
    NoRepository,
    /// The HEAD message could not be read.
    FetchFailed(FetchError),
    /// The replacement message was rejected.
    ValidationFailed(ValidationError),
    /// `git commit --amend` failed; carries git's own error text.
    BackendFailed(String),
}

impl WorkflowResult {
    /// Returns true for outcomes that were reported to the operator.
    pub fn is_reported(&self) -> bool {
        matches!(
            self,
            Self::FetchFailed(_) | Self::ValidationFailed(_) | Self::BackendFailed(_)
        )
    }
}

/// Speculatively checks whether the action applies.
///
/// Runs the resolve and fetch stages only. Failures are swallowed: an
/// unavailable action is simply hidden, never reported.
pub fn is_available(backend: &dyn GitBackend, environment: &dyn RepositoryEnvironment) -> bool {
    let Some(handle) = resolve(environment) else {
        debug!("Availability check: no repository");
        return false;
    };

    match fetch_head_message(backend, &handle) {
        Ok(_) => true,
        Err(e) => {
            debug!(root = %handle.root.display(), error = ?e, "Availability check failed");
            false
        }
    }
}

/// Runs [`is_available`] on the blocking pool and waits for the answer.
///
/// Needs neither a prompt nor a UI thread.
pub async fn check_availability(
    backend: Arc<dyn GitBackend>,
    environment: Arc<dyn RepositoryEnvironment>,
) -> bool {
    match tokio::task::spawn_blocking(move || is_available(backend.as_ref(), environment.as_ref()))
        .await
    {
        Ok(available) => available,
        Err(e) => {
            debug!(error = %e, "Availability check task failed");
            false
        }
    }
}

/// Rewrites the HEAD commit message through an edit prompt.
///
/// Holds no state between runs; the collaborators are shared handles, so
/// cloning is cheap and each clone can run independently.
#[derive(Clone)]
pub struct AmendWorkflow {
    backend: Arc<dyn GitBackend>,
    prompt: Arc<dyn EditPrompt>,
    notifier: Arc<dyn Notifier>,
    ui: UiThread,
    policy: MessagePolicy,
}

impl AmendWorkflow {
    /// Creates a workflow that flattens messages to one line.
    pub fn new(
        backend: Arc<dyn GitBackend>,
        prompt: Arc<dyn EditPrompt>,
        notifier: Arc<dyn Notifier>,
        ui: UiThread,
    ) -> Self {
        Self {
            backend,
            prompt,
            notifier,
            ui,
            policy: MessagePolicy::Flatten,
        }
    }

    /// Sets how the new message is handed to git.
    pub fn with_policy(mut self, policy: MessagePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the message policy in effect.
    pub fn policy(&self) -> MessagePolicy {
        self.policy
    }

    /// Speculatively checks whether the action applies.
    ///
    /// See [`is_available`](crate::workflow::is_available).
    pub fn is_available(&self, environment: &dyn RepositoryEnvironment) -> bool {
        is_available(self.backend.as_ref(), environment)
    }

    /// Runs the availability check on the blocking pool and waits for the
    /// answer.
    pub async fn check_availability(&self, environment: Arc<dyn RepositoryEnvironment>) -> bool {
        check_availability(Arc::clone(&self.backend), environment).await
    }

    /// Runs the whole workflow on the current thread.
    ///
    /// Must not be called from the UI thread: the prompt stage blocks until
    /// the UI thread answers.
    pub fn run(&self, environment: &dyn RepositoryEnvironment) -> WorkflowResult {
        let Some(handle) = resolve(environment) else {
            debug!("No repository, nothing to amend");
            return WorkflowResult::NoRepository;
        };

        let current = match fetch_head_message(self.backend.as_ref(), &handle) {
            Ok(message) => message,
            Err(e) => {
                if let FetchError::BackendError(detail) = &e {
                    warn!(root = %handle.root.display(), %detail, "Reading HEAD message failed");
                }
                self.report(FETCH_ERROR_TITLE, e.to_string());
                return WorkflowResult::FetchFailed(e);
            }
        };

        let prompt = Arc::clone(&self.prompt);
        let answer = self
            .ui
            .invoke_and_wait(move || prompt.show_edit_dialog(&current));

        let edited = match answer {
            Ok(Some(message)) => message,
            Ok(None) => {
                debug!("Prompt cancelled");
                return WorkflowResult::Cancelled;
            }
            Err(e) => {
                warn!(error = %e, "Prompt did not answer, treating as cancelled");
                return WorkflowResult::Cancelled;
            }
        };

        let message = match prepare(&edited, self.policy) {
            Ok(message) => message,
            Err(e) => {
                self.report(AMEND_ERROR_TITLE, e.to_string());
                return WorkflowResult::ValidationFailed(e);
            }
        };

        match amend_head_message(self.backend.as_ref(), &handle, &message, self.policy) {
            Ok(()) => {
                info!(root = %handle.root.display(), "Amended HEAD commit message");
                WorkflowResult::Success
            }
            Err(e) => {
                self.report(AMEND_ERROR_TITLE, e.to_string());
                WorkflowResult::BackendFailed(e.detail)
            }
        }
    }

    /// Runs [`run`](Self::run) on the blocking pool and waits for the result.
    pub async fn run_in_background(
        &self,
        environment: Arc<dyn RepositoryEnvironment>,
    ) -> WorkflowResult {
        let workflow = self.clone();
        match tokio::task::spawn_blocking(move || workflow.run(environment.as_ref())).await {
            Ok(result) => result,
            Err(e) => {
                let detail = format!("Workflow task failed: {e}");
                self.report(AMEND_ERROR_TITLE, detail.clone());
                WorkflowResult::BackendFailed(detail)
            }
        }
    }

    fn report(&self, title: &str, message: String) {
        self.notifier
            .notify(Notification::error(GIT_ERROR_GROUP, title, message));
    }
}
