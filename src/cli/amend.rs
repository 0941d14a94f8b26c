//! Amend command: edits the HEAD commit message and amends the commit.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;

use super::RepoArgs;
use crate::git::{CliGitBackend, MessagePolicy};
use crate::ui::{EditPrompt, EditorPrompt, FixedPrompt, ReaderPrompt, TerminalNotifier, UiThread};
use crate::workflow::{AmendWorkflow, WorkflowResult};

/// Exit code when a failure was reported to the operator.
pub const EXIT_REPORTED_FAILURE: i32 = 1;

/// Exit code when there is no repository to act on.
pub const EXIT_NO_REPOSITORY: i32 = 2;

/// Amend command options.
#[derive(Parser)]
pub struct AmendCommand {
    /// Repository selection.
    #[command(flatten)]
    pub repo: RepoArgs,

    /// Uses this message instead of prompting.
    #[arg(long, short = 'm', value_name = "TEXT", conflicts_with = "stdin")]
    pub message: Option<String>,

    /// Reads the new message from standard input.
    #[arg(long)]
    pub stdin: bool,

    /// Editor command to use instead of RENAME_COMMIT_EDITOR / EDITOR.
    #[arg(long, value_name = "COMMAND", conflicts_with_all = ["message", "stdin"])]
    pub editor: Option<String>,

    /// Keeps line breaks instead of joining the message into one line.
    #[arg(long)]
    pub keep_newlines: bool,
}

impl AmendCommand {
    /// Executes the amend command.
    pub async fn execute(self) -> Result<i32> {
        let environment = self.repo.environment()?;
        let (ui, ui_handle) = UiThread::spawn().context("Failed to start UI thread")?;

        let workflow = AmendWorkflow::new(
            Arc::new(CliGitBackend::from_settings()),
            self.prompt(),
            Arc::new(TerminalNotifier::new()),
            ui,
        )
        .with_policy(self.policy());

        let result = workflow.run_in_background(environment).await;
        debug!(?result, "Amend workflow finished");
        if result == WorkflowResult::NoRepository {
            eprintln!("Not in a git repository");
        }

        // Dropping the last handle lets the UI thread drain and exit.
        drop(workflow);
        if ui_handle.join().is_err() {
            debug!("UI thread panicked");
        }

        Ok(Self::exit_code(&result))
    }

    fn prompt(&self) -> Arc<dyn EditPrompt> {
        if let Some(message) = &self.message {
            Arc::new(FixedPrompt::submit(message.clone()))
        } else if self.stdin {
            Arc::new(ReaderPrompt::stdin())
        } else if let Some(editor) = &self.editor {
            Arc::new(EditorPrompt::with_editor(editor.clone()))
        } else {
            Arc::new(EditorPrompt::default())
        }
    }

    fn policy(&self) -> MessagePolicy {
        if self.keep_newlines {
            MessagePolicy::PreserveLines
        } else {
            MessagePolicy::Flatten
        }
    }

    /// Maps a workflow result onto the process exit code.
    pub fn exit_code(result: &WorkflowResult) -> i32 {
        match result {
            WorkflowResult::Success | WorkflowResult::Cancelled => 0,
            WorkflowResult::NoRepository => EXIT_NO_REPOSITORY,
            WorkflowResult::FetchFailed(_)
            | WorkflowResult::ValidationFailed(_)
            | WorkflowResult::BackendFailed(_) => EXIT_REPORTED_FAILURE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::FetchError;
    use crate::workflow::ValidationError;

    #[test]
    fn exit_codes() {
        assert_eq!(AmendCommand::exit_code(&WorkflowResult::Success), 0);
        assert_eq!(AmendCommand::exit_code(&WorkflowResult::Cancelled), 0);
        assert_eq!(
            AmendCommand::exit_code(&WorkflowResult::NoRepository),
            EXIT_NO_REPOSITORY
        );
        assert_eq!(
            AmendCommand::exit_code(&WorkflowResult::FetchFailed(FetchError::NoCommits)),
            EXIT_REPORTED_FAILURE
        );
        assert_eq!(
            AmendCommand::exit_code(&WorkflowResult::ValidationFailed(
                ValidationError::EmptyMessage
            )),
            EXIT_REPORTED_FAILURE
        );
        assert_eq!(
            AmendCommand::exit_code(&WorkflowResult::BackendFailed(String::new())),
            EXIT_REPORTED_FAILURE
        );
    }
}
