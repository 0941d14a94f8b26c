//! # rename-commit
//!
//! Rewrites the message of the most recent Git commit.
//!
//! The [`workflow::AmendWorkflow`] reads the HEAD message, hands it to an
//! edit prompt on a dedicated UI thread, validates the answer and runs
//! `git commit --amend`. Git, the prompt and notifications are injected
//! collaborators, so the workflow runs the same against a real repository
//! or a test double.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use rename_commit::git::{CliGitBackend, WorkspaceEnvironment};
//! use rename_commit::ui::{FixedPrompt, TerminalNotifier, UiThread};
//! use rename_commit::workflow::AmendWorkflow;
//!
//! let (ui, _ui_handle) = UiThread::spawn()?;
//! let workflow = AmendWorkflow::new(
//!     Arc::new(CliGitBackend::default()),
//!     Arc::new(FixedPrompt::submit("Fix the parser")),
//!     Arc::new(TerminalNotifier::new()),
//!     ui,
//! );
//! let result = workflow.run(&WorkspaceEnvironment::current_dir()?);
//! println!("{result:?}");
//! # Ok::<(), anyhow::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod cli;
pub mod git;
pub mod ui;
pub mod utils;
pub mod workflow;

#[cfg(test)]
pub(crate) mod test_utils;

pub use crate::cli::Cli;

/// The current version of rename-commit.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
