//! Show command: prints the HEAD commit message.

use anyhow::{Context, Result};
use clap::Parser;

use super::RepoArgs;
use crate::git::{fetch_head_message, resolve, CliGitBackend};

/// Show command options.
#[derive(Parser)]
pub struct ShowCommand {
    /// Repository selection.
    #[command(flatten)]
    pub repo: RepoArgs,
}

impl ShowCommand {
    /// Executes the show command.
    pub fn execute(self) -> Result<i32> {
        let environment = self.repo.environment()?;
        let handle = resolve(environment.as_ref()).context("Not in a git repository")?;

        let message = fetch_head_message(&CliGitBackend::from_settings(), &handle)
            .with_context(|| format!("Failed to read HEAD of {}", handle.root.display()))?;

        println!("{message}");
        Ok(0)
    }
}
