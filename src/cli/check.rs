//! Check command: reports whether the HEAD commit message can be edited.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use super::RepoArgs;
use crate::git::CliGitBackend;
use crate::workflow::check_availability;

/// Check command options.
#[derive(Parser)]
pub struct CheckCommand {
    /// Repository selection.
    #[command(flatten)]
    pub repo: RepoArgs,

    /// Prints nothing; only the exit code reports the answer.
    #[arg(long, short)]
    pub quiet: bool,
}

impl CheckCommand {
    /// Executes the check command. Exits 0 when available, 1 otherwise.
    pub async fn execute(self) -> Result<i32> {
        let environment = self.repo.environment()?;

        let available =
            check_availability(Arc::new(CliGitBackend::from_settings()), environment).await;
        if !self.quiet {
            println!("{}", if available { "available" } else { "unavailable" });
        }

        Ok(i32::from(!available))
    }
}
