//! CLI interface for rename-commit.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use crate::git::{RepositoryEnvironment, WorkspaceEnvironment};

pub mod amend;
pub mod check;
pub mod show;

pub use amend::AmendCommand;
pub use check::CheckCommand;
pub use show::ShowCommand;

/// rename-commit: rewrite the message of the most recent commit.
#[derive(Parser)]
#[command(name = "rename-commit")]
#[command(about = "Rewrite the message of the most recent Git commit", long_about = None)]
#[command(version)]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Edits the HEAD commit message and amends the commit.
    Amend(AmendCommand),
    /// Reports whether the HEAD commit message can be edited.
    Check(CheckCommand),
    /// Prints the HEAD commit message.
    Show(ShowCommand),
}

impl Cli {
    /// Executes the CLI command and returns the process exit code.
    pub async fn execute(self) -> Result<i32> {
        match self.command {
            Commands::Amend(amend_cmd) => amend_cmd.execute().await,
            Commands::Check(check_cmd) => check_cmd.execute().await,
            Commands::Show(show_cmd) => show_cmd.execute(),
        }
    }
}

/// Repository selection shared by all commands.
#[derive(Args, Debug, Clone, Default)]
pub struct RepoArgs {
    /// Repository path; may be repeated, the first repository found is used.
    /// Defaults to the current directory.
    #[arg(long = "repo", value_name = "PATH")]
    pub repos: Vec<PathBuf>,
}

impl RepoArgs {
    /// Builds the repository environment these arguments describe.
    pub fn environment(&self) -> Result<Arc<dyn RepositoryEnvironment>> {
        let env = if self.repos.is_empty() {
            WorkspaceEnvironment::current_dir()?
        } else {
            WorkspaceEnvironment::new(self.repos.clone())
        };
        Ok(Arc::new(env))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_repeated_repo_flags() {
        let cli = Cli::try_parse_from([
            "rename-commit",
            "check",
            "--repo",
            "/a",
            "--repo",
            "/b",
        ])
        .unwrap();
        let Commands::Check(check) = cli.command else {
            panic!("expected check command");
        };
        assert_eq!(
            check.repo.repos,
            vec![PathBuf::from("/a"), PathBuf::from("/b")]
        );
    }

    #[test]
    fn message_and_stdin_conflict() {
        let result = Cli::try_parse_from([
            "rename-commit",
            "amend",
            "--message",
            "x",
            "--stdin",
        ]);
        assert!(result.is_err());
    }
}
