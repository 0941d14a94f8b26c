//! Git operations: repository discovery, command execution and the HEAD
//! commit message.

pub mod backend;
pub mod commit;
pub mod repository;

pub use backend::{CliGitBackend, GitBackend, GitCommandResult};
pub use commit::{amend_head_message, fetch_head_message, AmendError, FetchError, MessagePolicy};
pub use repository::{resolve, RepositoryEnvironment, RepositoryHandle, WorkspaceEnvironment};
