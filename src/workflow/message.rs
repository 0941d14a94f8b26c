//! Normalization and validation of the replacement message.

use thiserror::Error;

use crate::git::MessagePolicy;

/// Reasons a replacement message is rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Nothing but whitespace remained after normalization.
    #[error("Empty commit message not allowed.")]
    EmptyMessage,
}

/// Replaces every newline with a single space.
///
/// Idempotent: the output contains no newlines.
pub fn normalize(message: &str) -> String {
    message.replace('\n', " ")
}

/// Applies `policy` to `message` and rejects blank results.
pub fn prepare(message: &str, policy: MessagePolicy) -> Result<String, ValidationError> {
    let prepared = match policy {
        MessagePolicy::Flatten => normalize(message),
        MessagePolicy::PreserveLines => message.to_string(),
    };

    if prepared.trim().is_empty() {
        return Err(ValidationError::EmptyMessage);
    }

    Ok(prepared)
}
