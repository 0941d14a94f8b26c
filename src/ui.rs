//! Operator-facing collaborators: the UI thread, edit prompts and
//! notifications.

pub mod notify;
pub mod prompt;
pub mod thread;

pub use notify::{Notification, Notifier, Severity, TerminalNotifier, GIT_ERROR_GROUP};
pub use prompt::{EditPrompt, EditorPrompt, FixedPrompt, ReaderPrompt};
pub use thread::{UiError, UiThread};
