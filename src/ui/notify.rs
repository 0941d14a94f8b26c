//! User-facing notifications.

use std::fmt;
use std::io::Write;

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};
use tracing::debug;

/// Notification group for git failures.
pub const GIT_ERROR_GROUP: &str = "GitErrorNotification";

/// Notification severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Informational message.
    Information,
    /// Something went wrong but nothing was lost.
    Warning,
    /// The requested operation failed.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Information => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// A message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Group the notification belongs to.
    pub group_id: String,
    /// Short title.
    pub title: String,
    /// Detail text.
    pub message: String,
    /// Severity.
    pub severity: Severity,
}

impl Notification {
    /// Creates an error notification in `group_id`.
    pub fn error(
        group_id: impl Into<String>,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            title: title.into(),
            message: message.into(),
            severity: Severity::Error,
        }
    }
}

/// Delivers notifications. Fire-and-forget.
pub trait Notifier: Send + Sync {
    /// Shows `notification` to the user.
    fn notify(&self, notification: Notification);
}

/// Writes notifications to stderr.
#[derive(Debug, Clone, Copy)]
pub struct TerminalNotifier {
    color: ColorChoice,
}

impl TerminalNotifier {
    /// Creates a notifier that colors output when stderr supports it.
    pub fn new() -> Self {
        let color = if std::io::IsTerminal::is_terminal(&std::io::stderr()) {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        Self { color }
    }

    fn write(&self, notification: &Notification) -> std::io::Result<()> {
        let mut stderr = StandardStream::stderr(self.color);
        let color = match notification.severity {
            Severity::Information => Color::Cyan,
            Severity::Warning => Color::Yellow,
            Severity::Error => Color::Red,
        };

        stderr.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
        write!(stderr, "[{}]", notification.severity)?;
        stderr.reset()?;
        writeln!(stderr, " {}: {}", notification.title, notification.message)
    }
}

impl Default for TerminalNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for TerminalNotifier {
    fn notify(&self, notification: Notification) {
        // stderr already carries the notification.
        debug!(
            group = %notification.group_id,
            title = %notification.title,
            severity = %notification.severity,
            "{}",
            notification.message
        );

        // Nowhere left to report a failing stderr.
        let _ = self.write(&notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_constructor_sets_severity() {
        let n = Notification::error(GIT_ERROR_GROUP, "Title", "Body");
        assert_eq!(n.severity, Severity::Error);
        assert_eq!(n.group_id, "GitErrorNotification");
        assert_eq!(n.title, "Title");
        assert_eq!(n.message, "Body");
    }

    #[test]
    fn terminal_notifier_delivers_every_severity() {
        let notifier = TerminalNotifier { color: ColorChoice::Never };
        for severity in [Severity::Information, Severity::Warning, Severity::Error] {
            notifier.notify(Notification {
                severity,
                ..Notification::error(GIT_ERROR_GROUP, "Title", "Body")
            });
        }
    }

    #[test]
    fn severity_labels() {
        assert_eq!(Severity::Information.to_string(), "info");
        assert_eq!(Severity::Warning.to_string(), "warning");
        assert_eq!(Severity::Error.to_string(), "error");
    }
}
