//! Prompts that collect a replacement commit message.
//!
//! A prompt receives the current message as its initial value and returns
//! the operator's edit, or `None` when the operator cancels. Prompts are
//! always invoked on the UI thread.

use std::env;
use std::fs;
use std::io::{self, BufRead, IsTerminal, Read, Write};
use std::process::Command;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::utils::settings::get_env_var;

/// Environment variable (or settings key) naming the preferred editor.
pub const EDITOR_VAR: &str = "RENAME_COMMIT_EDITOR";

const COMMENT_HELP: &str = "\n\
# Enter the new commit message.\n\
# Lines starting with '#' are ignored. Exit without saving to keep the\n\
# current message, or quit the editor with an error to cancel.\n";

/// Collects a replacement commit message from the operator.
pub trait EditPrompt: Send + Sync {
    /// Shows `initial_text` for editing and blocks until the operator is done.
    ///
    /// Returns `None` when the operator cancels.
    fn show_edit_dialog(&self, initial_text: &str) -> Option<String>;
}

/// Prompt that answers with a message fixed up front.
#[derive(Debug, Clone)]
pub struct FixedPrompt {
    message: Option<String>,
}

impl FixedPrompt {
    /// Always submits `message`.
    pub fn submit(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }

    /// Always cancels.
    pub fn cancel() -> Self {
        Self { message: None }
    }
}

impl EditPrompt for FixedPrompt {
    fn show_edit_dialog(&self, _initial_text: &str) -> Option<String> {
        self.message.clone()
    }
}

/// Prompt that reads the new message from a stream until end of input.
///
/// An empty stream cancels.
pub struct ReaderPrompt {
    reader: Mutex<Box<dyn BufRead + Send>>,
    interactive: bool,
}

impl ReaderPrompt {
    /// Creates a prompt over `reader`. When `interactive` is set the current
    /// message and instructions are printed first.
    pub fn new(reader: Box<dyn BufRead + Send>, interactive: bool) -> Self {
        Self {
            reader: Mutex::new(reader),
            interactive,
        }
    }

    /// Creates a prompt reading from standard input.
    pub fn stdin() -> Self {
        let interactive = io::stdin().is_terminal();
        Self::new(Box::new(io::BufReader::new(io::stdin())), interactive)
    }

    fn read_message(&self, initial_text: &str) -> Result<Option<String>> {
        if self.interactive {
            println!("Current commit message:");
            println!("{initial_text}");
            println!();
            println!("Enter new commit message (end with Ctrl-D, empty input cancels):");
            io::stdout().flush().context("Failed to flush stdout")?;
        }

        let mut reader = self
            .reader
            .lock()
            .map_err(|_| anyhow::anyhow!("Prompt input is poisoned"))?;

        let mut input = String::new();
        let bytes = reader
            .read_to_string(&mut input)
            .context("Failed to read commit message")?;
        if bytes == 0 {
            return Ok(None);
        }

        Ok(Some(strip_trailing_newline(&input).to_string()))
    }
}

impl EditPrompt for ReaderPrompt {
    fn show_edit_dialog(&self, initial_text: &str) -> Option<String> {
        match self.read_message(initial_text) {
            Ok(message) => message,
            Err(e) => {
                warn!(error = %e, "Reading commit message failed");
                eprintln!("❌ {e}");
                None
            }
        }
    }
}

/// Prompt that opens the message in an external editor.
#[derive(Debug, Clone, Default)]
pub struct EditorPrompt {
    editor: Option<String>,
}

impl EditorPrompt {
    /// Uses `editor` instead of looking one up.
    pub fn with_editor(editor: impl Into<String>) -> Self {
        Self {
            editor: Some(editor.into()),
        }
    }

    /// Resolves the editor command: explicit choice, then
    /// `RENAME_COMMIT_EDITOR`, `EDITOR` and finally `VISUAL`.
    pub fn resolve_editor(&self) -> Option<String> {
        self.editor
            .clone()
            .or_else(|| get_env_var(EDITOR_VAR).ok())
            .or_else(|| get_env_var("EDITOR").ok())
            .or_else(|| env::var("VISUAL").ok())
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty())
    }

    fn edit(&self, editor: &str, initial_text: &str) -> Result<Option<String>> {
        let file = tempfile::Builder::new()
            .prefix("RENAME_COMMIT_EDITMSG-")
            .suffix(".txt")
            .tempfile()
            .context("Failed to create message file")?;

        fs::write(file.path(), format!("{initial_text}\n{COMMENT_HELP}"))
            .context("Failed to write message file")?;

        let (editor_cmd, args) = parse_editor_command(editor);
        debug!(editor = editor_cmd, ?args, path = %file.path().display(), "Launching editor");

        let status = Command::new(editor_cmd)
            .args(args)
            .arg(file.path())
            .status()
            .with_context(|| format!("Failed to execute editor '{editor}'"))?;

        if !status.success() {
            println!(
                "⚠️  Editor exited with non-zero status: {:?}",
                status.code()
            );
            return Ok(None);
        }

        let contents = fs::read_to_string(file.path()).context("Failed to read message file")?;
        Ok(Some(strip_comments(&contents)))
    }
}

impl EditPrompt for EditorPrompt {
    fn show_edit_dialog(&self, initial_text: &str) -> Option<String> {
        let Some(editor) = self.resolve_editor() else {
            eprintln!(
                "❌ No editor configured. Set {EDITOR_VAR} or EDITOR, or pass --message."
            );
            return None;
        };

        match self.edit(&editor, initial_text) {
            Ok(message) => message,
            Err(e) => {
                warn!(error = %e, "Editor prompt failed");
                eprintln!("❌ {e}");
                eprintln!("   Please check that the editor command is correct and available in your PATH.");
                None
            }
        }
    }
}

/// Splits an editor setting such as `code --wait` into command and arguments.
pub(crate) fn parse_editor_command(editor: &str) -> (&str, Vec<&str>) {
    let mut parts = editor.split_whitespace();
    let cmd = parts.next().unwrap_or(editor);
    let args: Vec<&str> = parts.collect();
    (cmd, args)
}

/// Drops `#` comment lines and trailing blank space left by the editor.
fn strip_comments(contents: &str) -> String {
    contents
        .lines()
        .filter(|line| !line.starts_with('#'))
        .collect::<Vec<_>>()
        .join("\n")
        .trim_end()
        .to_string()
}

fn strip_trailing_newline(input: &str) -> &str {
    input
        .strip_suffix("\r\n")
        .or_else(|| input.strip_suffix('\n'))
        .unwrap_or(input)
}
