//! The UI-affine execution context.
//!
//! Everything that talks to the user runs on one dedicated thread. Worker
//! threads hand it jobs with [`UiThread::invoke_later`], or block on a
//! one-shot reply with [`UiThread::invoke_and_wait`].

use std::thread::{self, JoinHandle, ThreadId};

use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::debug;

type Job = Box<dyn FnOnce() + Send + 'static>;

/// Failures of the UI hand-off.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UiError {
    /// The UI thread has stopped accepting work.
    #[error("UI thread is no longer running")]
    Closed,

    /// The job was dropped before producing a result, e.g. it panicked.
    #[error("UI job finished without producing a result")]
    NoReply,

    /// `invoke_and_wait` was called from the UI thread itself.
    #[error("Cannot wait for the UI thread from the UI thread")]
    Reentrant,
}

/// Handle to the single UI thread.
///
/// Cloning is cheap; the thread keeps running until every handle is dropped.
#[derive(Clone)]
pub struct UiThread {
    sender: mpsc::UnboundedSender<Job>,
    thread_id: ThreadId,
}

impl UiThread {
    /// Starts the UI thread.
    pub fn spawn() -> std::io::Result<(Self, JoinHandle<()>)> {
        let (sender, mut receiver) = mpsc::unbounded_channel::<Job>();
        let handle = thread::Builder::new()
            .name("ui".to_string())
            .spawn(move || {
                while let Some(job) = receiver.blocking_recv() {
                    job();
                }
                debug!("UI thread shutting down");
            })?;

        let ui = Self {
            sender,
            thread_id: handle.thread().id(),
        };
        Ok((ui, handle))
    }

    /// Returns true when called on the UI thread.
    pub fn is_ui_thread(&self) -> bool {
        thread::current().id() == self.thread_id
    }

    /// Queues `job` to run on the UI thread and returns immediately.
    pub fn invoke_later<F>(&self, job: F) -> Result<(), UiError>
    where
        F: FnOnce() + Send + 'static,
    {
        self.sender.send(Box::new(job)).map_err(|_| UiError::Closed)
    }

    /// Runs `f` on the UI thread and blocks until its result comes back.
    ///
    /// Exactly one value crosses back to the caller. There is no timeout:
    /// a job that never returns blocks the caller for good.
    pub fn invoke_and_wait<F, T>(&self, f: F) -> Result<T, UiError>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        if self.is_ui_thread() {
            return Err(UiError::Reentrant);
        }

        let (tx, rx) = oneshot::channel();
        self.invoke_later(move || {
            // The waiting side only disappears if it was itself torn down.
            let _ = tx.send(f());
        })?;

        rx.blocking_recv().map_err(|_| UiError::NoReply)
    }
}
