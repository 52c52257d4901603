// ── Periodic autosave ─────────────────────────────────────────────────────────
//
// A named worker thread that snapshots the document every `interval` and
// overwrites a fixed recovery file.  The worker waits on a stop channel with a
// timeout, so `stop()` (or dropping the scheduler) wakes it immediately and
// the thread is joined before `stop()` returns.
//
// Autosave never touches the document's dirty flag or bound path.

use std::{
    fs,
    io,
    path::{Path, PathBuf},
    sync::mpsc::{self, RecvTimeoutError, Sender},
    thread::{self, JoinHandle},
    time::Duration,
};

use crate::document::SharedDocument;

/// Fixed recovery file, relative to the working directory.
pub(crate) const AUTOSAVE_PATH: &str = "autosave.txt";

/// Default period between autosaves.
pub(crate) const DEFAULT_INTERVAL: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AutosaveState {
    Running,
    Stopped,
}

/// Handle to the running autosave worker.
pub(crate) struct AutosaveScheduler {
    stop_tx: Option<Sender<()>>,
    worker: Option<JoinHandle<()>>,
    path: PathBuf,
    interval: Duration,
}

impl AutosaveScheduler {
    /// Spawn the worker.  Returns in the `Running` state.
    ///
    /// # Errors
    /// Fails only if the OS refuses to create a thread.
    pub(crate) fn start(
        doc: SharedDocument,
        path: impl Into<PathBuf>,
        interval: Duration,
    ) -> io::Result<Self> {
        let path = path.into();
        let (stop_tx, stop_rx) = mpsc::channel::<()>();

        let worker_path = path.clone();
        let worker = thread::Builder::new()
            .name("autosave".to_owned())
            .spawn(move || loop {
                match stop_rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => tick(&doc, &worker_path),
                    // Explicit stop or the scheduler was dropped.
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            })?;

        tracing::info!(
            path = %path.display(),
            interval_secs = interval.as_secs_f64(),
            "autosave started"
        );

        Ok(Self {
            stop_tx: Some(stop_tx),
            worker: Some(worker),
            path,
            interval,
        })
    }

    pub(crate) fn state(&self) -> AutosaveState {
        if self.worker.is_some() {
            AutosaveState::Running
        } else {
            AutosaveState::Stopped
        }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    pub(crate) fn interval(&self) -> Duration {
        self.interval
    }

    /// Signal the worker and wait for it to exit.  Idempotent.
    ///
    /// A write already in progress completes before the join returns.
    pub(crate) fn stop(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            // The worker may already be gone; nothing to do then.
            let _ = tx.send(());
        }
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                tracing::error!("autosave worker panicked");
            }
            tracing::info!("autosave stopped");
        }
    }
}

impl Drop for AutosaveScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

/// One autosave cycle.  Failures are logged and retried on the next tick.
fn tick(doc: &SharedDocument, path: &Path) {
    match write_snapshot(doc, path) {
        Ok(bytes) => tracing::info!(path = %path.display(), bytes, "auto-saved"),
        Err(e) => tracing::warn!(path = %path.display(), error = %e, "auto-save failed"),
    }
}

/// Copy the content under the lock, then write it outside the lock.
pub(crate) fn write_snapshot(doc: &SharedDocument, path: &Path) -> io::Result<usize> {
    let content = doc.snapshot();
    fs::write(path, content.as_bytes())?;
    Ok(content.len())
}
