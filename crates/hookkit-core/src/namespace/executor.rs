//! Runs caller code inside another process's namespace.
//!
//! Each call spawns exactly one worker thread which detaches its own copy
//! of the namespace (`unshare(2)`), joins the target (`setns(2)`), runs the
//! callback and exits. The caller blocks until the worker is joined, so the
//! API is synchronous even though the switch happens off-thread. The worker
//! is a plain OS thread that is never reused, which keeps the changed
//! namespace membership from leaking into any other work.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::thread;

use hookkit_common::constants::{NS_WORKER_THREAD_NAME, PROC_ROOT};
use hookkit_common::error::{HookkitError, Result};
use nix::sched::{setns, unshare};

use super::NamespaceKind;

/// Enters namespaces of processes found under a proc filesystem root.
#[derive(Debug, Clone)]
pub struct NamespaceExecutor {
    proc_root: PathBuf,
}

impl NamespaceExecutor {
    /// Creates an executor resolving namespace handles under `proc_root`.
    #[must_use]
    pub fn new(proc_root: impl Into<PathBuf>) -> Self {
        Self {
            proc_root: proc_root.into(),
        }
    }

    /// Returns the handle path for `pid`'s namespace of the given kind.
    #[must_use]
    pub fn namespace_path(&self, pid: u32, kind: NamespaceKind) -> PathBuf {
        self.proc_root
            .join(pid.to_string())
            .join("ns")
            .join(kind.proc_name())
    }

    /// Runs `func` inside the `kind` namespace of process `pid` and returns
    /// its result unchanged.
    ///
    /// Blocks until the worker thread has finished. There is no timeout: a
    /// callback that never returns blocks the caller forever.
    ///
    /// # Errors
    ///
    /// Returns an error, without invoking `func`, if:
    /// - `kind` is PID, user or UTS (no thread is spawned),
    /// - the namespace handle cannot be opened,
    /// - the worker cannot be spawned,
    /// - `unshare(2)` or `setns(2)` fails in the worker.
    ///
    /// A panic inside `func` is caught at the join and returned as
    /// [`HookkitError::WorkerPanicked`]. Builds with `panic = "abort"` (the
    /// release profile) abort the process instead.
    pub fn run<F>(&self, pid: u32, kind: NamespaceKind, func: F) -> Result<bool>
    where
        F: FnOnce() -> bool + Send,
    {
        if let Err(e) = kind.ensure_supported() {
            tracing::error!(%kind, "refusing to enter namespace");
            return Err(e);
        }

        let path = self.namespace_path(pid, kind);
        let handle = File::open(&path).map_err(|e| {
            tracing::error!(
                path = %path.display(),
                error = %e,
                "failed to open container namespace"
            );
            HookkitError::Io {
                path: path.clone(),
                source: e,
            }
        })?;

        tracing::info!(path = %path.display(), "about to change namespace");

        let outcome = thread::scope(|scope| {
            let handle = &handle;
            let path = path.as_path();
            let worker = thread::Builder::new()
                .name(NS_WORKER_THREAD_NAME.to_owned())
                .spawn_scoped(scope, move || enter_and_call(handle, path, kind, func))
                .map_err(|e| {
                    tracing::error!(error = %e, "failed to spawn namespace worker");
                    HookkitError::Io {
                        path: path.to_path_buf(),
                        source: e,
                    }
                })?;

            worker.join().unwrap_or_else(|_| {
                tracing::error!(path = %path.display(), "namespace worker panicked");
                Err(HookkitError::WorkerPanicked {
                    path: path.to_path_buf(),
                })
            })
        });

        // The worker is gone; release the namespace handle on this side.
        drop(handle);
        tracing::debug!(path = %path.display(), ok = outcome.is_ok(), "namespace worker joined");
        outcome
    }
}

impl Default for NamespaceExecutor {
    fn default() -> Self {
        Self::new(PROC_ROOT)
    }
}

/// Body of the namespace worker thread.
fn enter_and_call<F>(handle: &File, path: &Path, kind: NamespaceKind, func: F) -> Result<bool>
where
    F: FnOnce() -> bool,
{
    let flag = kind.clone_flag();

    unshare(flag).map_err(|errno| {
        tracing::error!(%kind, %errno, "failed to unshare");
        HookkitError::Namespace {
            operation: "unshare",
            path: path.to_path_buf(),
            source: errno.into(),
        }
    })?;

    setns(handle, flag).map_err(|errno| {
        tracing::error!(%kind, %errno, "failed to switch into new namespace");
        HookkitError::Namespace {
            operation: "setns",
            path: path.to_path_buf(),
            source: errno.into(),
        }
    })?;

    Ok(func())
}
