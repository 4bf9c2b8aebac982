//! Namespace entry through the toolkit.

use hookkit_common::error::{HookkitError, Result};
use hookkit_core::namespace::{NamespaceExecutor, NamespaceKind};

use crate::utils::HookUtils;

impl HookUtils {
    /// Runs `func` inside the `kind` namespace of process `pid` and returns
    /// its result.
    ///
    /// The instance lock is held until the namespace worker has been
    /// joined, so `func` must not call back into this toolkit's document or
    /// file methods: it runs on another thread and would wait on the lock
    /// forever.
    ///
    /// # Errors
    ///
    /// Returns an error, without running `func`, if `kind` is not IPC,
    /// network or mount, or the namespace cannot be opened or entered.
    pub fn run_in_namespace<F>(&self, pid: u32, kind: NamespaceKind, func: F) -> Result<bool>
    where
        F: FnOnce() -> bool + Send,
    {
        let _guard = self.lock()?;
        NamespaceExecutor::new(&self.settings.proc_root).run(pid, kind, func)
    }

    /// Runs `func` inside the `kind` namespace of the container process.
    ///
    /// # Errors
    ///
    /// Returns [`HookkitError::NotBound`] when no pid is available (for
    /// example in a pre-create hook), or any error of
    /// [`run_in_namespace`](Self::run_in_namespace).
    pub fn run_in_container_namespace<F>(&self, kind: NamespaceKind, func: F) -> Result<bool>
    where
        F: FnOnce() -> bool + Send,
    {
        let pid = self.get_container_pid().ok_or(HookkitError::NotBound {
            what: "container pid",
        })?;
        self.run_in_namespace(pid, kind, func)
    }
}
