//! The toolkit instance and its lock.

use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

use hookkit_common::config::ToolkitConfig;
use hookkit_common::error::{HookkitError, Result};
use hookkit_common::types::{ContainerConfigDocument, ContainerRuntimeState};
use hookkit_core::filesystem::{dir, text};
use nix::fcntl::OFlag;
use nix::sys::stat::Mode;

/// Toolkit bound to one container's configuration document.
///
/// The document lives inside the instance lock, so it can only be touched
/// while that lock is held. Share one instance between the hooks of a
/// single container; never share it across containers.
#[derive(Debug)]
pub struct HookUtils {
    pub(crate) settings: ToolkitConfig,
    pub(crate) state: Option<ContainerRuntimeState>,
    pub(crate) document: Mutex<Option<ContainerConfigDocument>>,
}

impl HookUtils {
    /// Creates a toolkit for hooks that run before the container process
    /// exists. No runtime state is available.
    #[must_use]
    pub fn new(document: Option<ContainerConfigDocument>) -> Self {
        Self {
            settings: ToolkitConfig::default(),
            state: None,
            document: Mutex::new(document),
        }
    }

    /// Creates a toolkit for OCI hooks, which also receive the runtime
    /// state of the container process.
    #[must_use]
    pub fn with_state(
        document: Option<ContainerConfigDocument>,
        state: ContainerRuntimeState,
    ) -> Self {
        Self {
            state: Some(state),
            ..Self::new(document)
        }
    }

    /// Replaces the host path configuration.
    #[must_use]
    pub fn with_config(mut self, settings: ToolkitConfig) -> Self {
        self.settings = settings;
        self
    }

    /// Host path configuration of this instance.
    #[must_use]
    pub const fn settings(&self) -> &ToolkitConfig {
        &self.settings
    }

    /// Runtime state the toolkit was bound to, if any.
    #[must_use]
    pub const fn state(&self) -> Option<&ContainerRuntimeState> {
        self.state.as_ref()
    }

    /// Acquires the instance lock.
    pub(crate) fn lock(&self) -> Result<MutexGuard<'_, Option<ContainerConfigDocument>>> {
        self.document.lock().map_err(|_| HookkitError::Config {
            message: "toolkit lock poisoned".into(),
        })
    }

    /// Runs `f` with read access to the bound document.
    ///
    /// # Errors
    ///
    /// Returns [`HookkitError::NotBound`] if no document is bound.
    pub fn with_document<R>(&self, f: impl FnOnce(&ContainerConfigDocument) -> R) -> Result<R> {
        let guard = self.lock()?;
        let document = guard.as_ref().ok_or(HookkitError::NotBound {
            what: "container config",
        })?;
        Ok(f(document))
    }

    /// Consumes the toolkit and hands the document back for persistence.
    ///
    /// After this no further mutation through the toolkit is possible.
    pub fn into_document(self) -> Option<ContainerConfigDocument> {
        self.document
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Writes `content` to `path` under the instance lock.
    ///
    /// See [`text::write_text_file`] for the flag and mode semantics.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or fully written.
    pub fn write_text_file(
        &self,
        path: &Path,
        content: impl AsRef<[u8]>,
        flags: OFlag,
        mode: Mode,
    ) -> Result<()> {
        let _guard = self.lock()?;
        text::write_text_file(path, content, flags, mode)
    }

    /// Reads the whole file at `path` under the instance lock.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or read.
    pub fn read_text_file(&self, path: &Path) -> Result<String> {
        let _guard = self.lock()?;
        text::read_text_file(path)
    }

    /// Creates `path` and all missing parents, each with `mode`.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is empty or a segment cannot be created.
    pub fn mkdir_recursive(&self, path: &Path, mode: Mode) -> Result<()> {
        dir::mkdir_recursive(path, mode)
    }
}
