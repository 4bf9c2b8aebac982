//! Configuration model for a toolkit instance.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Host paths a toolkit instance resolves container resources against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolkitConfig {
    /// Prefix of the per-container address file (`<prefix><container id>`).
    pub address_file_prefix: PathBuf,
    /// Root of the proc filesystem used for `<root>/<pid>/ns/<name>`.
    pub proc_root: PathBuf,
}

impl ToolkitConfig {
    /// Returns the address file path for the given container.
    #[must_use]
    pub fn address_file(&self, container_id: &str) -> PathBuf {
        // Plain concatenation: the prefix may end in a partial file name.
        let mut raw = self.address_file_prefix.clone().into_os_string();
        raw.push(container_id);
        PathBuf::from(raw)
    }
}

impl Default for ToolkitConfig {
    fn default() -> Self {
        Self {
            address_file_prefix: PathBuf::from(crate::constants::DEFAULT_ADDRESS_FILE_PREFIX),
            proc_root: PathBuf::from(crate::constants::PROC_ROOT),
        }
    }
}
