//! Domain types shared by hook plugins and the toolkit.
//!
//! [`ContainerConfigDocument`] only models the parts of the bundle
//! configuration the toolkit mutates; field names follow the OCI runtime
//! configuration so the external serializer can map them directly. Fields
//! the toolkit does not model are carried through untouched in `extra`.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;

/// Identifier of a container.
///
/// The launcher sets the container hostname to the container ID, so the ID
/// is derived from [`ContainerConfigDocument::hostname`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContainerId(String);

impl ContainerId {
    /// Creates a new container ID from a string value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the inner string representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A mount point to be applied by the launcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MountEntry {
    /// Mount source.
    pub source: String,
    /// Mount destination inside the container.
    pub destination: String,
    /// Filesystem type.
    #[serde(rename = "type")]
    pub fs_type: String,
    /// Mount options in application order. Duplicates are allowed.
    #[serde(default)]
    pub options: Vec<String>,
    /// Unmodelled fields, preserved across a load/save cycle.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MountEntry {
    /// Creates a mount entry.
    #[must_use]
    pub fn new(
        source: impl Into<String>,
        destination: impl Into<String>,
        fs_type: impl Into<String>,
        options: Vec<String>,
    ) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            fs_type: fs_type.into(),
            options,
            extra: Map::new(),
        }
    }
}

/// Process section of the configuration document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessConfig {
    /// `NAME=VALUE` entries in application order.
    #[serde(default)]
    pub env: Vec<String>,
    /// Unmodelled fields such as `args` and `cwd`.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// In-memory container configuration, mutated in place during the
/// pre-launch hook window.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerConfigDocument {
    /// Container hostname, equal to the container ID.
    #[serde(default)]
    pub hostname: String,
    /// Mount entries in application order.
    #[serde(default)]
    pub mounts: Vec<MountEntry>,
    /// Process settings.
    #[serde(default)]
    pub process: ProcessConfig,
    /// Unmodelled fields such as `ociVersion`, `root` and `linux`.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ContainerConfigDocument {
    /// Creates an empty document for the given container.
    #[must_use]
    pub fn new(hostname: impl Into<String>) -> Self {
        Self {
            hostname: hostname.into(),
            ..Self::default()
        }
    }

    /// Parses a document from its JSON form.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not a valid document.
    pub fn from_json(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    /// Serializes the document to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Runtime state handed to OCI hooks once the container process exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerRuntimeState {
    /// Whether `pid` holds a valid process ID.
    pub pid_present: bool,
    /// Container init process ID.
    pub pid: u32,
}

impl ContainerRuntimeState {
    /// Creates a state record for a running container process.
    #[must_use]
    pub const fn with_pid(pid: u32) -> Self {
        Self {
            pid_present: true,
            pid,
        }
    }

    /// Returns the pid if it is marked present.
    #[must_use]
    pub const fn pid(&self) -> Option<u32> {
        if self.pid_present { Some(self.pid) } else { None }
    }
}

/// Network assignment published by the networking plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkInfo {
    /// IP address assigned to the container.
    pub ip_address: String,
    /// Host side veth interface name.
    pub veth_name: String,
}
