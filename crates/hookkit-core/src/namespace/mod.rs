//! Linux namespace entry for container hooks.
//!
//! `setns(2)` changes the namespaces of the calling *thread* only, so the
//! switch is confined to a throwaway worker (see [`executor`]).

pub mod executor;

use std::fmt;

use hookkit_common::error::{HookkitError, Result};
use nix::sched::CloneFlags;

pub use executor::NamespaceExecutor;

/// Namespace kinds a hook may ask to enter.
///
/// Only [`Ipc`](Self::Ipc), [`Net`](Self::Net) and [`Mount`](Self::Mount)
/// can be entered. PID, user and UTS namespaces carry special restrictions
/// for multi-threaded callers and are always rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamespaceKind {
    /// System V IPC and POSIX message queues.
    Ipc,
    /// Network stack.
    Net,
    /// Mount table.
    Mount,
    /// Process ID space (unsupported).
    Pid,
    /// User and group IDs (unsupported).
    User,
    /// Hostname and domain name (unsupported).
    Uts,
}

impl NamespaceKind {
    /// All kinds, supported or not.
    pub const ALL: [Self; 6] = [
        Self::Ipc,
        Self::Net,
        Self::Mount,
        Self::Pid,
        Self::User,
        Self::Uts,
    ];

    /// Resolves a raw `CLONE_NEW*` flag.
    ///
    /// # Errors
    ///
    /// Returns [`HookkitError::InvalidNamespace`] if the flag is not exactly
    /// one namespace clone flag.
    pub fn from_clone_flag(flag: i32) -> Result<Self> {
        match flag {
            libc::CLONE_NEWIPC => Ok(Self::Ipc),
            libc::CLONE_NEWNET => Ok(Self::Net),
            libc::CLONE_NEWNS => Ok(Self::Mount),
            libc::CLONE_NEWPID => Ok(Self::Pid),
            libc::CLONE_NEWUSER => Ok(Self::User),
            libc::CLONE_NEWUTS => Ok(Self::Uts),
            _ => Err(HookkitError::InvalidNamespace { flag }),
        }
    }

    /// Entry name under `/proc/<pid>/ns/`.
    #[must_use]
    pub const fn proc_name(self) -> &'static str {
        match self {
            Self::Ipc => "ipc",
            Self::Net => "net",
            Self::Mount => "mnt",
            Self::Pid => "pid",
            Self::User => "user",
            Self::Uts => "uts",
        }
    }

    /// Clone flag passed to `unshare(2)` and `setns(2)`.
    #[must_use]
    pub const fn clone_flag(self) -> CloneFlags {
        match self {
            Self::Ipc => CloneFlags::CLONE_NEWIPC,
            Self::Net => CloneFlags::CLONE_NEWNET,
            Self::Mount => CloneFlags::CLONE_NEWNS,
            Self::Pid => CloneFlags::CLONE_NEWPID,
            Self::User => CloneFlags::CLONE_NEWUSER,
            Self::Uts => CloneFlags::CLONE_NEWUTS,
        }
    }

    /// Whether the toolkit can enter this namespace kind.
    #[must_use]
    pub const fn is_supported(self) -> bool {
        matches!(self, Self::Ipc | Self::Net | Self::Mount)
    }

    /// Fails with [`HookkitError::UnsupportedNamespace`] for PID, user and
    /// UTS namespaces.
    ///
    /// # Errors
    ///
    /// Returns an error if the kind cannot be entered.
    pub fn ensure_supported(self) -> Result<()> {
        if self.is_supported() {
            Ok(())
        } else {
            Err(HookkitError::UnsupportedNamespace {
                kind: self.proc_name(),
            })
        }
    }
}

impl fmt::Display for NamespaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.proc_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_clone_flag_maps_every_kind() {
        for kind in NamespaceKind::ALL {
            let flag = kind.clone_flag().bits();
            let resolved = NamespaceKind::from_clone_flag(flag).expect("known flag");
            assert_eq!(resolved, kind);
        }
    }

    #[test]
    fn from_clone_flag_rejects_unknown_values() {
        let err = NamespaceKind::from_clone_flag(0).expect_err("zero is not a namespace");
        assert!(matches!(err, HookkitError::InvalidNamespace { flag: 0 }));

        let combined = libc::CLONE_NEWNET | libc::CLONE_NEWIPC;
        assert!(NamespaceKind::from_clone_flag(combined).is_err());
    }

    #[test]
    fn only_ipc_net_and_mount_are_supported() {
        let supported: Vec<_> = NamespaceKind::ALL
            .into_iter()
            .filter(|k| k.is_supported())
            .collect();
        assert_eq!(
            supported,
            vec![NamespaceKind::Ipc, NamespaceKind::Net, NamespaceKind::Mount]
        );
    }

    #[test]
    fn ensure_supported_names_rejected_kind() {
        let err = NamespaceKind::Uts.ensure_supported().expect_err("uts rejected");
        assert!(matches!(
            err,
            HookkitError::UnsupportedNamespace { kind: "uts" }
        ));
    }

    #[test]
    fn mount_namespace_uses_mnt_proc_entry() {
        assert_eq!(NamespaceKind::Mount.proc_name(), "mnt");
        assert_eq!(NamespaceKind::Mount.to_string(), "mnt");
    }
}
