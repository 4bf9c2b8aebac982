//! # hookkit-sdk
//!
//! The toolkit a container lifecycle hook receives while the launcher is
//! building a container.
//!
//! [`HookUtils`](utils::HookUtils) is bound to the not-yet-persisted
//! configuration document and, for OCI hooks, the container runtime state.
//! It provides:
//! - **Config mutation**: appending mounts and environment variables.
//! - **Namespace entry**: running a closure inside the container's IPC,
//!   network, or mount namespace.
//! - **Identity**: container ID, pid, and the address published by the
//!   networking plugin.
//! - **Files**: text file I/O and `mkdir -p`.
//!
//! All document mutations, file I/O, and namespace entries made through one
//! instance are serialized by a single lock owned by that instance.
//!
//! # Example
//!
//! ```rust,no_run
//! use hookkit_common::types::ContainerConfigDocument;
//! use hookkit_sdk::utils::HookUtils;
//!
//! let utils = HookUtils::new(Some(ContainerConfigDocument::new("web-1")));
//! utils.add_environment_var("LANG=C.UTF-8")?;
//! utils.add_mount("/srv/data", "/data", "bind", ["rbind", "ro"])?;
//! let document = utils.into_document();
//! # Ok::<(), hookkit_common::error::HookkitError>(())
//! ```

pub mod identity;
pub mod mutator;
pub mod namespace;
pub mod utils;

pub use hookkit_core::namespace::NamespaceKind;
pub use utils::HookUtils;
