//! # hookkit-core
//!
//! Low-level Linux primitives used by container lifecycle hooks.
//!
//! This crate provides safe abstractions over:
//! - **Namespaces**: running a closure inside the IPC, network, or mount
//!   namespace of another process on a disposable worker thread.
//! - **Filesystem**: whole-file text reads and writes, and `mkdir -p` with
//!   explicit permissions on every created directory.
//!
//! Nothing here is fatal to the hosting process: every failure is logged
//! and returned to the caller.

pub mod filesystem;
pub mod namespace;
