//! Unified error types for the hookkit workspace.
//!
//! Every toolkit operation is one-shot and non-fatal: failures are returned
//! to the calling hook, which decides whether to abort its hook chain.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum HookkitError {
    /// The toolkit was built without the resource the operation needs.
    #[error("{what} is not bound to this toolkit instance")]
    NotBound {
        /// The missing resource, e.g. "container config".
        what: &'static str,
    },

    /// An I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path where the I/O error occurred.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Detaching from or joining a namespace failed.
    #[error("failed to {operation} namespace {path}: {source}")]
    Namespace {
        /// The namespace operation, `unshare` or `setns`.
        operation: &'static str,
        /// Namespace handle path the worker was switching into.
        path: PathBuf,
        /// Underlying OS error.
        source: std::io::Error,
    },

    /// The namespace kind is recognised but entering it is not supported.
    #[error("unsupported namespace kind: {kind}")]
    UnsupportedNamespace {
        /// Name of the rejected namespace kind.
        kind: &'static str,
    },

    /// The raw namespace flag does not name any namespace kind.
    #[error("invalid namespace flag: {flag:#x}")]
    InvalidNamespace {
        /// The rejected clone flag value.
        flag: i32,
    },

    /// Fewer bytes reached the file than were requested.
    #[error("partial write to {path}: wrote {written} of {expected} bytes")]
    PartialWrite {
        /// File being written.
        path: PathBuf,
        /// Bytes actually written.
        written: usize,
        /// Bytes requested.
        expected: usize,
    },

    /// The namespace worker panicked while running the callback.
    #[error("namespace worker for {path} panicked")]
    WorkerPanicked {
        /// Namespace handle path the worker was running in.
        path: PathBuf,
    },

    /// A published file did not have the expected format.
    #[error("failed to parse {path}: {message}")]
    Parse {
        /// File that failed to parse.
        path: PathBuf,
        /// Description of the format violation.
        message: String,
    },

    /// An internal invariant of the toolkit was violated.
    #[error("invalid configuration: {message}")]
    Config {
        /// Description of the violation.
        message: String,
    },

    /// Serialization or deserialization failed.
    #[error("serialization error: {source}")]
    Serialization {
        /// Underlying serialization error.
        #[from]
        source: serde_json::Error,
    },
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, HookkitError>;
