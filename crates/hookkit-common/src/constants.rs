//! System-wide constants and default paths.

/// Directory prefix of the per-container address files published by the
/// networking plugin. The container ID is appended to form the file name.
pub const DEFAULT_ADDRESS_FILE_PREFIX: &str = "/tmp/hookkit/plugin/networking/";

/// Mount point of the proc filesystem.
pub const PROC_ROOT: &str = "/proc";

/// Separator between the IP address and the veth name in an address file.
pub const ADDRESS_SEPARATOR: char = '/';

/// Name given to the disposable namespace worker threads.
pub const NS_WORKER_THREAD_NAME: &str = "hookkit-ns";
