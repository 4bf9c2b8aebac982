//! Whole-file text I/O.

use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::os::unix::fs::OpenOptionsExt;
use std::path::Path;

use hookkit_common::error::{HookkitError, Result};
use nix::fcntl::OFlag;
use nix::sys::stat::Mode;

/// Writes `content` to `path`.
///
/// The file is opened write-only and close-on-exec, OR'd with `flags`
/// (typically `O_CREAT | O_TRUNC`). `mode` only applies when `O_CREAT`
/// creates the file. Interrupted writes are retried; the descriptor is
/// closed even when a write fails.
///
/// # Errors
///
/// Returns [`HookkitError::Io`] if the file cannot be opened or a write
/// fails, and [`HookkitError::PartialWrite`] if the kernel stops accepting
/// bytes before the whole content is written.
pub fn write_text_file(
    path: &Path,
    content: impl AsRef<[u8]>,
    flags: OFlag,
    mode: Mode,
) -> Result<()> {
    let bytes = content.as_ref();

    let mut file = OpenOptions::new()
        .write(true)
        .custom_flags((OFlag::O_CLOEXEC | flags).bits())
        .mode(mode.bits())
        .open(path)
        .map_err(|e| {
            let action = if flags.contains(OFlag::O_CREAT) {
                "open/create"
            } else {
                "open"
            };
            tracing::error!(path = %path.display(), error = %e, "failed to {action}");
            HookkitError::Io {
                path: path.to_path_buf(),
                source: e,
            }
        })?;

    let mut written = 0;
    let mut failure = None;
    while written < bytes.len() {
        match file.write(&bytes[written..]) {
            Ok(0) => break,
            Ok(n) => written += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => {}
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "failed to write to file");
                failure = Some(e);
                break;
            }
        }
    }
    drop(file);

    if let Some(source) = failure {
        return Err(HookkitError::Io {
            path: path.to_path_buf(),
            source,
        });
    }
    if written != bytes.len() {
        return Err(HookkitError::PartialWrite {
            path: path.to_path_buf(),
            written,
            expected: bytes.len(),
        });
    }

    tracing::debug!(path = %path.display(), bytes = written, "wrote text file");
    Ok(())
}

/// Reads the whole file at `path` into a string.
///
/// Invalid UTF-8 sequences are replaced rather than rejected. An existing
/// but empty file yields an empty string.
///
/// # Errors
///
/// Returns [`HookkitError::Io`] if the file cannot be opened or read.
pub fn read_text_file(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|e| {
        tracing::error!(path = %path.display(), error = %e, "failed to read file");
        HookkitError::Io {
            path: path.to_path_buf(),
            source: e,
        }
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
