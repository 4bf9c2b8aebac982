//! Recursive directory creation (`mkdir -p`).

use std::fs::Permissions;
use std::io::ErrorKind;
use std::os::unix::fs::PermissionsExt;
use std::path::{Component, Path, PathBuf};

use hookkit_common::error::{HookkitError, Result};
use nix::errno::Errno;
use nix::sys::stat::Mode;
use nix::unistd::mkdir;

/// Creates `path` and every missing parent directory.
///
/// Each directory created by this call gets exactly `mode`, reapplied with
/// `chmod` so the process umask does not narrow it; the mode should
/// therefore include at least `rwx------`. Directories that already exist
/// are left untouched. On failure, directories created so far are kept.
///
/// # Errors
///
/// Returns [`HookkitError::Io`] if `path` is empty, or if creating or
/// chmod-ing any segment fails for a reason other than `EEXIST`.
pub fn mkdir_recursive(path: &Path, mode: Mode) -> Result<()> {
    if path.as_os_str().is_empty() {
        tracing::error!("empty path supplied");
        return Err(HookkitError::Io {
            path: PathBuf::new(),
            source: std::io::Error::new(ErrorKind::InvalidInput, "empty path supplied"),
        });
    }

    let mut partial = PathBuf::new();
    for component in path.components() {
        match component {
            Component::RootDir | Component::Prefix(_) => {
                partial.push(component);
                continue;
            }
            Component::CurDir => continue,
            Component::ParentDir | Component::Normal(_) => partial.push(component),
        }

        match mkdir(&partial, mode) {
            Ok(()) => {}
            Err(Errno::EEXIST) => continue,
            Err(errno) => {
                tracing::error!(path = %partial.display(), %errno, "failed to create dir");
                return Err(HookkitError::Io {
                    path: partial,
                    source: errno.into(),
                });
            }
        }

        std::fs::set_permissions(&partial, Permissions::from_mode(mode.bits())).map_err(
            |e| {
                tracing::error!(
                    path = %partial.display(),
                    mode = format_args!("{:04o}", mode.bits()),
                    error = %e,
                    "failed to set dir perms"
                );
                HookkitError::Io {
                    path: partial.clone(),
                    source: e,
                }
            },
        )?;
    }

    tracing::debug!(path = %path.display(), "directory tree ready");
    Ok(())
}
