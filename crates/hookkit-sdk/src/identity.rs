//! Container identity and published network assignment.

use std::path::Path;

use hookkit_common::constants::ADDRESS_SEPARATOR;
use hookkit_common::error::{HookkitError, Result};
use hookkit_common::types::{ContainerId, NetworkInfo};

use crate::utils::HookUtils;

impl HookUtils {
    /// Returns the container ID.
    ///
    /// The launcher sets the container hostname to the container ID, so this
    /// works at every hook point, unlike the OCI state.
    ///
    /// # Errors
    ///
    /// Returns [`HookkitError::NotBound`] if no document is bound.
    pub fn get_container_id(&self) -> Result<ContainerId> {
        self.with_document(|d| ContainerId::new(d.hostname.clone()))
            .inspect_err(|_| tracing::error!("failed to load config"))
    }

    /// Returns the pid of the container process.
    ///
    /// Only OCI hooks that run after the container process exists have one;
    /// `None` is returned for pre-create hooks or when the state marks the
    /// pid as absent.
    pub fn get_container_pid(&self) -> Option<u32> {
        let Some(state) = self.state.as_ref() else {
            tracing::error!(
                "unknown container state, couldn't get pid; are you running in a non-OCI hook?"
            );
            return None;
        };
        let pid = state.pid();
        if pid.is_none() {
            tracing::error!("pid not available");
        }
        pid
    }

    /// Reads the IP address and veth name published by the networking
    /// plugin for this container.
    ///
    /// Returns `Ok(None)` when the address file does not exist yet; that is
    /// an expected race with the networking plugin, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if no document is bound, the container ID is empty,
    /// or the address file cannot be read or is not `<ip>/<veth>`.
    pub fn get_container_network_info(&self) -> Result<Option<NetworkInfo>> {
        let id = self.get_container_id()?;
        if id.as_str().is_empty() {
            tracing::error!("could not get container network info, container ID is empty");
            return Err(HookkitError::Config {
                message: "container hostname is empty".into(),
            });
        }

        let path = self.settings.address_file(id.as_str());
        if !path.exists() {
            tracing::warn!(
                path = %path.display(),
                "address file does not exist; has the network plugin run yet?"
            );
            return Ok(None);
        }

        let content = self.read_text_file(&path)?;
        parse_address(&path, &content).map(Some)
    }
}

/// Parses an `<ip>/<veth>` address file body.
///
/// Everything after the first separator is the veth name. Two checks are
/// stricter than a plain split at the first separator:
/// - trailing whitespace, such as the newline a shell `echo` leaves, is
///   trimmed so it never ends up in the veth name;
/// - an empty IP (`/veth0`) is rejected instead of being returned as `""`.
///
/// # Errors
///
/// Returns [`HookkitError::Parse`] if either part is missing.
pub fn parse_address(path: &Path, content: &str) -> Result<NetworkInfo> {
    let parse_error = |message: &str| {
        tracing::error!(path = %path.display(), "{message}");
        HookkitError::Parse {
            path: path.to_path_buf(),
            message: message.to_owned(),
        }
    };

    let line = content.trim_end();
    if line.is_empty() {
        return Err(parse_error("address file is empty"));
    }
    let Some((ip, veth)) = line.split_once(ADDRESS_SEPARATOR) else {
        return Err(parse_error("no veth name after the ip address"));
    };
    if ip.is_empty() {
        return Err(parse_error("no ip address before the veth name"));
    }
    if veth.is_empty() {
        return Err(parse_error("no veth name after the ip address"));
    }

    Ok(NetworkInfo {
        ip_address: ip.to_owned(),
        veth_name: veth.to_owned(),
    })
}
