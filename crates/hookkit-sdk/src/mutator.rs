//! Mutations of the bound configuration document.
//!
//! Only valid during the pre-launch hook window: once the launcher has
//! persisted the document, later changes are silently lost. Ordering hooks
//! before persistence is the dispatcher's job.

use hookkit_common::error::{HookkitError, Result};
use hookkit_common::types::MountEntry;

use crate::utils::HookUtils;

impl HookUtils {
    /// Appends a mount point to the container config.
    ///
    /// Always appends, even if an identical entry already exists. Options
    /// keep their order and may repeat.
    ///
    /// # Errors
    ///
    /// Returns [`HookkitError::NotBound`] if no document is bound.
    pub fn add_mount<I, S>(
        &self,
        source: impl Into<String>,
        destination: impl Into<String>,
        fs_type: impl Into<String>,
        options: I,
    ) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut guard = self.lock()?;
        let document = guard.as_mut().ok_or(HookkitError::NotBound {
            what: "container config",
        })?;

        let entry = MountEntry::new(
            source,
            destination,
            fs_type,
            options.into_iter().map(Into::into).collect(),
        );
        tracing::debug!(
            source = %entry.source,
            destination = %entry.destination,
            fs_type = %entry.fs_type,
            "adding mount"
        );
        document.mounts.push(entry);
        Ok(())
    }

    /// Appends a `NAME=VALUE` environment entry to the container config.
    ///
    /// An entry equal to an existing one is treated as already set. Only
    /// the whole string is compared, so the same name with another value is
    /// appended as a second entry and the first one keeps precedence.
    ///
    /// # Errors
    ///
    /// Returns [`HookkitError::NotBound`] if no document is bound.
    pub fn add_environment_var(&self, entry: impl Into<String>) -> Result<()> {
        let entry = entry.into();
        let mut guard = self.lock()?;
        let document = guard.as_mut().ok_or(HookkitError::NotBound {
            what: "container config",
        })?;

        let env = &mut document.process.env;
        if env.contains(&entry) {
            tracing::debug!(entry = %entry, "environment variable already set");
            return Ok(());
        }
        tracing::debug!(entry = %entry, "adding environment variable");
        env.push(entry);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use hookkit_common::types::ContainerConfigDocument;

    use super::*;

    fn utils() -> HookUtils {
        HookUtils::new(Some(ContainerConfigDocument::new("c1")))
    }

    #[test]
    fn add_mount_appends_in_order() {
        let utils = utils();
        utils
            .add_mount("tmpfs", "/tmp", "tmpfs", ["nosuid", "nodev"])
            .expect("first");
        utils
            .add_mount("/srv", "/srv", "bind", ["rbind"])
            .expect("second");

        let destinations = utils
            .with_document(|d| {
                d.mounts
                    .iter()
                    .map(|m| m.destination.clone())
                    .collect::<Vec<_>>()
            })
            .expect("document");
        assert_eq!(destinations, vec!["/tmp", "/srv"]);
    }

    #[test]
    fn add_mount_keeps_duplicate_entries_and_options() {
        let utils = utils();
        for _ in 0..2 {
            utils
                .add_mount("/a", "/b", "bind", ["ro", "ro"])
                .expect("add");
        }

        let mounts = utils.with_document(|d| d.mounts.clone()).expect("document");
        assert_eq!(mounts.len(), 2);
        assert_eq!(mounts[0], mounts[1]);
        assert_eq!(mounts[0].options, vec!["ro", "ro"]);
    }

    #[test]
    fn add_mount_accepts_no_options() {
        let utils = utils();
        utils
            .add_mount("proc", "/proc", "proc", Vec::<String>::new())
            .expect("add");
        let options = utils
            .with_document(|d| d.mounts[0].options.clone())
            .expect("document");
        assert!(options.is_empty());
    }

    #[test]
    fn add_mount_without_document_fails() {
        let utils = HookUtils::new(None);
        let err = utils
            .add_mount("/a", "/b", "bind", ["ro"])
            .expect_err("unbound");
        assert!(matches!(err, HookkitError::NotBound { .. }));
    }

    #[test]
    fn add_environment_var_is_idempotent() {
        let utils = utils();
        utils.add_environment_var("FOO=bar").expect("first");
        utils.add_environment_var("FOO=bar").expect("second");

        let len = utils.with_document(|d| d.process.env.len()).expect("document");
        assert_eq!(len, 1);
    }

    #[test]
    fn add_environment_var_compares_whole_entry() {
        let utils = utils();
        utils.add_environment_var("FOO=bar").expect("first");
        utils.add_environment_var("FOO=baz").expect("second");

        let env = utils.with_document(|d| d.process.env.clone()).expect("document");
        assert_eq!(env, vec!["FOO=bar", "FOO=baz"]);
    }

    #[test]
    fn add_environment_var_without_document_fails() {
        let utils = HookUtils::new(None);
        assert!(utils.add_environment_var("A=1").is_err());
    }
}
