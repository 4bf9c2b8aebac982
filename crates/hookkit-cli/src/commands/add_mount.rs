//! `hookkit add-mount` — Add a mount point to a bundle config.

use std::path::PathBuf;

use clap::Args;

/// Arguments for the `add-mount` command.
#[derive(Args, Debug)]
pub struct AddMountArgs {
    /// Bundle config file to edit in place.
    #[arg(long)]
    pub config: PathBuf,

    /// Mount source.
    #[arg(long)]
    pub source: String,

    /// Mount destination inside the container.
    #[arg(long)]
    pub destination: String,

    /// Filesystem type.
    #[arg(long = "type", default_value = "bind")]
    pub fs_type: String,

    /// Mount option; repeat for several, order is kept.
    #[arg(long = "option", short = 'o')]
    pub options: Vec<String>,
}

/// Executes the `add-mount` command.
///
/// # Errors
///
/// Returns an error if the config cannot be read, parsed, or written back.
pub fn execute(args: AddMountArgs) -> anyhow::Result<()> {
    super::edit_bundle_config(&args.config, |utils| {
        utils.add_mount(args.source, args.destination, args.fs_type, args.options)
    })
}

#[cfg(test)]
mod tests {
    use hookkit_common::types::ContainerConfigDocument;

    use super::*;

    #[test]
    fn appends_mount_with_ordered_options() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = dir.path().join("config.json");
        std::fs::write(&config, r#"{"hostname": "c1"}"#).expect("write");

        let args = AddMountArgs {
            config: config.clone(),
            source: "/srv/data".into(),
            destination: "/data".into(),
            fs_type: "bind".into(),
            options: vec!["rbind".into(), "nosuid".into(), "ro".into()],
        };
        execute(args).expect("add-mount");

        let raw = std::fs::read_to_string(&config).expect("read");
        let doc = ContainerConfigDocument::from_json(&raw).expect("parse");
        assert_eq!(doc.mounts.len(), 1);
        assert_eq!(doc.mounts[0].destination, "/data");
        assert_eq!(doc.mounts[0].options, vec!["rbind", "nosuid", "ro"]);
    }
}
