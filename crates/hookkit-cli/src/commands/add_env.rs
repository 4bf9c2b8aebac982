//! `hookkit add-env` — Add an environment variable to a bundle config.

use std::path::PathBuf;

use clap::Args;

/// Arguments for the `add-env` command.
#[derive(Args, Debug)]
pub struct AddEnvArgs {
    /// Bundle config file to edit in place.
    #[arg(long)]
    pub config: PathBuf,

    /// Entry in `NAME=VALUE` form.
    pub entry: String,
}

/// Executes the `add-env` command.
///
/// # Errors
///
/// Returns an error if the config cannot be read, parsed, or written back.
pub fn execute(args: AddEnvArgs) -> anyhow::Result<()> {
    if !args.entry.contains('=') {
        anyhow::bail!("environment entry '{}' is not NAME=VALUE", args.entry);
    }
    super::edit_bundle_config(&args.config, |utils| utils.add_environment_var(args.entry))
}
