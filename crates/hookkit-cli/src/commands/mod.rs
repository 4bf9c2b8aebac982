//! CLI command definitions and dispatch.

pub mod add_env;
pub mod add_mount;
pub mod mkdir;
pub mod net_info;
pub mod ns_exec;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use hookkit_common::config::ToolkitConfig;
use hookkit_common::constants::{DEFAULT_ADDRESS_FILE_PREFIX, PROC_ROOT};
use hookkit_common::types::ContainerConfigDocument;
use hookkit_core::filesystem::text;
use hookkit_sdk::HookUtils;
use nix::fcntl::OFlag;
use nix::sys::stat::Mode;

/// hookkit — helpers for container lifecycle hooks.
#[derive(Parser, Debug)]
#[command(name = "hookkit", version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Prefix of the per-container address files.
    #[arg(
        long,
        global = true,
        env = "HOOKKIT_ADDRESS_PREFIX",
        default_value = DEFAULT_ADDRESS_FILE_PREFIX
    )]
    pub address_prefix: PathBuf,

    /// Root of the proc filesystem.
    #[arg(long, global = true, env = "HOOKKIT_PROC_ROOT", default_value = PROC_ROOT)]
    pub proc_root: PathBuf,
}

impl Cli {
    /// Builds the toolkit configuration from the global flags.
    fn settings(&self) -> ToolkitConfig {
        ToolkitConfig {
            address_file_prefix: self.address_prefix.clone(),
            proc_root: self.proc_root.clone(),
        }
    }
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a command inside a namespace of another process.
    NsExec(ns_exec::NsExecArgs),
    /// Print the IP address and veth name published for a container.
    NetInfo(net_info::NetInfoArgs),
    /// Create a directory and its parents with a given mode.
    Mkdir(mkdir::MkdirArgs),
    /// Add an environment variable to a bundle config.
    AddEnv(add_env::AddEnvArgs),
    /// Add a mount point to a bundle config.
    AddMount(add_mount::AddMountArgs),
}

/// Dispatches the parsed CLI command to its handler.
///
/// # Errors
///
/// Returns an error if the dispatched command fails.
pub fn execute(cli: Cli) -> anyhow::Result<()> {
    let settings = cli.settings();
    match cli.command {
        Command::NsExec(args) => ns_exec::execute(args, settings),
        Command::NetInfo(args) => net_info::execute(args, settings),
        Command::Mkdir(args) => mkdir::execute(&args),
        Command::AddEnv(args) => add_env::execute(args),
        Command::AddMount(args) => add_mount::execute(args),
    }
}

/// Loads a bundle config, applies `mutate` through a toolkit bound to it,
/// and writes the result back in place.
fn edit_bundle_config(
    path: &Path,
    mutate: impl FnOnce(&HookUtils) -> hookkit_common::error::Result<()>,
) -> anyhow::Result<()> {
    let raw = text::read_text_file(path)?;
    let document = ContainerConfigDocument::from_json(&raw)
        .with_context(|| format!("failed to parse {}", path.display()))?;

    let utils = HookUtils::new(Some(document));
    mutate(&utils)?;
    let document = utils
        .into_document()
        .context("bundle config was lost while editing")?;

    text::write_text_file(
        path,
        document.to_json()?,
        OFlag::O_CREAT | OFlag::O_TRUNC,
        Mode::from_bits_truncate(0o644),
    )?;
    Ok(())
}
