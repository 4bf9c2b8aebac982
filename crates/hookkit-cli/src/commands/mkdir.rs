//! `hookkit mkdir` — Create a directory tree with explicit permissions.

use std::path::PathBuf;

use clap::Args;
use hookkit_core::filesystem::dir;
use nix::sys::stat::Mode;

/// Arguments for the `mkdir` command.
#[derive(Args, Debug)]
pub struct MkdirArgs {
    /// Directory to create, including missing parents.
    pub path: PathBuf,

    /// Octal access mode for every created directory.
    #[arg(short, long, default_value = "0755", value_parser = parse_mode)]
    pub mode: Mode,
}

/// Executes the `mkdir` command.
///
/// # Errors
///
/// Returns an error if any directory cannot be created.
pub fn execute(args: &MkdirArgs) -> anyhow::Result<()> {
    dir::mkdir_recursive(&args.path, args.mode)?;
    Ok(())
}

/// Parses an octal mode such as `755`, `0755` or `0o755`.
fn parse_mode(raw: &str) -> Result<Mode, String> {
    let digits = raw.strip_prefix("0o").unwrap_or(raw);
    let bits =
        u32::from_str_radix(digits, 8).map_err(|e| format!("invalid octal mode '{raw}': {e}"))?;
    Mode::from_bits(bits).ok_or_else(|| format!("mode '{raw}' has unknown bits"))
}
