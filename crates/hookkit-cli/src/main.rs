//! # hookkit — container hook toolkit CLI
//!
//! Exposes namespace entry, network info lookup, directory creation, and
//! bundle config mutation to hooks written as shell scripts.

mod commands;

use clap::Parser;

use crate::commands::Cli;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    commands::execute(cli)
}
