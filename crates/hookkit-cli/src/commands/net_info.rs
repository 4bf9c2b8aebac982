//! `hookkit net-info` — Show the network assignment of a container.

use clap::Args;
use hookkit_common::config::ToolkitConfig;
use hookkit_common::types::ContainerConfigDocument;
use hookkit_sdk::HookUtils;

/// Arguments for the `net-info` command.
#[derive(Args, Debug)]
pub struct NetInfoArgs {
    /// Container ID (the container hostname).
    pub container: String,
}

/// Executes the `net-info` command.
///
/// Prints `<ip> <veth>` on a single line.
///
/// # Errors
///
/// Returns an error if nothing has been published for the container yet or
/// the address file is malformed.
#[allow(clippy::print_stdout)]
pub fn execute(args: NetInfoArgs, settings: ToolkitConfig) -> anyhow::Result<()> {
    let utils = HookUtils::new(Some(ContainerConfigDocument::new(&args.container)))
        .with_config(settings);

    let Some(info) = utils.get_container_network_info()? else {
        anyhow::bail!(
            "no address published for container {} yet; has the network plugin run?",
            args.container
        );
    };
    println!("{} {}", info.ip_address, info.veth_name);
    Ok(())
}
