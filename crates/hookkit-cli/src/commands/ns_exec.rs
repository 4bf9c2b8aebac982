//! `hookkit ns-exec` — Run a command inside another process's namespace.

use clap::{Args, ValueEnum};
use hookkit_common::config::ToolkitConfig;
use hookkit_sdk::{HookUtils, NamespaceKind};

/// Namespaces that can be entered from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum NamespaceArg {
    /// IPC namespace.
    Ipc,
    /// Network namespace.
    Net,
    /// Mount namespace.
    Mnt,
}

impl From<NamespaceArg> for NamespaceKind {
    fn from(arg: NamespaceArg) -> Self {
        match arg {
            NamespaceArg::Ipc => Self::Ipc,
            NamespaceArg::Net => Self::Net,
            NamespaceArg::Mnt => Self::Mount,
        }
    }
}

/// Arguments for the `ns-exec` command.
#[derive(Args, Debug)]
pub struct NsExecArgs {
    /// Pid of the process whose namespace to enter.
    #[arg(long)]
    pub pid: u32,

    /// Namespace to enter.
    #[arg(long, value_enum)]
    pub ns: NamespaceArg,

    /// Command to execute.
    #[arg(trailing_var_arg = true, required = true)]
    pub command: Vec<String>,
}

/// Executes the `ns-exec` command.
///
/// The command is spawned from the worker thread that joined the
/// namespace, so the child process starts inside it.
///
/// # Errors
///
/// Returns an error if the namespace cannot be entered or the command does
/// not exit successfully.
pub fn execute(args: NsExecArgs, settings: ToolkitConfig) -> anyhow::Result<()> {
    let Some((program, rest)) = args.command.split_first() else {
        anyhow::bail!("command is empty");
    };

    let utils = HookUtils::new(None).with_config(settings);
    let kind = NamespaceKind::from(args.ns);
    let succeeded = utils.run_in_namespace(args.pid, kind, || run_command(program, rest))?;
    if !succeeded {
        anyhow::bail!(
            "'{program}' failed inside the {kind} namespace of pid {}",
            args.pid
        );
    }
    Ok(())
}

fn run_command(program: &str, args: &[String]) -> bool {
    match std::process::Command::new(program).args(args).status() {
        Ok(status) => {
            tracing::debug!(program, %status, "command exited");
            status.success()
        }
        Err(e) => {
            tracing::error!(program, error = %e, "failed to spawn command");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::commands::{Cli, Command};

    #[test]
    fn parses_trailing_command() {
        let cli = Cli::try_parse_from([
            "hookkit", "ns-exec", "--pid", "42", "--ns", "mnt", "--", "ls", "-la", "/",
        ])
        .expect("parse");

        let Command::NsExec(args) = cli.command else {
            panic!("expected ns-exec");
        };
        assert_eq!(args.pid, 42);
        assert_eq!(NamespaceKind::from(args.ns), NamespaceKind::Mount);
        assert_eq!(args.command, vec!["ls", "-la", "/"]);
    }

    #[test]
    fn rejects_unsupported_namespace_names() {
        let result = Cli::try_parse_from([
            "hookkit", "ns-exec", "--pid", "1", "--ns", "pid", "--", "true",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn run_command_reports_exit_status() {
        assert!(run_command("true", &[]));
        assert!(!run_command("false", &[]));
        assert!(!run_command("/nonexistent/hookkit-test-binary", &[]));
    }
}
