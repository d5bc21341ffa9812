//! CLI argument definitions using clap
//!
//! The subcommand set mirrors the command tree discovered at startup, so the
//! clap `Command` is assembled with the builder API rather than derive.

use std::collections::BTreeMap;

use clap::{Arg, ArgAction, Command};
use tracing::warn;

use crate::tree::CommandNode;

/// Name of the fixed operator subcommand; discovered entries may not shadow it.
pub const OPERATOR: &str = "operator";

/// Count the verbosity flags from raw argv, before clap can run.
///
/// The dynamic subcommands require the tree, and construction of the tree
/// should already honor `-v`, so the count is scanned from the raw arguments
/// up to the first non-flag token (the first subcommand name). Clap still owns
/// the flag afterwards for help output.
pub fn verbosity_from_args<I>(args: I) -> u8
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut count: u8 = 0;
    for arg in args {
        let arg = arg.as_ref();
        if arg == "--verbose" {
            count = count.saturating_add(1);
            continue;
        }
        match arg.strip_prefix('-') {
            // -v, -vv, ... (other flags are skipped, not counted)
            Some(flags) => {
                if !flags.is_empty() && flags.chars().all(|c| c == 'v') {
                    count = count.saturating_add(flags.len() as u8);
                }
            }
            // first subcommand name ends the root flag section
            None => break,
        }
    }
    count
}

/// Assemble the root command: global flags, the fixed operator surface, and
/// one subcommand per discovered node.
pub fn build_command(nodes: &BTreeMap<String, CommandNode>) -> Command {
    let mut root = Command::new("thicket")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Turn a directory tree of executable scripts into a command hierarchy")
        // Root-only on purpose: a propagated global flag would swallow a
        // leading -v meant for the dispatched script.
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .help("Verbose output (-v: info, -vv: debug)"),
        )
        .subcommand(operator_command());

    for node in nodes.values() {
        if node.name() == OPERATOR {
            warn!("Ignoring discovered entry shadowing the fixed '{OPERATOR}' command");
            continue;
        }
        root = root.subcommand(node_command(node));
    }
    root
}

fn node_command(node: &CommandNode) -> Command {
    let mut cmd = Command::new(node.name().to_string());
    let help = node.help();
    if !help.short.is_empty() {
        cmd = cmd.about(help.short.clone());
    }
    if !help.long.is_empty() {
        cmd = cmd.long_about(help.long.clone());
    }
    match node {
        CommandNode::Group(group) => {
            for child in group.children.values() {
                cmd = cmd.subcommand(node_command(child));
            }
            cmd
        }
        CommandNode::Leaf(_) => cmd.arg(
            Arg::new("args")
                .value_name("ARGS")
                .num_args(0..)
                .trailing_var_arg(true)
                .allow_hyphen_values(true)
                .help("Arguments handed to the script (space-joined)"),
        ),
    }
}

fn operator_command() -> Command {
    let force = Arg::new("force")
        .short('f')
        .long("force")
        .action(ArgAction::SetTrue);
    Command::new(OPERATOR)
        .about("Manage installed script bundles")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("install")
                .about("Install a script bundle under the watched root")
                .arg(Arg::new("source").value_name("SOURCE").required(true))
                .arg(
                    Arg::new("destination")
                        .value_name("DESTINATION")
                        .required(true),
                )
                .arg(force.clone().help("Replace an existing destination")),
        )
        .subcommand(
            Command::new("remove")
                .about("Remove an installed script bundle")
                .arg(Arg::new("target").value_name("TARGET").required(true))
                .arg(force.help("Ignore a missing target")),
        )
}
