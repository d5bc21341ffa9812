//! Command routing: descend parsed matches to a leaf and dispatch it, or run
//! the fixed operator surface.

use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::{ArgMatches, Command};
use tracing::debug;

use crate::cli::args::OPERATOR;
use crate::cli::error::{CliError, CliResult};
use crate::dispatch;
use crate::exitcode;
use crate::pkg;
use crate::tree::{self, CommandNode};

/// Execute whatever the parsed matches point at and return the exit code the
/// process must adopt. `cmd` is the unparsed command, kept around so group
/// help can be rendered.
pub fn execute(
    cmd: &mut Command,
    matches: &ArgMatches,
    nodes: &BTreeMap<String, CommandNode>,
) -> CliResult<i32> {
    let mut chain: Vec<String> = Vec::new();
    let mut current = matches;
    while let Some((name, sub)) = current.subcommand() {
        chain.push(name.to_string());
        current = sub;
    }

    if chain.is_empty() {
        cmd.print_help()?;
        return Ok(exitcode::OK);
    }
    if chain[0] == OPERATOR {
        return execute_operator(current, &chain);
    }

    match tree::find(nodes, &chain) {
        Some(CommandNode::Leaf(leaf)) => {
            let args: Vec<String> = current
                .get_many::<String>("args")
                .map(|values| values.cloned().collect())
                .unwrap_or_default();
            debug!("Dispatching {} with {} args", chain.join(" "), args.len());
            Ok(dispatch::invoke(leaf, &args)?)
        }
        Some(CommandNode::Group(_)) => {
            // A bare group prints its own generated help
            let mut sub = &mut *cmd;
            for name in &chain {
                sub = sub
                    .find_subcommand_mut(name)
                    .ok_or_else(|| CliError::InvalidArgs(format!("unknown command: {name}")))?;
            }
            sub.print_help()?;
            Ok(exitcode::OK)
        }
        None => Err(CliError::InvalidArgs(format!(
            "unknown command: {}",
            chain.join(" ")
        ))),
    }
}

fn execute_operator(matches: &ArgMatches, chain: &[String]) -> CliResult<i32> {
    let force = matches.get_flag("force");
    match chain.get(1).map(String::as_str) {
        Some("install") => {
            let source = required_path(matches, "source")?;
            let destination = required_path(matches, "destination")?;
            pkg::install(&source, &destination, force)?;
            Ok(exitcode::OK)
        }
        Some("remove") => {
            let target = required_path(matches, "target")?;
            pkg::remove(&target, force)?;
            Ok(exitcode::OK)
        }
        _ => Err(CliError::InvalidArgs(format!(
            "unknown operator command: {}",
            chain[1..].join(" ")
        ))),
    }
}

fn required_path(matches: &ArgMatches, id: &str) -> CliResult<PathBuf> {
    matches
        .get_one::<String>(id)
        .map(PathBuf::from)
        .ok_or_else(|| CliError::InvalidArgs(format!("missing <{}>", id.to_uppercase())))
}
