//! Leaf dispatch: run the bound script and report the exit code to adopt.

use std::os::unix::process::ExitStatusExt;
use std::process::Command;

use tracing::info;

use crate::errors::DispatchError;
use crate::tree::LeafNode;

/// Exit code for children killed by a signal: the conventional `128 + signo`.
fn signal_code(status: std::process::ExitStatus) -> i32 {
    status.signal().map_or(1, |sig| 128 + sig)
}

/// Run the leaf's executable and return the exit code this process must adopt.
///
/// The remaining arguments are joined with a single space into ONE positional
/// argument. This is the dispatch protocol, not an oversight: argument
/// boundaries inside elements containing spaces are not preserved, and scripts
/// written against this tool rely on receiving exactly one argument.
///
/// Stdin, stdout and stderr are inherited from this process; the call blocks
/// until the child exits.
pub fn invoke(leaf: &LeafNode, args: &[String]) -> Result<i32, DispatchError> {
    info!("Running: {}", leaf.path.display());
    let status = Command::new(&leaf.path)
        .arg(args.join(" "))
        .status()
        .map_err(|e| DispatchError::Spawn {
            path: leaf.path.clone(),
            source: e,
        })?;

    match status.code() {
        Some(code) => Ok(code),
        None => Ok(signal_code(status)),
    }
}
