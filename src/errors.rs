use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building the command tree.
///
/// `Io` and `Cycle` are fatal: a command tree cannot honestly be presented if
/// part of it could not be enumerated. `Parse` and `Probe` are per-node: the
/// builder degrades the affected node's help text and keeps going.
#[derive(Error, Debug)]
pub enum TreeError {
    #[error("failed to read directory {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed help document for {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    #[error("help probe failed for {path}: {reason}")]
    Probe { path: PathBuf, reason: String },

    #[error("symlink cycle detected at: {0}")]
    Cycle(PathBuf),
}

pub type TreeResult<T> = Result<T, TreeError>;

/// Dispatch can only fail before the child runs; once the child has run, its
/// exit status is a plain value, never an error.
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("failed to execute {path}: {source}")]
    Spawn {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors from the package manager (operator install/remove).
#[derive(Error, Debug)]
pub enum PkgError {
    #[error("destination already exists: {0} (use --force to replace)")]
    Exists(PathBuf),

    #[error("no such file or directory: {0}")]
    Missing(PathBuf),

    #[error("failed to copy {path}: {reason}")]
    Copy { path: PathBuf, reason: String },

    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type PkgResult<T> = Result<T, PkgError>;
