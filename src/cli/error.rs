//! CLI-level errors (wraps the component errors)

use thiserror::Error;

use crate::errors::{DispatchError, PkgError, TreeError};

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Tree(#[from] TreeError),

    #[error("{0}")]
    Dispatch(#[from] DispatchError),

    #[error("{0}")]
    Pkg(#[from] PkgError),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Tree(_) => crate::exitcode::IOERR,
            CliError::Dispatch(_) => crate::exitcode::OSERR,
            CliError::Pkg(_) | CliError::Io(_) => crate::exitcode::SOFTWARE,
            CliError::Config(_) => crate::exitcode::CONFIG,
            CliError::InvalidArgs(_) => crate::exitcode::USAGE,
        }
    }
}
