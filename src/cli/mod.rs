//! CLI layer: argument parsing and command dispatch

pub mod args;
pub mod commands;
pub mod error;

pub use args::{build_command, verbosity_from_args};
pub use commands::execute;
pub use error::{CliError, CliResult};
