//! thicket: a directory tree of executable scripts, exposed as a nested
//! command hierarchy.
//!
//! At startup the watched root directory is scanned into an immutable tree of
//! command nodes (one group per directory, one leaf per executable file),
//! help text is resolved through a sidecar-or-probe fallback, and invoking a
//! leaf dispatches to the backing script with exact exit-status propagation.
//! The tree is rebuilt from scratch on every run; there is no cache.

pub mod cli;
pub mod dispatch;
pub mod errors;
pub mod exitcode;
pub mod filter;
pub mod help;
pub mod pkg;
pub mod settings;
pub mod tree;
pub mod util;
