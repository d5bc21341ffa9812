//! Pure predicates deciding whether a filesystem entry becomes a command node.

use std::io;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use crate::help::SIDECAR_EXTENSION;

/// Classification of a directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eligibility {
    /// Directory: becomes a group node.
    Group,
    /// Executable regular file: becomes a leaf node.
    Leaf,
    /// Everything else: sidecar metadata, non-executable files, sockets, ...
    Skip,
}

/// Classify a filesystem entry. Symlinks are followed.
pub fn classify(path: &Path) -> io::Result<Eligibility> {
    if is_sidecar(path) {
        return Ok(Eligibility::Skip);
    }
    let meta = path.metadata()?;
    if meta.is_dir() {
        return Ok(Eligibility::Group);
    }
    if meta.is_file() && meta.permissions().mode() & 0o111 != 0 {
        return Ok(Eligibility::Leaf);
    }
    Ok(Eligibility::Skip)
}

/// True for help metadata files (`<entry>.yaml`); these never become commands.
pub fn is_sidecar(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == SIDECAR_EXTENSION)
}

/// Derive the display name from an entry name: split on the last `.` and keep
/// everything before it (`foo.bar.sh` -> `foo.bar`). Names with an empty stem
/// (`.hidden`) are kept unchanged.
pub fn display_name(file_name: &str) -> &str {
    match file_name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => file_name,
    }
}
