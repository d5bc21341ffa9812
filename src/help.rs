//! Help resolution: sidecar file first, probe execution as fallback.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use serde::Deserialize;
use tracing::debug;

use crate::errors::{TreeError, TreeResult};

/// Extension of sidecar metadata files (`<entry>.yaml`).
pub const SIDECAR_EXTENSION: &str = "yaml";

/// Reserved argument asking an executable to print its help document.
pub const PROBE_ARG: &str = "thicket-help";

/// Help document carried by every command node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HelpDoc {
    pub short: String,
    pub long: String,
}

/// Sidecar path for an entry: the full entry name plus the metadata extension
/// (`deploy.sh` -> `deploy.sh.yaml`).
pub fn sidecar_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".");
    name.push(SIDECAR_EXTENSION);
    PathBuf::from(name)
}

/// Resolve the help document for `path`.
///
/// A sidecar file wins without executing anything. Without one, the target is
/// run once with the probe argument and its stdout parsed as YAML. Runs during
/// tree construction only, never at dispatch time.
pub fn resolve_help(path: &Path) -> TreeResult<HelpDoc> {
    let sidecar = sidecar_path(path);
    if sidecar.is_file() {
        debug!("Loading help from {}", sidecar.display());
        let content = std::fs::read_to_string(&sidecar).map_err(|e| TreeError::Parse {
            path: sidecar.clone(),
            reason: e.to_string(),
        })?;
        return serde_yaml::from_str(&content).map_err(|e| TreeError::Parse {
            path: sidecar,
            reason: e.to_string(),
        });
    }

    debug!("Probing {} for help", path.display());
    let output = Command::new(path)
        .arg(PROBE_ARG)
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output()
        .map_err(|e| TreeError::Probe {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    if !output.status.success() {
        return Err(TreeError::Probe {
            path: path.to_path_buf(),
            reason: format!("probe exited with {}", output.status),
        });
    }
    serde_yaml::from_slice(&output.stdout).map_err(|e| TreeError::Parse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}
