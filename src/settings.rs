//! Configuration with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled default: `./thicket`
//! 2. Global config: `$XDG_CONFIG_HOME/thicket/thicket.toml`
//! 3. Environment variable: `THICKET_ROOT_DIR`

use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File};
use directories::ProjectDirs;
use serde::Deserialize;

/// Resolved settings threaded through construction and dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Root directory whose layout defines the command tree.
    pub root_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            root_dir: PathBuf::from("./thicket"),
        }
    }
}

/// Raw settings for intermediate parsing (fields are Option to detect
/// "not specified" during layered merging).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    root_dir: Option<PathBuf>,
}

/// Path of the global config file, if a home directory can be determined.
pub fn global_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "thicket").map(|dirs| dirs.config_dir().join("thicket.toml"))
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        if let Some(global) = global_config_path() {
            builder = builder.add_source(File::from(global).required(false));
        }
        let raw: RawSettings = builder
            .add_source(Environment::with_prefix("THICKET"))
            .build()?
            .try_deserialize()?;

        let defaults = Settings::default();
        Ok(Settings {
            root_dir: raw.root_dir.unwrap_or(defaults.root_dir),
        })
    }
}
