// src/config.rs

//! Settings file (`modkit.toml`)
//!
//! ```toml
//! catalog = "mods.json"
//! cache_dir = "cache"
//! staging_dir = "staging"
//! target_dir = "/games/bg2"
//! enforce_conflicts = true
//! ```
//!
//! Every key is optional.

use crate::error::{Error, Result};
use crate::tools::InstallLayout;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Settings file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "modkit.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Package catalog (JSON)
    #[serde(default = "default_catalog")]
    pub catalog: PathBuf,

    /// Where downloaded archives are kept
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,

    /// Where archives are extracted before merging
    #[serde(default = "default_staging_dir")]
    pub staging_dir: PathBuf,

    /// Directory components are installed into
    #[serde(default = "default_target_dir")]
    pub target_dir: PathBuf,

    /// Refuse selections that conflict with selected components
    #[serde(default = "default_enforce_conflicts")]
    pub enforce_conflicts: bool,
}

fn default_catalog() -> PathBuf {
    PathBuf::from("mods.json")
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from("cache")
}

fn default_staging_dir() -> PathBuf {
    PathBuf::from("staging")
}

fn default_target_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_enforce_conflicts() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            catalog: default_catalog(),
            cache_dir: default_cache_dir(),
            staging_dir: default_staging_dir(),
            target_dir: default_target_dir(),
            enforce_conflicts: default_enforce_conflicts(),
        }
    }
}

impl Settings {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Read a settings file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Load `path`, or `modkit.toml` if present, or the defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.exists() {
                    Self::from_file(default)
                } else {
                    debug!("No {} found, using default settings", DEFAULT_CONFIG_FILE);
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn layout(&self) -> InstallLayout {
        InstallLayout {
            cache_dir: self.cache_dir.clone(),
            staging_dir: self.staging_dir.clone(),
            target_dir: self.target_dir.clone(),
        }
    }
}
