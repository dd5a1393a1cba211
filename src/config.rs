//! Configuration loading and path resolution.
//!
//! Supports FREEBLOCK_HOME env var override for testing.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::hosts::{is_address, Markers, BACKUP_PREFIX, BLOCKED_ADDRESS, COMMENT_MARKER};
use crate::platform::{default_hosts_path, HOSTS_FILE_ENV};

/// Paths for freeblock's own files.
#[derive(Debug, Clone)]
pub struct FreeblockPaths {
    pub config_dir: PathBuf,
    pub config_file: PathBuf,
}

impl FreeblockPaths {
    /// Build paths from base directory (e.g. ProjectDirs config dir or FREEBLOCK_HOME).
    pub fn from_base(base: PathBuf) -> Self {
        let config_file = base.join("config.toml");
        Self {
            config_dir: base,
            config_file,
        }
    }

    /// Paths for testing: use a temp dir as base.
    pub fn for_test(base: impl AsRef<Path>) -> Self {
        Self::from_base(base.as_ref().to_path_buf())
    }

    /// Get default freeblock paths (respects FREEBLOCK_HOME).
    pub fn default_paths() -> Self {
        let base = if let Ok(home) = std::env::var("FREEBLOCK_HOME") {
            PathBuf::from(home)
        } else if let Some(dirs) = directories::ProjectDirs::from("com", "freeblock", "freeblock") {
            dirs.config_dir().to_path_buf()
        } else {
            PathBuf::from(".freeblock")
        };
        Self::from_base(base)
    }
}

/// Path to config.toml (respects FREEBLOCK_HOME).
pub fn config_path() -> PathBuf {
    FreeblockPaths::default_paths().config_file
}

/// Main config.toml structure. Every key is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Hosts file to edit instead of the system one.
    pub hosts_file: Option<PathBuf>,
    pub blocked_address: String,
    pub comment_marker: char,
    pub backup_prefix: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hosts_file: None,
            blocked_address: BLOCKED_ADDRESS.to_string(),
            comment_marker: COMMENT_MARKER,
            backup_prefix: BACKUP_PREFIX.to_string(),
        }
    }
}

impl Config {
    /// Load config from paths. A missing file means defaults.
    pub fn load(paths: &FreeblockPaths) -> Result<Config> {
        if !paths.config_file.is_file() {
            return Ok(Config::default());
        }
        let s = fs::read_to_string(&paths.config_file)
            .map_err(|e| Error::io("read", &paths.config_file, e))?;
        let cfg: Config = toml::from_str(&s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if !is_address(&self.blocked_address) {
            return Err(Error::InvalidConfig(format!(
                "blocked_address {:?} is not an IP address",
                self.blocked_address
            )));
        }
        if self.comment_marker.is_whitespace() {
            return Err(Error::InvalidConfig(
                "comment_marker cannot be whitespace".to_string(),
            ));
        }
        if !self.backup_prefix.contains(self.comment_marker) {
            return Err(Error::InvalidConfig(format!(
                "backup_prefix {:?} must contain the comment marker {:?}",
                self.backup_prefix, self.comment_marker
            )));
        }
        Ok(())
    }

    pub fn markers(&self) -> Markers {
        Markers {
            blocked_address: self.blocked_address.clone(),
            comment_marker: self.comment_marker,
            backup_prefix: self.backup_prefix.clone(),
        }
    }

    /// Hosts file to edit: FREEBLOCK_HOSTS_FILE, then `hosts_file`, then the platform default.
    pub fn hosts_path(&self) -> PathBuf {
        std::env::var_os(HOSTS_FILE_ENV)
            .map(PathBuf::from)
            .or_else(|| self.hosts_file.clone())
            .unwrap_or_else(default_hosts_path)
    }
}
