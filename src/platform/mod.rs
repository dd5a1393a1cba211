//! Platform abstraction for the hosts file location and storage.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::hosts::{read_lines, write_lines, HostsText};

/// Env var that overrides the system hosts file (used by tests).
pub const HOSTS_FILE_ENV: &str = "FREEBLOCK_HOSTS_FILE";

/// Trait for loading and saving the hosts file as line records.
pub trait HostsStore: Send + Sync {
    fn load(&self) -> Result<HostsText>;
    fn save(&self, text: &HostsText) -> Result<()>;
}

/// System hosts file path. If FREEBLOCK_HOSTS_FILE is set, uses that path instead.
pub fn default_hosts_path() -> PathBuf {
    if let Some(path) = std::env::var_os(HOSTS_FILE_ENV) {
        return PathBuf::from(path);
    }
    #[cfg(windows)]
    return PathBuf::from(r"C:\Windows\System32\drivers\etc\hosts");

    #[cfg(not(windows))]
    return PathBuf::from("/etc/hosts");
}

/// HostsStore that reads/writes a file at the given path, under an advisory lock.
#[derive(Debug, Clone)]
pub struct FileHostsStore {
    path: PathBuf,
}

impl FileHostsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HostsStore for FileHostsStore {
    fn load(&self) -> Result<HostsText> {
        let mut file = fs::File::open(&self.path).map_err(|e| Error::io("open", &self.path, e))?;
        fs2::FileExt::lock_shared(&file).map_err(|e| Error::io("lock", &self.path, e))?;
        read_lines(&mut file).map_err(|e| Error::io("read", &self.path, e))
    }

    fn save(&self, text: &HostsText) -> Result<()> {
        // Truncate only once the exclusive lock is held.
        let mut file = fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(&self.path)
            .map_err(|e| Error::io("open", &self.path, e))?;
        fs2::FileExt::lock_exclusive(&file).map_err(|e| Error::io("lock", &self.path, e))?;
        file.set_len(0)
            .map_err(|e| Error::io("truncate", &self.path, e))?;
        write_lines(&mut file, text).map_err(|e| Error::io("write", &self.path, e))
    }
}
