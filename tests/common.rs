//! Shared test helpers.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::NaiveTime;
use freeblock::hosts::HostsText;
use freeblock::platform::HostsStore;
use tempfile::TempDir;

/// Create a temp directory for use as FREEBLOCK_HOME.
/// Uses current dir (workspace) so sandbox allows full access.
pub fn temp_home() -> TempDir {
    tempfile::Builder::new()
        .prefix("freeblock_test_")
        .tempdir_in(std::env::current_dir().unwrap_or_else(|_| Path::new(".").into()))
        .expect("temp dir")
}

/// Run a closure with FREEBLOCK_HOME set to the given path.
pub fn with_test_env<F, R>(home: &Path, f: F) -> R
where
    F: FnOnce() -> R,
{
    let prev = std::env::var_os("FREEBLOCK_HOME");
    std::env::set_var("FREEBLOCK_HOME", home);
    let r = f();
    match prev {
        Some(v) => std::env::set_var("FREEBLOCK_HOME", v),
        None => std::env::remove_var("FREEBLOCK_HOME"),
    }
    r
}

/// Write `content` to `<dir>/hosts` and return the path.
pub fn write_hosts(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("hosts");
    std::fs::write(&path, content).expect("write hosts");
    path
}

/// Time of day for a fixed clock.
pub fn at(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).expect("valid time")
}

pub fn lines(records: &[&str]) -> Vec<String> {
    records.iter().map(|s| s.to_string()).collect()
}

/// HostsStore kept in memory; records every save.
pub struct MemoryHostsStore {
    text: Mutex<HostsText>,
    saves: Mutex<usize>,
}

impl MemoryHostsStore {
    pub fn new(content: &str) -> Self {
        Self {
            text: Mutex::new(HostsText::parse(content)),
            saves: Mutex::new(0),
        }
    }

    pub fn content(&self) -> String {
        self.text.lock().unwrap().render()
    }

    pub fn saves(&self) -> usize {
        *self.saves.lock().unwrap()
    }
}

impl HostsStore for MemoryHostsStore {
    fn load(&self) -> freeblock::Result<HostsText> {
        Ok(self.text.lock().unwrap().clone())
    }

    fn save(&self, text: &HostsText) -> freeblock::Result<()> {
        *self.text.lock().unwrap() = text.clone();
        *self.saves.lock().unwrap() += 1;
        Ok(())
    }
}
