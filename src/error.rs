//! Error types for freeblock.

use std::io;
use std::path::PathBuf;

use chrono::NaiveTime;
use thiserror::Error;

use crate::hosts::TimeWindow;

/// Main error type for freeblock operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Timing(#[from] TimingViolation),

    #[error("failed to {action} {}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config")]
    ConfigParse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

impl Error {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            action,
            path: path.into(),
            source,
        }
    }
}

/// A matched line carries a `#freeblock:` window that covers the current hour.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "it's {} and line {line} of the hosts file disallows unblocking {domain} from {:02}:00 to {:02}:00",
    .now.format("%H:%M"),
    .window.start,
    .window.end
)]
pub struct TimingViolation {
    /// 1-based line number in the hosts file.
    pub line: usize,
    pub domain: String,
    pub window: TimeWindow,
    pub now: NaiveTime,
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;
