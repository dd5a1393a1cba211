//! Hosts file model: the line view, its mutators and the text codec.

mod io;
mod line;

pub use io::{read_lines, write_lines, HostsText, LineEnding};
pub use line::{is_address, Line, TimeWindow};

/// Address that marks a domain as blocked.
pub const BLOCKED_ADDRESS: &str = "0.0.0.0";

/// Starts a comment, either for the whole line or inline.
pub const COMMENT_MARKER: char = '#';

/// Written before the backed-up address of a blocked entry.
pub const BACKUP_PREFIX: &str = " # ";

/// The fixed strings both the line model and the reconciler agree on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markers {
    pub blocked_address: String,
    pub comment_marker: char,
    pub backup_prefix: String,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            blocked_address: BLOCKED_ADDRESS.to_string(),
            comment_marker: COMMENT_MARKER,
            backup_prefix: BACKUP_PREFIX.to_string(),
        }
    }
}

impl Markers {
    /// Wrap a raw record in a [`Line`] using this comment marker.
    pub fn line(&self, raw: impl Into<String>) -> Line {
        Line::with_marker(raw, self.comment_marker)
    }
}
