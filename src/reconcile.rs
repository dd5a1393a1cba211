//! Block/unblock reconciliation over a whole hosts file.
//!
//! Both operations are pure: they take the current records and the requested
//! domains, and return the new records plus a list of what changed. Matching
//! is by exact hostname, and a matching line transitions as a whole, aliases
//! included.

use std::collections::HashSet;
use std::fmt;

use chrono::{NaiveTime, Timelike};
use tracing::debug;

use crate::error::TimingViolation;
use crate::hosts::{is_address, Line, Markers};

/// Source of the current local time of day.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveTime;
}

/// Local wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveTime {
        chrono::Local::now().time()
    }
}

/// A fixed time of day.
impl Clock for NaiveTime {
    fn now(&self) -> NaiveTime {
        *self
    }
}

/// One transition applied by a reconciliation. Line numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    /// Existing entry now points at the blocked address. `backup` is the
    /// address saved in the trailing comment, if the line needed one.
    Blocked {
        line: usize,
        domain: String,
        backup: Option<String>,
    },
    /// New entry added at the end of the file.
    Appended { line: usize, domain: String },
    /// Backed-up address put back in place.
    Restored {
        line: usize,
        domain: String,
        address: String,
    },
    /// No backup to restore, so the entry was commented out.
    CommentedOut { line: usize, domain: String },
    /// Entry does not point at the blocked address; left alone.
    AlreadyOpen { line: usize, domain: String },
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Change::Blocked {
                line,
                domain,
                backup: Some(previous),
            } => write!(f, "Blocked {domain} (line {line}, was {previous})"),
            Change::Blocked {
                line,
                domain,
                backup: None,
            } => write!(f, "Blocked {domain} (line {line})"),
            Change::Appended { line, domain } => write!(f, "Blocked {domain} (added line {line})"),
            Change::Restored {
                line,
                domain,
                address,
            } => write!(f, "Unblocked {domain} (line {line}, restored {address})"),
            Change::CommentedOut { line, domain } => {
                write!(f, "Unblocked {domain} (line {line} commented out)")
            }
            Change::AlreadyOpen { line, domain } => {
                write!(f, "{domain} already unblocked (line {line})")
            }
        }
    }
}

/// Result of a reconciliation: the full record sequence to write back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciled {
    pub lines: Vec<String>,
    pub changes: Vec<Change>,
}

/// Applies block/unblock requests to hosts file records.
#[derive(Debug, Clone, Default)]
pub struct Reconciler {
    markers: Markers,
}

impl Reconciler {
    pub fn new(markers: Markers) -> Self {
        Self { markers }
    }

    pub fn markers(&self) -> &Markers {
        &self.markers
    }

    /// Point every requested domain at the blocked address.
    ///
    /// Existing entries are uncommented and keep their old address as a
    /// trailing comment; domains with no entry get a new line at the end.
    pub fn block<S: AsRef<str>>(&self, domains: &[S], lines: &[String]) -> Reconciled {
        let requested: HashSet<&str> = domains.iter().map(AsRef::as_ref).collect();
        let blocked_address = self.markers.blocked_address.as_str();
        let mut satisfied: HashSet<String> = HashSet::new();
        let mut out = Vec::with_capacity(lines.len() + domains.len());
        let mut changes = Vec::new();

        for (idx, raw) in lines.iter().enumerate() {
            let line = self.markers.line(raw.as_str());
            let hostnames = line.hostnames();
            let Some(domain) = hostnames.iter().find(|h| requested.contains(*h)) else {
                out.push(raw.clone());
                continue;
            };

            let mut blocked = line.uncommented();
            let previous = blocked.address().to_string();
            let backup = if previous == blocked_address {
                None
            } else {
                blocked = blocked
                    .with_address(blocked_address)
                    .with_suffix(&format!("{}{previous}", self.markers.backup_prefix));
                Some(previous)
            };
            debug!(line = idx + 1, %domain, ?backup, "blocking existing entry");

            changes.push(Change::Blocked {
                line: idx + 1,
                domain: domain.to_string(),
                backup,
            });
            satisfied.extend(hostnames.iter().map(|h| h.to_string()));
            out.push(blocked.into_string());
        }

        for domain in domains {
            let domain: &str = domain.as_ref();
            if satisfied.contains(domain) {
                continue;
            }
            out.push(format!("{blocked_address} {domain}"));
            debug!(line = out.len(), %domain, "appending blocked entry");
            changes.push(Change::Appended {
                line: out.len(),
                domain: domain.to_string(),
            });
            satisfied.insert(domain.to_string());
        }

        Reconciled {
            lines: out,
            changes,
        }
    }

    /// Restore the backed-up address of every blocked entry for the requested domains.
    ///
    /// Entries without a usable backup are commented out instead. Fails without
    /// producing any output if a matched entry's time window covers the current hour.
    pub fn unblock<S: AsRef<str>>(
        &self,
        domains: &[S],
        lines: &[String],
        clock: &dyn Clock,
    ) -> Result<Reconciled, TimingViolation> {
        let requested: HashSet<&str> = domains.iter().map(AsRef::as_ref).collect();
        let now = clock.now();
        let mut out = Vec::with_capacity(lines.len());
        let mut changes = Vec::new();

        for (idx, raw) in lines.iter().enumerate() {
            let line = self.markers.line(raw.as_str());
            let hostnames = line.hostnames();
            let Some(domain) = hostnames.iter().find(|h| requested.contains(*h)) else {
                out.push(raw.clone());
                continue;
            };
            let number = idx + 1;

            if let Some(window) = line.time_window() {
                if window.contains(now.hour()) {
                    return Err(TimingViolation {
                        line: number,
                        domain: domain.to_string(),
                        window,
                        now,
                    });
                }
            }

            if line.address() != self.markers.blocked_address {
                changes.push(Change::AlreadyOpen {
                    line: number,
                    domain: domain.to_string(),
                });
                out.push(raw.clone());
                continue;
            }

            let unblocked = match self.backup_address(&line) {
                Some((cut, address)) => {
                    debug!(line = number, %domain, address, "restoring backed-up address");
                    changes.push(Change::Restored {
                        line: number,
                        domain: domain.to_string(),
                        address: address.to_string(),
                    });
                    line.truncated(cut).with_address(address)
                }
                None => {
                    debug!(line = number, %domain, "no backup address, commenting out");
                    changes.push(Change::CommentedOut {
                        line: number,
                        domain: domain.to_string(),
                    });
                    line.commented()
                }
            };
            out.push(unblocked.into_string());
        }

        Ok(Reconciled {
            lines: out,
            changes,
        })
    }

    /// Start of the backup segment and the address it holds.
    ///
    /// The segment is the first backup prefix after the address token and must
    /// hold exactly one address and nothing else.
    fn backup_address<'a>(&self, line: &'a Line) -> Option<(usize, &'a str)> {
        let raw = line.as_str();
        let prefix = self.markers.backup_prefix.as_str();
        let start = line.address_end()?;
        let cut = start + raw[start..].find(prefix)?;
        let mut fields = raw[cut + prefix.len()..].split_whitespace();
        match (fields.next(), fields.next()) {
            (Some(address), None) if is_address(address) => Some((cut, address)),
            _ => None,
        }
    }
}
