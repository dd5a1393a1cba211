//! Single hosts-file line: host-entry view and mutators.
//!
//! A [`Line`] wraps the raw text of one record together with the comment
//! marker in use. Every attribute is derived from the raw text on demand and
//! every mutator returns a new `Line`, leaving the bytes it does not edit
//! untouched.

use std::fmt;
use std::net::IpAddr;
use std::ops::Range;

use super::COMMENT_MARKER;

/// Keyword that follows the comment marker in a time-window directive.
const DIRECTIVE: &str = "freeblock:";

/// Whether `s` is an IPv4 or IPv6 literal.
pub fn is_address(s: &str) -> bool {
    s.parse::<IpAddr>().is_ok()
}

/// Hours during which a blocked entry must not be unblocked, `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: u32,
    pub end: u32,
}

impl TimeWindow {
    /// Parse the `HH-HH` part of a directive. Both halves must be bare digits.
    fn parse(s: &str) -> Option<Self> {
        let (start, end) = s.split_once('-')?;
        Some(TimeWindow {
            start: parse_hour(start)?,
            end: parse_hour(end)?,
        })
    }

    pub fn contains(&self, hour: u32) -> bool {
        self.start <= hour && hour < self.end
    }
}

fn parse_hour(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// One line of a hosts file. May be a host entry (possibly commented out) or anything else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    raw: String,
    marker: char,
}

impl Line {
    /// Line using the default `#` comment marker.
    pub fn new(raw: impl Into<String>) -> Self {
        Self::with_marker(raw, COMMENT_MARKER)
    }

    pub fn with_marker(raw: impl Into<String>, marker: char) -> Self {
        Self {
            raw: raw.into(),
            marker,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn into_string(self) -> String {
        self.raw
    }

    /// Whether the first non-whitespace character is the comment marker.
    pub fn is_commented(&self) -> bool {
        self.raw.trim_start().starts_with(self.marker)
    }

    /// Text with surrounding whitespace and at most one leading marker removed.
    fn body(&self) -> &str {
        let s = self.raw.trim();
        s.strip_prefix(self.marker).unwrap_or(s).trim()
    }

    /// Whether this line maps an address to at least one more token, commented out or not.
    pub fn is_host_entry(&self) -> bool {
        let mut fields = self.body().split_whitespace();
        match (fields.next(), fields.next()) {
            (Some(address), Some(_)) => is_address(address),
            _ => false,
        }
    }

    /// The address of a host entry, or `""` for any other line.
    pub fn address(&self) -> &str {
        match self.address_span() {
            Some(span) => &self.raw[span],
            None => "",
        }
    }

    /// Byte range of the address token within the raw text.
    fn address_span(&self) -> Option<Range<usize>> {
        if !self.is_host_entry() {
            return None;
        }
        let raw = self.raw.as_str();
        let mut start = raw.len() - raw.trim_start().len();
        if raw[start..].starts_with(self.marker) {
            start += self.marker.len_utf8();
        }
        start += raw[start..].len() - raw[start..].trim_start().len();
        let end = raw[start..]
            .find(char::is_whitespace)
            .map_or(raw.len(), |i| start + i);
        Some(start..end)
    }

    /// Byte offset just past the address token.
    pub(crate) fn address_end(&self) -> Option<usize> {
        self.address_span().map(|span| span.end)
    }

    /// Replace the address token. Lines that are not host entries come back unchanged.
    pub fn with_address(&self, address: &str) -> Line {
        let Some(span) = self.address_span() else {
            return self.clone();
        };
        let mut raw = self.raw.clone();
        raw.replace_range(span, address);
        Self::with_marker(raw, self.marker)
    }

    /// Domain name and aliases, up to the first inline comment.
    ///
    /// A token such as `google.com#work` ends the list but still contributes
    /// the `google.com` fragment before the marker.
    pub fn hostnames(&self) -> Vec<&str> {
        let mut names = Vec::new();
        if !self.is_host_entry() {
            return names;
        }
        for field in self.body().split_whitespace().skip(1) {
            match field.find(self.marker) {
                Some(0) => break,
                Some(idx) => {
                    names.push(&field[..idx]);
                    break;
                }
                None => names.push(field),
            }
        }
        names
    }

    /// Raw text after the first inline comment marker following the address.
    pub fn comment(&self) -> Option<&str> {
        let end = self.address_span()?.end;
        let idx = self.raw[end..].find(self.marker)?;
        Some(&self.raw[end + idx + self.marker.len_utf8()..])
    }

    /// The first `#freeblock:HH-HH` directive found in an inline comment.
    ///
    /// A malformed directive counts as no directive at all.
    pub fn time_window(&self) -> Option<TimeWindow> {
        let mut fields = self.body().split_whitespace();
        if !is_address(fields.next()?) {
            return None;
        }
        fields
            .filter_map(|field| {
                let idx = field.find(self.marker)?;
                field[idx + self.marker.len_utf8()..].strip_prefix(DIRECTIVE)
            })
            .next()
            .and_then(TimeWindow::parse)
    }

    /// Prefix the comment marker, after any leading whitespace, unless already there.
    pub fn commented(&self) -> Line {
        let rest = self.raw.trim_start();
        if rest.starts_with(self.marker) {
            return self.clone();
        }
        let lead = &self.raw[..self.raw.len() - rest.len()];
        Self::with_marker(format!("{lead}{}{rest}", self.marker), self.marker)
    }

    /// Drop the leading comment marker and the whitespace right after it.
    pub fn uncommented(&self) -> Line {
        let rest = self.raw.trim_start();
        let Some(after) = rest.strip_prefix(self.marker) else {
            return self.clone();
        };
        let lead = &self.raw[..self.raw.len() - rest.len()];
        Self::with_marker(format!("{lead}{}", after.trim_start()), self.marker)
    }

    /// Append raw text to the end of the line.
    pub fn with_suffix(&self, suffix: &str) -> Line {
        Self::with_marker(format!("{}{suffix}", self.raw), self.marker)
    }

    /// Keep only the first `len` bytes.
    pub(crate) fn truncated(&self, len: usize) -> Line {
        Self::with_marker(&self.raw[..len], self.marker)
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
