//! Hosts file text <-> line records.

use std::io::{Read, Write};

/// Line terminator used when writing records back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

/// Decoded hosts file: one record per line, without terminators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostsText {
    pub lines: Vec<String>,
    pub ending: LineEnding,
    /// Whether the last record was followed by a terminator.
    pub final_newline: bool,
}

impl Default for HostsText {
    fn default() -> Self {
        Self {
            lines: Vec::new(),
            ending: LineEnding::Lf,
            final_newline: true,
        }
    }
}

impl HostsText {
    /// Split content into records. Empty content yields no records.
    pub fn parse(content: &str) -> Self {
        if content.is_empty() {
            return Self::default();
        }
        let ending = if content.contains("\r\n") {
            LineEnding::CrLf
        } else {
            LineEnding::Lf
        };
        Self {
            lines: content.lines().map(String::from).collect(),
            ending,
            final_newline: content.ends_with('\n'),
        }
    }

    pub fn render(&self) -> String {
        let ending = self.ending.as_str();
        let mut out = self.lines.join(ending);
        if self.final_newline && !self.lines.is_empty() {
            out.push_str(ending);
        }
        out
    }

    /// Same framing, new records.
    pub fn with_lines(&self, lines: Vec<String>) -> Self {
        Self {
            lines,
            ending: self.ending,
            final_newline: self.final_newline,
        }
    }
}

/// Read all records from `reader`.
pub fn read_lines(reader: &mut dyn Read) -> std::io::Result<HostsText> {
    let mut content = String::new();
    reader.read_to_string(&mut content)?;
    Ok(HostsText::parse(&content))
}

/// Write all records to `writer`.
pub fn write_lines(writer: &mut dyn Write, text: &HostsText) -> std::io::Result<()> {
    writer.write_all(text.render().as_bytes())?;
    writer.flush()
}
