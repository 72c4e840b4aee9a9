//! Error log reader and analysis
//!
//! Reads back the lines written by `ErrorLogger`, collapses repeats of the
//! same fault site, and pulls the source window around a logged line.

use std::collections::{BTreeMap, HashSet};
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error_logger::ERROR_LOG_FILE;

static LOG_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[ERROR\] \[(.*?)\] \[(.*?):(\d+)\] (\w+): (.*)$").unwrap()
});

/// A parsed error log line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggedError {
    pub timestamp: String,
    pub file: String,
    pub line: u32,
    pub kind: String,
    pub message: String,
}

impl LoggedError {
    /// Parse from log line
    pub fn parse(line: &str) -> Option<Self> {
        let caps = LOG_LINE.captures(line.trim_end_matches(['\r', '\n']))?;

        Some(Self {
            timestamp: caps[1].to_string(),
            file: caps[2].to_string(),
            line: caps[3].parse().ok()?,
            kind: caps[4].to_string(),
            message: caps[5].to_string(),
        })
    }

    /// Key identifying the fault site, ignoring time and message
    pub fn site_key(&self) -> String {
        format!("{}:{}:{}", self.file, self.line, self.kind)
    }
}

/// Error log reader
pub struct ErrorLogReader {
    log_path: PathBuf,
}

impl ErrorLogReader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            log_path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.log_path
    }

    /// Check if the error log exists
    pub fn exists(&self) -> bool {
        self.log_path.exists()
    }

    /// Read all entries in file order
    ///
    /// A missing log reads as empty. Lines without the `[ERROR]` marker are
    /// skipped silently; marked lines that fail to parse are skipped with a
    /// warning.
    pub fn read_all(&self) -> io::Result<Vec<LoggedError>> {
        if !self.exists() {
            return Ok(Vec::new());
        }

        let reader = BufReader::new(File::open(&self.log_path)?);
        let mut entries = Vec::new();

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || !trimmed.contains("[ERROR]") {
                continue;
            }
            match LoggedError::parse(trimmed) {
                Some(entry) => entries.push(entry),
                None => warn!(
                    path = %self.log_path.display(),
                    line = idx + 1,
                    "skipping malformed error log line"
                ),
            }
        }

        Ok(entries)
    }

    /// Read recent entries (last N)
    pub fn read_recent(&self, count: usize) -> io::Result<Vec<LoggedError>> {
        let all = self.read_all()?;
        let skip = all.len().saturating_sub(count);
        Ok(all.into_iter().skip(skip).collect())
    }

    /// Most recently logged entry
    pub fn latest(&self) -> io::Result<Option<LoggedError>> {
        Ok(self.read_all()?.pop())
    }

    /// First occurrence of each fault site, in file order
    pub fn unique_errors(&self) -> io::Result<Vec<LoggedError>> {
        Ok(dedup_by_site(self.read_all()?))
    }

    pub fn summary(&self) -> io::Result<ErrorLogSummary> {
        Ok(ErrorLogSummary::from_entries(&self.read_all()?))
    }
}

impl Default for ErrorLogReader {
    fn default() -> Self {
        Self::new(ERROR_LOG_FILE)
    }
}

/// Keep the first entry per `file:line:kind`
pub fn dedup_by_site(entries: Vec<LoggedError>) -> Vec<LoggedError> {
    let mut seen = HashSet::new();
    entries
        .into_iter()
        .filter(|e| seen.insert(e.site_key()))
        .collect()
}

/// Error log summary for display
#[derive(Debug, Clone, Default, Serialize)]
pub struct ErrorLogSummary {
    pub total_entries: usize,
    pub unique_sites: usize,
    pub by_kind: BTreeMap<String, usize>,
    pub first_entry: Option<String>,
    pub last_entry: Option<String>,
}

impl ErrorLogSummary {
    pub fn from_entries(entries: &[LoggedError]) -> Self {
        let mut by_kind = BTreeMap::new();
        for entry in entries {
            *by_kind.entry(entry.kind.clone()).or_insert(0) += 1;
        }

        Self {
            total_entries: entries.len(),
            unique_sites: dedup_by_site(entries.to_vec()).len(),
            by_kind,
            first_entry: entries.first().map(|e| e.timestamp.clone()),
            last_entry: entries.last().map(|e| e.timestamp.clone()),
        }
    }

    /// Format for single-line display
    pub fn format_compact(&self) -> String {
        if self.total_entries == 0 {
            return "no errors recorded".to_string();
        }

        let kinds: Vec<String> = self
            .by_kind
            .iter()
            .map(|(kind, count)| format!("{} {}", count, kind))
            .collect();

        format!(
            "{} errors at {} sites ({})",
            self.total_entries,
            self.unique_sites,
            kinds.join(", ")
        )
    }
}

/// Lines of source surrounding a logged line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceContext {
    /// 1-based number of the first line in `lines`
    pub first_line: usize,
    pub lines: Vec<String>,
    /// The logged line number
    pub target_line: usize,
}

impl SourceContext {
    /// Render with line numbers, marking the target line
    pub fn render(&self) -> String {
        let width = (self.first_line + self.lines.len()).to_string().len();
        self.lines
            .iter()
            .enumerate()
            .map(|(i, text)| {
                let number = self.first_line + i;
                let marker = if number == self.target_line { ">" } else { " " };
                format!("{} {:>width$} | {}", marker, number, text, width = width)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Read roughly `context_lines` lines centred on `line` (1-based)
///
/// Returns `Ok(None)` when the source file does not exist.
pub fn source_context(
    path: &Path,
    line: usize,
    context_lines: usize,
) -> io::Result<Option<SourceContext>> {
    let contents = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e),
    };

    let all: Vec<&str> = contents.lines().collect();
    let half = context_lines / 2;
    let start = line.saturating_sub(half + 1);
    let end = (line + half).min(all.len());
    let start = start.min(end);

    Ok(Some(SourceContext {
        first_line: start + 1,
        lines: all[start..end].iter().map(|l| l.to_string()).collect(),
        target_line: line,
    }))
}
