//! Error Logger - append-only audit trail of caught faults
//!
//! Lives at ./errors.log unless a path is configured.
//!
//! Format: [ERROR] [<yyyy-mm-dd hh:mm:ss>] [<file>:<line>] <Kind>: <message>
//! Example: [ERROR] [2024-06-01 14:23:05] [helpers.rs:15] ArgumentNullError: Value cannot be null.
//!
//! The logger is a pure observer: it never alters, classifies or swallows the
//! fault it is given. Callers log once per catch, then propagate.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Local};
use tracing::debug;

use crate::fault::{render_trace, Fault};

/// Default error log, relative to the working directory
pub const ERROR_LOG_FILE: &str = "errors.log";

/// Placeholder file name when no frame carries file information
pub const UNKNOWN_FILE: &str = "Unknown";

/// Kind tag written when a kind name has no word characters
pub const UNNAMED_KIND: &str = "Error";

/// Timestamp layout used in log lines
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[cfg(windows)]
const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
const LINE_ENDING: &str = "\n";

/// Serializes appends from every logger in the process
static WRITE_LOCK: Mutex<()> = Mutex::new(());

/// Failure to persist an error record
#[derive(Debug, thiserror::Error)]
pub enum LogWriteError {
    #[error("failed to open error log {}: {source}", .path.display())]
    Open { path: PathBuf, source: io::Error },

    #[error("failed to write error log {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
}

/// One formatted error line, built and discarded inside a logging call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorRecord {
    pub timestamp: String,
    pub source_file: String,
    pub source_line: u32,
    pub kind: String,
    pub message: String,
}

impl ErrorRecord {
    /// Capture a record for `fault` at the current local time
    pub fn capture(fault: &Fault) -> Self {
        Self::capture_at(fault, Local::now())
    }

    /// Capture a record for `fault` with an explicit clock reading
    pub fn capture_at(fault: &Fault, now: DateTime<Local>) -> Self {
        let (source_file, source_line) = match fault.origin() {
            Some(frame) => (base_name(&frame.file).to_string(), frame.line),
            None => (UNKNOWN_FILE.to_string(), 0),
        };

        Self {
            timestamp: now.format(TIMESTAMP_FORMAT).to_string(),
            source_file,
            source_line,
            kind: fault.kind().name().to_string(),
            message: fault.message().to_string(),
        }
    }

    /// Format as log line (no terminator)
    ///
    /// Always a single physical line: CR and LF inside the message are
    /// escaped, and the kind is reduced to a word tag.
    pub fn to_log_line(&self) -> String {
        format!(
            "[ERROR] [{}] [{}:{}] {}: {}",
            self.timestamp,
            self.source_file,
            self.source_line,
            kind_tag(&self.kind),
            escape_line_breaks(&self.message)
        )
    }
}

/// Reduce a kind name to word characters (`io::Error` -> `io__Error`)
pub fn kind_tag(kind: &str) -> String {
    if !kind.chars().any(|c| c.is_ascii_alphanumeric()) {
        return UNNAMED_KIND.to_string();
    }
    kind.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// Replace CR and LF with their escaped spellings `\r` and `\n`
pub fn escape_line_breaks(text: &str) -> String {
    if !text.contains(['\r', '\n']) {
        return text.to_string();
    }
    text.replace('\r', "\\r").replace('\n', "\\n")
}

/// Strip directory components, accepting both `/` and `\` separators
pub fn base_name(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// Error log writer
#[derive(Debug, Clone)]
pub struct ErrorLogger {
    log_path: PathBuf,
}

impl ErrorLogger {
    /// Create a logger appending to `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            log_path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.log_path
    }

    /// Append one line describing `fault`
    ///
    /// The whole line is written with a single `write_all` on an append-mode
    /// handle while holding the process-wide write lock, so concurrent calls
    /// never interleave bytes.
    pub fn log_error(&self, fault: &Fault) -> Result<(), LogWriteError> {
        let record = ErrorRecord::capture(fault);
        debug!(trace = %render_trace(fault.trace()), "logging {}", fault.kind());
        self.append(&record)
    }

    /// Append an already captured record
    pub fn append(&self, record: &ErrorRecord) -> Result<(), LogWriteError> {
        let mut line = record.to_log_line();
        line.push_str(LINE_ENDING);

        // Poisoning does not invalidate the file
        let _guard = WRITE_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|source| LogWriteError::Open {
                path: self.log_path.clone(),
                source,
            })?;

        file.write_all(line.as_bytes())
            .map_err(|source| LogWriteError::Write {
                path: self.log_path.clone(),
                source,
            })?;

        debug!(
            path = %self.log_path.display(),
            kind = %record.kind,
            "appended error record at {}:{}",
            record.source_file,
            record.source_line
        );
        Ok(())
    }
}

impl Default for ErrorLogger {
    fn default() -> Self {
        Self::new(ERROR_LOG_FILE)
    }
}

/// Log `fault` to the default error log
pub fn log_error(fault: &Fault) -> Result<(), LogWriteError> {
    ErrorLogger::default().log_error(fault)
}
