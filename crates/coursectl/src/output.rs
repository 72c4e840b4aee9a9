//! Terminal formatting for logged errors

use course_common::{ErrorLogSummary, LoggedError};
use owo_colors::OwoColorize;

/// One logged error on one line
pub fn format_entry(entry: &LoggedError, color: bool) -> String {
    let site = format!("{}:{}", entry.file, entry.line);
    if color {
        format!(
            "{}  {}  {}: {}",
            entry.timestamp.dimmed(),
            site.cyan(),
            entry.kind.bright_red(),
            entry.message
        )
    } else {
        format!("{}  {}  {}: {}", entry.timestamp, site, entry.kind, entry.message)
    }
}

/// Summary block: compact line plus one line per kind
pub fn format_summary(summary: &ErrorLogSummary) -> String {
    let mut out = vec![summary.format_compact()];
    if let (Some(first), Some(last)) = (&summary.first_entry, &summary.last_entry) {
        out.push(format!("first: {}  last: {}", first, last));
    }
    for (kind, count) in &summary.by_kind {
        out.push(format!("  {:<24} {}", kind, count));
    }
    out.join("\n")
}

/// Header printed above a source window
pub fn format_context_header(entry: &LoggedError, color: bool) -> String {
    let header = format!("{}:{} {}", entry.file, entry.line, entry.kind);
    if color {
        format!("{}\n{}", header.bold(), entry.message)
    } else {
        format!("{}\n{}", header, entry.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> LoggedError {
        LoggedError {
            timestamp: "2024-06-01 14:23:05".to_string(),
            file: "service.rs".to_string(),
            line: 12,
            kind: "DivideByZeroError".to_string(),
            message: "Attempted to divide by zero.".to_string(),
        }
    }

    #[test]
    fn test_plain_entry() {
        assert_eq!(
            format_entry(&entry(), false),
            "2024-06-01 14:23:05  service.rs:12  DivideByZeroError: Attempted to divide by zero."
        );
    }

    #[test]
    fn test_summary_lists_kinds() {
        let summary = ErrorLogSummary::from_entries(&[entry(), entry()]);
        let text = format_summary(&summary);

        assert!(text.starts_with("2 errors at 1 sites"));
        assert!(text.contains("DivideByZeroError"));
    }
}
