//! Command implementations for coursectl

use anyhow::{Context, Result};
use course_common::course::CourseError;
use course_common::{
    error_log, render_trace, CourseConfig, ErrorLogReader, ErrorLogger, LoggedError,
};
use owo_colors::OwoColorize;
use tracing::debug;

use crate::errors::{EXIT_FAULT, EXIT_LOG_UNAVAILABLE, EXIT_SUCCESS};
use crate::output;
use crate::scenario::{self, PolicyArg, Scenario};

/// Which entries `errors` lists
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// First occurrence per file:line:kind
    Unique,
    All,
    Recent(usize),
}

/// Run a scenario and report; returns the process exit code
pub fn run(
    config: &CourseConfig,
    scenario: Scenario,
    policy: PolicyArg,
    input: Option<&str>,
    color: bool,
) -> i32 {
    let logger = ErrorLogger::new(&config.logging.error_log);

    match scenario::run(&logger, scenario, policy.into(), input) {
        Ok(result) => {
            println!("{}", result);
            EXIT_SUCCESS
        }
        Err(err) => {
            let code = match &err {
                CourseError::Fault(_) => EXIT_FAULT,
                CourseError::Unlogged { .. } => EXIT_LOG_UNAVAILABLE,
            };
            if color {
                eprintln!("{} {}", "fault:".bright_red(), err);
            } else {
                eprintln!("fault: {}", err);
            }
            eprintln!("trace: {}", render_trace(err.fault().trace()));
            if let CourseError::Fault(_) = err {
                eprintln!("logged to {}", logger.path().display());
            }
            code
        }
    }
}

/// Select logged entries
pub fn select_errors(config: &CourseConfig, selection: Selection) -> Result<Vec<LoggedError>> {
    let reader = ErrorLogReader::new(&config.logging.error_log);
    debug!(path = %reader.path().display(), ?selection, "reading error log");

    let entries = match selection {
        Selection::Unique => reader.unique_errors(),
        Selection::All => reader.read_all(),
        Selection::Recent(n) => reader.read_recent(n),
    };
    entries.with_context(|| format!("Failed to read {}", reader.path().display()))
}

/// Render the `errors` listing
pub fn render_errors(entries: &[LoggedError], json: bool, color: bool) -> Result<String> {
    if json {
        return serde_json::to_string_pretty(entries).context("Failed to serialize entries");
    }
    if entries.is_empty() {
        return Ok("no errors recorded".to_string());
    }
    Ok(entries
        .iter()
        .map(|e| output::format_entry(e, color))
        .collect::<Vec<_>>()
        .join("\n"))
}

/// Render the `summary` report
pub fn render_summary(config: &CourseConfig, json: bool) -> Result<String> {
    let reader = ErrorLogReader::new(&config.logging.error_log);
    let summary = reader
        .summary()
        .with_context(|| format!("Failed to read {}", reader.path().display()))?;

    if json {
        return serde_json::to_string_pretty(&summary).context("Failed to serialize summary");
    }
    Ok(output::format_summary(&summary))
}

/// Render source windows around each unique logged error
pub fn render_context(config: &CourseConfig, color: bool) -> Result<String> {
    let entries = select_errors(config, Selection::Unique)?;
    if entries.is_empty() {
        return Ok("no errors recorded".to_string());
    }

    let mut blocks = Vec::with_capacity(entries.len());
    for entry in &entries {
        let path = config.analysis.source_dir.join(&entry.file);
        let window = error_log::source_context(
            &path,
            entry.line as usize,
            config.analysis.context_lines,
        )
        .with_context(|| format!("Failed to read {}", path.display()))?;

        let body = match window {
            Some(ctx) => ctx.render(),
            None => format!("source not found: {}", path.display()),
        };
        blocks.push(format!(
            "{}\n{}",
            output::format_context_header(entry, color),
            body
        ));
    }

    Ok(blocks.join("\n\n"))
}
