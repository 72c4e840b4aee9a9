//! Course Common - faults, error logging and the course application stubs
//!
//! The error logger turns a caught `Fault` into one line of `errors.log`:
//! `[ERROR] [<timestamp>] [<file>:<line>] <Kind>: <message>`.
//! Everything under `course` exists to raise faults for it.

pub mod config;
pub mod course;
pub mod error_log;
pub mod error_logger;
pub mod fault;

pub use config::{ConfigError, CourseConfig};
pub use error_log::{ErrorLogReader, ErrorLogSummary, LoggedError, SourceContext};
pub use error_logger::{log_error, ErrorLogger, ErrorRecord, LogWriteError, ERROR_LOG_FILE};
pub use fault::{render_trace, Fault, FaultKind, Frame, Trace};
