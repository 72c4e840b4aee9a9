//! Course application stubs
//!
//! Services, controller and helpers that fault on purpose so the error
//! logger has something to record. Every catch site follows one rule: log
//! the fault once, then hand the same fault back to its caller.

pub mod controller;
pub mod helpers;
pub mod service;

pub use controller::CourseController;
pub use helpers::NullInputPolicy;
pub use service::CourseService;

use tracing::warn;

use crate::error_logger::{ErrorLogger, LogWriteError};
use crate::fault::Fault;

/// What a course operation hands back on failure
///
/// Either way the original fault is preserved; `Unlogged` additionally
/// carries the reason its audit line could not be written.
#[derive(Debug, thiserror::Error)]
pub enum CourseError {
    #[error(transparent)]
    Fault(#[from] Fault),

    #[error("{fault} (not logged: {log})")]
    Unlogged {
        fault: Fault,
        #[source]
        log: LogWriteError,
    },
}

impl CourseError {
    /// The fault raised by application code
    pub fn fault(&self) -> &Fault {
        match self {
            CourseError::Fault(fault) => fault,
            CourseError::Unlogged { fault, .. } => fault,
        }
    }

    pub fn into_fault(self) -> Fault {
        match self {
            CourseError::Fault(fault) => fault,
            CourseError::Unlogged { fault, .. } => fault,
        }
    }

    /// Record the caller as a re-raise point on the carried fault
    #[track_caller]
    pub fn propagated(self) -> Self {
        match self {
            CourseError::Fault(fault) => CourseError::Fault(fault.propagated()),
            CourseError::Unlogged { fault, log } => CourseError::Unlogged {
                fault: fault.propagated(),
                log,
            },
        }
    }
}

/// Log a caught fault, then return it for propagation
pub fn catch_and_log(logger: &ErrorLogger, fault: Fault) -> CourseError {
    match logger.log_error(&fault) {
        Ok(()) => CourseError::Fault(fault),
        Err(log) => {
            warn!(error = %log, "could not record {}", fault);
            CourseError::Unlogged { fault, log }
        }
    }
}

/// Catch-site adapter for fault results
pub trait LogOnError<T> {
    /// Log the fault (if any) once and propagate it unchanged
    fn log_on_error(self, logger: &ErrorLogger) -> Result<T, CourseError>;
}

impl<T> LogOnError<T> for Result<T, Fault> {
    fn log_on_error(self, logger: &ErrorLogger) -> Result<T, CourseError> {
        self.map_err(|fault| catch_and_log(logger, fault))
    }
}
