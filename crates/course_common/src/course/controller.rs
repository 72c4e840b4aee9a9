//! Course controller
//!
//! Request-level catch site. Faults raised by helpers are logged here; faults
//! already logged by the service are only marked as passing through.

use super::helpers::{self, NullInputPolicy};
use super::{CourseError, CourseService, LogOnError};
use crate::error_logger::ErrorLogger;
use crate::fault::{Fault, FaultKind};

pub struct CourseController {
    service: CourseService,
    logger: ErrorLogger,
    policy: NullInputPolicy,
}

impl CourseController {
    pub fn new(service: CourseService, logger: ErrorLogger, policy: NullInputPolicy) -> Self {
        Self {
            service,
            logger,
            policy,
        }
    }

    pub fn policy(&self) -> NullInputPolicy {
        self.policy
    }

    pub fn service(&self) -> &CourseService {
        &self.service
    }

    /// Look up a course by the numeric index in `input`
    pub fn handle_request(&self, input: &str) -> Result<String, CourseError> {
        let index = parse_index(input).log_on_error(&self.logger)?;

        // Already logged by the service
        let course = self
            .service
            .course_at(index)
            .map_err(|err| err.propagated())?;

        Ok(course.to_string())
    }

    /// Register an instructor; a missing name is an argument fault
    pub fn register_instructor(&self, name: Option<&str>) -> Result<String, CourseError> {
        let name = helpers::validate(name)
            .map_err(|fault| fault.propagated())
            .log_on_error(&self.logger)?;

        Ok(format!("registered {}", name))
    }

    /// Display form of an instructor name, per the configured policy
    pub fn display_name(&self, name: Option<&str>) -> Result<String, CourseError> {
        helpers::normalize(name, self.policy)
            .map_err(|fault| fault.propagated())
            .log_on_error(&self.logger)
    }
}

fn parse_index(input: &str) -> Result<usize, Fault> {
    input
        .trim()
        .parse::<usize>()
        .map_err(|_| Fault::of(FaultKind::Format))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn controller(dir: &tempfile::TempDir, policy: NullInputPolicy) -> CourseController {
        let logger = ErrorLogger::new(dir.path().join("errors.log"));
        let service = CourseService::with_catalog(
            logger.clone(),
            vec!["Math".to_string(), "History".to_string()],
        );
        CourseController::new(service, logger, policy)
    }

    fn log_contents(dir: &tempfile::TempDir) -> String {
        fs::read_to_string(dir.path().join("errors.log")).unwrap_or_default()
    }

    #[test]
    fn test_handle_request_ok() {
        let dir = tempfile::tempdir().unwrap();
        let ctl = controller(&dir, NullInputPolicy::Strict);

        assert_eq!(ctl.handle_request("0").unwrap(), "Math");
        assert_eq!(ctl.handle_request(" 1 ").unwrap(), "History");
        assert!(log_contents(&dir).is_empty());
    }

    #[test]
    fn test_handle_request_bad_input() {
        let dir = tempfile::tempdir().unwrap();
        let ctl = controller(&dir, NullInputPolicy::Strict);

        let err = ctl.handle_request("not a number").unwrap_err();
        assert_eq!(err.fault().kind(), &FaultKind::Format);

        let log = log_contents(&dir);
        assert_eq!(log.lines().count(), 1);
        assert!(log.contains("[controller.rs:"));
        assert!(log.contains("FormatError: Input string was not in a correct format."));
    }

    #[test]
    fn test_index_fault_logged_once_at_service() {
        let dir = tempfile::tempdir().unwrap();
        let ctl = controller(&dir, NullInputPolicy::Strict);

        let err = ctl.handle_request("5").unwrap_err();
        assert_eq!(err.fault().kind(), &FaultKind::IndexOutOfRange);
        // raise site in the service, re-raise point in the controller
        assert_eq!(err.fault().trace().len(), 2);
        assert!(err.fault().trace()[1].file.ends_with("controller.rs"));

        let log = log_contents(&dir);
        assert_eq!(log.lines().count(), 1);
        assert!(log.contains("[service.rs:"));
    }

    #[test]
    fn test_register_instructor_logs_helper_site() {
        let dir = tempfile::tempdir().unwrap();
        let ctl = controller(&dir, NullInputPolicy::Strict);

        assert_eq!(ctl.register_instructor(Some("Ada")).unwrap(), "registered Ada");

        let err = ctl.register_instructor(None).unwrap_err();
        assert_eq!(err.fault().kind(), &FaultKind::ArgumentNull);
        assert!(log_contents(&dir).contains("[helpers.rs:"));
    }

    #[test]
    fn test_display_name_policies() {
        let strict_dir = tempfile::tempdir().unwrap();
        let strict = controller(&strict_dir, NullInputPolicy::Strict);
        assert!(strict.display_name(None).is_err());
        assert!(log_contents(&strict_dir).contains("NullReferenceError"));

        let lenient_dir = tempfile::tempdir().unwrap();
        let lenient = controller(&lenient_dir, NullInputPolicy::SubstituteDefault);
        assert_eq!(lenient.display_name(None).unwrap(), "");
        assert_eq!(lenient.display_name(Some("ada")).unwrap(), "ADA");
        assert!(log_contents(&lenient_dir).is_empty());
    }
}
