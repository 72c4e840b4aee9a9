//! Course service
//!
//! Each operation is its own catch site: a fault raised here is logged here
//! and returned to the caller unchanged.

use tracing::debug;

use super::{CourseError, LogOnError};
use crate::error_logger::ErrorLogger;
use crate::fault::{Fault, FaultKind};

pub struct CourseService {
    logger: ErrorLogger,
    catalog: Vec<String>,
}

impl CourseService {
    /// Service with an empty catalog
    pub fn new(logger: ErrorLogger) -> Self {
        Self::with_catalog(logger, Vec::new())
    }

    pub fn with_catalog(logger: ErrorLogger, catalog: Vec<String>) -> Self {
        Self { logger, catalog }
    }

    pub fn catalog(&self) -> &[String] {
        &self.catalog
    }

    /// Integer division
    pub fn divide(&self, a: i32, b: i32) -> Result<i32, CourseError> {
        debug!(a, b, "dividing");
        checked_divide(a, b).log_on_error(&self.logger)
    }

    /// Length of an instructor name that may be absent
    pub fn instructor_name_length(&self, instructor: Option<&str>) -> Result<usize, CourseError> {
        instructor
            .map(str::len)
            .ok_or_else(|| Fault::of(FaultKind::NullReference))
            .log_on_error(&self.logger)
    }

    /// First catalog entry equal to `title`
    pub fn find_course(&self, title: &str) -> Result<&str, CourseError> {
        self.catalog
            .iter()
            .find(|course| course.as_str() == title)
            .map(String::as_str)
            .ok_or_else(|| Fault::of(FaultKind::NotFound))
            .log_on_error(&self.logger)
    }

    /// Catalog entry at `index`
    pub fn course_at(&self, index: usize) -> Result<&str, CourseError> {
        self.catalog
            .get(index)
            .map(String::as_str)
            .ok_or_else(|| Fault::of(FaultKind::IndexOutOfRange))
            .log_on_error(&self.logger)
    }
}

fn checked_divide(a: i32, b: i32) -> Result<i32, Fault> {
    if b == 0 {
        return Err(Fault::of(FaultKind::DivideByZero));
    }
    a.checked_div(b).ok_or_else(|| {
        Fault::new(
            FaultKind::Other("OverflowError".to_string()),
            "Arithmetic operation resulted in an overflow.",
        )
    })
}
