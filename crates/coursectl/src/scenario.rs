//! Fault scenarios driven by `coursectl run`
//!
//! Each scenario exercises one course operation with an input that faults
//! by default. `--input` swaps in a caller-supplied value.

use clap::ValueEnum;
use course_common::course::{
    CourseController, CourseError, CourseService, LogOnError, NullInputPolicy,
};
use course_common::{ErrorLogger, Fault, FaultKind};
use tracing::info;

/// Courses known to the demo controller
pub const DEMO_CATALOG: [&str; 2] = ["Math", "History"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Scenario {
    /// Non-numeric request to the controller (format fault)
    Parse,
    /// 10 divided by zero in the service (divide-by-zero fault)
    Divide,
    /// Length of a missing instructor name (null-reference fault)
    Null,
    /// Request for course #5 of 2 (index fault)
    Index,
    /// Search an empty catalog for "Math" (not-found fault)
    Find,
    /// Register an instructor without a name (argument fault)
    Validate,
    /// Display a missing instructor name under the chosen policy
    Normalize,
}

impl Scenario {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scenario::Parse => "parse",
            Scenario::Divide => "divide",
            Scenario::Null => "null",
            Scenario::Index => "index",
            Scenario::Find => "find",
            Scenario::Validate => "validate",
            Scenario::Normalize => "normalize",
        }
    }
}

/// Caller policy flag, mapped onto `NullInputPolicy`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum PolicyArg {
    #[default]
    Strict,
    Default,
}

impl From<PolicyArg> for NullInputPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Strict => NullInputPolicy::Strict,
            PolicyArg::Default => NullInputPolicy::SubstituteDefault,
        }
    }
}

/// Run one scenario, logging any fault to `logger`
pub fn run(
    logger: &ErrorLogger,
    scenario: Scenario,
    policy: NullInputPolicy,
    input: Option<&str>,
) -> Result<String, CourseError> {
    info!(
        scenario = scenario.as_str(),
        policy = policy.as_str(),
        "running scenario"
    );

    let catalog: Vec<String> = DEMO_CATALOG.iter().map(|c| c.to_string()).collect();

    match scenario {
        Scenario::Parse => {
            controller(logger, catalog, policy).handle_request(input.unwrap_or("not a number"))
        }
        Scenario::Index => controller(logger, catalog, policy).handle_request(input.unwrap_or("5")),
        Scenario::Divide => {
            let divisor = parse_divisor(input).log_on_error(logger)?;
            CourseService::new(logger.clone())
                .divide(10, divisor)
                .map(|q| format!("10 / {} = {}", divisor, q))
        }
        Scenario::Null => CourseService::new(logger.clone())
            .instructor_name_length(input)
            .map(|len| format!("instructor name has {} characters", len)),
        // Empty catalog, so any title faults
        Scenario::Find => CourseService::new(logger.clone())
            .find_course(input.unwrap_or("Math"))
            .map(|course| format!("found {}", course)),
        Scenario::Validate => controller(logger, catalog, policy).register_instructor(input),
        Scenario::Normalize => controller(logger, catalog, policy)
            .display_name(input)
            .map(|name| format!("display name: {:?}", name)),
    }
}

/// Divisor from `--input`, 0 when absent
fn parse_divisor(input: Option<&str>) -> Result<i32, Fault> {
    match input {
        None => Ok(0),
        Some(text) => text
            .trim()
            .parse()
            .map_err(|_| Fault::of(FaultKind::Format)),
    }
}

fn controller(
    logger: &ErrorLogger,
    catalog: Vec<String>,
    policy: NullInputPolicy,
) -> CourseController {
    let service = CourseService::with_catalog(logger.clone(), catalog);
    CourseController::new(service, logger.clone(), policy)
}
