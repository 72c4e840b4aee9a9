//! Diagnostic logging for coursectl
//!
//! Diagnostics go to stderr through `tracing`; the error log proper is
//! written by `course_common::ErrorLogger`.

use tracing_subscriber::EnvFilter;

/// Default filter when RUST_LOG is unset
pub const DEFAULT_FILTER: &str = "warn";

/// Filter used by --verbose
pub const VERBOSE_FILTER: &str = "info,course_common=debug,coursectl=debug";

/// Pick filter directives: --verbose, then RUST_LOG, then the default
pub fn directives(verbose: bool, rust_log: Option<&str>) -> String {
    match (verbose, rust_log) {
        (true, _) => VERBOSE_FILTER.to_string(),
        (false, Some(env)) if !env.trim().is_empty() => env.to_string(),
        (false, _) => DEFAULT_FILTER.to_string(),
    }
}

/// Install the global subscriber. Safe to call more than once.
pub fn init(verbose: bool) {
    let rust_log = std::env::var("RUST_LOG").ok();
    let filter = EnvFilter::try_new(directives(verbose, rust_log.as_deref()))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
