//! Exit codes for coursectl

/// Exit code for success
pub const EXIT_SUCCESS: i32 = 0;

/// Exit code for general errors (bad config, unreadable log)
pub const EXIT_GENERAL_ERROR: i32 = 1;

/// Exit code when a scenario raised a fault (and it was logged)
pub const EXIT_FAULT: i32 = 3;

/// Exit code when a scenario faulted and the error log could not be written
pub const EXIT_LOG_UNAVAILABLE: i32 = 74;
