//! Exit code constants for CLI commands
//!
//! - 0: Success
//! - 1: General failure, such as a note that was not found
//! - 2: Errors: bad configuration, storage failures, invalid arguments

/// Successful execution
pub const EXIT_SUCCESS: i32 = 0;

/// General failure or nothing to act on
pub const EXIT_WARNING: i32 = 1;

/// Configuration, storage or argument errors
pub const EXIT_ERROR: i32 = 2;
