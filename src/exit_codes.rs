//! Exit code constants for the containercraft CLI.
//!
//! - 0: Success
//! - 1: User error (bad input, refusal, missing workspace or descriptor)
//! - 2: Filesystem failure
//! - 3: External process failure (git or the container runtime)
//!
//! `start` exits with the interactive session's own exit code once every
//! runtime step has succeeded.

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: invalid input, existing descriptor, missing workspace/descriptor.
pub const USER_ERROR: i32 = 1;

/// Filesystem failure while reading or writing workspace files.
pub const IO_FAILURE: i32 = 2;

/// An external process (git, container runtime) failed or could not be spawned.
pub const EXTERNAL_FAILURE: i32 = 3;
