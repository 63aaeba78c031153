//! Exit code constants for the tw CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, violated precondition, declined confirmation)
//! - 2: Branch resolution failure (pattern matched zero or multiple branches)
//! - 3: Git operation failure
//! - 4: Review-service (gh) failure

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, violated precondition, or declined confirmation.
pub const USER_ERROR: i32 = 1;

/// Resolution failure: a branch pattern matched zero or multiple candidates.
pub const RESOLVE_FAILURE: i32 = 2;

/// Git operation failure: any delegated git command exited non-zero.
pub const GIT_FAILURE: i32 = 3;

/// Review-service failure: a gh command that must succeed exited non-zero.
pub const REVIEW_FAILURE: i32 = 4;
