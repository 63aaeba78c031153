//! Error types for the tw CLI.
//!
//! Uses thiserror for derive macros and provides user-actionable error
//! messages. Everything propagates to the top-level handler in `main`; there
//! is no local recovery or retry anywhere, since partially-applied git
//! mutations are themselves inspectable and fixable with further commands.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for tw operations.
///
/// Each variant maps to a stable exit code. Ambiguity is its own category:
/// a pattern that matches zero or several branches is never silently
/// resolved, because destructive operations downstream must never guess.
#[derive(Error, Debug)]
pub enum TwigError {
    /// Bad arguments or a violated precondition; nothing was mutated.
    #[error("{0}")]
    User(String),

    /// The user declined a confirmation prompt; nothing was mutated.
    #[error("aborted")]
    Aborted,

    /// A branch pattern matched nothing.
    #[error("no branch matches pattern '{pattern}' (candidates: {})", .candidates.join(", "))]
    NoMatch {
        pattern: String,
        candidates: Vec<String>,
    },

    /// A branch pattern matched more than one candidate.
    #[error("pattern '{pattern}' matches multiple branches: {}", .matches.join(", "))]
    Ambiguous {
        pattern: String,
        matches: Vec<String>,
    },

    /// A delegated git command failed.
    #[error("git operation failed: {0}")]
    Git(String),

    /// A review-service (gh) command failed.
    #[error("review service failed: {0}")]
    Review(String),
}

impl TwigError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            TwigError::User(_) | TwigError::Aborted => exit_codes::USER_ERROR,
            TwigError::NoMatch { .. } | TwigError::Ambiguous { .. } => {
                exit_codes::RESOLVE_FAILURE
            }
            TwigError::Git(_) => exit_codes::GIT_FAILURE,
            TwigError::Review(_) => exit_codes::REVIEW_FAILURE,
        }
    }
}

/// Result type alias for tw operations.
pub type Result<T> = std::result::Result<T, TwigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_error_has_correct_exit_code() {
        let err = TwigError::User("bad argument".to_string());
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
    }

    #[test]
    fn aborted_has_user_exit_code() {
        assert_eq!(TwigError::Aborted.exit_code(), exit_codes::USER_ERROR);
    }

    #[test]
    fn resolution_errors_have_correct_exit_code() {
        let err = TwigError::NoMatch {
            pattern: "foo".to_string(),
            candidates: vec!["main".to_string()],
        };
        assert_eq!(err.exit_code(), exit_codes::RESOLVE_FAILURE);

        let err = TwigError::Ambiguous {
            pattern: "fo".to_string(),
            matches: vec!["alice/foo".to_string(), "alice/foobar".to_string()],
        };
        assert_eq!(err.exit_code(), exit_codes::RESOLVE_FAILURE);
    }

    #[test]
    fn git_error_has_correct_exit_code() {
        let err = TwigError::Git("rebase failed".to_string());
        assert_eq!(err.exit_code(), exit_codes::GIT_FAILURE);
    }

    #[test]
    fn review_error_has_correct_exit_code() {
        let err = TwigError::Review("pr edit failed".to_string());
        assert_eq!(err.exit_code(), exit_codes::REVIEW_FAILURE);
    }

    #[test]
    fn ambiguous_error_names_pattern_and_candidates() {
        let err = TwigError::Ambiguous {
            pattern: "fo".to_string(),
            matches: vec!["alice/foo".to_string(), "alice/foobar".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("'fo'"));
        assert!(msg.contains("alice/foo"));
        assert!(msg.contains("alice/foobar"));
    }
}
