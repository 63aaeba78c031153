//! Review-request state tracking.
//!
//! A branch is linked 1:1 (by name) to a review request on the review
//! service. State is never cached locally: every query hits the service
//! fresh, because the result drives branch-deletion and base-retargeting
//! decisions that must reflect the service's latest state.

use crate::context::RepoContext;
use crate::error::{Result, TwigError};
use crate::gh;
use serde::Deserialize;
use std::fmt;

/// State of the review request linked to a branch.
///
/// `None` covers both "no request exists" and "the service could not be
/// queried" — absence is an expected outcome, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewState {
    Open,
    Merged,
    Closed,
    None,
}

impl ReviewState {
    pub fn parse(s: &str) -> Self {
        match s {
            "OPEN" => ReviewState::Open,
            "MERGED" => ReviewState::Merged,
            "CLOSED" => ReviewState::Closed,
            _ => ReviewState::None,
        }
    }
}

impl fmt::Display for ReviewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ReviewState::Open => "OPEN",
            ReviewState::Merged => "MERGED",
            ReviewState::Closed => "CLOSED",
            ReviewState::None => "NONE",
        };
        f.write_str(s)
    }
}

#[derive(Deserialize)]
struct StateField {
    state: String,
}

#[derive(Deserialize)]
struct UrlField {
    url: String,
}

/// State of the request linked to `branch`, or to the current branch when
/// `branch` is `None`. Query failures yield [`ReviewState::None`].
pub fn state_of(ctx: &RepoContext, branch: Option<&str>) -> ReviewState {
    let mut args = vec!["pr", "view"];
    if let Some(br) = branch {
        args.push(br);
    }
    args.extend(["--json", "state"]);

    match gh::run_gh_ok(&ctx.repo_root, &args) {
        Some(out) => parse_state_payload(&out.stdout),
        None => ReviewState::None,
    }
}

fn parse_state_payload(payload: &str) -> ReviewState {
    match serde_json::from_str::<StateField>(payload) {
        Ok(v) => ReviewState::parse(&v.state),
        Err(_) => ReviewState::None,
    }
}

/// Web URL of the request linked to `target` (branch or request number), or
/// to the current branch when `target` is `None`.
pub fn url_of(ctx: &RepoContext, target: Option<&str>) -> Result<String> {
    let mut args = vec!["pr", "view"];
    if let Some(t) = target {
        args.push(t);
    }
    args.extend(["--json", "url"]);

    let out = gh::run_gh(&ctx.repo_root, &args)?;
    let parsed: UrlField = serde_json::from_str(&out.stdout).map_err(|e| {
        TwigError::Review(format!("unexpected pr view payload: {}", e))
    })?;
    if parsed.url.is_empty() {
        return Err(TwigError::Review(format!(
            "no review request URL found for '{}'",
            target.unwrap_or("current branch")
        )));
    }
    Ok(parsed.url)
}

/// Repoint the current branch's review request at a new base branch.
pub fn edit_base(ctx: &RepoContext, base: &str) -> Result<()> {
    gh::run_gh(&ctx.repo_root, &["pr", "edit", "-B", base])?;
    Ok(())
}

/// Create a review request for the current branch, filling title and body
/// from the commits.
pub fn create(ctx: &RepoContext, draft: bool, base: Option<&str>) -> Result<()> {
    let mut args = vec!["pr", "create", "--fill"];
    if draft {
        args.push("--draft");
    }
    if let Some(b) = base {
        args.extend(["-B", b]);
    }
    gh::run_gh(&ctx.repo_root, &args)?;
    Ok(())
}

/// The service's request-status overview, if it can be queried.
pub fn status_overview(ctx: &RepoContext) -> Option<String> {
    gh::run_gh_ok(&ctx.repo_root, &["pr", "status"]).map(|out| out.stdout)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_states() {
        assert_eq!(ReviewState::parse("OPEN"), ReviewState::Open);
        assert_eq!(ReviewState::parse("MERGED"), ReviewState::Merged);
        assert_eq!(ReviewState::parse("CLOSED"), ReviewState::Closed);
        assert_eq!(ReviewState::parse(""), ReviewState::None);
        assert_eq!(ReviewState::parse("DRAFT"), ReviewState::None);
    }

    #[test]
    fn parses_state_payload() {
        assert_eq!(
            parse_state_payload(r#"{"state":"OPEN"}"#),
            ReviewState::Open
        );
        assert_eq!(
            parse_state_payload(r#"{"state":"MERGED"}"#),
            ReviewState::Merged
        );
        assert_eq!(parse_state_payload("not json"), ReviewState::None);
        assert_eq!(parse_state_payload(""), ReviewState::None);
    }

    #[test]
    fn state_display_round_trips() {
        for state in [
            ReviewState::Open,
            ReviewState::Merged,
            ReviewState::Closed,
        ] {
            assert_eq!(ReviewState::parse(&state.to_string()), state);
        }
        assert_eq!(ReviewState::None.to_string(), "NONE");
    }
}
