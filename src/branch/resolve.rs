//! Branch pattern resolution.
//!
//! A user-supplied pattern is a regex searched (not fully matched) against
//! the candidate branch names of the requested kind. Resolution must land on
//! exactly one branch; zero or multiple matches abort the operation with the
//! pattern and the candidate set. Ambiguity is never silently resolved, since
//! the callers are about to check out, rebase onto, or delete the result.
//!
//! Visibility rules applied before the regex:
//! - ephemeral (`__TMP`-suffixed) names are dropped unless asked for;
//! - branches marked checked-out in the raw listing (`*` here, `+` in
//!   another worktree) are dropped unless asked for;
//! - remote listings restricted to "mine" keep only
//!   `<remote>/<username>/...` names.

use crate::branch::ephemeral::TMP_SUFFIX;
use crate::context::RepoContext;
use crate::error::{Result, TwigError};
use crate::git;
use regex::Regex;

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern)
        .map_err(|e| TwigError::User(format!("invalid branch pattern '{}': {}", pattern, e)))
}

/// Local branch names visible under the given flags.
///
/// Candidate order follows the listing order of `git branch`.
pub fn local_candidates(
    ctx: &RepoContext,
    include_current: bool,
    include_ephemeral: bool,
) -> Result<Vec<String>> {
    let listing = git::run_git(&ctx.repo_root, &["branch"])?;

    let mut names = Vec::new();
    for line in listing.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let name = match line.strip_prefix(['*', '+']) {
            Some(rest) => {
                if !include_current {
                    continue;
                }
                rest.trim()
            }
            None => line,
        };
        if !include_ephemeral && name.ends_with(TMP_SUFFIX) {
            continue;
        }
        names.push(name.to_string());
    }
    Ok(names)
}

/// Remote branch names visible under the given flags, with the remote prefix
/// stripped.
pub fn remote_candidates(
    ctx: &RepoContext,
    mine_only: bool,
    include_ephemeral: bool,
) -> Result<Vec<String>> {
    let listing = git::run_git(&ctx.repo_root, &["branch", "-r"])?;
    let remote_prefix = format!("{}/", ctx.remote());
    let mine_prefix = if mine_only {
        Some(format!("{}/{}/", ctx.remote(), ctx.username()?))
    } else {
        None
    };

    let mut names = Vec::new();
    for line in listing.lines() {
        let line = line.trim();
        if line.is_empty() || line.contains(" -> ") {
            continue;
        }
        if let Some(prefix) = &mine_prefix
            && !line.starts_with(prefix)
        {
            continue;
        }
        if !include_ephemeral && line.ends_with(TMP_SUFFIX) {
            continue;
        }
        let name = line.strip_prefix(&remote_prefix).unwrap_or(line);
        names.push(name.to_string());
    }
    Ok(names)
}

/// All local branch names matching the pattern under the given flags.
pub fn match_local(
    ctx: &RepoContext,
    pattern: &str,
    include_current: bool,
    include_ephemeral: bool,
) -> Result<Vec<String>> {
    let re = compile(pattern)?;
    Ok(local_candidates(ctx, include_current, include_ephemeral)?
        .into_iter()
        .filter(|name| re.is_match(name))
        .collect())
}

/// All remote branch names matching the pattern under the given flags.
pub fn match_remote(
    ctx: &RepoContext,
    pattern: &str,
    mine_only: bool,
    include_ephemeral: bool,
) -> Result<Vec<String>> {
    let re = compile(pattern)?;
    Ok(remote_candidates(ctx, mine_only, include_ephemeral)?
        .into_iter()
        .filter(|name| re.is_match(name))
        .collect())
}

fn unique(pattern: &str, matches: Vec<String>, candidates: Vec<String>) -> Result<String> {
    match matches.len() {
        1 => Ok(matches.into_iter().next().unwrap()),
        0 => Err(TwigError::NoMatch {
            pattern: pattern.to_string(),
            candidates,
        }),
        _ => Err(TwigError::Ambiguous {
            pattern: pattern.to_string(),
            matches,
        }),
    }
}

/// Resolve a pattern to exactly one local branch.
pub fn local(ctx: &RepoContext, pattern: &str, include_current: bool) -> Result<String> {
    let candidates = local_candidates(ctx, include_current, false)?;
    let re = compile(pattern)?;
    let matches: Vec<String> = candidates
        .iter()
        .filter(|name| re.is_match(name))
        .cloned()
        .collect();
    unique(pattern, matches, candidates)
}

/// Resolve a pattern to exactly one remote branch (remote prefix stripped).
pub fn remote(ctx: &RepoContext, pattern: &str) -> Result<String> {
    let candidates = remote_candidates(ctx, false, false)?;
    let re = compile(pattern)?;
    let matches: Vec<String> = candidates
        .iter()
        .filter(|name| re.is_match(name))
        .cloned()
        .collect();
    unique(pattern, matches, candidates)
}
