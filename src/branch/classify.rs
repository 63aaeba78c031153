//! Branch role classification.
//!
//! Roles are properties of *names*, derived from the repository location and
//! naming convention; they are recomputed from the context on every call, not
//! stored. Classification performs no mutation and fails only if the
//! working-directory location or HEAD cannot be determined.

use crate::branch::ephemeral::TMP_SUFFIX;
use crate::context::RepoContext;
use crate::error::Result;
use regex::Regex;
use std::sync::LazyLock;

/// Role of a branch name within the repository's topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchRole {
    /// The repository's canonical default branch.
    Main,
    /// The branch bound to the current working directory.
    Repo,
    /// A branch in the user's `<username>/` namespace.
    Feature,
    /// A disposable `__TMP`-suffixed rebase anchor.
    Ephemeral,
    /// Not a branch name at all: a commit hash or HEAD-relative reference.
    Detached,
    /// Any other branch.
    Topic,
}

static COMMIT_HASH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9a-f]{6}[0-9a-f]*$").unwrap());

/// Whether a user-supplied reference is a literal commit rather than a
/// branch pattern: `HEAD`-relative syntax or 6+ hex digits. Such references
/// bypass pattern resolution entirely.
pub fn is_commitish(s: &str) -> bool {
    s.starts_with("HEAD") || COMMIT_HASH_RE.is_match(s)
}

/// Classify a branch name against the current repository context.
pub fn classify(ctx: &RepoContext, name: &str) -> Result<BranchRole> {
    if name.ends_with(TMP_SUFFIX) {
        return Ok(BranchRole::Ephemeral);
    }
    if is_commitish(name) {
        return Ok(BranchRole::Detached);
    }
    if name == ctx.main_branch()? {
        return Ok(BranchRole::Main);
    }
    if name == ctx.repo_branch()? {
        return Ok(BranchRole::Repo);
    }
    if name.starts_with(&format!("{}/", ctx.username()?)) {
        return Ok(BranchRole::Feature);
    }
    Ok(BranchRole::Topic)
}

/// Whether commits must not land on this branch directly (wip, commit, and
/// deletion guards). Protects the main branch and the branch bound to the
/// working directory.
pub fn is_protected(ctx: &RepoContext, name: &str) -> Result<bool> {
    Ok(name == ctx.main_branch()? || name == ctx.repo_branch()?)
}
