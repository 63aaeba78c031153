//! Ephemeral ("tmp") branch bookkeeping.
//!
//! An ephemeral branch carries the reserved `__TMP` suffix and exists only as
//! scratch state inside a multi-step rebase: created immediately before a
//! risky sequence, consumed by exactly one later step, deleted afterward.
//! Sweeps are deliberately blunt — they delete every branch carrying the
//! suffix regardless of which run created it, because that is the only
//! recovery path after an interrupted sequence. No ownership is tracked, so
//! two interrupted runs can interfere with each other's anchors.

use crate::branch::{delete_local_branches, delete_remote_branches, resolve};
use crate::context::RepoContext;
use crate::error::Result;
use crate::git;
use tracing::info;

/// Reserved suffix marking a branch as ephemeral.
pub const TMP_SUFFIX: &str = "__TMP";

/// The ephemeral name derived from a branch name.
pub fn anchor_name(branch: &str) -> String {
    format!("{}{}", branch, TMP_SUFFIX)
}

/// Create a rebase anchor for the current branch at `HEAD~commits_back`.
///
/// Fails if the anchor already exists; callers sweep first.
pub fn create_anchor(ctx: &RepoContext, commits_back: u32) -> Result<String> {
    let current = ctx.current_branch()?;
    let anchor = anchor_name(&current);
    let base = format!("HEAD~{}", commits_back);
    git::run_git(&ctx.repo_root, &["branch", &anchor, &base])?;
    Ok(anchor)
}

/// Delete all local ephemeral branches. Returns the deleted names.
///
/// Deletion is unconditional: an ephemeral branch never holds unique work
/// the user wants.
pub fn sweep_local(ctx: &RepoContext) -> Result<Vec<String>> {
    let pattern = format!("{}$", TMP_SUFFIX);
    let stale = resolve::match_local(ctx, &pattern, false, true)?;
    if !stale.is_empty() {
        info!("sweeping local tmp branches: {}", stale.join(", "));
        delete_local_branches(ctx, &stale)?;
    }
    Ok(stale)
}

/// Delete all of the user's remote ephemeral branches, except `keep`.
///
/// The exception exists for the one remote ephemeral currently serving as an
/// open review request's base: it must survive the end-of-run sweep.
pub fn sweep_remote(ctx: &RepoContext, keep: Option<&str>) -> Result<Vec<String>> {
    let pattern = format!("{}$", TMP_SUFFIX);
    let stale: Vec<String> = resolve::match_remote(ctx, &pattern, true, true)?
        .into_iter()
        .filter(|name| Some(name.as_str()) != keep)
        .collect();
    if !stale.is_empty() {
        info!("sweeping remote tmp branches: {}", stale.join(", "));
        delete_remote_branches(ctx, &stale)?;
    }
    Ok(stale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::RepoContext;
    use crate::test_support::{commit_file, create_test_repo, create_test_repo_with_remote, git};

    #[test]
    fn anchor_name_appends_suffix() {
        assert_eq!(anchor_name("alice/foo"), "alice/foo__TMP");
    }

    #[test]
    fn create_anchor_points_commits_back() {
        let temp_dir = create_test_repo();
        commit_file(temp_dir.path(), "a.txt", "a", "second");
        commit_file(temp_dir.path(), "b.txt", "b", "third");
        let ctx = RepoContext::resolve_from(temp_dir.path()).unwrap();

        let anchor = create_anchor(&ctx, 1).unwrap();
        assert_eq!(anchor, "main__TMP");

        let anchor_hash = git::run_git(temp_dir.path(), &["rev-parse", "main__TMP"]).unwrap();
        let parent_hash = git::run_git(temp_dir.path(), &["rev-parse", "HEAD~1"]).unwrap();
        assert_eq!(anchor_hash.stdout, parent_hash.stdout);
    }

    #[test]
    fn create_anchor_fails_if_one_exists() {
        let temp_dir = create_test_repo();
        commit_file(temp_dir.path(), "a.txt", "a", "second");
        let ctx = RepoContext::resolve_from(temp_dir.path()).unwrap();

        create_anchor(&ctx, 1).unwrap();
        assert!(create_anchor(&ctx, 1).is_err());
    }

    #[test]
    fn sweep_local_removes_all_tmp_branches() {
        let temp_dir = create_test_repo();
        git(temp_dir.path(), &["branch", "alice/foo__TMP"]);
        git(temp_dir.path(), &["branch", "alice/bar__TMP"]);
        git(temp_dir.path(), &["branch", "alice/keep"]);
        let ctx = RepoContext::resolve_from(temp_dir.path()).unwrap();

        let mut swept = sweep_local(&ctx).unwrap();
        swept.sort();
        assert_eq!(swept, vec!["alice/bar__TMP", "alice/foo__TMP"]);

        let listing = git::run_git(temp_dir.path(), &["branch"]).unwrap();
        assert!(!listing.stdout.contains(TMP_SUFFIX));
        assert!(listing.stdout.contains("alice/keep"));
    }

    #[test]
    fn sweep_is_idempotent() {
        let temp_dir = create_test_repo();
        git(temp_dir.path(), &["branch", "alice/foo__TMP"]);
        let ctx = RepoContext::resolve_from(temp_dir.path()).unwrap();

        assert_eq!(sweep_local(&ctx).unwrap(), vec!["alice/foo__TMP"]);
        assert!(sweep_local(&ctx).unwrap().is_empty());
    }

    #[test]
    fn sweep_remote_deletes_by_push_and_honors_keep() {
        let (temp_dir, work) = create_test_repo_with_remote();
        let mut ctx = RepoContext::resolve_from(&work).unwrap();
        ctx.config.username = Some("alice".to_string());

        git(&work, &["branch", "alice/one__TMP"]);
        git(&work, &["branch", "alice/two__TMP"]);
        git(&work, &["push", "origin", "alice/one__TMP", "alice/two__TMP"]);
        git(&work, &["fetch", "origin"]);

        let swept = sweep_remote(&ctx, Some("alice/one__TMP")).unwrap();
        assert_eq!(swept, vec!["alice/two__TMP"]);

        let remote_refs = git::run_git(
            temp_dir.path().join("origin.git"),
            &["for-each-ref", "--format", "%(refname:short)", "refs/heads"],
        )
        .unwrap();
        assert!(remote_refs.stdout.contains("alice/one__TMP"));
        assert!(!remote_refs.stdout.contains("alice/two__TMP"));
    }
}
