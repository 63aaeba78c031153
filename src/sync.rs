//! The rebase orchestrator.
//!
//! Two related procedures built from the classifier, the resolver, the
//! ephemeral-branch bookkeeping, and the review tracker:
//!
//! - [`pull_main`] keeps the main branch locally current and the branch bound
//!   to this working directory rebased on top of it.
//! - [`rebase_back_onto`] rewrites history so that the last N commits are
//!   replayed onto a new base and, if a review request is open, repoints the
//!   request's base to match.
//!
//! Both sequences are deliberately linear: each delegated git call mutates
//! the repository in place and there is no transactional rollback across a
//! sequence. An interruption mid-sequence can leave the user on the wrong
//! branch or leave tmp branches behind; the sweeps exist precisely to recover
//! from that.

use crate::branch::{delete_local_branches, delete_remote_branches, ephemeral, resolve};
use crate::context::RepoContext;
use crate::editor;
use crate::error::{Result, TwigError};
use crate::git;
use crate::review::{self, ReviewState};
use std::path::PathBuf;
use tracing::info;

/// Fetch the remote and bring main (and the branch bound to this working
/// directory) up to date, then restore the original checkout.
///
/// When invoked from a secondary working directory, the main-branch pull runs
/// in the primary working directory; no global chdir is involved, each step
/// names its own working directory.
pub fn pull_main(ctx: &RepoContext) -> Result<()> {
    info!("pull main");
    git::run_git(&ctx.repo_root, &["fetch", "--prune", "--tags"])?;

    let original = ctx.current_branch()?;
    let main = ctx.main_branch()?;
    let repo = ctx.repo_branch()?;

    let on_secondary = repo != main;
    let pull_dir: PathBuf = if on_secondary {
        let primary = ctx.primary_dir()?;
        info!("pull in primary working directory: {}", primary.display());
        primary
    } else {
        ctx.repo_root.clone()
    };

    if ctx.current_branch_in(&pull_dir)? != main {
        info!("switch to main: {}", main);
        git::checkout(&pull_dir, &main)?;
    }

    // Another tool may own this checkout; re-read HEAD before pulling.
    let head = ctx.current_branch_in(&pull_dir)?;
    if head != main {
        return Err(TwigError::User(format!(
            "expected to be on '{}' but found '{}'",
            main, head
        )));
    }
    info!("pull in {}", main);
    git::run_git(&pull_dir, &["pull", "--rebase"])?;

    if repo != main {
        info!("rebase {} onto {}", repo, main);
        git::checkout(&ctx.repo_root, &repo)?;
        git::run_git(&ctx.repo_root, &["rebase", &main])?;
    }

    if original != main && original != repo {
        info!("switch back to {}", original);
        git::checkout(&ctx.repo_root, &original)?;
    }
    Ok(())
}

/// Replay the last `keep` commits of the current branch onto a new base and
/// repoint any open review request.
///
/// The target base is resolved from `onto_pattern`, or defaults to main after
/// running [`pull_main`]. Rebase conflicts pass straight through to git's own
/// abort/continue facilities.
pub fn rebase_back_onto(
    ctx: &RepoContext,
    keep: u32,
    onto_pattern: Option<&str>,
    revert_buffers: bool,
) -> Result<()> {
    let onto = match onto_pattern {
        Some(pat) => resolve::local(ctx, pat, true)?,
        None => {
            pull_main(ctx)?;
            ctx.main_branch()?
        }
    };

    ephemeral::sweep_local(ctx)?;

    let current = ctx.current_branch()?;
    let anchor = ephemeral::create_anchor(ctx, keep)?;
    info!("rebase last {} commits of {} onto {}", keep, current, onto);
    git::run_git(&ctx.repo_root, &["rebase", "--onto", &onto, &anchor, &current])?;
    delete_local_branches(ctx, std::slice::from_ref(&anchor))?;

    if revert_buffers {
        editor::revert_unmodified_buffers(&ctx.repo_root);
    }

    let mut base_in_use = None;
    if review::state_of(ctx, None) == ReviewState::Open {
        base_in_use = retarget_review_base(ctx, &current, &onto)?;
        info!("push {} to {}", current, ctx.remote());
        let refspec = format!("HEAD:{}", current);
        git::run_git(&ctx.repo_root, &["push", "-f", ctx.remote(), &refspec])?;
    }

    ephemeral::sweep_remote(ctx, base_in_use.as_deref())?;
    Ok(())
}

/// How an open review request's base must change after a rebase onto `onto`.
#[derive(Debug, Clone, PartialEq, Eq)]
enum BaseAction {
    /// Publish the new base under the branch's remote ephemeral name and
    /// point the request at it.
    PointAtEphemeral,
    /// The base moved back to main: point the request at main and drop the
    /// now-useless remote ephemeral.
    ResetToMain,
    /// Nothing to do; the request already tracks main.
    Leave,
}

fn plan_base_action(onto: &str, main: &str, remote_anchor_exists: bool) -> BaseAction {
    if onto != main {
        BaseAction::PointAtEphemeral
    } else if remote_anchor_exists {
        BaseAction::ResetToMain
    } else {
        BaseAction::Leave
    }
}

/// Repoint the current branch's open review request after its base moved.
///
/// Returns the remote ephemeral name now serving as the request's base, if
/// any, so the caller's final sweep leaves it alone.
fn retarget_review_base(
    ctx: &RepoContext,
    current: &str,
    onto: &str,
) -> Result<Option<String>> {
    let remote_anchor = ephemeral::anchor_name(current);
    let main = ctx.main_branch()?;

    let exact = format!("^{}$", regex::escape(&remote_anchor));
    let anchor_exists = !resolve::match_remote(ctx, &exact, true, true)?.is_empty();

    match plan_base_action(onto, &main, anchor_exists) {
        BaseAction::PointAtEphemeral => {
            info!("point review base at {}", remote_anchor);
            let refspec = format!("{}:{}", onto, remote_anchor);
            git::run_git(&ctx.repo_root, &["push", "--force", ctx.remote(), &refspec])?;
            review::edit_base(ctx, &remote_anchor)?;
            Ok(Some(remote_anchor))
        }
        BaseAction::ResetToMain => {
            info!("reset review base to {}", main);
            review::edit_base(ctx, &main)?;
            delete_remote_branches(ctx, std::slice::from_ref(&remote_anchor))?;
            Ok(None)
        }
        BaseAction::Leave => Ok(None),
    }
}
