//! Rebase, reset, and commit-span operations.

use crate::branch::{is_commitish, resolve};
use crate::cli::{RbArgs, RdArgs, RiArgs, RrArgs, RsArgs, RtArgs, RuArgs};
use crate::context::RepoContext;
use crate::editor;
use crate::error::{Result, TwigError};
use crate::git;
use crate::prompt;
use crate::sync;

/// Rebase the current branch onto another branch; without a pattern, onto
/// this working directory's branch after pulling main.
pub fn cmd_rr(args: RrArgs) -> Result<()> {
    let ctx = RepoContext::resolve()?;

    let target = match args.pattern.as_deref() {
        None => {
            sync::pull_main(&ctx)?;
            ctx.repo_branch()?
        }
        Some(pattern) => resolve::local(&ctx, pattern, true)?,
    };

    git::run_git(&ctx.repo_root, &["rebase", &target])?;
    editor::revert_unmodified_buffers(&ctx.repo_root);
    Ok(())
}

/// Interactive rebase onto a branch, commit, or HEAD-relative reference.
pub fn cmd_ri(args: RiArgs) -> Result<()> {
    let ctx = RepoContext::resolve()?;

    let raw = &args.target;
    let target = if raw.contains('~') || raw.contains('^') || is_commitish(raw) {
        raw.clone()
    } else {
        resolve::local(&ctx, raw, true)?
    };

    git::run_git_interactive(&ctx.repo_root, &["rebase", "-i", &target])?;
    editor::revert_unmodified_buffers(&ctx.repo_root);
    Ok(())
}

/// Stage resolved files and continue an interrupted rebase.
pub fn cmd_rc() -> Result<()> {
    let ctx = RepoContext::resolve()?;
    git::run_git(&ctx.repo_root, &["add", "-u"])?;
    git::run_git_interactive(&ctx.repo_root, &["rebase", "--continue"])
}

/// Abort an interrupted rebase.
pub fn cmd_ra() -> Result<()> {
    let ctx = RepoContext::resolve()?;
    git::run_git(&ctx.repo_root, &["rebase", "--abort"])?;
    Ok(())
}

/// Replay the last N commits onto a new base, repointing any open review
/// request.
pub fn cmd_rb(args: RbArgs) -> Result<()> {
    let ctx = RepoContext::resolve()?;
    sync::rebase_back_onto(&ctx, args.keep, args.pattern.as_deref(), args.revert)
}

/// Undo commits, keeping their changes in the working tree.
pub fn cmd_ru(args: RuArgs) -> Result<()> {
    span_op(SpanAction::Uncommit, args.target.as_deref())
}

/// Delete commits and their changes.
pub fn cmd_rd(args: RdArgs) -> Result<()> {
    span_op(SpanAction::Delete, args.target.as_deref())
}

/// Squash commits into one, reusing the oldest commit's message.
pub fn cmd_rs(args: RsArgs) -> Result<()> {
    span_op(SpanAction::Squash, args.target.as_deref())
}

/// Hard-reset the current branch to another branch.
pub fn cmd_rt(args: RtArgs) -> Result<()> {
    let ctx = RepoContext::resolve()?;

    let target = match args.pattern.as_deref() {
        None => ctx.main_branch()?,
        Some(pattern) => resolve::local(&ctx, pattern, true)?,
    };

    let current = ctx.current_branch()?;
    prompt::confirm(&format!("reset {} to {}", current, target))?;
    git::run_git(&ctx.repo_root, &["reset", "--hard", &target, "--"])?;
    Ok(())
}

#[derive(Debug, Clone, Copy)]
enum SpanAction {
    Uncommit,
    Delete,
    Squash,
}

fn span_op(action: SpanAction, target: Option<&str>) -> Result<()> {
    let ctx = RepoContext::resolve()?;

    let boundary = parse_span_boundary(target, matches!(action, SpanAction::Squash))?;
    let start = git::run_git(&ctx.repo_root, &["rev-parse", "--short", &boundary])?;
    let end = git::run_git(&ctx.repo_root, &["rev-parse", "--short", "HEAD"])?;
    let span = format!("[{}..{}]", start.stdout, end.stdout);
    let parent = format!("{}~", boundary);

    match action {
        SpanAction::Uncommit => {
            prompt::confirm(&format!("undo commits {}", span))?;
            git::run_git(&ctx.repo_root, &["reset", "--mixed", &parent])?;
        }
        SpanAction::Delete => {
            prompt::confirm(&format!("delete commits {}", span))?;
            git::run_git(&ctx.repo_root, &["reset", "--hard", &parent])?;
        }
        SpanAction::Squash => {
            prompt::confirm(&format!("squash commits {}", span))?;
            let message = git::run_git(&ctx.repo_root, &["show", "-s", "--format=%B", &boundary])?;
            git::run_git(&ctx.repo_root, &["reset", "--soft", &parent])?;
            git::run_git(&ctx.repo_root, &["commit", "-m", &message.stdout])?;
        }
    }
    Ok(())
}

/// The oldest commit included in the span: a count of commits back from
/// HEAD (1-9), or a literal commit.
fn parse_span_boundary(target: Option<&str>, squash: bool) -> Result<String> {
    let Some(target) = target else {
        return Ok(if squash { "HEAD~1" } else { "HEAD" }.to_string());
    };

    let Ok(n) = target.parse::<u32>() else {
        return Ok(target.to_string());
    };

    if n == 0 || n > 9 || (n == 1 && squash) {
        return Err(TwigError::User(format!("invalid commit count: {}", n)));
    }
    Ok(if n == 1 {
        "HEAD".to_string()
    } else {
        format!("HEAD~{}", n - 1)
    })
}
