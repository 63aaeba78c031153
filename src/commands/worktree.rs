//! Secondary working directory management.
//!
//! A secondary working directory is a git worktree created as a sibling of
//! the primary one, named `wt-<id>` and bound to a fresh branch of the same
//! name. The directory name is how the binding is recovered later, so the
//! reserved prefix may not appear in user-supplied ids.

use crate::cli::{WdArgs, WnArgs};
use crate::context::{RepoContext, SECONDARY_DIR_PREFIX};
use crate::error::{Result, TwigError};
use crate::git;
use tracing::info;

/// Create a secondary working directory and its branch.
pub fn cmd_wn(args: WnArgs) -> Result<()> {
    let ctx = RepoContext::resolve()?;

    if args.id.starts_with(SECONDARY_DIR_PREFIX) {
        return Err(TwigError::User(format!(
            "worktree id cannot begin with '{}'",
            SECONDARY_DIR_PREFIX
        )));
    }

    let branch = format!("{}{}", SECONDARY_DIR_PREFIX, args.id);
    let parent = ctx.repo_root.parent().ok_or_else(|| {
        TwigError::User("repository root has no parent directory".to_string())
    })?;
    let dir = parent.join(&branch);
    let dir_str = dir.to_string_lossy().to_string();

    git::run_git(&ctx.repo_root, &["worktree", "add", "-b", &branch, &dir_str])?;
    info!("worktree '{}' created at '{}'", branch, dir.display());
    Ok(())
}

/// List working directories.
pub fn cmd_wl() -> Result<()> {
    let ctx = RepoContext::resolve()?;
    let out = git::run_git(&ctx.repo_root, &["worktree", "list"])?;
    println!("{}", out.stdout);
    Ok(())
}

/// Remove a secondary working directory and delete its branch.
pub fn cmd_wd(args: WdArgs) -> Result<()> {
    let ctx = RepoContext::resolve()?;

    let branch = format!("{}{}", SECONDARY_DIR_PREFIX, args.id);
    git::run_git(&ctx.repo_root, &["worktree", "remove", &branch])?;
    git::run_git(&ctx.repo_root, &["branch", "-D", &branch])?;
    info!("worktree '{}' removed", branch);
    Ok(())
}
