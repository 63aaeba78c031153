//! Cherry-pick operations.

use crate::branch::{is_commitish, resolve};
use crate::cli::CpArgs;
use crate::context::RepoContext;
use crate::error::Result;
use crate::git;

/// Cherry-pick a commit, or the tip of a branch resolved by pattern.
pub fn cmd_cp(args: CpArgs) -> Result<()> {
    let ctx = RepoContext::resolve()?;

    let target = if is_commitish(&args.target) {
        args.target.clone()
    } else {
        resolve::local(&ctx, &args.target, true)?
    };
    git::run_git(&ctx.repo_root, &["cherry-pick", &target])?;
    Ok(())
}

/// Continue an interrupted cherry-pick.
pub fn cmd_cc() -> Result<()> {
    let ctx = RepoContext::resolve()?;
    git::run_git_interactive(&ctx.repo_root, &["cherry-pick", "--continue"])
}

/// Abort an interrupted cherry-pick.
pub fn cmd_ca() -> Result<()> {
    let ctx = RepoContext::resolve()?;
    git::run_git(&ctx.repo_root, &["cherry-pick", "--abort"])?;
    Ok(())
}
