//! Branch topology: classification, pattern resolution, ephemeral (tmp)
//! branch bookkeeping, and branch deletion.

pub mod classify;
pub mod ephemeral;
pub mod resolve;

pub use classify::{BranchRole, classify, is_commitish};
pub use ephemeral::TMP_SUFFIX;

use crate::context::RepoContext;
use crate::error::Result;
use crate::git;

/// Force-delete local branches. Callers confirm first where the branches may
/// hold unique work.
pub fn delete_local_branches(ctx: &RepoContext, branches: &[String]) -> Result<()> {
    for branch in branches {
        git::run_git(&ctx.repo_root, &["branch", "-D", branch])?;
    }
    Ok(())
}

/// Delete remote branches by pushing an empty ref.
pub fn delete_remote_branches(ctx: &RepoContext, branches: &[String]) -> Result<()> {
    for branch in branches {
        let refspec = format!(":{}", branch);
        git::run_git(&ctx.repo_root, &["push", ctx.remote(), &refspec])?;
    }
    Ok(())
}
