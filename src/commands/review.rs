//! Review-request operations.

use crate::branch::{self, BranchRole, TMP_SUFFIX, classify, ephemeral, is_commitish, resolve};
use crate::cli::{GpArgs, GsArgs, GtArgs};
use crate::context::RepoContext;
use crate::error::{Result, TwigError};
use crate::git;
use crate::prompt;
use crate::review::{self, ReviewState};
use tracing::debug;

/// Show the review-request status overview.
pub fn cmd_gh() -> Result<()> {
    let ctx = RepoContext::resolve()?;
    if let Some(overview) = review::status_overview(&ctx) {
        println!("{}", overview);
    }
    Ok(())
}

/// Create a review request for the current branch.
///
/// With a base argument, the base is first published under the branch's
/// remote tmp name so the request diffs against it (the REBASING linkage);
/// otherwise the request targets the default base.
pub fn cmd_gt(args: GtArgs) -> Result<()> {
    let ctx = RepoContext::resolve()?;
    let current = ctx.current_branch()?;

    let base = match args.base.as_deref() {
        None => None,
        Some(b) if is_commitish(b) => Some(b.to_string()),
        Some(pattern) => Some(resolve::local(&ctx, pattern, true)?),
    };

    let refspec = format!("HEAD:{}", current);
    git::run_git(&ctx.repo_root, &["push", "--force", ctx.remote(), &refspec])?;

    match &base {
        None => review::create(&ctx, args.draft, None)?,
        Some(base) => {
            let remote_anchor = ephemeral::anchor_name(&current);
            let refspec = format!("{}:{}", base, remote_anchor);
            git::run_git(&ctx.repo_root, &["push", "--force", ctx.remote(), &refspec])?;
            review::create(&ctx, args.draft, Some(&remote_anchor))?;
        }
    }

    if !args.silent {
        show_request(&ctx, Some(&current))?;
    }
    Ok(())
}

/// Open a review request in the browser.
pub fn cmd_gp(args: GpArgs) -> Result<()> {
    let ctx = RepoContext::resolve()?;

    // A unique local-branch match wins; otherwise the argument passes
    // through as-is (it may be a request number).
    let target = match args.target.as_deref() {
        None => None,
        Some(raw) => {
            let matches = resolve::match_local(&ctx, raw, true, false)?;
            if matches.len() == 1 {
                Some(matches.into_iter().next().unwrap())
            } else {
                Some(raw.to_string())
            }
        }
    };

    show_request(&ctx, target.as_deref())
}

/// Show a branch's review-request state; once merged, offer to clean the
/// branch up (reset if current, delete otherwise).
pub fn cmd_gs(args: GsArgs) -> Result<()> {
    let ctx = RepoContext::resolve()?;

    let Some(pattern) = args.pattern else {
        if let Some(overview) = review::status_overview(&ctx) {
            println!("{}", overview);
        }
        return Ok(());
    };

    let current = ctx.current_branch()?;
    let main = ctx.main_branch()?;

    let branch = if pattern == "." {
        current.clone()
    } else {
        resolve::local(&ctx, &pattern, false)?
    };

    let state = review::state_of(&ctx, Some(&branch));
    println!("{}", state);

    if state != ReviewState::Merged {
        return Ok(());
    }
    // never clean up the protected branches, however the request ended up
    if matches!(
        classify(&ctx, &branch)?,
        BranchRole::Main | BranchRole::Repo
    ) {
        return Ok(());
    }

    if branch == current {
        prompt::confirm(&format!("reset to {}", main))?;
        git::run_git(&ctx.repo_root, &["reset", "--hard", &main, "--"])?;
        return Ok(());
    }

    // The branch, plus any tmp leftovers that served as its review base.
    let exact = format!("^{}({})?$", regex::escape(&branch), TMP_SUFFIX);
    let local = resolve::match_local(&ctx, &exact, false, true)?;
    let remote = resolve::match_remote(&ctx, &exact, true, true)?;
    prompt::confirm(&format!(
        "delete local branches [{}] and remote branches [{}]",
        local.join(", "),
        remote.join(", ")
    ))?;
    branch::delete_local_branches(&ctx, &local)?;
    branch::delete_remote_branches(&ctx, &remote)
}

fn show_request(ctx: &RepoContext, target: Option<&str>) -> Result<()> {
    let state = review::state_of(ctx, target);
    if state != ReviewState::Open {
        return Err(TwigError::User(format!(
            "no open review request for '{}'",
            target.unwrap_or("the current branch")
        )));
    }

    let url = review::url_of(ctx, target)?;
    println!("{}", url);
    if let Err(e) = open::that(&url) {
        debug!("ignored: failed to open browser: {}", e);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{DirGuard, create_test_repo};
    use serial_test::serial;

    #[test]
    #[serial]
    fn gp_fails_cleanly_without_an_open_request() {
        let temp_dir = create_test_repo();
        let _guard = DirGuard::new(temp_dir.path());

        // no review service reachable from a throwaway repo
        let result = cmd_gp(GpArgs { target: None });
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("no open review request")
        );
    }
}
