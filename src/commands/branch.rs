//! Branch operations: checkout, creation, tracking, deletion.

use crate::branch::{self, TMP_SUFFIX, is_commitish, resolve};
use crate::cli::{BcArgs, BdArgs, BnArgs, BoArgs, BtArgs};
use crate::context::RepoContext;
use crate::editor;
use crate::error::{Result, TwigError};
use crate::git;
use crate::prompt;
use crate::sync;
use tracing::info;

/// Check out a local branch; without a pattern, the branch bound to this
/// working directory.
pub fn cmd_bo(args: BoArgs) -> Result<()> {
    let ctx = RepoContext::resolve()?;

    let target = match args.pattern.as_deref() {
        None => ctx.repo_branch()?,
        Some(pattern) => resolve::local(&ctx, pattern, false)?,
    };

    let current = ctx.current_branch()?;
    if current == target {
        return Err(TwigError::User(format!("already on '{}'", current)));
    }

    info!("branch {} -> {}", current, target);
    git::checkout(&ctx.repo_root, &target)?;
    if args.revert {
        editor::revert_unmodified_buffers(&ctx.repo_root);
    }
    Ok(())
}

/// Check out a commit detached, or a tag as a branch of the same name.
pub fn cmd_bc(args: BcArgs) -> Result<()> {
    let ctx = RepoContext::resolve()?;
    let target = &args.commit_or_tag;

    if is_commitish(target) {
        git::run_git(&ctx.repo_root, &["checkout", "--detach", target])?;
    } else {
        let tag_ref = format!("tags/{}", target);
        git::run_git(&ctx.repo_root, &["checkout", &tag_ref, "-b", target])?;
    }
    Ok(())
}

/// Check out a remote branch under its own name, tracking the remote.
pub fn cmd_bt(args: BtArgs) -> Result<()> {
    let ctx = RepoContext::resolve()?;
    let branch = resolve::remote(&ctx, &args.pattern)?;
    let upstream = format!("{}/{}", ctx.remote(), branch);
    git::run_git(
        &ctx.repo_root,
        &["checkout", "-b", &branch, "--track", &upstream],
    )?;
    Ok(())
}

/// Create a new branch in the username namespace.
///
/// Without a base, branches off a freshly pulled main; `.` branches off the
/// current HEAD.
pub fn cmd_bn(args: BnArgs) -> Result<()> {
    let ctx = RepoContext::resolve()?;

    if args.name.contains('/') {
        return Err(TwigError::User(format!(
            "branch name cannot contain '/': {}",
            args.name
        )));
    }
    let branch = format!("{}/{}", ctx.username()?, args.name);

    let base = match args.base.as_deref() {
        Some(".") => None,
        Some(pattern) => Some(resolve::local(&ctx, pattern, true)?),
        None => {
            let main = ctx.main_branch()?;
            sync::pull_main(&ctx)?;
            Some(main)
        }
    };

    match &base {
        Some(b) => git::run_git(&ctx.repo_root, &["checkout", "-b", &branch, b])?,
        None => git::run_git(&ctx.repo_root, &["checkout", "-b", &branch])?,
    };
    if base.is_some() {
        editor::revert_unmodified_buffers(&ctx.repo_root);
    }
    Ok(())
}

/// Set the current branch's upstream to its remote counterpart.
pub fn cmd_br() -> Result<()> {
    let ctx = RepoContext::resolve()?;
    let current = ctx.current_branch()?;

    let remote_branch = resolve::remote(&ctx, &current)?;
    if remote_branch != current {
        return Err(TwigError::User(format!(
            "remote branch mismatch: current '{}', remote '{}'",
            current, remote_branch
        )));
    }

    let upstream = format!("{}/{}", ctx.remote(), current);
    git::run_git(&ctx.repo_root, &["branch", "-u", &upstream])?;
    Ok(())
}

/// Delete branches matching a pattern, locally and (unless -l) on the
/// remote; `.` deletes the current branch.
pub fn cmd_bd(args: BdArgs) -> Result<()> {
    let ctx = RepoContext::resolve()?;

    if args.pattern == "." {
        return delete_current_branch(&ctx);
    }

    git::run_git(&ctx.repo_root, &["fetch", "--prune", "--tags"])?;

    let local = resolve::match_local(&ctx, &args.pattern, false, true)?;
    let remote = if args.local_only {
        Vec::new()
    } else {
        resolve::match_remote(&ctx, &args.pattern, true, true)?
    };

    if local.is_empty() && remote.is_empty() {
        info!("no branch matches '{}'", args.pattern);
        return Ok(());
    }

    // Deleting tmp leftovers is routine; everything else asks first.
    if !args.pattern.ends_with(TMP_SUFFIX) {
        prompt::confirm(&format!(
            "delete local branches [{}] and remote branches [{}]",
            local.join(", "),
            remote.join(", ")
        ))?;
    }

    branch::delete_local_branches(&ctx, &local)?;
    branch::delete_remote_branches(&ctx, &remote)
}

fn delete_current_branch(ctx: &RepoContext) -> Result<()> {
    let current = ctx.current_branch()?;
    let repo = ctx.repo_branch()?;
    if current == repo {
        return Err(TwigError::User(format!(
            "cannot delete '{}': it is the branch bound to this working directory",
            current
        )));
    }

    // The branch's remote counterpart and its tmp base, exactly.
    let exact = format!("^{}({})?$", regex::escape(&current), TMP_SUFFIX);
    let remote = resolve::match_remote(ctx, &exact, true, true)?;

    prompt::confirm(&format!(
        "delete branch '{}' and remote branches [{}]",
        current,
        remote.join(", ")
    ))?;

    git::checkout(&ctx.repo_root, &repo)?;
    editor::revert_unmodified_buffers(&ctx.repo_root);
    branch::delete_local_branches(ctx, std::slice::from_ref(&current))?;
    branch::delete_remote_branches(ctx, &remote)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{BdArgs, BoArgs};
    use crate::test_support::{DirGuard, create_test_repo, git as run};
    use serial_test::serial;

    #[test]
    #[serial]
    fn bo_refuses_checkout_of_current_branch() {
        let temp_dir = create_test_repo();
        let _guard = DirGuard::new(temp_dir.path());

        let result = cmd_bo(BoArgs {
            pattern: None,
            revert: false,
        });
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("already on"));
    }

    #[test]
    #[serial]
    fn bo_checks_out_resolved_branch() {
        let temp_dir = create_test_repo();
        run(temp_dir.path(), &["branch", "alice/fix-login"]);
        let _guard = DirGuard::new(temp_dir.path());

        cmd_bo(BoArgs {
            pattern: Some("login".to_string()),
            revert: false,
        })
        .unwrap();

        let ctx = RepoContext::resolve().unwrap();
        assert_eq!(ctx.current_branch().unwrap(), "alice/fix-login");
    }

    #[test]
    #[serial]
    fn bd_tmp_pattern_deletes_without_prompting() {
        let temp_dir = create_test_repo();
        run(temp_dir.path(), &["branch", "alice/foo__TMP"]);
        let _guard = DirGuard::new(temp_dir.path());

        cmd_bd(BdArgs {
            pattern: "__TMP".to_string(),
            local_only: true,
        })
        .unwrap();

        let ctx = RepoContext::resolve().unwrap();
        let listing = git::run_git(&ctx.repo_root, &["branch"]).unwrap();
        assert!(!listing.stdout.contains("__TMP"));
    }

    #[test]
    #[serial]
    fn bd_unknown_pattern_is_a_no_op() {
        let temp_dir = create_test_repo();
        let _guard = DirGuard::new(temp_dir.path());

        cmd_bd(BdArgs {
            pattern: "no-such-branch".to_string(),
            local_only: true,
        })
        .unwrap();
    }

    #[test]
    #[serial]
    fn bd_dot_refuses_bound_branch() {
        let temp_dir = create_test_repo();
        let _guard = DirGuard::new(temp_dir.path());

        let result = cmd_bd(BdArgs {
            pattern: ".".to_string(),
            local_only: false,
        });
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("bound to this working directory")
        );
    }

    #[test]
    #[serial]
    fn bn_rejects_slash_in_name() {
        let temp_dir = create_test_repo();
        let _guard = DirGuard::new(temp_dir.path());

        let result = cmd_bn(crate::cli::BnArgs {
            name: "a/b".to_string(),
            base: None,
        });
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("cannot contain"));
    }

    #[test]
    #[serial]
    fn bn_branches_off_head_with_dot_base() {
        let temp_dir = create_test_repo();
        std::fs::write(temp_dir.path().join(".twig.yaml"), "username: alice\n").unwrap();
        let _guard = DirGuard::new(temp_dir.path());

        cmd_bn(crate::cli::BnArgs {
            name: "quickfix".to_string(),
            base: Some(".".to_string()),
        })
        .unwrap();

        let ctx = RepoContext::resolve().unwrap();
        assert_eq!(ctx.current_branch().unwrap(), "alice/quickfix");
    }
}
