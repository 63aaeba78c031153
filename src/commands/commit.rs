//! Working-tree and index mutations: commit, amend, stage, stash, discard.

use crate::branch::classify;
use crate::cli::{MaArgs, McArgs, MmArgs, MrArgs, MuArgs};
use crate::context::RepoContext;
use crate::error::{Result, TwigError};
use crate::git;
use crate::prompt;
use tracing::info;

fn is_staged(ctx: &RepoContext) -> bool {
    // Fails on a repository without commits; nothing is staged there either.
    git::run_git_ok(&ctx.repo_root, &["diff-index", "--cached", "HEAD"])
        .map(|out| !out.is_empty())
        .unwrap_or(false)
}

/// Record a wip commit of whatever is staged (or everything).
pub fn cmd_mw() -> Result<()> {
    let ctx = RepoContext::resolve()?;
    let current = ctx.current_branch()?;

    if classify::is_protected(&ctx, &current)? {
        return Err(TwigError::User(format!(
            "cannot record wip on protected branch '{}'",
            current
        )));
    }

    if is_staged(&ctx) {
        git::run_git(&ctx.repo_root, &["commit", "-m", "wip"])?;
    } else {
        git::run_git(&ctx.repo_root, &["commit", "-a", "-m", "wip"])?;
    }
    Ok(())
}

/// Commit staged changes (or everything) with the given message.
pub fn cmd_mc(args: McArgs) -> Result<()> {
    let ctx = RepoContext::resolve()?;
    let current = ctx.current_branch()?;

    if !args.force && classify::is_protected(&ctx, &current)? {
        return Err(TwigError::User(format!(
            "cannot commit to protected branch '{}' (use -f to override)",
            current
        )));
    }

    let mut cmd = vec!["commit"];
    if !is_staged(&ctx) {
        cmd.push("-a");
    }
    for message in &args.message {
        cmd.push("-m");
        cmd.push(message);
    }
    git::run_git(&ctx.repo_root, &cmd)?;
    Ok(())
}

/// Amend the last commit; without a message the editor opens.
pub fn cmd_mm(args: MmArgs) -> Result<()> {
    let ctx = RepoContext::resolve()?;

    if args.message.is_empty() {
        return git::run_git_interactive(&ctx.repo_root, &["commit", "--amend"]);
    }

    let mut cmd = vec!["commit", "--amend"];
    for message in &args.message {
        cmd.push("-m");
        cmd.push(message);
    }
    git::run_git(&ctx.repo_root, &cmd)?;
    Ok(())
}

/// Stage files.
pub fn cmd_ma(args: MaArgs) -> Result<()> {
    let ctx = RepoContext::resolve()?;
    let mut cmd = vec!["add"];
    cmd.extend(args.files.iter().map(String::as_str));
    git::run_git(&ctx.repo_root, &cmd)?;
    Ok(())
}

/// Unstage files.
pub fn cmd_mu(args: MuArgs) -> Result<()> {
    let ctx = RepoContext::resolve()?;
    let mut cmd = vec!["restore", "--staged"];
    cmd.extend(args.files.iter().map(String::as_str));
    git::run_git(&ctx.repo_root, &cmd)?;
    Ok(())
}

/// Stash the working tree.
pub fn cmd_mh() -> Result<()> {
    let ctx = RepoContext::resolve()?;
    git::run_git(&ctx.repo_root, &["stash"])?;
    Ok(())
}

/// Pop the last stash.
pub fn cmd_ms() -> Result<()> {
    let ctx = RepoContext::resolve()?;
    git::run_git(&ctx.repo_root, &["stash", "pop"])?;
    Ok(())
}

/// Discard modifications to the given tracked files, after confirmation.
pub fn cmd_mr(args: MrArgs) -> Result<()> {
    let ctx = RepoContext::resolve()?;

    let mut ls = vec!["ls-files", "-m"];
    ls.extend(args.files.iter().map(String::as_str));
    let matched = git::run_git(&ctx.repo_root, &ls)?;

    prompt::confirm(&format!(
        "discard modified: {}",
        matched.stdout.replace('\n', " ")
    ))?;

    let mut checkout = vec!["checkout", "--"];
    checkout.extend(args.files.iter().map(String::as_str));
    git::run_git(&ctx.repo_root, &checkout)?;
    Ok(())
}

/// Delete untracked files, after confirmation.
pub fn cmd_mx() -> Result<()> {
    let ctx = RepoContext::resolve()?;

    let untracked = git::run_git(
        &ctx.repo_root,
        &["ls-files", "--others", "--exclude-standard"],
    )?;
    if untracked.is_empty() {
        info!("no file to clean");
        return Ok(());
    }

    prompt::confirm(&format!("delete these files?\n{}", untracked.stdout))?;
    git::run_git(&ctx.repo_root, &["clean", "-f"])?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{DirGuard, create_test_repo};
    use serial_test::serial;

    #[test]
    #[serial]
    fn mw_refuses_protected_branch() {
        let temp_dir = create_test_repo();
        let _guard = DirGuard::new(temp_dir.path());

        let result = cmd_mw();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("protected branch"));
    }

    #[test]
    #[serial]
    fn mc_refuses_protected_branch_without_force() {
        let temp_dir = create_test_repo();
        let _guard = DirGuard::new(temp_dir.path());

        let result = cmd_mc(McArgs {
            force: false,
            message: vec!["msg".to_string()],
        });
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("protected branch"));
    }

    #[test]
    #[serial]
    fn mc_commits_on_feature_branch() {
        let temp_dir = create_test_repo();
        let _guard = DirGuard::new(temp_dir.path());
        crate::test_support::git(temp_dir.path(), &["checkout", "-b", "alice/foo"]);
        std::fs::write(temp_dir.path().join("new.txt"), "content\n").unwrap();
        crate::test_support::git(temp_dir.path(), &["add", "new.txt"]);

        cmd_mc(McArgs {
            force: false,
            message: vec!["add new file".to_string()],
        })
        .unwrap();

        let ctx = RepoContext::resolve().unwrap();
        let log = git::run_git(&ctx.repo_root, &["log", "-n", "1", "--format=%s"]).unwrap();
        assert_eq!(log.stdout, "add new file");
    }

    #[test]
    #[serial]
    fn mw_records_wip_commit() {
        let temp_dir = create_test_repo();
        let _guard = DirGuard::new(temp_dir.path());
        crate::test_support::git(temp_dir.path(), &["checkout", "-b", "alice/foo"]);
        std::fs::write(temp_dir.path().join("README.md"), "# Changed\n").unwrap();

        cmd_mw().unwrap();

        let ctx = RepoContext::resolve().unwrap();
        let log = git::run_git(&ctx.repo_root, &["log", "-n", "1", "--format=%s"]).unwrap();
        assert_eq!(log.stdout, "wip");
    }

    #[test]
    #[serial]
    fn ma_stages_files() {
        let temp_dir = create_test_repo();
        let _guard = DirGuard::new(temp_dir.path());
        std::fs::write(temp_dir.path().join("staged.txt"), "content\n").unwrap();

        cmd_ma(MaArgs {
            files: vec!["staged.txt".to_string()],
        })
        .unwrap();

        let ctx = RepoContext::resolve().unwrap();
        assert!(is_staged(&ctx));
    }
}
