//! Pull and push operations.

use crate::cli::PsArgs;
use crate::context::RepoContext;
use crate::error::{Result, TwigError};
use crate::git;
use crate::sync;

/// Pull main and rebase this working directory's branch on top of it.
pub fn cmd_pm() -> Result<()> {
    let ctx = RepoContext::resolve()?;
    sync::pull_main(&ctx)
}

/// Pull the current branch with rebase.
pub fn cmd_pl() -> Result<()> {
    let ctx = RepoContext::resolve()?;
    git::run_git(&ctx.repo_root, &["pull", "--rebase"])?;
    Ok(())
}

/// Push the current branch to its remote counterpart.
///
/// On main, force-pushing is refused and a plain push is scanned for wip
/// commits first.
pub fn cmd_ps(args: PsArgs) -> Result<()> {
    let ctx = RepoContext::resolve()?;
    let current = ctx.current_branch()?;
    let main = ctx.main_branch()?;

    if current == main {
        if args.force {
            return Err(TwigError::User("cannot force push to main".to_string()));
        }
        let range = format!("{}/{}..{}", ctx.remote(), main, main);
        let unpushed = git::run_git(&ctx.repo_root, &["log", "--oneline", &range])?;
        for line in unpushed.lines() {
            let line = line.trim().to_lowercase();
            if line.ends_with("wip") || line.contains(" wip ") {
                return Err(TwigError::User("cannot push wip commit to main".to_string()));
            }
        }
    }

    let refspec = format!("HEAD:{}", current);
    if args.force {
        git::run_git(&ctx.repo_root, &["push", "-f", ctx.remote(), &refspec])?;
    } else {
        git::run_git(&ctx.repo_root, &["push", ctx.remote(), &refspec])?;
    }
    Ok(())
}

/// Initialize and update submodules.
pub fn cmd_po() -> Result<()> {
    let ctx = RepoContext::resolve()?;
    git::run_git(&ctx.repo_root, &["submodule", "update", "--init"])?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{DirGuard, commit_file, create_test_repo_with_remote, git as run};
    use serial_test::serial;

    #[test]
    #[serial]
    fn ps_refuses_force_push_on_main() {
        let (_temp_dir, work) = create_test_repo_with_remote();
        let _guard = DirGuard::new(&work);

        let result = cmd_ps(PsArgs { force: true });
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("cannot force push to main")
        );
    }

    #[test]
    #[serial]
    fn ps_refuses_wip_commits_on_main() {
        let (_temp_dir, work) = create_test_repo_with_remote();
        commit_file(&work, "w.txt", "w", "wip");
        let _guard = DirGuard::new(&work);

        let result = cmd_ps(PsArgs { force: false });
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("wip commit"));
    }

    #[test]
    #[serial]
    fn ps_pushes_clean_main() {
        let (temp_dir, work) = create_test_repo_with_remote();
        commit_file(&work, "c.txt", "c", "a real change");
        let _guard = DirGuard::new(&work);

        cmd_ps(PsArgs { force: false }).unwrap();

        let origin = temp_dir.path().join("origin.git");
        let remote_tip =
            crate::git::run_git(&origin, &["rev-parse", "refs/heads/main"]).unwrap();
        let local_tip = crate::git::run_git(&work, &["rev-parse", "main"]).unwrap();
        assert_eq!(remote_tip.stdout, local_tip.stdout);
    }

    #[test]
    #[serial]
    fn ps_force_pushes_feature_branch() {
        let (temp_dir, work) = create_test_repo_with_remote();
        run(&work, &["checkout", "-b", "alice/foo"]);
        commit_file(&work, "f.txt", "f", "feature work");
        let _guard = DirGuard::new(&work);

        cmd_ps(PsArgs { force: true }).unwrap();

        let origin = temp_dir.path().join("origin.git");
        let remote_tip =
            crate::git::run_git(&origin, &["rev-parse", "refs/heads/alice/foo"]).unwrap();
        let local_tip = crate::git::run_git(&work, &["rev-parse", "alice/foo"]).unwrap();
        assert_eq!(remote_tip.stdout, local_tip.stdout);
    }
}
