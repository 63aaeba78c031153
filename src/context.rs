//! Repository context resolution for tw.
//!
//! Every command starts by resolving a [`RepoContext`]: the worktree root the
//! command was invoked in, its configuration, and the derived branch topology
//! (main branch, the branch bound to this working directory, the primary
//! working directory). The context is created once per invocation and passed
//! explicitly to every component that needs it.
//!
//! Stable facts (main branch name, username, primary worktree path) are
//! computed on first use and cached for the invocation. The current branch is
//! never cached: it changes under the orchestrator's feet by design, so it is
//! re-queried from live HEAD every time.

use crate::config::Config;
use crate::error::{Result, TwigError};
use crate::git;
use std::cell::OnceCell;
use std::env;
use std::path::{Path, PathBuf};

/// Reserved directory-name prefix marking a secondary working directory.
///
/// A directory named `wt-<suffix>` is bound to the branch of the same name;
/// the primary working directory (no prefix) is bound to the main branch.
pub const SECONDARY_DIR_PREFIX: &str = "wt-";

/// Resolved per-invocation repository context.
#[derive(Debug)]
pub struct RepoContext {
    /// Absolute path to the root of the worktree the command runs in.
    pub repo_root: PathBuf,

    /// Per-repository configuration (`.twig.yaml`, or defaults).
    pub config: Config,

    main_branch: OnceCell<String>,
    username: OnceCell<String>,
    primary_dir: OnceCell<PathBuf>,
}

impl RepoContext {
    /// Resolve the context from the process working directory.
    pub fn resolve() -> Result<Self> {
        let cwd = env::current_dir().map_err(|e| {
            TwigError::User(format!("failed to get current working directory: {}", e))
        })?;
        Self::resolve_from(&cwd)
    }

    /// Resolve the context from a specific directory.
    ///
    /// Useful for tests or when the working directory is already known.
    pub fn resolve_from<P: AsRef<Path>>(cwd: P) -> Result<Self> {
        let repo_root = git::get_repo_root(cwd)?;
        let config = Config::load(&repo_root)?;

        Ok(Self {
            repo_root,
            config,
            main_branch: OnceCell::new(),
            username: OnceCell::new(),
            primary_dir: OnceCell::new(),
        })
    }

    /// Name of the remote operations target (from config, default `origin`).
    pub fn remote(&self) -> &str {
        &self.config.remote
    }

    /// Base name of the working directory this command runs in.
    pub fn dir_name(&self) -> &str {
        self.repo_root
            .file_name()
            .map(|n| n.to_str().unwrap_or(""))
            .unwrap_or("")
    }

    /// The currently checked-out branch in this working directory.
    ///
    /// Detached HEAD is reported as the short commit hash. Always a live
    /// query; never cached across mutating operations.
    pub fn current_branch(&self) -> Result<String> {
        self.current_branch_in(&self.repo_root)
    }

    /// The currently checked-out branch in an arbitrary working directory.
    pub fn current_branch_in<P: AsRef<Path>>(&self, dir: P) -> Result<String> {
        let dir = dir.as_ref();
        let head = git::run_git(dir, &["rev-parse", "--abbrev-ref", "HEAD"])?;
        if head.stdout == "HEAD" {
            let hash = git::run_git(dir, &["rev-parse", "--short", "HEAD"])?;
            Ok(hash.stdout)
        } else {
            Ok(head.stdout)
        }
    }

    /// The repository's main branch.
    ///
    /// Prefers the remote's symbolic default ref; falls back to a local
    /// branch literally named `main` or `master`.
    pub fn main_branch(&self) -> Result<String> {
        if let Some(b) = self.main_branch.get() {
            return Ok(b.clone());
        }

        let remote_head = format!("refs/remotes/{}/HEAD", self.remote());
        let from_remote = git::run_git_ok(
            &self.repo_root,
            &["symbolic-ref", "--short", &remote_head],
        )
        .and_then(|out| {
            out.stdout
                .strip_prefix(&format!("{}/", self.remote()))
                .map(String::from)
        });

        let branch = match from_remote {
            Some(b) => b,
            None => {
                let listed = git::run_git(
                    &self.repo_root,
                    &["branch", "--list", "main", "master", "--format", "%(refname:short)"],
                )?;
                match listed.lines().first() {
                    Some(b) => b.to_string(),
                    None => {
                        return Err(TwigError::User(
                            "cannot determine the main branch: no remote default, \
                             no local 'main' or 'master'"
                                .to_string(),
                        ));
                    }
                }
            }
        };

        Ok(self.main_branch.get_or_init(|| branch).clone())
    }

    /// The branch this working directory is bound to.
    ///
    /// A secondary working directory (`wt-<suffix>`) is bound to the branch
    /// of the same name; the primary working directory is bound to main.
    pub fn repo_branch(&self) -> Result<String> {
        let dir = self.dir_name();
        if dir.starts_with(SECONDARY_DIR_PREFIX) {
            Ok(dir.to_string())
        } else {
            self.main_branch()
        }
    }

    /// Username owning the `<username>/` feature-branch namespace.
    pub fn username(&self) -> Result<String> {
        if let Some(u) = self.username.get() {
            return Ok(u.clone());
        }

        let name = match &self.config.username {
            Some(u) => u.clone(),
            None => env::var("USER").or_else(|_| env::var("USERNAME")).map_err(|_| {
                TwigError::User(
                    "cannot determine username: set `username` in .twig.yaml or export USER"
                        .to_string(),
                )
            })?,
        };

        Ok(self.username.get_or_init(|| name).clone())
    }

    /// Absolute path of the primary working directory (the one holding main).
    ///
    /// Scans the worktree listing, ignoring secondary (`wt-`) directories,
    /// and requires exactly one survivor.
    pub fn primary_dir(&self) -> Result<PathBuf> {
        if let Some(d) = self.primary_dir.get() {
            return Ok(d.clone());
        }

        let listing = git::run_git(&self.repo_root, &["worktree", "list"])?;
        let mut primary: Option<PathBuf> = None;
        for line in listing.lines() {
            let Some(path) = line.split_whitespace().next() else {
                continue;
            };
            let is_secondary = Path::new(path)
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with(SECONDARY_DIR_PREFIX));
            if is_secondary {
                continue;
            }
            if primary.is_some() {
                return Err(TwigError::User(format!(
                    "primary working directory is not unique:\n{}",
                    listing.stdout
                )));
            }
            primary = Some(PathBuf::from(path));
        }

        let dir = primary.ok_or_else(|| {
            TwigError::User("no primary working directory found in the worktree list".to_string())
        })?;

        Ok(self.primary_dir.get_or_init(|| dir).clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{commit_file, create_test_repo, git};

    #[test]
    fn resolve_from_finds_repo_root() {
        let temp_dir = create_test_repo();
        let subdir = temp_dir.path().join("sub");
        std::fs::create_dir_all(&subdir).unwrap();

        let ctx = RepoContext::resolve_from(&subdir).unwrap();
        assert_eq!(
            ctx.repo_root.canonicalize().unwrap(),
            temp_dir.path().canonicalize().unwrap()
        );
    }

    #[test]
    fn current_branch_tracks_head() {
        let temp_dir = create_test_repo();
        let ctx = RepoContext::resolve_from(temp_dir.path()).unwrap();
        assert_eq!(ctx.current_branch().unwrap(), "main");

        git(temp_dir.path(), &["checkout", "-b", "side"]);
        assert_eq!(ctx.current_branch().unwrap(), "side");
    }

    #[test]
    fn current_branch_reports_short_hash_when_detached() {
        let temp_dir = create_test_repo();
        let ctx = RepoContext::resolve_from(temp_dir.path()).unwrap();

        git(temp_dir.path(), &["checkout", "--detach", "HEAD"]);
        let head = ctx.current_branch().unwrap();
        assert_ne!(head, "HEAD");
        assert!(head.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn main_branch_from_local_listing() {
        let temp_dir = create_test_repo();
        let ctx = RepoContext::resolve_from(temp_dir.path()).unwrap();
        assert_eq!(ctx.main_branch().unwrap(), "main");
    }

    #[test]
    fn repo_branch_equals_main_in_primary_dir() {
        let temp_dir = create_test_repo();
        let ctx = RepoContext::resolve_from(temp_dir.path()).unwrap();
        assert_eq!(ctx.repo_branch().unwrap(), "main");
    }

    #[test]
    fn repo_branch_derives_from_secondary_dir_name() {
        let temp_dir = create_test_repo();
        commit_file(temp_dir.path(), "base.txt", "base", "base commit");

        let wt_dir = temp_dir.path().join("wt-api");
        let wt_str = wt_dir.to_string_lossy().to_string();
        git(temp_dir.path(), &["worktree", "add", "-b", "wt-api", &wt_str]);

        let ctx = RepoContext::resolve_from(&wt_dir).unwrap();
        assert_eq!(ctx.repo_branch().unwrap(), "wt-api");
        assert_eq!(ctx.current_branch().unwrap(), "wt-api");
    }

    #[test]
    fn primary_dir_skips_secondary_worktrees() {
        let temp_dir = create_test_repo();
        commit_file(temp_dir.path(), "base.txt", "base", "base commit");

        let wt_dir = temp_dir.path().join("wt-api");
        let wt_str = wt_dir.to_string_lossy().to_string();
        git(temp_dir.path(), &["worktree", "add", "-b", "wt-api", &wt_str]);

        let ctx = RepoContext::resolve_from(&wt_dir).unwrap();
        let primary = ctx.primary_dir().unwrap();
        assert_eq!(
            primary.canonicalize().unwrap(),
            temp_dir.path().canonicalize().unwrap()
        );
    }

    #[test]
    fn username_prefers_config_override() {
        let temp_dir = create_test_repo();
        let mut ctx = RepoContext::resolve_from(temp_dir.path()).unwrap();
        ctx.config.username = Some("alice".to_string());
        assert_eq!(ctx.username().unwrap(), "alice");
    }

    #[test]
    fn classifier_inputs_are_stable_across_calls() {
        let temp_dir = create_test_repo();
        let ctx = RepoContext::resolve_from(temp_dir.path()).unwrap();
        let first = (ctx.main_branch().unwrap(), ctx.repo_branch().unwrap());
        let second = (ctx.main_branch().unwrap(), ctx.repo_branch().unwrap());
        assert_eq!(first, second);
    }
}
