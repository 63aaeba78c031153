//! Git command runner for tw.
//!
//! Provides a safe wrapper around git commands with captured stdout/stderr
//! and structured error handling. All git operations go through this module;
//! commands are always built as argument lists, never as interpolated shell
//! strings, so branch names and commit messages need no quoting.

use crate::error::{Result, TwigError};
use std::path::Path;
use std::process::{Command, Output};
use tracing::debug;

/// Result of a successful command execution.
#[derive(Debug, Clone)]
pub struct CmdOutput {
    /// Standard output from the command (trimmed).
    pub stdout: String,
    /// Standard error from the command (trimmed).
    pub stderr: String,
}

impl CmdOutput {
    pub(crate) fn from_output(output: &Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
    }

    /// Returns true if stdout is empty.
    pub fn is_empty(&self) -> bool {
        self.stdout.is_empty()
    }

    /// Returns stdout lines as a vector.
    pub fn lines(&self) -> Vec<&str> {
        if self.stdout.is_empty() {
            Vec::new()
        } else {
            self.stdout.lines().collect()
        }
    }
}

/// Run a git command with the specified working directory.
///
/// # Arguments
///
/// * `cwd` - The working directory to run the command in
/// * `args` - The git command arguments (without "git" prefix)
///
/// # Returns
///
/// * `Ok(CmdOutput)` - On successful execution (exit code 0)
/// * `Err(TwigError::Git)` - On non-zero exit code (mapped to exit code 3)
pub fn run_git<P: AsRef<Path>>(cwd: P, args: &[&str]) -> Result<CmdOutput> {
    let cwd = cwd.as_ref();
    debug!("git {}", args.join(" "));

    let output = Command::new("git")
        .current_dir(cwd)
        .args(args)
        .output()
        .map_err(|e| {
            TwigError::Git(format!(
                "failed to execute git {}: {}",
                args.first().unwrap_or(&""),
                e
            ))
        })?;

    let cmd_output = CmdOutput::from_output(&output);

    if output.status.success() {
        Ok(cmd_output)
    } else {
        let exit_code = output.status.code().unwrap_or(-1);
        let error_msg = if cmd_output.stderr.is_empty() {
            cmd_output.stdout.clone()
        } else {
            cmd_output.stderr.clone()
        };

        Err(TwigError::Git(format!(
            "git {} failed (exit code {}): {}",
            args.first().unwrap_or(&""),
            exit_code,
            error_msg
        )))
    }
}

/// Run a git command, treating failure as an expected outcome.
///
/// A subset of read-only probes (e.g. "does HEAD exist yet") legitimately
/// fail; absence is a valid answer there, so the error is swallowed and
/// `None` returned.
pub fn run_git_ok<P: AsRef<Path>>(cwd: P, args: &[&str]) -> Option<CmdOutput> {
    match run_git(cwd, args) {
        Ok(out) => Some(out),
        Err(e) => {
            debug!("ignored: {}", e);
            None
        }
    }
}

/// Run a git command with the terminal inherited instead of captured.
///
/// For commands that drive an editor or GUI (`rebase -i`, `difftool`,
/// `commit --amend` with no message), stdout must stay attached to the
/// terminal.
pub fn run_git_interactive<P: AsRef<Path>>(cwd: P, args: &[&str]) -> Result<()> {
    let cwd = cwd.as_ref();
    debug!("git {}", args.join(" "));

    let status = Command::new("git")
        .current_dir(cwd)
        .args(args)
        .status()
        .map_err(|e| {
            TwigError::Git(format!(
                "failed to execute git {}: {}",
                args.first().unwrap_or(&""),
                e
            ))
        })?;

    if status.success() {
        Ok(())
    } else {
        Err(TwigError::Git(format!(
            "git {} failed (exit code {})",
            args.first().unwrap_or(&""),
            status.code().unwrap_or(-1)
        )))
    }
}

/// Check out a branch (or any committish) in the given working directory.
pub fn checkout<P: AsRef<Path>>(cwd: P, target: &str) -> Result<()> {
    run_git(cwd, &["checkout", target])?;
    Ok(())
}

/// Get the repository root directory using `git rev-parse --show-toplevel`.
///
/// Works from any location within a git repository, including from within
/// linked worktrees (each worktree reports its own toplevel).
///
/// # Returns
///
/// * `Ok(PathBuf)` - The absolute path to the worktree's root
/// * `Err(TwigError::User)` - If not inside a git repository (exit code 1)
pub fn get_repo_root<P: AsRef<Path>>(cwd: P) -> Result<std::path::PathBuf> {
    let cwd = cwd.as_ref();

    let output = Command::new("git")
        .current_dir(cwd)
        .args(["rev-parse", "--show-toplevel"])
        .output()
        .map_err(|e| {
            TwigError::User(format!("failed to execute git: {} (is git installed?)", e))
        })?;

    let cmd_output = CmdOutput::from_output(&output);

    if output.status.success() {
        Ok(std::path::PathBuf::from(&cmd_output.stdout))
    } else if cmd_output.stderr.contains("not a git repository") {
        Err(TwigError::User(
            "not inside a git repository. Run this command from within a git repository."
                .to_string(),
        ))
    } else {
        Err(TwigError::User(format!(
            "git rev-parse failed: {}",
            if cmd_output.stderr.is_empty() {
                &cmd_output.stdout
            } else {
                &cmd_output.stderr
            }
        )))
    }
}
