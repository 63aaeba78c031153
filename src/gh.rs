//! Review-service (gh) command runner for tw.
//!
//! Same shape as the git runner: argument lists in, trimmed output out.
//! Failures map to the review-failure category. The probe variant treats
//! failure as "no review request" — absence is an expected outcome when
//! deciding whether a branch has an open request at all.

use crate::error::{Result, TwigError};
use crate::git::CmdOutput;
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// Run a gh command with the specified working directory.
///
/// # Returns
///
/// * `Ok(CmdOutput)` - On successful execution (exit code 0)
/// * `Err(TwigError::Review)` - On non-zero exit code (mapped to exit code 4)
pub fn run_gh<P: AsRef<Path>>(cwd: P, args: &[&str]) -> Result<CmdOutput> {
    let cwd = cwd.as_ref();
    debug!("gh {}", args.join(" "));

    let output = Command::new("gh")
        .current_dir(cwd)
        .args(args)
        .output()
        .map_err(|e| {
            TwigError::Review(format!(
                "failed to execute gh {}: {}",
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

        Err(TwigError::Review(format!(
            "gh {} failed (exit code {}): {}",
            args.first().unwrap_or(&""),
            exit_code,
            error_msg
        )))
    }
}

/// Run a gh command, treating failure as an expected outcome.
///
/// Used for probes where "no such review request" is a valid answer, and for
/// display-only queries that should not abort an otherwise local operation.
pub fn run_gh_ok<P: AsRef<Path>>(cwd: P, args: &[&str]) -> Option<CmdOutput> {
    match run_gh(cwd, args) {
        Ok(out) => Some(out),
        Err(e) => {
            debug!("ignored: {}", e);
            None
        }
    }
}
