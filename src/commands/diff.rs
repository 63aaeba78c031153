//! Diff presentation: plain, GUI diff tool, ediff, single-commit.

use crate::branch::{is_commitish, resolve};
use crate::cli::{DcArgs, DeArgs, DfArgs, DgArgs};
use crate::context::RepoContext;
use crate::error::Result;
use crate::git;

fn diff_args<'a>(cached: bool, tool: Option<&'a str>, extra: &'a [String]) -> Vec<&'a str> {
    let mut args = Vec::new();
    if cached {
        args.push("--cached");
    }
    if let Some(tool) = tool {
        args.push("-t");
        args.push(tool);
    }
    args.extend(extra.iter().map(String::as_str));
    args
}

/// Print a plain diff of the working tree (or the index with -c).
pub fn cmd_df(args: DfArgs) -> Result<()> {
    let ctx = RepoContext::resolve()?;

    let mut cmd = vec!["diff"];
    cmd.extend(diff_args(args.cached, None, &args.args));
    let out = git::run_git(&ctx.repo_root, &cmd)?;
    println!("{}", out.stdout);
    Ok(())
}

/// Show a diff in the configured GUI diff tool.
pub fn cmd_dg(args: DgArgs) -> Result<()> {
    let ctx = RepoContext::resolve()?;
    let tool = ctx.config.difftool();

    let mut cmd = vec!["difftool"];
    cmd.extend(diff_args(args.cached, tool.as_deref(), &args.args));
    git::run_git_interactive(&ctx.repo_root, &cmd)
}

/// Show a diff in ediff; `^` is shorthand for HEAD~.
pub fn cmd_de(args: DeArgs) -> Result<()> {
    let ctx = RepoContext::resolve()?;

    let extra: Vec<String> = if args.args.len() == 1 && args.args[0] == "^" {
        vec!["HEAD~".to_string()]
    } else {
        args.args.clone()
    };

    let mut cmd = vec!["difftool"];
    cmd.extend(diff_args(args.cached, Some("ediff"), &extra));
    git::run_git_interactive(&ctx.repo_root, &cmd)
}

/// Show one commit's diff in the configured GUI diff tool.
pub fn cmd_dc(args: DcArgs) -> Result<()> {
    let ctx = RepoContext::resolve()?;
    let tool = ctx.config.difftool();

    let commit = match args.commit.as_deref() {
        None => "HEAD".to_string(),
        Some(c) if is_commitish(c) => c.to_string(),
        Some(pattern) => resolve::local(&ctx, pattern, true)?,
    };
    let range = vec![format!("{}~..{}", commit, commit)];

    let mut cmd = vec!["difftool"];
    cmd.extend(diff_args(args.cached, tool.as_deref(), &range));
    git::run_git_interactive(&ctx.repo_root, &cmd)
}
