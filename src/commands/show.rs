//! Read-only display operations.

use crate::branch::{is_commitish, resolve};
use crate::cli::{ScArgs, SlArgs, SrArgs, SvArgs};
use crate::context::RepoContext;
use crate::error::{Result, TwigError};
use crate::git;
use regex::Regex;
use std::sync::LazyLock;

/// A squash-merged commit title carries the request number.
static REVIEW_TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(#[0-9]+\)$").unwrap());

/// Show working-tree status, the latest commit, and local branches.
///
/// On a clean tree whose tip is not a merged review request, the files of
/// the tip commit are listed as a reminder of what is still in flight.
pub fn cmd_s() -> Result<()> {
    let ctx = RepoContext::resolve()?;
    let sep = "================";
    let mut out = String::new();

    let status = git::run_git(&ctx.repo_root, &["status", "-b"])?;
    for (i, line) in status.lines().into_iter().enumerate() {
        if i == 0 {
            let branch = line.strip_prefix("On branch ").unwrap_or(line);
            let last = git::run_git(&ctx.repo_root, &["log", "-1", "--oneline", "--no-decorate"])?;
            out.push_str(branch);
            out.push('\t');
            out.push_str(&last.stdout);
            out.push('\n');
            out.push_str(sep);
        } else {
            out.push_str(line);
        }
        out.push('\n');
    }

    if git::run_git(&ctx.repo_root, &["status", "--porcelain"])?.is_empty() {
        let title = git::run_git(&ctx.repo_root, &["log", "-n", "1", "--format=%s"])?;
        if !REVIEW_TITLE_RE.is_match(&title.stdout) {
            let files =
                git::run_git(&ctx.repo_root, &["log", "-n", "1", "--format=", "--name-only"])?;
            for file in files.lines() {
                out.push_str("   - ");
                out.push_str(file);
                out.push('\n');
            }
        }
    }

    out.push_str(sep);
    out.push_str("\n  ");
    let branches = git::run_git(&ctx.repo_root, &["branch", "-v"])?;
    out.push_str(&branches.stdout);
    println!("{}", out);
    Ok(())
}

/// Show a commit summary with the files it touched.
pub fn cmd_sc(args: ScArgs) -> Result<()> {
    let ctx = RepoContext::resolve()?;

    let mut cmd = vec!["show", "--name-only"];
    cmd.extend(args.commit.iter().map(String::as_str));
    let out = git::run_git(&ctx.repo_root, &cmd)?;
    println!("{}", out.stdout);
    Ok(())
}

/// List recent commits of a branch (default: 3 of the current branch).
pub fn cmd_sl(args: SlArgs) -> Result<()> {
    let ctx = RepoContext::resolve()?;

    let mut pattern = None;
    let mut count = 3u32;
    for arg in &args.args {
        match arg.parse::<u32>() {
            Ok(n) => count = n,
            Err(_) => pattern = Some(arg.as_str()),
        }
    }

    let branch = match pattern {
        None => None,
        Some(p) if args.remote => {
            let name = resolve::remote(&ctx, p)?;
            Some(format!("{}/{}", ctx.remote(), name))
        }
        Some(p) => Some(resolve::local(&ctx, p, true)?),
    };

    let count = count.to_string();
    let mut cmd: Vec<&str> = vec![
        "log",
        "-n",
        &count,
        "--format=%h    %s%n%cd    %an%n",
        "--date=local",
    ];
    if let Some(branch) = &branch {
        cmd.push(branch);
    }
    cmd.push("--");
    let out = git::run_git(&ctx.repo_root, &cmd)?;
    println!("{}", out.stdout);
    Ok(())
}

/// List remote branches matching a pattern (default: all).
pub fn cmd_sr(args: SrArgs) -> Result<()> {
    let ctx = RepoContext::resolve()?;
    let pattern = args.pattern.as_deref().unwrap_or(".*");

    for branch in resolve::match_remote(&ctx, pattern, false, false)? {
        println!("{}", branch);
    }
    Ok(())
}

/// Show a file's content at a branch or commit.
///
/// The two arguments may come in either order; the one naming an existing
/// file is the file.
pub fn cmd_sv(args: SvArgs) -> Result<()> {
    let ctx = RepoContext::resolve()?;

    let (mut rev, mut file) = (args.rev.clone(), args.file.clone());
    if std::fs::metadata(&file).is_err() {
        std::mem::swap(&mut rev, &mut file);
    }
    if std::fs::metadata(&file).is_err() {
        return Err(TwigError::User(format!(
            "neither '{}' nor '{}' is a file",
            args.rev, args.file
        )));
    }

    if !is_commitish(&rev) {
        rev = resolve::local(&ctx, &rev, true)?;
    }

    let abs = std::fs::canonicalize(&file)
        .map_err(|e| TwigError::User(format!("cannot resolve '{}': {}", file, e)))?;
    let root = ctx
        .repo_root
        .canonicalize()
        .map_err(|e| TwigError::User(format!("cannot resolve repository root: {}", e)))?;
    let rel = abs.strip_prefix(&root).map_err(|_| {
        TwigError::User(format!("'{}' is not inside this repository", abs.display()))
    })?;

    let revspec = format!("{}:{}", rev, rel.display());
    let out = git::run_git(&ctx.repo_root, &["show", &revspec])?;
    println!("{}", out.stdout);
    Ok(())
}

/// Print the current branch, or the short commit hash when detached.
///
/// Prints nothing (and succeeds) outside a repository, so it is safe to
/// embed in a shell prompt.
pub fn cmd_i() -> Result<()> {
    let Ok(ctx) = RepoContext::resolve() else {
        return Ok(());
    };
    let Some(head) = git::run_git_ok(&ctx.repo_root, &["rev-parse", "--abbrev-ref", "HEAD"])
    else {
        return Ok(());
    };
    if head.stdout.is_empty() {
        return Ok(());
    }

    let name = if head.stdout == "HEAD" {
        git::run_git(&ctx.repo_root, &["rev-parse", "--short", "HEAD"])?.stdout
    } else {
        head.stdout
    };
    print!("{}", name);
    Ok(())
}

/// Print the repository's directory name.
pub fn cmd_repo() -> Result<()> {
    let ctx = RepoContext::resolve()?;
    print!("{}", ctx.dir_name());
    Ok(())
}
