//! CLI argument parsing for tw.
//!
//! Uses clap derive macros for declarative argument definitions. The
//! subcommand table is the whole alias surface: each two-letter subcommand
//! composes one git/review operation. This module only defines the shape;
//! implementations live in the `commands` module.
//!
//! Wherever a subcommand takes a `pattern`, it is a regex searched against
//! the candidate branch names and must match exactly one of them. A literal
//! commit hash (6+ hex digits) or `HEAD`-relative reference bypasses
//! resolution where noted.

use clap::{Parser, Subcommand};

/// Short git and review-request aliases with branch-topology awareness.
#[derive(Parser, Debug)]
#[command(name = "tw")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Show every delegated git/gh command.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available operations, grouped by first letter: b(ranch), c(herry-pick),
/// d(iff), g (review requests), m (mutate worktree/index), p(ush/pull),
/// r(ebase/reset), s(how), w(orktree).
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check out a local branch (default: the branch bound to this
    /// working directory).
    Bo(BoArgs),

    /// Check out a commit (detached) or a tag (as a new branch).
    Bc(BcArgs),

    /// Check out a remote branch and track it.
    Bt(BtArgs),

    /// Create a new feature branch under the username namespace.
    Bn(BnArgs),

    /// Set the current branch's upstream to its remote counterpart.
    Br,

    /// Delete branches locally and on the remote.
    Bd(BdArgs),

    /// Cherry-pick a commit or a branch tip.
    Cp(CpArgs),

    /// Continue an interrupted cherry-pick.
    Cc,

    /// Abort an interrupted cherry-pick.
    Ca,

    /// Show a diff of the working tree (or the index with -c).
    Df(DfArgs),

    /// Show a diff in the configured GUI diff tool.
    Dg(DgArgs),

    /// Show a diff in ediff.
    De(DeArgs),

    /// Show one commit's diff in the configured GUI diff tool.
    Dc(DcArgs),

    /// Show the review-request status overview.
    Gh,

    /// Create a review request for the current branch.
    Gt(GtArgs),

    /// Open a review request in the browser.
    Gp(GpArgs),

    /// Show a branch's review-request state; offer cleanup once merged.
    Gs(GsArgs),

    /// Record a wip commit on the current (non-protected) branch.
    Mw,

    /// Commit staged changes (or everything) with a message.
    Mc(McArgs),

    /// Amend the last commit.
    Mm(MmArgs),

    /// Stage files.
    Ma(MaArgs),

    /// Unstage files.
    Mu(MuArgs),

    /// Stash the working tree.
    Mh,

    /// Pop the last stash.
    Ms,

    /// Discard modifications to tracked files (asks first).
    Mr(MrArgs),

    /// Delete untracked files (asks first).
    Mx,

    /// Pull main, rebasing this working directory's branch on top.
    Pm,

    /// Pull the current branch with rebase.
    Pl,

    /// Push the current branch to its remote counterpart.
    Ps(PsArgs),

    /// Initialize and update submodules.
    Po,

    /// Rebase the current branch onto another branch.
    Rr(RrArgs),

    /// Interactive rebase onto a branch or commit.
    Ri(RiArgs),

    /// Stage resolved files and continue an interrupted rebase.
    Rc,

    /// Abort an interrupted rebase.
    Ra,

    /// Replay the last N commits onto a new base, repointing any open
    /// review request.
    Rb(RbArgs),

    /// Undo commits, keeping their changes in the working tree (asks first).
    Ru(RuArgs),

    /// Delete commits and their changes (asks first).
    Rd(RdArgs),

    /// Squash commits into one (asks first).
    Rs(RsArgs),

    /// Hard-reset the current branch to another branch (asks first).
    Rt(RtArgs),

    /// Show working-tree status and local branches.
    S,

    /// Show a commit summary with the files it touched.
    Sc(ScArgs),

    /// List recent commits of a branch.
    Sl(SlArgs),

    /// List remote branches.
    Sr(SrArgs),

    /// Show a file's content at a branch or commit.
    Sv(SvArgs),

    /// Create a secondary working directory bound to a branch of the
    /// same name.
    Wn(WnArgs),

    /// List working directories.
    Wl,

    /// Remove a secondary working directory and its branch.
    Wd(WdArgs),

    /// Print the current branch (or short commit hash when detached).
    I,

    /// Print the repository's directory name.
    Repo,
}

/// Arguments for `bo`.
#[derive(Parser, Debug)]
pub struct BoArgs {
    /// Branch pattern. Defaults to the branch bound to this working
    /// directory.
    pub pattern: Option<String>,

    /// Revert unmodified editor buffers after the checkout.
    #[arg(short, long)]
    pub revert: bool,
}

/// Arguments for `bc`.
#[derive(Parser, Debug)]
pub struct BcArgs {
    /// Commit hash (checked out detached) or tag name (checked out as a
    /// branch of the same name).
    pub commit_or_tag: String,
}

/// Arguments for `bt`.
#[derive(Parser, Debug)]
pub struct BtArgs {
    /// Remote branch pattern.
    pub pattern: String,
}

/// Arguments for `bn`.
#[derive(Parser, Debug)]
pub struct BnArgs {
    /// Branch name; the username namespace prefix is added automatically.
    pub name: String,

    /// Base branch pattern, or `.` for the current HEAD. Defaults to a
    /// freshly pulled main.
    pub base: Option<String>,
}

/// Arguments for `bd`.
#[derive(Parser, Debug)]
pub struct BdArgs {
    /// Branch pattern, or `.` for the current branch.
    pub pattern: String,

    /// Delete local branches only.
    #[arg(short, long)]
    pub local_only: bool,
}

/// Arguments for `cp`.
#[derive(Parser, Debug)]
pub struct CpArgs {
    /// Commit hash or branch pattern.
    pub target: String,
}

/// Arguments for `df`, `dg`.
#[derive(Parser, Debug)]
pub struct DfArgs {
    /// Diff the index instead of the working tree.
    #[arg(short, long)]
    pub cached: bool,

    /// Extra arguments passed through to git diff.
    pub args: Vec<String>,
}

/// Arguments for `dg`.
#[derive(Parser, Debug)]
pub struct DgArgs {
    /// Diff the index instead of the working tree.
    #[arg(short, long)]
    pub cached: bool,

    /// Extra arguments passed through to git difftool.
    pub args: Vec<String>,
}

/// Arguments for `de`.
#[derive(Parser, Debug)]
pub struct DeArgs {
    /// Diff the index instead of the working tree.
    #[arg(short, long)]
    pub cached: bool,

    /// Extra arguments passed through, or `^` for HEAD~.
    pub args: Vec<String>,
}

/// Arguments for `dc`.
#[derive(Parser, Debug)]
pub struct DcArgs {
    /// Diff the index instead of the working tree.
    #[arg(short, long)]
    pub cached: bool,

    /// Commit hash or branch pattern. Defaults to HEAD.
    pub commit: Option<String>,
}

/// Arguments for `gt`.
#[derive(Parser, Debug)]
pub struct GtArgs {
    /// Create the request as a draft.
    #[arg(short = 'w', long)]
    pub draft: bool,

    /// Don't open the created request in the browser.
    #[arg(short, long)]
    pub silent: bool,

    /// Base branch pattern or commit; pushed under the branch's tmp name
    /// and used as the request base.
    pub base: Option<String>,
}

/// Arguments for `gp`.
#[derive(Parser, Debug)]
pub struct GpArgs {
    /// Branch pattern or request number. Defaults to the current branch.
    pub target: Option<String>,
}

/// Arguments for `gs`.
#[derive(Parser, Debug)]
pub struct GsArgs {
    /// Branch pattern, or `.` for the current branch. Without it, shows
    /// the overview.
    pub pattern: Option<String>,
}

/// Arguments for `mc`.
#[derive(Parser, Debug)]
pub struct McArgs {
    /// Allow committing on a protected branch.
    #[arg(short, long)]
    pub force: bool,

    /// Commit message; each word becomes its own paragraph.
    #[arg(required = true)]
    pub message: Vec<String>,
}

/// Arguments for `mm`.
#[derive(Parser, Debug)]
pub struct MmArgs {
    /// New commit message; without it the editor opens.
    pub message: Vec<String>,
}

/// Arguments for `ma`.
#[derive(Parser, Debug)]
pub struct MaArgs {
    /// Files to stage.
    #[arg(required = true)]
    pub files: Vec<String>,
}

/// Arguments for `mu`.
#[derive(Parser, Debug)]
pub struct MuArgs {
    /// Files to unstage.
    #[arg(required = true)]
    pub files: Vec<String>,
}

/// Arguments for `mr`.
#[derive(Parser, Debug)]
pub struct MrArgs {
    /// Files whose modifications to discard.
    #[arg(required = true)]
    pub files: Vec<String>,
}

/// Arguments for `ps`.
#[derive(Parser, Debug)]
pub struct PsArgs {
    /// Force-push (refused on main).
    #[arg(short, long)]
    pub force: bool,
}

/// Arguments for `rr`.
#[derive(Parser, Debug)]
pub struct RrArgs {
    /// Branch pattern to rebase onto. Defaults to the working directory's
    /// branch after pulling main.
    pub pattern: Option<String>,
}

/// Arguments for `ri`.
#[derive(Parser, Debug)]
pub struct RiArgs {
    /// Branch pattern, commit, or HEAD-relative reference.
    pub target: String,
}

/// Arguments for `rb`.
#[derive(Parser, Debug)]
pub struct RbArgs {
    /// Number of commits to keep.
    #[arg(short = 'n', long = "keep", default_value_t = 1)]
    pub keep: u32,

    /// Revert unmodified editor buffers afterwards.
    #[arg(short, long)]
    pub revert: bool,

    /// Base branch pattern. Defaults to a freshly pulled main.
    pub pattern: Option<String>,
}

/// Arguments for `ru`, `rd`, `rs`.
#[derive(Parser, Debug)]
pub struct RuArgs {
    /// Number of commits (1-9) or a commit hash.
    pub target: Option<String>,
}

/// Arguments for `rd`.
#[derive(Parser, Debug)]
pub struct RdArgs {
    /// Number of commits (1-9) or a commit hash.
    pub target: Option<String>,
}

/// Arguments for `rs`.
#[derive(Parser, Debug)]
pub struct RsArgs {
    /// Number of commits (2-9) or a commit hash.
    pub target: Option<String>,
}

/// Arguments for `rt`.
#[derive(Parser, Debug)]
pub struct RtArgs {
    /// Branch pattern to reset to. Defaults to main.
    pub pattern: Option<String>,
}

/// Arguments for `sc`.
#[derive(Parser, Debug)]
pub struct ScArgs {
    /// Commit to show. Defaults to HEAD.
    pub commit: Vec<String>,
}

/// Arguments for `sl`.
#[derive(Parser, Debug)]
pub struct SlArgs {
    /// Look up the branch among remote branches.
    #[arg(short, long)]
    pub remote: bool,

    /// Branch pattern and/or number of commits, in any order.
    pub args: Vec<String>,
}

/// Arguments for `sr`.
#[derive(Parser, Debug)]
pub struct SrArgs {
    /// Branch pattern. Defaults to all remote branches.
    pub pattern: Option<String>,
}

/// Arguments for `sv`.
#[derive(Parser, Debug)]
pub struct SvArgs {
    /// Branch pattern or commit, and a file path (either order).
    pub rev: String,

    /// The other of the two.
    pub file: String,
}

/// Arguments for `wn`.
#[derive(Parser, Debug)]
pub struct WnArgs {
    /// Identifier for the new working directory; must not already carry
    /// the reserved prefix.
    pub id: String,
}

/// Arguments for `wd`.
#[derive(Parser, Debug)]
pub struct WdArgs {
    /// Identifier of the working directory to remove.
    pub id: String,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
