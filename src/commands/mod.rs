//! Command implementations for tw.
//!
//! This module provides the dispatcher that routes CLI subcommands to their
//! implementations, one file per alias family. Every handler resolves a
//! [`crate::context::RepoContext`] first and delegates the real work to the
//! topology, review, and sync modules.

mod branch;
mod cherry_pick;
mod commit;
mod diff;
mod pull_push;
mod rebase;
mod review;
mod show;
mod worktree;

use crate::cli::Command;
use crate::error::Result;

/// Dispatch a command to its implementation.
pub fn dispatch(command: Command) -> Result<()> {
    match command {
        Command::Bo(args) => branch::cmd_bo(args),
        Command::Bc(args) => branch::cmd_bc(args),
        Command::Bt(args) => branch::cmd_bt(args),
        Command::Bn(args) => branch::cmd_bn(args),
        Command::Br => branch::cmd_br(),
        Command::Bd(args) => branch::cmd_bd(args),

        Command::Cp(args) => cherry_pick::cmd_cp(args),
        Command::Cc => cherry_pick::cmd_cc(),
        Command::Ca => cherry_pick::cmd_ca(),

        Command::Df(args) => diff::cmd_df(args),
        Command::Dg(args) => diff::cmd_dg(args),
        Command::De(args) => diff::cmd_de(args),
        Command::Dc(args) => diff::cmd_dc(args),

        Command::Gh => review::cmd_gh(),
        Command::Gt(args) => review::cmd_gt(args),
        Command::Gp(args) => review::cmd_gp(args),
        Command::Gs(args) => review::cmd_gs(args),

        Command::Mw => commit::cmd_mw(),
        Command::Mc(args) => commit::cmd_mc(args),
        Command::Mm(args) => commit::cmd_mm(args),
        Command::Ma(args) => commit::cmd_ma(args),
        Command::Mu(args) => commit::cmd_mu(args),
        Command::Mh => commit::cmd_mh(),
        Command::Ms => commit::cmd_ms(),
        Command::Mr(args) => commit::cmd_mr(args),
        Command::Mx => commit::cmd_mx(),

        Command::Pm => pull_push::cmd_pm(),
        Command::Pl => pull_push::cmd_pl(),
        Command::Ps(args) => pull_push::cmd_ps(args),
        Command::Po => pull_push::cmd_po(),

        Command::Rr(args) => rebase::cmd_rr(args),
        Command::Ri(args) => rebase::cmd_ri(args),
        Command::Rc => rebase::cmd_rc(),
        Command::Ra => rebase::cmd_ra(),
        Command::Rb(args) => rebase::cmd_rb(args),
        Command::Ru(args) => rebase::cmd_ru(args),
        Command::Rd(args) => rebase::cmd_rd(args),
        Command::Rs(args) => rebase::cmd_rs(args),
        Command::Rt(args) => rebase::cmd_rt(args),

        Command::S => show::cmd_s(),
        Command::Sc(args) => show::cmd_sc(args),
        Command::Sl(args) => show::cmd_sl(args),
        Command::Sr(args) => show::cmd_sr(args),
        Command::Sv(args) => show::cmd_sv(args),
        Command::I => show::cmd_i(),
        Command::Repo => show::cmd_repo(),

        Command::Wn(args) => worktree::cmd_wn(args),
        Command::Wl => worktree::cmd_wl(),
        Command::Wd(args) => worktree::cmd_wd(args),
    }
}
