//! Epoch performance commands.

use super::status::print_activity;
use super::ChainArgs;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use sealwatch_query::EpochPerformance;

#[derive(Args)]
pub struct EpochArgs {
    #[command(flatten)]
    chain: ChainArgs,

    /// Epoch number the block is expected to belong to
    epoch: u64,

    /// A block governed by the epoch's snapshot, usually its anchor
    #[arg(short, long)]
    block: u64,
}

#[derive(Args)]
pub struct PreviousEpochArgs {
    #[command(flatten)]
    chain: ChainArgs,

    /// Epoch number the previous epoch is expected to carry
    epoch: u64,
}

pub fn run_epoch(args: EpochArgs) -> Result<()> {
    let api = args.chain.open()?;
    let report = api.epoch_performance(args.epoch, args.block)?;
    if args.chain.print_json(&report)? {
        return Ok(());
    }
    print_report(args.epoch, &report);
    Ok(())
}

pub fn run_previous(args: PreviousEpochArgs) -> Result<()> {
    let api = args.chain.open()?;
    let report = api.previous_epoch_performance(args.epoch)?;
    if args.chain.print_json(&report)? {
        return Ok(());
    }
    print_report(args.epoch, &report);
    Ok(())
}

fn print_report(epoch: u64, report: &EpochPerformance) {
    println!();
    println!("{}", format!("Epoch {} Performance:", epoch).bold().cyan());
    println!();
    println!("  Start block: {}", report.start_block.to_string().bright_cyan());
    println!("  Blocks:      {}", report.num_blocks.to_string().bright_cyan());
    println!(
        "  In-turn:     {}",
        format!("{:.2}%", report.in_turn_percent).bright_cyan()
    );
    if report.next_epoch == 0 {
        println!("  Next epoch:  {}", "open".yellow());
    } else {
        println!("  Next epoch:  {}", report.next_epoch.to_string().bright_cyan());
    }
    println!();
    print_activity(&report.signing_status);
}
