//! Recent signing status command.

use super::ChainArgs;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use sealwatch_query::{QueryConfig, SigningStatus, DEFAULT_RECENT_WINDOW};

#[derive(Args)]
pub struct StatusArgs {
    #[command(flatten)]
    chain: ChainArgs,

    /// Number of blocks before the head to report on
    #[arg(short, long, default_value_t = DEFAULT_RECENT_WINDOW)]
    window: u64,
}

pub fn run(args: StatusArgs) -> Result<()> {
    let api = args.chain.open_with(QueryConfig::new(args.window))?;
    let status = api.status()?;
    if args.chain.print_json(&status)? {
        return Ok(());
    }

    println!();
    println!("{}", "Signing Status:".bold().cyan());
    println!();
    println!("  Window:    {}", api.config().recent_window.to_string().bright_cyan());
    println!("  Blocks:    {}", status.num_blocks.to_string().bright_cyan());
    println!("  In-turn:   {}", format!("{:.2}%", status.in_turn_percent).bright_cyan());
    println!();
    print_activity(&status.signing_status);
    Ok(())
}

/// Print per-signer block counts, busiest first.
pub(super) fn print_activity(activity: &SigningStatus) {
    let mut rows: Vec<_> = activity.iter().collect();
    rows.sort_by(|a, b| b.1.cmp(a.1).then(a.0.cmp(b.0)));

    println!("{}", "Sealer Activity:".bold());
    println!();
    for (signer, count) in rows {
        let count = if *count == 0 {
            count.to_string().red()
        } else {
            count.to_string().bright_cyan()
        };
        println!("  {} {}", signer.to_string().bright_yellow(), count);
    }
    println!();
}
