//! Signer set and snapshot commands.

use super::{parse_block, ChainArgs};
use anyhow::Result;
use clap::Args;
use colored::Colorize;

#[derive(Args)]
pub struct SignersArgs {
    #[command(flatten)]
    chain: ChainArgs,

    /// Block number, hash or "latest" (defaults to the head)
    block: Option<String>,
}

#[derive(Args)]
pub struct SnapshotArgs {
    #[command(flatten)]
    chain: ChainArgs,

    /// Block number, hash or "latest" (defaults to the head)
    block: Option<String>,
}

pub fn run_signers(args: SignersArgs) -> Result<()> {
    let api = args.chain.open()?;
    let signers = api.signers(parse_block(args.block.as_deref())?)?;
    if args.chain.print_json(&signers)? {
        return Ok(());
    }

    println!();
    println!("{}", "Authorized Signers:".bold().cyan());
    println!();
    for (i, signer) in signers.iter().enumerate() {
        println!(
            "  {} {}",
            format!("{}.", i + 1).bright_black(),
            signer.to_string().bright_yellow()
        );
    }
    println!();
    Ok(())
}

pub fn run_snapshot(args: SnapshotArgs) -> Result<()> {
    let api = args.chain.open()?;
    let snapshot = api.snapshot(parse_block(args.block.as_deref())?)?;
    if args.chain.print_json(&snapshot)? {
        return Ok(());
    }

    println!();
    println!("{}", "Snapshot:".bold().cyan());
    println!();
    println!("  Anchor:    {}", snapshot.number.to_string().bright_cyan());
    println!("  Hash:      {}", snapshot.hash.to_string().bright_yellow());
    println!("  Epoch:     {}", snapshot.epoch_number.to_string().bright_cyan());
    match snapshot.previous() {
        Some((number, hash)) => println!(
            "  Previous:  {} {}",
            format!("#{}", number).bright_black(),
            hash.to_string().bright_black()
        ),
        None => println!("  Previous:  {}", "none (genesis epoch)".bright_black()),
    }
    println!("  Signers:   {}", snapshot.signers.len().to_string().bright_cyan());
    for signer in &snapshot.signers {
        println!("    {}", signer.to_string().bright_yellow());
    }
    println!();
    Ok(())
}
