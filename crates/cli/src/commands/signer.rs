//! Block signer command.

use super::ChainArgs;
use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;
use sealwatch_query::SignerQuery;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

#[derive(Args)]
pub struct SignerArgs {
    #[command(flatten)]
    chain: ChainArgs,

    /// Block number, hash, "latest" or a 0x-prefixed encoded block or header
    input: Option<String>,

    /// Read an encoded block or header from a file instead
    #[arg(short, long, conflicts_with = "input")]
    file: Option<PathBuf>,
}

pub fn run(args: SignerArgs) -> Result<()> {
    let query = match (&args.input, &args.file) {
        (Some(input), None) => SignerQuery::from_value(Value::String(input.clone()))?,
        (None, Some(path)) => {
            let bytes = fs::read(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            if bytes.is_empty() {
                bail!("{} is empty", path.display());
            }
            SignerQuery::ByBytes(bytes)
        }
        _ => SignerQuery::default(),
    };

    let api = args.chain.open()?;
    let signer = api.signer(&query)?;
    if args.chain.print_json(&signer)? {
        return Ok(());
    }

    let source = match &query {
        SignerQuery::ById(Some(id)) => format!("block {}", id),
        SignerQuery::ById(None) => "head block".to_string(),
        SignerQuery::ByBytes(bytes) => format!("{}-byte blob", bytes.len()),
    };
    println!();
    println!("{}  Sealed by {}", "✓".green().bold(), signer.to_string().bright_yellow());
    println!("    Source: {}", source.bright_black());
    println!();
    Ok(())
}
