//! CLI commands module.

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use sealwatch_consensus::SealRecovery;
use sealwatch_query::{BlockId, QueryApi, QueryConfig};
use sealwatch_storage::{HeaderStore, SnapshotStore, Storage};
use serde::Serialize;
use std::path::PathBuf;

mod epoch;
mod signer;
mod signers;
mod status;

pub type StoreQueryApi = QueryApi<HeaderStore, SnapshotStore, SealRecovery>;

/// Options shared by every command.
#[derive(Args)]
pub struct ChainArgs {
    /// Directory holding the chain database
    #[arg(short, long, default_value = "./data")]
    data_dir: PathBuf,

    /// Print JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

impl ChainArgs {
    /// Open the chain database read for queries.
    fn open(&self) -> Result<StoreQueryApi> {
        self.open_with(QueryConfig::default())
    }

    fn open_with(&self, config: QueryConfig) -> Result<StoreQueryApi> {
        let storage = Storage::open(&self.data_dir).with_context(|| {
            format!("Failed to open chain database at {}", self.data_dir.display())
        })?;
        let headers = HeaderStore::new(storage.clone());
        if !headers.is_initialized()? {
            bail!("No chain data found in {}", self.data_dir.display());
        }

        Ok(QueryApi::with_config(
            headers,
            SnapshotStore::new(storage),
            SealRecovery::new(),
            config,
        ))
    }

    /// Print `value` as JSON when `--json` was given; returns whether it did.
    fn print_json<T: Serialize>(&self, value: &T) -> Result<bool> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        }
        Ok(self.json)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the authorized signers at a block
    Signers(signers::SignersArgs),
    /// Show the authorization snapshot at a block
    Snapshot(signers::SnapshotArgs),
    /// Show who sealed a block
    Signer(signer::SignerArgs),
    /// Show signer activity over the most recent blocks
    Status(status::StatusArgs),
    /// Report on an epoch located by one of its blocks
    Epoch(epoch::EpochArgs),
    /// Report on the epoch before the current one
    PreviousEpoch(epoch::PreviousEpochArgs),
}

pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Signers(args) => signers::run_signers(args),
        Commands::Snapshot(args) => signers::run_snapshot(args),
        Commands::Signer(args) => signer::run(args),
        Commands::Status(args) => status::run(args),
        Commands::Epoch(args) => epoch::run_epoch(args),
        Commands::PreviousEpoch(args) => epoch::run_previous(args),
    }
}

/// Parse an optional block argument.
fn parse_block(block: Option<&str>) -> Result<Option<BlockId>> {
    block
        .map(|text| text.parse().with_context(|| format!("Invalid block: {text}")))
        .transpose()
}
