//! Query identifiers and report types.

use crate::error::QueryError;
use sealwatch_core::{Address, Hash};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Blocks produced per signer over the examined range.
///
/// Every signer of the basis snapshot has an entry, even at zero. Producers
/// outside that set still get an entry when they sealed a block.
pub type SigningStatus = BTreeMap<Address, u64>;

/// Identifies a block by position or by hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockId {
    /// The current chain head.
    Latest,
    /// A canonical block number.
    Number(u64),
    /// A header hash.
    Hash(Hash),
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockId::Latest => f.write_str("latest"),
            BlockId::Number(number) => write!(f, "{number}"),
            BlockId::Hash(hash) => write!(f, "{hash}"),
        }
    }
}

impl FromStr for BlockId {
    type Err = QueryError;

    /// Accepts `latest`, `earliest`, decimal numbers, `0x` quantities of up
    /// to 16 hex digits without leading zeros and `0x` hashes of exactly 64
    /// hex digits.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || QueryError::MalformedInput(format!("invalid block identifier {s:?}"));

        match s {
            "latest" => return Ok(BlockId::Latest),
            "earliest" => return Ok(BlockId::Number(0)),
            _ => {}
        }

        if let Some(digits) = s.strip_prefix("0x") {
            return match digits.len() {
                64 => Hash::from_hex(digits)
                    .map(BlockId::Hash)
                    .map_err(|_| malformed()),
                // Quantities carry no leading zeros; "0x0" is the only exception.
                len @ 1..=16 if len == 1 || !digits.starts_with('0') => {
                    u64::from_str_radix(digits, 16)
                        .map(BlockId::Number)
                        .map_err(|_| malformed())
                }
                _ => Err(malformed()),
            };
        }

        s.parse::<u64>().map(BlockId::Number).map_err(|_| malformed())
    }
}

/// Signer activity over the most recent blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Status {
    /// Share of in-turn blocks, 0 to 100.
    #[serde(rename = "inturnPercent")]
    pub in_turn_percent: f64,
    #[serde(rename = "sealerActivity")]
    pub signing_status: SigningStatus,
    #[serde(rename = "numBlocks")]
    pub num_blocks: u64,
}

/// Signer activity over one epoch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochPerformance {
    /// Share of in-turn blocks, 0 to 100; 0 for an empty epoch.
    #[serde(rename = "inturnPercent")]
    pub in_turn_percent: f64,
    #[serde(rename = "sealerActivity")]
    pub signing_status: SigningStatus,
    /// Blocks counted, the boundary header included.
    #[serde(rename = "numBlocks")]
    pub num_blocks: u64,
    /// Epoch announced by the boundary header, 0 while the epoch is open.
    #[serde(rename = "nextEpoch")]
    pub next_epoch: u64,
    /// First block of the epoch.
    #[serde(rename = "startBlock")]
    pub start_block: u64,
}
