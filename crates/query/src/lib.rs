//! Read-only authority queries for sealwatch.
//!
//! This crate answers questions about a proof-of-authority chain by reading
//! headers and already-computed authorization snapshots:
//! - **Signers**: the authorized signer set at a block
//! - **Signer**: who sealed a block, given its number, hash or raw bytes
//! - **Status**: per-signer activity and in-turn rate over the recent window
//! - **Epoch performance**: the same report over one epoch, up to the
//!   boundary header that announces the next one
//!
//! Chain data is injected through the [`HeaderSource`], [`SnapshotProvider`]
//! and [`SignerRecovery`] traits; nothing is cached or mutated here.
//!
//! # Example
//!
//! ```rust,no_run
//! use sealwatch_consensus::SealRecovery;
//! use sealwatch_query::{BlockId, QueryApi, SignerQuery};
//! use sealwatch_storage::{HeaderStore, SnapshotStore, Storage};
//!
//! let storage = Storage::open("./sealwatch_data").unwrap();
//! let api = QueryApi::new(
//!     HeaderStore::new(storage.clone()),
//!     SnapshotStore::new(storage),
//!     SealRecovery::new(),
//! );
//!
//! let status = api.status().unwrap();
//! println!("in-turn over {} blocks: {}%", status.num_blocks, status.in_turn_percent);
//!
//! let signer = api.signer(&SignerQuery::ById(Some(BlockId::Number(42)))).unwrap();
//! println!("block 42 sealed by {signer}");
//! ```
//!
//! [`HeaderSource`]: sealwatch_consensus::HeaderSource
//! [`SnapshotProvider`]: sealwatch_consensus::SnapshotProvider
//! [`SignerRecovery`]: sealwatch_consensus::SignerRecovery

pub mod activity;
pub mod api;
pub mod config;
pub mod error;
pub mod input;
pub mod types;
pub mod walker;

// Re-export commonly used types
pub use activity::ActivityTally;
pub use api::QueryApi;
pub use config::{QueryConfig, DEFAULT_RECENT_WINDOW};
pub use error::{QueryError, Result};
pub use input::{decode_header_blob, SignerQuery};
pub use types::{BlockId, EpochPerformance, SigningStatus, Status};
pub use walker::{ChainWalk, WalkedBlock};
