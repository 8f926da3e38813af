//! Header and snapshot stores for sealwatch.
//!
//! This crate provides the chain data the query layer reads:
//! - Canonical headers by number and hash, plus the chain head
//! - Authorization snapshots keyed by the block that anchors them
//! - An in-memory chain implementing the same traits, for tests and embedding
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                      Query Layer                         │
//! │     (HeaderSource, SnapshotProvider trait objects)       │
//! └────────────────────────┬────────────────────────────────┘
//!                          │
//! ┌────────────────────────▼────────────────────────────────┐
//! │                   Storage Layer                          │
//! │  ┌─────────────┐  ┌───────────────┐  ┌───────────────┐  │
//! │  │ HeaderStore │  │ SnapshotStore │  │ Storage (DB)  │  │
//! │  │  - Headers  │  │  - Snapshots  │  │ - sled wrapper│  │
//! │  │  - Head     │  │  - Back-links │  │ - key helpers │  │
//! │  └─────────────┘  └───────────────┘  └───────────────┘  │
//! └────────────────────────┬────────────────────────────────┘
//!                          │
//! ┌────────────────────────▼────────────────────────────────┐
//! │                    sled Database                         │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use sealwatch_storage::{HeaderStore, SnapshotStore, Storage};
//!
//! let storage = Storage::open("./sealwatch_data").unwrap();
//! let headers = HeaderStore::new(storage.clone());
//! let snapshots = SnapshotStore::new(storage);
//! println!("head: {:?}", headers.get_height().unwrap());
//! ```

pub mod chain;
pub mod db;
pub mod memory;
pub mod snapshots;

// Re-export commonly used types
pub use chain::HeaderStore;
pub use db::{Result, Storage, StorageError};
pub use memory::MemoryChain;
pub use snapshots::SnapshotStore;
