//! HTTP server for sealwatch.
//!
//! Serves the read-only authority queries of [`sealwatch_query::QueryApi`]
//! as JSON over axum, reading headers and snapshots from a sled database.

pub mod api;
pub mod config;

pub use api::{router, serve, ErrorResponse, StoreQueryApi};
pub use config::ServerConfig;
