//! # wgstatus-client
//!
//! Fetches the wgstatus.com World of Tanks status feed and normalizes it
//! into [`wgstatus_types::Snapshot`]s.
//!
//! ## Pipeline
//!
//! ```text
//! HttpTransport::fetch ──▶ classify ──▶ build_cluster / build_ranking_group ──▶ Snapshot
//!   (raw JSON)            (items)        (entities + skipped entries)
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use wgstatus_client::{BuildPolicy, HttpTransport, StatusClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let transport = HttpTransport::builder()
//!         .timeout(Duration::from_secs(5))
//!         .build()?;
//!     let client = StatusClient::new(transport).with_policy(BuildPolicy::Lenient);
//!
//!     let snapshot = client.collect().await?;
//!     for cluster in snapshot.clusters() {
//!         println!("{}: {}", cluster.title(), cluster.online());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error policy
//!
//! Bad server or host entries are skipped and bad cluster records left out
//! under [`BuildPolicy::Lenient`]; [`BuildPolicy::Strict`] turns the first
//! such failure into an error. Either way a caller gets a complete snapshot
//! or an error, never a half-built one.

pub mod client;
pub mod entity;
pub mod error;
pub mod normalize;
pub mod snapshot;
pub mod transport;

pub use client::{Phase, PollState, StatusClient};
pub use entity::{build_cluster, build_ranking_group, build_server, BuildPolicy, Built, SkippedEntry};
pub use error::StatusError;
pub use normalize::{classify, Item, ItemKind};
pub use snapshot::{build, build_items};
pub use transport::{HttpTransport, HttpTransportBuilder, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT};

// Re-export types for convenience
pub use wgstatus_types::{
    BuildReport, Cluster, Diagnostic, Host, ModelError, Online, RankingGroup, Scope, Server,
    ServerStatus, Snapshot, StateLog,
};
