//! # wgstatus-types
//!
//! Normalized object model for the World of Tanks server status feed.
//!
//! The upstream status API mixes several record types in one list and leaves
//! most numeric fields optional. This crate defines the stable shape that
//! presentation code renders from, with the defaulting policy baked into the
//! accessors so no consumer re-implements it.
//!
//! ## Model
//!
//! ```text
//! Snapshot
//!  ├── clusters: [Cluster]          (upstream order)
//!  │     └── servers: [Server]      (upstream order)
//!  │           └── state_log: [StateLog]
//!  ├── ranking_group: Option<RankingGroup>
//!  │     └── hosts: [Host]
//!  └── report: BuildReport          (entries skipped while building)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use wgstatus_types::{Cluster, Online, Server, ServerStatus, Snapshot};
//!
//! let snapshot = Snapshot::builder()
//!     .cluster(
//!         Cluster::builder("EU")
//!             .version("1.2.3")
//!             .online(5000)
//!             .server(Server::builder("S1", ServerStatus::Online).online(120).build())
//!             .build(),
//!     )
//!     .build();
//!
//! let eu = &snapshot.clusters()[0];
//! assert_eq!(eu.title(), "EU");
//! assert_eq!(eu.online(), Online::Count(5000));
//! assert_eq!(eu.servers()[0].status_word(), "Онлайн");
//! ```
//!
//! ## Features
//!
//! - `serde`: derive `Serialize`/`Deserialize` for every model type

mod cluster;
mod error;
mod ranking;
mod server;
mod snapshot;
mod status;

pub use cluster::*;
pub use error::*;
pub use ranking::*;
pub use server::*;
pub use snapshot::*;
pub use status::*;

/// Display text for a missing textual field (title, version, timestamp).
pub const UNKNOWN: &str = "Неизвестно";

/// Display text for a missing numeric metric.
pub const UNAVAILABLE: &str = "Недоступно";
