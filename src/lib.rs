//! # wgstatus
//!
//! Polls the wgstatus.com World of Tanks status feed and renders the
//! normalized result as the text a chat bot would post.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                         wgstatus                           │
//! │  ┌──────────┐   ┌─────────────────┐   ┌────────────────┐   │
//! │  │ settings │──▶│ wgstatus-client │──▶│ render/export  │   │
//! │  │ (config) │   │ (fetch + build) │   │ (presentation) │   │
//! │  └──────────┘   └────────┬────────┘   └────────────────┘   │
//! │                          ▼                                  │
//! │                 wgstatus-types::Snapshot                    │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`settings`]**: endpoint, timeout and error policy from a TOML file
//!   and `WGSTATUS_*` environment variables
//! - **[`render`]**: overview, per-cluster and ranking text in the bot's format
//! - **[`export`]**: JSON export of a snapshot
//!
//! ## Usage
//!
//! ```bash
//! # Overview of every cluster
//! wgstatus
//!
//! # Detail view of the second cluster, strict parsing
//! wgstatus --cluster 1 --strict
//!
//! # Dump the snapshot as JSON
//! wgstatus --export status.json
//! ```

pub mod export;
pub mod render;
pub mod settings;

pub use settings::Settings;
pub use wgstatus_client::{BuildPolicy, StatusClient, StatusError};
pub use wgstatus_types::Snapshot;
