//! The poll pipeline: fetch, normalize, build.

use std::fmt;

use serde_json::Value;
use tracing::{debug, info};

use wgstatus_types::Snapshot;

use crate::entity::BuildPolicy;
use crate::snapshot::build;
use crate::transport::HttpTransport;
use crate::StatusError;

/// Stage of a poll in which a failure happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Fetching,
    Normalizing,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Fetching => f.write_str("fetching"),
            Phase::Normalizing => f.write_str("normalizing"),
        }
    }
}

/// State of a single poll.
///
/// `Idle -> Fetching -> Normalizing -> Built`, or `Failed` from the first
/// unrecoverable error. `Built` and `Failed` are terminal.
#[derive(Debug, Clone, PartialEq)]
pub enum PollState {
    Idle,
    Fetching,
    /// Fetched document awaiting normalization.
    Normalizing(Value),
    Built(Snapshot),
    Failed { phase: Phase, error: StatusError },
}

impl PollState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, PollState::Built(_) | PollState::Failed { .. })
    }

    pub fn name(&self) -> &'static str {
        match self {
            PollState::Idle => "idle",
            PollState::Fetching => "fetching",
            PollState::Normalizing(_) => "normalizing",
            PollState::Built(_) => "built",
            PollState::Failed { .. } => "failed",
        }
    }
}

/// Polls the status API and returns normalized snapshots.
///
/// Holds no state between polls: every call builds a fresh snapshot, so
/// concurrent callers never share or wait on anything but the HTTP pool.
#[derive(Debug, Clone)]
pub struct StatusClient {
    transport: HttpTransport,
    policy: BuildPolicy,
}

impl StatusClient {
    /// Create a client with the lenient build policy.
    pub fn new(transport: HttpTransport) -> Self {
        Self {
            transport,
            policy: BuildPolicy::default(),
        }
    }

    /// Set the build policy.
    pub fn with_policy(mut self, policy: BuildPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> BuildPolicy {
        self.policy
    }

    pub fn transport(&self) -> &HttpTransport {
        &self.transport
    }

    /// Run one poll to completion and return its terminal state.
    pub async fn poll(&self) -> PollState {
        let mut state = PollState::Idle;
        while !state.is_terminal() {
            state = self.step(state).await;
        }
        state
    }

    /// Run one poll and return the snapshot or the error that stopped it.
    pub async fn collect(&self) -> Result<Snapshot, StatusError> {
        let mut state = PollState::Idle;
        loop {
            state = match state {
                PollState::Built(snapshot) => return Ok(snapshot),
                PollState::Failed { error, .. } => return Err(error),
                other => self.step(other).await,
            };
        }
    }

    async fn step(&self, state: PollState) -> PollState {
        debug!("Poll state: {}", state.name());
        match state {
            PollState::Idle => PollState::Fetching,
            PollState::Fetching => match self.transport.fetch().await {
                Ok(document) => PollState::Normalizing(document),
                Err(error) => PollState::Failed {
                    phase: Phase::Fetching,
                    error,
                },
            },
            PollState::Normalizing(document) => match build(&document, self.policy) {
                Ok(snapshot) => {
                    info!(
                        "Built snapshot with {} clusters ({} entries skipped)",
                        snapshot.len(),
                        snapshot.report().diagnostics().len()
                    );
                    PollState::Built(snapshot)
                }
                Err(error) => PollState::Failed {
                    phase: Phase::Normalizing,
                    error,
                },
            },
            terminal => terminal,
        }
    }
}
