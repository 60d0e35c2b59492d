//! A single game server (shard) inside a cluster.

use crate::{Online, ServerStatus};

/// One historical state transition of a server.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StateLog {
    /// Unix timestamp in seconds of the transition.
    pub timestamp: i64,
    /// Upstream state label, kept verbatim.
    pub state: String,
}

impl StateLog {
    pub fn new(timestamp: i64, state: impl Into<String>) -> Self {
        Self {
            timestamp,
            state: state.into(),
        }
    }
}

/// Status of one server as reported in a poll.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Server {
    name: String,
    majority: Option<String>,
    recommendation: Option<String>,
    status: ServerStatus,
    online: Online,
    state_log: Vec<StateLog>,
}

impl Server {
    /// Create a builder for a server with the given name and status.
    pub fn builder(name: impl Into<String>, status: ServerStatus) -> ServerBuilder {
        ServerBuilder::new(name, status)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Majority-vote label, if upstream provided one.
    pub fn majority(&self) -> Option<&str> {
        self.majority.as_deref()
    }

    /// Recommendation label, if upstream provided one.
    pub fn recommendation(&self) -> Option<&str> {
        self.recommendation.as_deref()
    }

    pub fn status(&self) -> ServerStatus {
        self.status
    }

    /// Discord emoji markup for the current status.
    pub fn status_emoji(&self) -> &'static str {
        self.status.emoji()
    }

    /// Human readable word for the current status.
    pub fn status_word(&self) -> &'static str {
        self.status.word()
    }

    /// Player count, or the unavailable sentinel.
    pub fn online(&self) -> Online {
        self.online
    }

    /// State transitions in upstream order. Empty when upstream sent no history.
    pub fn state_log(&self) -> &[StateLog] {
        &self.state_log
    }
}

/// Builder for [`Server`].
#[derive(Debug)]
pub struct ServerBuilder {
    server: Server,
}

impl ServerBuilder {
    pub fn new(name: impl Into<String>, status: ServerStatus) -> Self {
        Self {
            server: Server {
                name: name.into(),
                majority: None,
                recommendation: None,
                status,
                online: Online::Unavailable,
                state_log: Vec::new(),
            },
        }
    }

    pub fn majority(mut self, majority: impl Into<String>) -> Self {
        self.server.majority = Some(majority.into());
        self
    }

    pub fn recommendation(mut self, recommendation: impl Into<String>) -> Self {
        self.server.recommendation = Some(recommendation.into());
        self
    }

    pub fn online(mut self, count: u64) -> Self {
        self.server.online = Online::Count(count);
        self
    }

    /// Set the player count as reported upstream; `None` is unavailable.
    pub fn maybe_online(mut self, online: Option<u64>) -> Self {
        self.server.online = Online::from(online);
        self
    }

    /// Append one state transition.
    pub fn state(mut self, timestamp: i64, state: impl Into<String>) -> Self {
        self.server.state_log.push(StateLog::new(timestamp, state));
        self
    }

    /// Replace the state history.
    pub fn state_log(mut self, log: Vec<StateLog>) -> Self {
        self.server.state_log = log;
        self
    }

    pub fn build(self) -> Server {
        self.server
    }
}
