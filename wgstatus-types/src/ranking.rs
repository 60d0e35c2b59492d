//! Ranking group - auxiliary per-host metadata from the `http` record type.

/// A host entry of a ranking group.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Host {
    pub name: String,
    /// Majority-vote label, if upstream provided one.
    pub majority: Option<String>,
}

impl Host {
    pub fn new(name: impl Into<String>, majority: Option<String>) -> Self {
        Self {
            name: name.into(),
            majority,
        }
    }
}

/// Ranking metadata, independent of the cluster/server tree.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RankingGroup {
    name: String,
    hosts: Vec<Host>,
}

impl RankingGroup {
    pub fn new(name: impl Into<String>, hosts: Vec<Host>) -> Self {
        Self {
            name: name.into(),
            hosts,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Hosts in upstream order.
    pub fn hosts(&self) -> &[Host] {
        &self.hosts
    }
}
