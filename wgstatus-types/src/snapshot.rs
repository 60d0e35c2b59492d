//! Snapshot - the normalized result of one poll.

use core::fmt;

use crate::{Cluster, RankingGroup};

/// The immutable result of one complete poll-and-normalize cycle.
///
/// A snapshot is rebuilt from scratch on every poll. It carries no build
/// time or other per-call state, so two builds from the same document
/// compare equal.
///
/// # Example
///
/// ```rust
/// use wgstatus_types::{Cluster, RankingGroup, Host, Snapshot};
///
/// let snapshot = Snapshot::builder()
///     .cluster(Cluster::builder("EU").online(5000).build())
///     .cluster(Cluster::builder("NA").build())
///     .ranking_group(RankingGroup::new("XVM", vec![Host::new("eu1", None)]))
///     .build();
///
/// assert_eq!(snapshot.len(), 2);
/// assert_eq!(snapshot.cluster(1).unwrap().title(), "NA");
/// assert_eq!(snapshot.total_online(), Some(5000));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    clusters: Vec<Cluster>,
    ranking_group: Option<RankingGroup>,
    report: BuildReport,
}

impl Snapshot {
    /// Create a builder for constructing snapshots.
    pub fn builder() -> SnapshotBuilder {
        SnapshotBuilder::new()
    }

    /// Clusters in upstream order. The index is a stable selector for the
    /// lifetime of this snapshot only.
    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    pub fn cluster(&self, index: usize) -> Option<&Cluster> {
        self.clusters.get(index)
    }

    pub fn ranking_group(&self) -> Option<&RankingGroup> {
        self.ranking_group.as_ref()
    }

    /// Entries dropped while building this snapshot.
    pub fn report(&self) -> &BuildReport {
        &self.report
    }

    /// Number of clusters in the snapshot.
    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// Sum of the known cluster player counts, `None` if no cluster reported one.
    ///
    /// Saturates at `u64::MAX`.
    pub fn total_online(&self) -> Option<u64> {
        self.clusters
            .iter()
            .filter_map(|c| c.online().count())
            .fold(None, |acc, n| Some(acc.unwrap_or(0).saturating_add(n)))
    }
}

/// Builder for constructing [`Snapshot`] instances.
#[derive(Debug, Default)]
pub struct SnapshotBuilder {
    clusters: Vec<Cluster>,
    ranking_group: Option<RankingGroup>,
    report: BuildReport,
}

impl SnapshotBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a cluster, keeping insertion order.
    pub fn cluster(mut self, cluster: Cluster) -> Self {
        self.clusters.push(cluster);
        self
    }

    /// Set the ranking group, replacing any earlier one.
    pub fn ranking_group(mut self, group: RankingGroup) -> Self {
        self.ranking_group = Some(group);
        self
    }

    /// Record an entry that was skipped while building.
    pub fn diagnostic(mut self, diagnostic: Diagnostic) -> Self {
        self.report.diagnostics.push(diagnostic);
        self
    }

    pub fn build(self) -> Snapshot {
        Snapshot {
            clusters: self.clusters,
            ranking_group: self.ranking_group,
            report: self.report,
        }
    }
}

/// Entries skipped during a lenient build.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BuildReport {
    diagnostics: Vec<Diagnostic>,
}

impl BuildReport {
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// True when nothing was skipped.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Number of whole clusters that failed to build.
    pub fn skipped_clusters(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.scope, Scope::Cluster { .. }))
            .count()
    }
}

/// One skipped entry and why it was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Diagnostic {
    pub scope: Scope,
    pub reason: String,
}

impl Diagnostic {
    pub fn new(scope: Scope, reason: impl Into<String>) -> Self {
        Self {
            scope,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.scope, self.reason)
    }
}

/// Where in the upstream item list a skipped entry lived.
///
/// `item` is the position in the upstream item list, `entry` the position
/// inside that item's `servers` or `hosts` array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "lowercase"))]
pub enum Scope {
    Cluster { item: usize },
    Server { item: usize, entry: usize },
    Ranking { item: usize },
    Host { item: usize, entry: usize },
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Cluster { item } => write!(f, "cluster item #{}", item),
            Scope::Server { item, entry } => write!(f, "server #{} of item #{}", entry, item),
            Scope::Ranking { item } => write!(f, "ranking item #{}", item),
            Scope::Host { item, entry } => write!(f, "host #{} of item #{}", entry, item),
        }
    }
}
