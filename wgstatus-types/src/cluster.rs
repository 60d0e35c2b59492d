//! Cluster - one game region and its servers.

use chrono::{DateTime, Utc};

use crate::{ModelError, Online, Server, UNKNOWN};

/// One region's server group (e.g. "EU", "NA") with aggregate metadata.
///
/// Servers keep upstream order; presentation code uses their position as
/// an index.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cluster {
    title: String,
    servers: Vec<Server>,
    version: Option<String>,
    version_updated_at: Option<i64>,
    flag: Option<String>,
    online: Online,
}

impl Cluster {
    /// Create a builder for a cluster with the given title.
    pub fn builder(title: impl Into<String>) -> ClusterBuilder {
        ClusterBuilder::new(title)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn servers(&self) -> &[Server] {
        &self.servers
    }

    /// Look up a server by its position in the cluster.
    pub fn server(&self, index: usize) -> Option<&Server> {
        self.servers.get(index)
    }

    /// Client version label, `Неизвестно` when absent or empty.
    pub fn version(&self) -> &str {
        match self.version.as_deref() {
            Some(v) if !v.is_empty() => v,
            _ => UNKNOWN,
        }
    }

    /// Raw `version_updated_at` epoch seconds.
    pub fn version_updated_epoch(&self) -> Option<i64> {
        self.version_updated_at
    }

    /// Instant of the last version update.
    ///
    /// Fails with [`ModelError::MissingTimestamp`] when upstream sent none;
    /// use [`Cluster::version_updated_at_or`] to supply a fallback.
    pub fn version_updated_at(&self) -> Result<DateTime<Utc>, ModelError> {
        let secs = self.version_updated_at.ok_or(ModelError::MissingTimestamp)?;
        DateTime::from_timestamp(secs, 0).ok_or(ModelError::TimestampOutOfRange(secs))
    }

    /// Instant of the last version update, or `fallback` when it is missing.
    pub fn version_updated_at_or(
        &self,
        fallback: DateTime<Utc>,
    ) -> Result<DateTime<Utc>, ModelError> {
        match self.version_updated_at() {
            Err(ModelError::MissingTimestamp) => Ok(fallback),
            other => other,
        }
    }

    /// Raw region flag code (e.g. `eu`).
    pub fn flag(&self) -> Option<&str> {
        self.flag.as_deref().filter(|f| !f.is_empty())
    }

    /// Flag as a Discord shortcode, empty when no flag is set.
    pub fn flag_emoji(&self) -> String {
        self.flag()
            .map(|code| format!(":flag_{}:", code))
            .unwrap_or_default()
    }

    /// Total player count, or the unavailable sentinel.
    pub fn online(&self) -> Online {
        self.online
    }
}

/// Builder for [`Cluster`].
#[derive(Debug)]
pub struct ClusterBuilder {
    cluster: Cluster,
}

impl ClusterBuilder {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            cluster: Cluster {
                title: title.into(),
                servers: Vec::new(),
                version: None,
                version_updated_at: None,
                flag: None,
                online: Online::Unavailable,
            },
        }
    }

    /// Append a server, keeping insertion order.
    pub fn server(mut self, server: Server) -> Self {
        self.cluster.servers.push(server);
        self
    }

    /// Replace the server list.
    pub fn servers(mut self, servers: Vec<Server>) -> Self {
        self.cluster.servers = servers;
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.cluster.version = Some(version.into());
        self
    }

    /// Set the version update time in epoch seconds.
    pub fn version_updated_at(mut self, epoch_secs: i64) -> Self {
        self.cluster.version_updated_at = Some(epoch_secs);
        self
    }

    pub fn flag(mut self, flag: impl Into<String>) -> Self {
        self.cluster.flag = Some(flag.into());
        self
    }

    pub fn online(mut self, count: u64) -> Self {
        self.cluster.online = Online::Count(count);
        self
    }

    /// Set the player count as reported upstream; `None` is unavailable.
    pub fn maybe_online(mut self, online: Option<u64>) -> Self {
        self.cluster.online = Online::from(online);
        self
    }

    pub fn build(self) -> Cluster {
        self.cluster
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ServerStatus;

    #[test]
    fn test_cluster_defaults() {
        let cluster = Cluster::builder("ASIA").build();
        assert_eq!(cluster.title(), "ASIA");
        assert_eq!(cluster.version(), "Неизвестно");
        assert_eq!(cluster.flag(), None);
        assert_eq!(cluster.flag_emoji(), "");
        assert_eq!(cluster.online(), Online::Unavailable);
        assert_eq!(cluster.online().to_string(), "Недоступно");
        assert!(cluster.servers().is_empty());
    }

    #[test]
    fn test_cluster_empty_version_uses_default() {
        let cluster = Cluster::builder("RU").version("").build();
        assert_eq!(cluster.version(), "Неизвестно");
    }

    #[test]
    fn test_cluster_flag_emoji() {
        let cluster = Cluster::builder("EU").flag("eu").build();
        assert_eq!(cluster.flag(), Some("eu"));
        assert_eq!(cluster.flag_emoji(), ":flag_eu:");

        let empty = Cluster::builder("EU").flag("").build();
        assert_eq!(empty.flag(), None);
        assert_eq!(empty.flag_emoji(), "");
    }

    #[test]
    fn test_version_updated_at_converts_epoch() {
        let cluster = Cluster::builder("EU").version_updated_at(1700000000).build();
        let instant = cluster.version_updated_at().unwrap();
        assert_eq!(instant.timestamp(), 1700000000);
        assert_eq!(cluster.version_updated_epoch(), Some(1700000000));
    }

    #[test]
    fn test_version_updated_at_missing_is_an_error() {
        let cluster = Cluster::builder("EU").build();
        assert_eq!(
            cluster.version_updated_at(),
            Err(ModelError::MissingTimestamp)
        );
    }

    #[test]
    fn test_version_updated_at_explicit_fallback() {
        let fallback = DateTime::from_timestamp(1600000000, 0).unwrap();
        let missing = Cluster::builder("EU").build();
        assert_eq!(missing.version_updated_at_or(fallback), Ok(fallback));

        let present = Cluster::builder("EU").version_updated_at(1700000000).build();
        assert_eq!(
            present.version_updated_at_or(fallback).unwrap().timestamp(),
            1700000000
        );
    }

    #[test]
    fn test_version_updated_at_out_of_range() {
        let cluster = Cluster::builder("EU").version_updated_at(i64::MAX).build();
        assert_eq!(
            cluster.version_updated_at(),
            Err(ModelError::TimestampOutOfRange(i64::MAX))
        );
    }

    #[test]
    fn test_cluster_server_index() {
        let cluster = Cluster::builder("NA")
            .server(Server::builder("NA West", ServerStatus::Online).build())
            .server(Server::builder("NA Central", ServerStatus::Offline).build())
            .build();

        assert_eq!(cluster.server(0).map(|s| s.name()), Some("NA West"));
        assert_eq!(cluster.server(1).map(|s| s.name()), Some("NA Central"));
        assert!(cluster.server(2).is_none());
    }
}
