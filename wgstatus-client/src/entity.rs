//! Conversion of classified upstream records into model entities.
//!
//! Field defaulting lives in the model accessors; this module only decides
//! what is required and what happens to bad list entries. A malformed server
//! or host entry is skipped under [`BuildPolicy::Lenient`] and fails the
//! whole record under [`BuildPolicy::Strict`].

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;

use wgstatus_types::{Cluster, Host, RankingGroup, Server, ServerStatus, StateLog, UNKNOWN};

use crate::StatusError;

/// How entry- and record-level failures are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuildPolicy {
    /// Skip bad entries and records, reporting them as diagnostics.
    #[default]
    Lenient,
    /// Fail the whole build on the first bad entry or record.
    Strict,
}

impl BuildPolicy {
    pub fn is_strict(&self) -> bool {
        matches!(self, BuildPolicy::Strict)
    }
}

/// A list entry dropped while building a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    /// Position of the entry in the upstream array.
    pub index: usize,
    pub error: StatusError,
}

/// A built entity plus the list entries that were skipped along the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Built<T> {
    pub value: T,
    pub skipped: Vec<SkippedEntry>,
}

#[derive(Debug, Deserialize)]
struct ClusterRecord {
    #[serde(default, deserialize_with = "present")]
    title: Option<Option<String>>,
    #[serde(default)]
    servers: Option<Vec<Value>>,
    version: Option<String>,
    version_updated_at: Option<i64>,
    flag: Option<String>,
    #[serde(default, deserialize_with = "count")]
    online: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct ServerRecord {
    name: Option<String>,
    majority: Option<String>,
    recommendation: Option<String>,
    status: Option<String>,
    #[serde(default, deserialize_with = "count")]
    online: Option<u64>,
    state_log: Option<Vec<(i64, String)>>,
}

#[derive(Debug, Deserialize)]
struct RankingRecord {
    title: Option<String>,
    name: Option<String>,
    #[serde(default)]
    hosts: Option<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct HostRecord {
    name: Option<String>,
    majority: Option<String>,
}

/// Distinguishes an explicit `null` (`Some(None)`) from a missing key (`None`).
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Reads a player count; anything other than a non-negative integer is unavailable.
fn count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(v) => match v.as_u64() {
            Some(n) => Some(n),
            None => {
                warn!(online = %v, "ignoring non-count online value");
                None
            }
        },
    })
}

fn invalid(entity: &'static str, err: serde_json::Error) -> StatusError {
    StatusError::InvalidRecord {
        entity,
        reason: err.to_string(),
    }
}

/// Build a [`Cluster`] from a cluster record's `data` object.
///
/// The `title` key must exist; a `null` or empty title becomes `Неизвестно`.
/// Servers keep upstream order.
pub fn build_cluster(payload: &Value, policy: BuildPolicy) -> Result<Built<Cluster>, StatusError> {
    let record = ClusterRecord::deserialize(payload).map_err(|e| invalid("cluster", e))?;

    let title = match record.title {
        None => {
            return Err(StatusError::MissingRequiredField {
                entity: "cluster",
                field: "title",
            })
        }
        Some(Some(title)) if !title.is_empty() => title,
        Some(_) => UNKNOWN.to_string(),
    };

    let (servers, skipped) = collect_entries(
        record.servers.unwrap_or_default(),
        policy,
        &title,
        build_server,
    )?;

    let mut builder = Cluster::builder(title)
        .servers(servers)
        .maybe_online(record.online);
    if let Some(version) = record.version {
        builder = builder.version(version);
    }
    if let Some(ts) = record.version_updated_at {
        builder = builder.version_updated_at(ts);
    }
    if let Some(flag) = record.flag {
        builder = builder.flag(flag);
    }

    Ok(Built {
        value: builder.build(),
        skipped,
    })
}

/// Build a [`Server`] from one entry of a cluster's `servers` array.
///
/// `name` and `status` are required; `status` must be `online` or `offline`.
pub fn build_server(payload: &Value) -> Result<Server, StatusError> {
    let record = ServerRecord::deserialize(payload).map_err(|e| invalid("server", e))?;

    let name = record.name.ok_or(StatusError::MissingRequiredField {
        entity: "server",
        field: "name",
    })?;
    let status: ServerStatus = record
        .status
        .ok_or(StatusError::MissingRequiredField {
            entity: "server",
            field: "status",
        })?
        .parse()?;

    let state_log = record
        .state_log
        .unwrap_or_default()
        .into_iter()
        .map(|(timestamp, state)| StateLog::new(timestamp, state))
        .collect();

    let mut builder = Server::builder(name, status)
        .maybe_online(record.online)
        .state_log(state_log);
    if let Some(majority) = record.majority {
        builder = builder.majority(majority);
    }
    if let Some(recommendation) = record.recommendation {
        builder = builder.recommendation(recommendation);
    }
    Ok(builder.build())
}

/// Build a [`RankingGroup`] from an `http` record's `data` object.
///
/// The group name comes from `title`, falling back to `name`.
pub fn build_ranking_group(
    payload: &Value,
    policy: BuildPolicy,
) -> Result<Built<RankingGroup>, StatusError> {
    let record = RankingRecord::deserialize(payload).map_err(|e| invalid("ranking", e))?;

    let name = record
        .title
        .or(record.name)
        .ok_or(StatusError::MissingRequiredField {
            entity: "ranking",
            field: "title",
        })?;

    let (hosts, skipped) =
        collect_entries(record.hosts.unwrap_or_default(), policy, &name, build_host)?;

    Ok(Built {
        value: RankingGroup::new(name, hosts),
        skipped,
    })
}

fn build_host(payload: &Value) -> Result<Host, StatusError> {
    let record = HostRecord::deserialize(payload).map_err(|e| invalid("host", e))?;
    let name = record.name.ok_or(StatusError::MissingRequiredField {
        entity: "host",
        field: "name",
    })?;
    Ok(Host::new(name, record.majority))
}

/// Build every entry, folding failures into a skipped list (lenient) or
/// returning the first one (strict).
fn collect_entries<T>(
    entries: Vec<Value>,
    policy: BuildPolicy,
    parent: &str,
    build: impl Fn(&Value) -> Result<T, StatusError>,
) -> Result<(Vec<T>, Vec<SkippedEntry>), StatusError> {
    let mut built = Vec::with_capacity(entries.len());
    let mut skipped = Vec::new();

    for (index, entry) in entries.iter().enumerate() {
        match build(entry) {
            Ok(value) => built.push(value),
            Err(error) if policy.is_strict() => return Err(error),
            Err(error) => {
                warn!("Skipping entry #{} of {:?}: {}", index, parent, error);
                skipped.push(SkippedEntry { index, error });
            }
        }
    }

    Ok((built, skipped))
}
