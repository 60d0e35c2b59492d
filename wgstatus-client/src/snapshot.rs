//! Assembly of classified items into a [`Snapshot`].

use serde_json::Value;
use tracing::{debug, warn};

use wgstatus_types::{Diagnostic, Scope, Snapshot, SnapshotBuilder};

use crate::entity::{build_cluster, build_ranking_group, BuildPolicy, SkippedEntry};
use crate::normalize::{classify, Item, ItemKind};
use crate::StatusError;

/// Normalize a raw status document into a snapshot.
///
/// Either every item is processed and a complete snapshot is returned, or
/// an error is returned and nothing is exposed. Under the lenient policy a
/// failed cluster or ranking record is left out and recorded in the
/// snapshot's [`BuildReport`](wgstatus_types::BuildReport).
pub fn build(document: &Value, policy: BuildPolicy) -> Result<Snapshot, StatusError> {
    let items = classify(document)?;
    build_items(&items, policy)
}

/// Assemble a snapshot from already classified items.
pub fn build_items(items: &[Item], policy: BuildPolicy) -> Result<Snapshot, StatusError> {
    let mut builder = Snapshot::builder();

    for item in items {
        match &item.kind {
            ItemKind::Cluster => match build_cluster(&item.data, policy) {
                Ok(built) => {
                    builder = record_skipped(builder, built.skipped, |entry| Scope::Server {
                        item: item.index,
                        entry,
                    });
                    builder = builder.cluster(built.value);
                }
                Err(error) if policy.is_strict() => return Err(error),
                Err(error) => {
                    warn!("Skipping cluster item #{}: {}", item.index, error);
                    builder = builder.diagnostic(Diagnostic::new(
                        Scope::Cluster { item: item.index },
                        error.to_string(),
                    ));
                }
            },
            ItemKind::Ranking => match build_ranking_group(&item.data, policy) {
                Ok(built) => {
                    builder = record_skipped(builder, built.skipped, |entry| Scope::Host {
                        item: item.index,
                        entry,
                    });
                    builder = builder.ranking_group(built.value);
                }
                Err(error) if policy.is_strict() => return Err(error),
                Err(error) => {
                    warn!("Skipping ranking item #{}: {}", item.index, error);
                    builder = builder.diagnostic(Diagnostic::new(
                        Scope::Ranking { item: item.index },
                        error.to_string(),
                    ));
                }
            },
            ItemKind::Unknown(tag) => {
                debug!("Dropping item #{} of unknown type {:?}", item.index, tag);
            }
        }
    }

    Ok(builder.build())
}

fn record_skipped(
    mut builder: SnapshotBuilder,
    skipped: Vec<SkippedEntry>,
    scope: impl Fn(usize) -> Scope,
) -> SnapshotBuilder {
    for entry in skipped {
        builder = builder.diagnostic(Diagnostic::new(scope(entry.index), entry.error.to_string()));
    }
    builder
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wgstatus_types::{Online, ServerStatus, ONLINE_WORD};

    fn envelope(items: Value) -> Value {
        json!({ "results": [{ "items": items }] })
    }

    #[test]
    fn test_build_end_to_end_document() {
        let doc: Value = serde_json::from_str(
            r#"{"results":[{"items":[{"type":"cluster","data":{"title":"EU","servers":[{"name":"S1","status":"online","online":120}],"version":"1.2.3","version_updated_at":1700000000,"flag":"eu","online":5000}}]}]}"#,
        )
        .unwrap();

        let snapshot = build(&doc, BuildPolicy::Strict).unwrap();
        assert_eq!(snapshot.len(), 1);

        let cluster = &snapshot.clusters()[0];
        assert_eq!(cluster.title(), "EU");
        assert_eq!(cluster.online(), Online::Count(5000));
        assert_eq!(cluster.servers().len(), 1);

        let server = &cluster.servers()[0];
        assert_eq!(server.name(), "S1");
        assert_eq!(server.online(), Online::Count(120));
        assert_eq!(server.status(), ServerStatus::Online);
        assert_eq!(server.status_word(), ONLINE_WORD);
        assert!(snapshot.ranking_group().is_none());
        assert!(snapshot.report().is_clean());
    }

    #[test]
    fn test_build_is_idempotent() {
        let doc = envelope(json!([
            {"type": "cluster", "data": {"title": "RU", "servers": [{"name": "RU1", "status": "online"}]}},
            {"type": "cluster", "data": {"servers": []}},
            {"type": "http", "data": {"title": "XVM", "hosts": [{"name": "h1"}]}}
        ]));

        let first = build(&doc, BuildPolicy::Lenient).unwrap();
        let second = build(&doc, BuildPolicy::Lenient).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_build_preserves_order() {
        let doc = envelope(json!([
            {"type": "cluster", "data": {"title": "RU", "servers": [
                {"name": "RU1", "status": "online"},
                {"name": "RU2", "status": "offline"}
            ]}},
            {"type": "news", "data": {}},
            {"type": "cluster", "data": {"title": "EU", "servers": [
                {"name": "EU1", "status": "online"},
                {"name": "EU2", "status": "online"},
                {"name": "EU3", "status": "offline"}
            ]}}
        ]));

        let snapshot = build(&doc, BuildPolicy::Strict).unwrap();
        let source = doc["results"][0]["items"].as_array().unwrap();
        let clusters: Vec<&Value> = source.iter().filter(|i| i["type"] == "cluster").collect();

        for (i, cluster) in snapshot.clusters().iter().enumerate() {
            for (j, server) in cluster.servers().iter().enumerate() {
                assert_eq!(server.name(), clusters[i]["data"]["servers"][j]["name"]);
            }
        }
    }

    #[test]
    fn test_lenient_partial_failure() {
        let doc = envelope(json!([
            {"type": "cluster", "data": {"title": "NA", "servers": [
                {"name": "NA1", "status": "online"},
                {"status": "online"},
                {"name": "NA3", "status": "offline"}
            ]}}
        ]));

        let snapshot = build(&doc, BuildPolicy::Lenient).unwrap();
        assert_eq!(snapshot.clusters()[0].servers().len(), 2);

        let diagnostics = snapshot.report().diagnostics();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].scope, Scope::Server { item: 0, entry: 1 });
    }

    #[test]
    fn test_strict_partial_failure() {
        let doc = envelope(json!([
            {"type": "cluster", "data": {"title": "NA", "servers": [
                {"name": "NA1", "status": "online"},
                {"status": "online"},
                {"name": "NA3", "status": "offline"}
            ]}}
        ]));

        let err = build(&doc, BuildPolicy::Strict).unwrap_err();
        assert_eq!(
            err,
            StatusError::MissingRequiredField {
                entity: "server",
                field: "name"
            }
        );
    }

    #[test]
    fn test_lenient_skips_cluster_without_title() {
        let doc = envelope(json!([
            {"type": "cluster", "data": {"title": "RU"}},
            {"type": "cluster", "data": {"version": "1.0"}},
            {"type": "cluster", "data": {"title": "EU"}}
        ]));

        let snapshot = build(&doc, BuildPolicy::Lenient).unwrap();
        let titles: Vec<&str> = snapshot.clusters().iter().map(|c| c.title()).collect();
        assert_eq!(titles, vec!["RU", "EU"]);
        assert_eq!(snapshot.report().skipped_clusters(), 1);
        assert_eq!(
            snapshot.report().diagnostics()[0].scope,
            Scope::Cluster { item: 1 }
        );

        let err = build(&doc, BuildPolicy::Strict).unwrap_err();
        assert!(matches!(
            err,
            StatusError::MissingRequiredField {
                entity: "cluster",
                ..
            }
        ));
    }

    #[test]
    fn test_invalid_status_never_defaults() {
        let doc = envelope(json!([
            {"type": "cluster", "data": {"title": "SEA", "servers": [
                {"name": "SEA1", "status": "unknown"}
            ]}}
        ]));

        let snapshot = build(&doc, BuildPolicy::Lenient).unwrap();
        assert!(snapshot.clusters()[0].servers().is_empty());
        assert!(build(&doc, BuildPolicy::Strict).is_err());
    }

    #[test]
    fn test_ranking_group_last_record_wins() {
        let doc = envelope(json!([
            {"type": "http", "data": {"title": "old", "hosts": []}},
            {"type": "http", "data": {"title": "XVM", "hosts": [
                {"name": "ru.xvm", "majority": "1"}
            ]}}
        ]));

        let snapshot = build(&doc, BuildPolicy::Strict).unwrap();
        let group = snapshot.ranking_group().unwrap();
        assert_eq!(group.name(), "XVM");
        assert_eq!(group.hosts()[0].name, "ru.xvm");
        assert!(snapshot.is_empty());
    }

    #[test]
    fn test_malformed_envelope_yields_no_snapshot() {
        let err = build(&json!({"results": "nope"}), BuildPolicy::Lenient).unwrap_err();
        assert!(matches!(err, StatusError::MalformedEnvelope(_)));
    }
}
