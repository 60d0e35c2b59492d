//! JSON export of a snapshot.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::Result;
use serde_json::{json, Value};

use wgstatus_types::{ServerStatus, Snapshot};

/// Summary counts plus the full serialized snapshot.
pub fn to_json(snapshot: &Snapshot) -> Result<Value> {
    let servers = snapshot.clusters().iter().flat_map(|c| c.servers());
    let (online, offline) = servers.fold((0usize, 0usize), |(on, off), s| match s.status() {
        ServerStatus::Online => (on + 1, off),
        ServerStatus::Offline => (on, off + 1),
    });

    Ok(json!({
        "summary": {
            "clusters": snapshot.len(),
            "servers_online": online,
            "servers_offline": offline,
            "total_online": snapshot.total_online(),
            "skipped_entries": snapshot.report().diagnostics().len(),
        },
        "snapshot": serde_json::to_value(snapshot)?,
    }))
}

/// Write the export to `path` as pretty-printed JSON.
pub fn write(path: &Path, snapshot: &Snapshot) -> Result<()> {
    let json = serde_json::to_string_pretty(&to_json(snapshot)?)?;
    let mut file = File::create(path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;
    use wgstatus_types::{Cluster, Diagnostic, Scope, Server};

    fn sample() -> Snapshot {
        Snapshot::builder()
            .cluster(
                Cluster::builder("EU")
                    .online(5000)
                    .server(Server::builder("S1", ServerStatus::Online).online(120).build())
                    .server(Server::builder("S2", ServerStatus::Offline).build())
                    .build(),
            )
            .cluster(Cluster::builder("NA").build())
            .diagnostic(Diagnostic::new(Scope::Cluster { item: 2 }, "missing title"))
            .build()
    }

    #[test]
    fn test_summary() {
        let value = to_json(&sample()).unwrap();
        let summary = &value["summary"];
        assert_eq!(summary["clusters"], 2);
        assert_eq!(summary["servers_online"], 1);
        assert_eq!(summary["servers_offline"], 1);
        assert_eq!(summary["total_online"], 5000);
        assert_eq!(summary["skipped_entries"], 1);
    }

    #[test]
    fn test_snapshot_keeps_unavailable_as_null() {
        let value = to_json(&sample()).unwrap();
        let clusters = &value["snapshot"]["clusters"];
        assert_eq!(clusters[0]["online"], 5000);
        assert_eq!(clusters[1]["online"], Value::Null);
        assert_eq!(clusters[0]["servers"][1]["status"], "offline");
    }

    #[test]
    fn test_write_round_trips_through_file() {
        let file = NamedTempFile::new().unwrap();
        let snapshot = sample();
        write(file.path(), &snapshot).unwrap();

        let content = std::fs::read_to_string(file.path()).unwrap();
        let value: Value = serde_json::from_str(&content).unwrap();
        let parsed: Snapshot = serde_json::from_value(value["snapshot"].clone()).unwrap();
        assert_eq!(parsed, snapshot);
    }
}
