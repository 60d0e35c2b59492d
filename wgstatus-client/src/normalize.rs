//! Envelope unwrapping and item classification.
//!
//! The upstream document is `{"results": [batch, ...]}`. Only the first batch
//! is read. A batch is either `{"items": [...]}` or the item array itself;
//! each item is `{"type": "...", "data": {...}}`.

use serde_json::Value;

use crate::StatusError;

/// Upstream `type` tag of a cluster record.
pub const CLUSTER_TYPE: &str = "cluster";

/// Upstream `type` tag of a ranking (XVM host list) record.
pub const RANKING_TYPE: &str = "http";

/// Classification of one upstream item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemKind {
    Cluster,
    Ranking,
    /// Any other tag, kept so callers can log what was dropped.
    Unknown(String),
}

impl ItemKind {
    fn from_tag(tag: Option<&str>) -> Self {
        match tag {
            Some(CLUSTER_TYPE) => ItemKind::Cluster,
            Some(RANKING_TYPE) => ItemKind::Ranking,
            Some(other) => ItemKind::Unknown(other.to_string()),
            None => ItemKind::Unknown(String::new()),
        }
    }
}

/// One classified item with its position in the upstream list.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub index: usize,
    pub kind: ItemKind,
    /// The item's `data` object, `Null` when absent.
    pub data: Value,
}

/// Classify every item of the first result batch, preserving order.
///
/// Unknown item types are returned as [`ItemKind::Unknown`] rather than
/// rejected. Fails with [`StatusError::MalformedEnvelope`] when `results` is
/// missing or empty, the batch holds no item list, or an item carries
/// neither `type` nor `data`.
pub fn classify(document: &Value) -> Result<Vec<Item>, StatusError> {
    let results = document
        .get("results")
        .and_then(Value::as_array)
        .ok_or_else(|| malformed("missing `results` array"))?;

    let batch = results
        .first()
        .ok_or_else(|| malformed("`results` array is empty"))?;

    let entries = match batch {
        Value::Array(items) => items,
        Value::Object(map) => map
            .get("items")
            .and_then(Value::as_array)
            .ok_or_else(|| malformed("first batch has no `items` array"))?,
        _ => return Err(malformed("first batch is neither an object nor an array")),
    };

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| classify_item(index, entry))
        .collect()
}

fn classify_item(index: usize, entry: &Value) -> Result<Item, StatusError> {
    let map = entry
        .as_object()
        .ok_or_else(|| malformed(format!("item #{} is not an object", index)))?;

    let tag = map.get("type");
    let data = map.get("data");
    if tag.is_none() && data.is_none() {
        return Err(malformed(format!(
            "item #{} has neither `type` nor `data`",
            index
        )));
    }

    Ok(Item {
        index,
        kind: ItemKind::from_tag(tag.and_then(Value::as_str)),
        data: data.cloned().unwrap_or(Value::Null),
    })
}

fn malformed(reason: impl Into<String>) -> StatusError {
    StatusError::MalformedEnvelope(reason.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_classify_items_object_batch() {
        let doc = json!({
            "results": [{
                "items": [
                    {"type": "cluster", "data": {"title": "RU"}},
                    {"type": "http", "data": {"title": "XVM", "hosts": []}},
                    {"type": "twitter", "data": {}},
                    {"type": "cluster", "data": {"title": "EU"}}
                ]
            }]
        });

        let items = classify(&doc).unwrap();
        let kinds: Vec<&ItemKind> = items.iter().map(|i| &i.kind).collect();
        assert_eq!(
            kinds,
            vec![
                &ItemKind::Cluster,
                &ItemKind::Ranking,
                &ItemKind::Unknown("twitter".to_string()),
                &ItemKind::Cluster
            ]
        );
        assert_eq!(items[3].index, 3);
        assert_eq!(items[3].data["title"], "EU");
    }

    #[test]
    fn test_classify_bare_array_batch() {
        let doc = json!({
            "results": [[
                {"type": "cluster", "data": {"title": "NA"}}
            ]]
        });

        let items = classify(&doc).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].kind, ItemKind::Cluster);
    }

    #[test]
    fn test_classify_ignores_extra_fields_and_later_batches() {
        let doc = json!({
            "generated": "now",
            "results": [
                {"items": [{"type": "cluster", "data": {}, "id": 9}], "meta": 1},
                {"items": [{"type": "cluster", "data": {}}, {"type": "cluster", "data": {}}]}
            ]
        });

        assert_eq!(classify(&doc).unwrap().len(), 1);
    }

    #[test]
    fn test_classify_missing_results() {
        let err = classify(&json!({"data": []})).unwrap_err();
        assert!(matches!(err, StatusError::MalformedEnvelope(_)));
    }

    #[test]
    fn test_classify_empty_results() {
        let err = classify(&json!({"results": []})).unwrap_err();
        assert_eq!(
            err,
            StatusError::MalformedEnvelope("`results` array is empty".to_string())
        );
    }

    #[test]
    fn test_classify_item_without_type_or_data() {
        let doc = json!({"results": [{"items": [{"id": 1}]}]});
        let err = classify(&doc).unwrap_err();
        assert!(err.to_string().contains("neither `type` nor `data`"));
    }

    #[test]
    fn test_classify_partial_items() {
        let doc = json!({
            "results": [{"items": [
                {"data": {"title": "untagged"}},
                {"type": "cluster"}
            ]}]
        });

        let items = classify(&doc).unwrap();
        assert_eq!(items[0].kind, ItemKind::Unknown(String::new()));
        assert_eq!(items[1].kind, ItemKind::Cluster);
        assert_eq!(items[1].data, Value::Null);
    }
}
