//! Tolerant parsing of the backend's `{ success, data: { <key>: [...] } }`
//! response envelope.

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::TransportError;

/// Records extracted from a list response.
///
/// `error` is set when the envelope parsed but held no collection; the list is
/// then empty rather than failing the whole fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct Collection<T> {
    pub items: Vec<T>,
    pub error: Option<String>,
    pub skipped: usize,
}

impl<T> Collection<T> {
    pub fn empty_with_error(message: impl Into<String>) -> Self {
        Self {
            items: Vec::new(),
            error: Some(message.into()),
            skipped: 0,
        }
    }
}

/// Best human-readable message in an error envelope.
pub fn message_of(value: &Value) -> String {
    ["message", "error"]
        .iter()
        .find_map(|key| value.get(*key).and_then(Value::as_str))
        .map(str::to_string)
        .unwrap_or_else(|| "no message provided".to_string())
}

/// Parses a list response whose items live under `data.<key>`.
///
/// Also accepts `data.<key>.<key>` and `data.data.<key>`. Entries that do not
/// decode are skipped and counted.
pub fn parse_collection<T: DeserializeOwned>(
    body: &str,
    key: &str,
) -> Result<Collection<T>, TransportError> {
    let root: Value =
        serde_json::from_str(body).map_err(|err| TransportError::Envelope(err.to_string()))?;
    if !root.is_object() {
        return Err(TransportError::Envelope(
            "expected a JSON object at the top level".to_string(),
        ));
    }
    if root.get("success").and_then(Value::as_bool) == Some(false) {
        return Err(TransportError::Rejected(message_of(&root)));
    }

    let Some(list) = locate(&root, key) else {
        tracing::warn!(key, "response envelope has no collection");
        return Ok(Collection::empty_with_error(format!(
            "Response did not contain a `{key}` list"
        )));
    };

    let mut items = Vec::with_capacity(list.len());
    let mut skipped = 0;
    for (index, entry) in list.iter().enumerate() {
        match serde_json::from_value::<T>(entry.clone()) {
            Ok(item) => items.push(item),
            Err(err) => {
                skipped += 1;
                tracing::warn!(key, index, error = %err, "skipping undecodable record");
            }
        }
    }
    tracing::info!(key, count = items.len(), skipped, "collection loaded");
    Ok(Collection {
        items,
        error: None,
        skipped,
    })
}

fn locate<'a>(root: &'a Value, key: &str) -> Option<&'a Vec<Value>> {
    let data = root.get("data")?;
    [
        data.get(key),
        data.get(key).and_then(|inner| inner.get(key)),
        data.get("data").and_then(|inner| inner.get(key)),
    ]
    .into_iter()
    .flatten()
    .find_map(Value::as_array)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        role: String,
    }

    #[test]
    fn reads_direct_and_nested_collections() {
        for body in [
            r#"{"success":true,"data":{"offer":[{"role":"SDE"}]}}"#,
            r#"{"success":true,"data":{"offer":{"offer":[{"role":"SDE"}]}}}"#,
            r#"{"success":true,"data":{"data":{"offer":[{"role":"SDE"}]}}}"#,
        ] {
            let collection = parse_collection::<Item>(body, "offer").unwrap();
            assert_eq!(collection.items, vec![Item { role: "SDE".into() }]);
            assert!(collection.error.is_none());
        }
    }

    #[test]
    fn empty_list_is_not_an_error() {
        let collection =
            parse_collection::<Item>(r#"{"success":true,"data":{"offer":[]}}"#, "offer").unwrap();
        assert!(collection.items.is_empty());
        assert!(collection.error.is_none());
    }

    #[test]
    fn missing_list_yields_empty_with_error() {
        let collection =
            parse_collection::<Item>(r#"{"success":true,"data":{}}"#, "offer").unwrap();
        assert!(collection.items.is_empty());
        assert!(collection.error.is_some());
    }

    #[test]
    fn undecodable_entries_are_skipped() {
        let body = r#"{"success":true,"data":{"offer":[{"role":"SDE"},42]}}"#;
        let collection = parse_collection::<Item>(body, "offer").unwrap();
        assert_eq!(collection.items.len(), 1);
        assert_eq!(collection.skipped, 1);
    }

    #[test]
    fn success_false_is_rejected() {
        let err = parse_collection::<Item>(r#"{"success":false,"message":"nope"}"#, "offer")
            .unwrap_err();
        assert!(matches!(err, TransportError::Rejected(_)));
        assert!(parse_collection::<Item>("[]", "offer").is_err());
    }
}
