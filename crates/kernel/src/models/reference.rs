//! Foreign-key normalisation.
//!
//! The admin API sometimes populates relations (`{"_id": "...", "name": ...}`)
//! and sometimes returns the bare id. Every read of a foreign key goes through
//! [`resolve_id`] so both shapes compare equal.

use serde_json::{Map, Value};

/// Primary key name used by the admin API.
pub const ID_KEY: &str = "_id";

/// Fallback key for records that were already reshaped client-side.
pub const ALT_ID_KEY: &str = "id";

/// Resolve a dual-shape reference to an id.
///
/// Returns `None` when the value carries no usable id (null, empty string,
/// booleans, arrays, or an object without an id member).
pub fn resolve_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Object(map) => record_id(map),
        Value::Null | Value::Bool(_) | Value::Array(_) => None,
    }
}

/// Resolve the identity of a record (`_id`, falling back to `id`).
///
/// Nested objects are followed, so `{"_id": {"_id": "x"}}` resolves to `x`.
pub fn record_id(record: &Map<String, Value>) -> Option<String> {
    record
        .get(ID_KEY)
        .and_then(resolve_id)
        .or_else(|| record.get(ALT_ID_KEY).and_then(resolve_id))
}

/// Resolve every reference stored under `key`.
///
/// Only an array counts as a reference list; anything else yields nothing.
/// Elements that resolve to no id are dropped.
pub fn resolve_ids(record: &Map<String, Value>, key: &str) -> Vec<String> {
    match record.get(key) {
        Some(Value::Array(refs)) => refs.iter().filter_map(resolve_id).collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn raw_and_populated_refs_agree() {
        assert_eq!(resolve_id(&json!("c1")), Some("c1".to_string()));
        assert_eq!(resolve_id(&json!({"_id": "c1"})), Some("c1".to_string()));
        assert_eq!(
            resolve_id(&json!({"_id": "c1", "name": "UPSC"})),
            resolve_id(&json!("c1"))
        );
    }

    #[test]
    fn object_falls_back_to_id_key() {
        assert_eq!(resolve_id(&json!({"id": "s9"})), Some("s9".to_string()));
        // `_id` wins when both are present
        assert_eq!(
            resolve_id(&json!({"_id": "a", "id": "b"})),
            Some("a".to_string())
        );
    }

    #[test]
    fn numbers_compare_as_strings() {
        assert_eq!(resolve_id(&json!(42)), Some("42".to_string()));
    }

    #[test]
    fn unusable_values_resolve_to_none() {
        assert_eq!(resolve_id(&Value::Null), None);
        assert_eq!(resolve_id(&json!("")), None);
        assert_eq!(resolve_id(&json!("   ")), None);
        assert_eq!(resolve_id(&json!(true)), None);
        assert_eq!(resolve_id(&json!(["c1"])), None);
        assert_eq!(resolve_id(&json!({"_id": null})), None);
        assert_eq!(resolve_id(&json!({"name": "no id"})), None);
    }

    #[test]
    fn resolve_ids_ignores_non_array_value() {
        let record = json!({"subCategories": {"_id": "s1"}, "single": "s1"});
        let map = record.as_object().unwrap();
        assert!(resolve_ids(map, "subCategories").is_empty());
        assert!(resolve_ids(map, "single").is_empty());
    }

    #[test]
    fn resolve_ids_skips_broken_elements() {
        let record = json!({"subCategories": ["s1", null, {"_id": "s2"}, {"x": 1}]});
        let map = record.as_object().unwrap();
        assert_eq!(
            resolve_ids(map, "subCategories"),
            vec!["s1".to_string(), "s2".to_string()]
        );
        assert!(resolve_ids(map, "missing").is_empty());
    }
}
