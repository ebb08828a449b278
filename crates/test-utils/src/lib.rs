//! Syllabus test utilities.
//!
//! Fixture builders for the raw JSON records the admin API serves, and
//! assertion helpers for tree output.

use serde_json::{Map, Value as JsonValue, json};

/// Create a test category record.
pub fn test_category(id: &str, name: &str) -> TestRecord {
    TestRecord::new(id).with_field("name", json!(name))
}

/// Create a test subcategory record whose parent is given as a raw id.
pub fn test_sub_category(id: &str, name: &str, parent_id: &str) -> TestRecord {
    TestRecord::new(id)
        .with_field("name", json!(name))
        .with_field("category", json!(parent_id))
}

/// Create a test content item record with no subcategory references.
pub fn test_item(id: &str, name: &str) -> TestRecord {
    TestRecord::new(id).with_field("name", json!(name))
}

/// A raw API record builder.
#[derive(Debug, Clone, PartialEq)]
pub struct TestRecord {
    fields: Map<String, JsonValue>,
}

impl TestRecord {
    /// Record with only an `_id`.
    pub fn new(id: &str) -> Self {
        let mut fields = Map::new();
        fields.insert("_id".to_string(), json!(id));
        Self { fields }
    }

    /// Add or replace a field.
    pub fn with_field(mut self, name: &str, value: JsonValue) -> Self {
        self.fields.insert(name.to_string(), value);
        self
    }

    /// Remove a field.
    pub fn without(mut self, name: &str) -> Self {
        self.fields.remove(name);
        self
    }

    /// Give a subcategory its parent as a populated object (`{"_id": ...}`).
    pub fn populated_parent(self) -> Self {
        match self.fields.get("category").cloned() {
            Some(JsonValue::String(id)) => self.with_field("category", json!({ "_id": id })),
            _ => self,
        }
    }

    /// Reference subcategories by raw id.
    pub fn in_sub_categories(self, ids: &[&str]) -> Self {
        self.with_field("subCategories", json!(ids))
    }

    /// Reference subcategories as populated objects.
    pub fn in_populated_sub_categories(self, ids: &[&str]) -> Self {
        let refs: Vec<JsonValue> = ids
            .iter()
            .map(|id| json!({ "_id": id, "name": format!("sub {id}") }))
            .collect();
        self.with_field("subCategories", JsonValue::Array(refs))
    }

    /// Attach language objects (`[{"name": ...}]`).
    pub fn with_languages(self, names: &[&str]) -> Self {
        let languages: Vec<JsonValue> = names.iter().map(|n| json!({ "name": n })).collect();
        self.with_field("languages", JsonValue::Array(languages))
    }

    pub fn build(self) -> JsonValue {
        JsonValue::Object(self.fields)
    }
}

/// Collect records into a JSON array.
pub fn records(records: impl IntoIterator<Item = TestRecord>) -> JsonValue {
    JsonValue::Array(records.into_iter().map(TestRecord::build).collect())
}

/// Collect records into a vector of JSON values.
pub fn record_vec(records: impl IntoIterator<Item = TestRecord>) -> Vec<JsonValue> {
    records.into_iter().map(TestRecord::build).collect()
}

/// Three collections for one section.
#[derive(Debug, Clone)]
pub struct Fixture {
    pub items: Vec<JsonValue>,
    pub categories: Vec<JsonValue>,
    pub sub_categories: Vec<JsonValue>,
}

/// The UPSC scenario: one category, one subcategory, two items; the second
/// item also references a subcategory that does not exist.
pub fn upsc_fixture() -> Fixture {
    Fixture {
        categories: record_vec([test_category("c1", "UPSC")]),
        sub_categories: record_vec([test_sub_category("s1", "Prelims", "c1").populated_parent()]),
        items: vec![
            test_item("i1", "Test 1").in_sub_categories(&["s1"]).build(),
            test_item("i2", "Test 2")
                .in_populated_sub_categories(&["s1", "s2"])
                .build(),
        ],
    }
}

/// Assertion helpers for JSON output.
pub mod assert {
    use serde_json::Value;

    /// Assert that a JSON value has a specific key.
    pub fn has_key(value: &Value, key: &str) {
        assert!(
            value.get(key).is_some(),
            "Expected JSON to have key '{key}', got: {value}"
        );
    }

    /// Assert that a JSON value equals expected.
    pub fn json_eq(actual: &Value, expected: &Value) {
        assert_eq!(
            actual,
            expected,
            "JSON mismatch:\nactual: {}\nexpected: {}",
            serde_json::to_string_pretty(actual).unwrap_or_default(),
            serde_json::to_string_pretty(expected).unwrap_or_default()
        );
    }

    /// Assert that a string contains a substring.
    pub fn contains(haystack: &str, needle: &str) {
        assert!(
            haystack.contains(needle),
            "Expected string to contain '{needle}'\nActual: {haystack}"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sub_category_parent_shapes() {
        let raw = test_sub_category("s1", "Prelims", "c1").build();
        assert_eq!(raw["category"], "c1");

        let populated = test_sub_category("s1", "Prelims", "c1")
            .populated_parent()
            .build();
        assert_eq!(populated["category"]["_id"], "c1");
    }

    #[test]
    fn item_references() {
        let item = test_item("i1", "Test")
            .in_populated_sub_categories(&["s1"])
            .with_languages(&["Hindi"])
            .build();
        assert_eq!(item["subCategories"][0]["_id"], "s1");
        assert_eq!(item["languages"][0]["name"], "Hindi");
    }

    #[test]
    fn without_removes_field() {
        let item = test_item("i1", "Test").without("_id").build();
        assert!(item.get("_id").is_none());
    }

    #[test]
    fn upsc_fixture_shape() {
        let fixture = upsc_fixture();
        assert_eq!(fixture.categories.len(), 1);
        assert_eq!(fixture.sub_categories.len(), 1);
        assert_eq!(fixture.items.len(), 2);
        assert::has_key(&fixture.items[1], "subCategories");
    }
}
