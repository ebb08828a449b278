//! Category models: categories and subcategories of a content section.
//!
//! Categories are the top level (e.g., "UPSC", "SSC"); subcategories hang off
//! exactly one category through a dual-shape `category` reference. Records come
//! from the admin API as loosely-typed JSON, so these types are read out of a
//! `serde_json::Map` rather than deserialized strictly.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::reference::{record_id, resolve_id};

/// Field holding a subcategory's parent-category reference.
pub const PARENT_KEY: &str = "category";

/// A category record as returned by the admin API.
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    /// Resolved identifier.
    pub id: String,

    /// Display name (empty when the record has none).
    pub name: String,

    /// Every field of the original record, passed through to the tree.
    pub fields: Map<String, Value>,
}

/// A subcategory record with its parent reference normalised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubCategory {
    /// Resolved identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Parent category id; `None` when the reference is missing or malformed.
    pub parent_id: Option<String>,
}

impl Category {
    /// Read a category out of a raw record. Returns `None` without an id.
    pub fn from_record(record: &Map<String, Value>) -> Option<Self> {
        let id = record_id(record)?;
        Some(Self {
            id,
            name: display_name(record),
            fields: record.clone(),
        })
    }
}

impl SubCategory {
    /// Read a subcategory out of a raw record. Returns `None` without an id.
    pub fn from_record(record: &Map<String, Value>) -> Option<Self> {
        let id = record_id(record)?;
        Some(Self {
            id,
            name: display_name(record),
            parent_id: record.get(PARENT_KEY).and_then(resolve_id),
        })
    }
}

fn display_name(record: &Map<String, Value>) -> String {
    record
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Input for creating or updating a category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryInput {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Section API tag (e.g., `ONLINE_COURSE`).
    pub section: String,
    pub is_active: bool,
}

/// Input for creating or updating a subcategory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubCategoryInput {
    pub name: String,
    /// Parent category id.
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub section: String,
    pub is_active: bool,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn category_keeps_all_fields() {
        let raw = json!({"_id": "c1", "name": "UPSC", "section": "E_BOOK", "order": 3});
        let category = Category::from_record(raw.as_object().unwrap()).unwrap();

        assert_eq!(category.id, "c1");
        assert_eq!(category.name, "UPSC");
        assert_eq!(category.fields.get("order"), Some(&json!(3)));
    }

    #[test]
    fn category_without_id_is_rejected() {
        let raw = json!({"name": "Nameless"});
        assert!(Category::from_record(raw.as_object().unwrap()).is_none());
    }

    #[test]
    fn subcategory_parent_shapes() {
        let populated = json!({"_id": "s1", "name": "Prelims", "category": {"_id": "c1"}});
        let raw = json!({"_id": "s1", "name": "Prelims", "category": "c1"});

        let a = SubCategory::from_record(populated.as_object().unwrap()).unwrap();
        let b = SubCategory::from_record(raw.as_object().unwrap()).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.parent_id.as_deref(), Some("c1"));
    }

    #[test]
    fn subcategory_with_null_parent() {
        let raw = json!({"_id": "s1", "name": "Loose", "category": null});
        let sub = SubCategory::from_record(raw.as_object().unwrap()).unwrap();
        assert_eq!(sub.parent_id, None);
    }

    #[test]
    fn category_input_serializes_camel_case() {
        let input = CategoryInput {
            name: "SSC".to_string(),
            description: None,
            section: "DAILY_QUIZ".to_string(),
            is_active: true,
        };
        let value = serde_json::to_value(&input).unwrap();
        assert_eq!(
            value,
            json!({"name": "SSC", "section": "DAILY_QUIZ", "isActive": true})
        );
    }
}
