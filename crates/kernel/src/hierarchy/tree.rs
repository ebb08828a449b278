//! Category → subcategory → item tree.
//!
//! Items are owned by an [`ItemArena`]; subcategory nodes hold [`ItemId`]
//! handles into it. An item that belongs to several subcategories is stored
//! once, so editing it through one home is visible from every other.

use std::collections::HashMap;

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// Handle to an item in an [`ItemArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(usize);

/// A content item ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct FormattedItem {
    id: String,
    fields: Map<String, Value>,
}

impl FormattedItem {
    /// Wrap a formatted record. `fields["id"]` is forced to `id`.
    pub fn new(id: String, mut fields: Map<String, Value>) -> Self {
        fields.insert("id".to_string(), Value::String(id.clone()));
        Self { id, fields }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Field rendered as text, for table cells. Missing values render as `-`.
    pub fn display(&self, key: &str) -> String {
        match self.fields.get(key) {
            None | Some(Value::Null) => super::format::DASH.to_string(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }

    /// Set a field. The `id` field cannot be changed.
    pub fn set(&mut self, key: &str, value: Value) {
        if key != "id" {
            self.fields.insert(key.to_string(), value);
        }
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Case-insensitive substring match over the item's string fields.
    pub fn matches(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        self.fields.values().any(|value| match value {
            Value::String(s) => s.to_lowercase().contains(&needle),
            _ => false,
        })
    }
}

/// Owner of every formatted item in a tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemArena {
    items: Vec<FormattedItem>,
    by_id: HashMap<String, ItemId>,
}

impl ItemArena {
    /// Store an item. An item whose id is already present is not stored twice;
    /// the existing handle is returned.
    pub fn insert(&mut self, item: FormattedItem) -> ItemId {
        if let Some(existing) = self.by_id.get(item.id()) {
            return *existing;
        }
        let handle = ItemId(self.items.len());
        self.by_id.insert(item.id.clone(), handle);
        self.items.push(item);
        handle
    }

    pub fn get(&self, handle: ItemId) -> Option<&FormattedItem> {
        self.items.get(handle.0)
    }

    pub fn get_mut(&mut self, handle: ItemId) -> Option<&mut FormattedItem> {
        self.items.get_mut(handle.0)
    }

    /// Look up an item handle by item id.
    pub fn find(&self, id: &str) -> Option<ItemId> {
        self.by_id.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// A subcategory with handles to its items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubCategoryNode {
    pub id: String,
    pub name: String,
    pub parent_id: Option<String>,
    pub items: Vec<ItemId>,
}

impl SubCategoryNode {
    pub fn new(id: String, name: String, parent_id: Option<String>) -> Self {
        Self {
            id,
            name,
            parent_id,
            items: Vec::new(),
        }
    }

    /// Record an item here. One push per reference, so repeated references
    /// list the item repeatedly.
    pub(crate) fn push_item(&mut self, handle: ItemId) {
        self.items.push(handle);
    }
}

/// A category with its attached subcategories.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryNode {
    pub id: String,
    pub name: String,
    /// Original category record.
    pub fields: Map<String, Value>,
    pub sub_categories: Vec<SubCategoryNode>,
}

impl CategoryNode {
    /// Whether any subcategory holds at least one item.
    pub fn has_items(&self) -> bool {
        self.sub_categories.iter().any(|sub| !sub.items.is_empty())
    }
}

/// Output of the hierarchy builder.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Hierarchy {
    pub categories: Vec<CategoryNode>,
    pub items: ItemArena,
}

impl Hierarchy {
    /// Resolve a subcategory's items.
    pub fn items<'a>(
        &'a self,
        sub: &'a SubCategoryNode,
    ) -> impl Iterator<Item = &'a FormattedItem> + 'a {
        sub.items.iter().filter_map(|handle| self.items.get(*handle))
    }

    /// Mutable access to a shared item.
    pub fn item_mut(&mut self, handle: ItemId) -> Option<&mut FormattedItem> {
        self.items.get_mut(handle)
    }

    pub fn find_category(&self, id: &str) -> Option<&CategoryNode> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn find_sub_category(&self, id: &str) -> Option<&SubCategoryNode> {
        self.categories
            .iter()
            .flat_map(|c| c.sub_categories.iter())
            .find(|s| s.id == id)
    }

    /// Items of a subcategory matching `query`; an empty query matches all.
    pub fn search<'a>(&'a self, sub: &'a SubCategoryNode, query: &str) -> Vec<&'a FormattedItem> {
        let query = query.trim();
        self.items(sub)
            .filter(|item| query.is_empty() || item.matches(query))
            .collect()
    }

    /// Number of distinct items placed in at least one subcategory.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Nested JSON shape consumed by the dashboard.
    pub fn to_json(&self) -> Value {
        Value::Array(self.categories.iter().map(|c| self.category_json(c)).collect())
    }

    fn category_json(&self, category: &CategoryNode) -> Value {
        let mut out = category.fields.clone();
        out.insert("id".to_string(), Value::String(category.id.clone()));
        out.insert("name".to_string(), Value::String(category.name.clone()));
        let subs = category
            .sub_categories
            .iter()
            .map(|sub| self.sub_category_json(sub))
            .collect();
        out.insert("subCategories".to_string(), Value::Array(subs));
        Value::Object(out)
    }

    fn sub_category_json(&self, sub: &SubCategoryNode) -> Value {
        let items = self
            .items(sub)
            .map(|item| Value::Object(item.fields.clone()))
            .collect();
        let mut out = Map::new();
        out.insert("id".to_string(), Value::String(sub.id.clone()));
        out.insert("name".to_string(), Value::String(sub.name.clone()));
        out.insert(
            "parentId".to_string(),
            sub.parent_id.clone().map_or(Value::Null, Value::String),
        );
        out.insert("items".to_string(), Value::Array(items));
        Value::Object(out)
    }
}

impl Serialize for Hierarchy {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}
