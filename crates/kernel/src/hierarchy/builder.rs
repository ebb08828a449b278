//! Joins flat category, subcategory, and item collections into a tree.

use std::collections::{HashMap, HashSet};

use serde_json::{Map, Value};
use tracing::debug;

use super::format::{ItemFormatter, Passthrough};
use super::tree::{CategoryNode, FormattedItem, Hierarchy, ItemArena, SubCategoryNode};
use crate::error::HierarchyError;
use crate::models::reference::{record_id, resolve_ids};
use crate::models::{Category, ContentSection, SubCategory};

/// Field on an item listing the subcategories it belongs to.
pub const SUB_CATEGORIES_KEY: &str = "subCategories";

/// Builds [`Hierarchy`] trees.
///
/// The builder is configuration only; every [`build`](Self::build) starts
/// from scratch and keeps nothing afterwards.
#[derive(Debug, Clone)]
pub struct HierarchyBuilder<F = Passthrough> {
    formatter: F,
    retain_empty_categories: bool,
}

impl Default for HierarchyBuilder<Passthrough> {
    fn default() -> Self {
        Self::new()
    }
}

impl HierarchyBuilder<Passthrough> {
    /// Builder that keeps item records as they are and retains empty categories.
    pub fn new() -> Self {
        Self {
            formatter: Passthrough,
            retain_empty_categories: true,
        }
    }
}

impl HierarchyBuilder<ContentSection> {
    /// Builder using a section's item formatting and pruning policy.
    pub fn for_section(section: ContentSection) -> Self {
        Self {
            formatter: section,
            retain_empty_categories: section.retains_empty_categories(),
        }
    }
}

impl<F: ItemFormatter> HierarchyBuilder<F> {
    /// Replace the item formatter.
    pub fn with_formatter<G: ItemFormatter>(self, formatter: G) -> HierarchyBuilder<G> {
        HierarchyBuilder {
            formatter,
            retain_empty_categories: self.retain_empty_categories,
        }
    }

    /// Keep (`true`) or drop (`false`) categories without any item.
    pub fn retain_empty_categories(mut self, retain: bool) -> Self {
        self.retain_empty_categories = retain;
        self
    }

    /// Validate loosely-typed input, then build.
    ///
    /// Fails before doing any work if an argument is not a JSON array.
    pub fn build_from_json(
        &self,
        items: &Value,
        categories: &Value,
        sub_categories: &Value,
    ) -> Result<Hierarchy, HierarchyError> {
        let items = as_sequence(items, "items")?;
        let categories = as_sequence(categories, "categories")?;
        let sub_categories = as_sequence(sub_categories, "subCategories")?;
        Ok(self.build(items, categories, sub_categories))
    }

    /// Join the three collections.
    ///
    /// Dangling or malformed references never fail the build: the affected
    /// item or subcategory is left out of the tree.
    pub fn build(
        &self,
        items: &[Value],
        categories: &[Value],
        sub_categories: &[Value],
    ) -> Hierarchy {
        let mut category_nodes = Vec::with_capacity(categories.len());
        let mut category_index: HashMap<String, usize> = HashMap::new();

        for record in objects(categories, "category") {
            let Some(category) = Category::from_record(record) else {
                debug!("category without id skipped");
                continue;
            };
            if category_index.contains_key(&category.id) {
                debug!(category = %category.id, "duplicate category skipped");
                continue;
            }
            category_index.insert(category.id.clone(), category_nodes.len());
            category_nodes.push(CategoryNode {
                id: category.id,
                name: category.name,
                fields: category.fields,
                sub_categories: Vec::new(),
            });
        }

        let mut sub_nodes = Vec::with_capacity(sub_categories.len());
        let mut sub_index: HashMap<String, usize> = HashMap::new();

        for record in objects(sub_categories, "subcategory") {
            let Some(sub) = SubCategory::from_record(record) else {
                debug!("subcategory without id skipped");
                continue;
            };
            if sub_index.contains_key(&sub.id) {
                debug!(sub_category = %sub.id, "duplicate subcategory skipped");
                continue;
            }
            sub_index.insert(sub.id.clone(), sub_nodes.len());
            sub_nodes.push(SubCategoryNode::new(sub.id, sub.name, sub.parent_id));
        }

        let mut arena = ItemArena::default();
        let mut seen: HashSet<String> = HashSet::new();

        for record in objects(items, "item") {
            let Some(id) = record_id(record) else {
                debug!("item without id skipped");
                continue;
            };
            if !seen.insert(id.clone()) {
                debug!(item = %id, "duplicate item skipped");
                continue;
            }

            let homes: Vec<usize> = resolve_ids(record, SUB_CATEGORIES_KEY)
                .into_iter()
                .filter_map(|sub_id| {
                    let home = sub_index.get(&sub_id).copied();
                    if home.is_none() {
                        debug!(item = %id, sub_category = %sub_id, "subcategory not found");
                    }
                    home
                })
                .collect();
            if homes.is_empty() {
                continue;
            }

            let handle = arena.insert(FormattedItem::new(id, self.formatter.format(record)));
            for home in homes {
                if let Some(node) = sub_nodes.get_mut(home) {
                    node.push_item(handle);
                }
            }
        }

        for sub in sub_nodes {
            let parent = sub
                .parent_id
                .as_ref()
                .and_then(|parent_id| category_index.get(parent_id).copied())
                .and_then(|index| category_nodes.get_mut(index));
            match parent {
                Some(category) => category.sub_categories.push(sub),
                None => debug!(
                    sub_category = %sub.id,
                    parent = ?sub.parent_id,
                    "orphan subcategory dropped"
                ),
            }
        }

        if !self.retain_empty_categories {
            prune_empty_categories(&mut category_nodes);
        }

        debug!(
            categories = category_nodes.len(),
            items = arena.len(),
            "hierarchy built"
        );

        Hierarchy {
            categories: category_nodes,
            items: arena,
        }
    }
}

/// Drop categories in which no subcategory holds an item.
pub fn prune_empty_categories(categories: &mut Vec<CategoryNode>) {
    categories.retain(CategoryNode::has_items);
}

fn objects<'a>(
    records: &'a [Value],
    kind: &'static str,
) -> impl Iterator<Item = &'a Map<String, Value>> + 'a {
    records.iter().filter_map(move |record| {
        let object = record.as_object();
        if object.is_none() {
            debug!(kind, "non-object record skipped");
        }
        object
    })
}

fn as_sequence<'a>(
    value: &'a Value,
    argument: &'static str,
) -> Result<&'a [Value], HierarchyError> {
    value
        .as_array()
        .map(Vec::as_slice)
        .ok_or(HierarchyError::NotASequence {
            argument,
            found: json_kind(value),
        })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn arr(value: Value) -> Vec<Value> {
        value.as_array().cloned().unwrap()
    }

    #[test]
    fn rejects_non_array_arguments() {
        let builder = HierarchyBuilder::new();
        let err = builder
            .build_from_json(&json!([]), &json!({"data": []}), &json!([]))
            .unwrap_err();
        assert_eq!(
            err,
            HierarchyError::NotASequence {
                argument: "categories",
                found: "an object"
            }
        );
        assert!(builder.build_from_json(&Value::Null, &json!([]), &json!([])).is_err());
    }

    #[test]
    fn skips_non_object_records() {
        let tree = HierarchyBuilder::new().build(
            &arr(json!([1, "x", {"_id": "i1", "subCategories": ["s1"]}])),
            &arr(json!([null, {"_id": "c1", "name": "UPSC"}])),
            &arr(json!([[], {"_id": "s1", "name": "Prelims", "category": "c1"}])),
        );
        assert_eq!(tree.categories.len(), 1);
        assert_eq!(tree.item_count(), 1);
    }

    #[test]
    fn same_sub_category_referenced_twice_lists_item_twice() {
        let tree = HierarchyBuilder::new().build(
            &arr(json!([{"_id": "i1", "subCategories": ["s1", {"_id": "s1"}]}])),
            &arr(json!([{"_id": "c1", "name": "UPSC"}])),
            &arr(json!([{"_id": "s1", "name": "Prelims", "category": "c1"}])),
        );
        let sub = &tree.categories[0].sub_categories[0];
        assert_eq!(sub.items.len(), 2);
        assert_eq!(sub.items[0], sub.items[1]);
        assert_eq!(tree.item_count(), 1);
    }

    #[test]
    fn non_array_sub_categories_excludes_item() {
        let tree = HierarchyBuilder::new().build(
            &arr(json!([
                {"_id": "i1", "subCategories": {"_id": "s1"}},
                {"_id": "i2", "subCategories": "s1"}
            ])),
            &arr(json!([{"_id": "c1", "name": "UPSC"}])),
            &arr(json!([{"_id": "s1", "name": "Prelims", "category": "c1"}])),
        );
        assert!(tree.categories[0].sub_categories[0].items.is_empty());
        assert_eq!(tree.item_count(), 0);
    }

    #[test]
    fn closure_formatter_via_with_formatter() {
        let builder = HierarchyBuilder::new().with_formatter(|record: &Map<String, Value>| {
            let mut out = record.clone();
            out.insert("badge".to_string(), json!("NEW"));
            out
        });
        let tree = builder.build(
            &arr(json!([{"_id": "i1", "name": "Polity", "subCategories": ["s1"]}])),
            &arr(json!([{"_id": "c1", "name": "UPSC"}])),
            &arr(json!([{"_id": "s1", "name": "Prelims", "category": "c1"}])),
        );
        let category = tree.find_category("c1").unwrap();
        let item = tree.items(&category.sub_categories[0]).next().unwrap();
        assert_eq!(item.id(), "i1");
        assert_eq!(item.get("badge"), Some(&json!("NEW")));
        assert_eq!(item.get("name"), Some(&json!("Polity")));
        assert!(tree.find_category("c404").is_none());
    }

    #[test]
    fn first_duplicate_item_wins() {
        let tree = HierarchyBuilder::new().build(
            &arr(json!([
                {"_id": "i1", "name": "first", "subCategories": ["s1"]},
                {"_id": "i1", "name": "second", "subCategories": ["s2"]}
            ])),
            &arr(json!([{"_id": "c1", "name": "UPSC"}])),
            &arr(json!([
                {"_id": "s1", "name": "Prelims", "category": "c1"},
                {"_id": "s2", "name": "Mains", "category": "c1"}
            ])),
        );
        let subs = &tree.categories[0].sub_categories;
        assert_eq!(subs[0].items.len(), 1);
        assert!(subs[1].items.is_empty());
        let first = tree.items(&subs[0]).next().unwrap();
        assert_eq!(first.get("name"), Some(&json!("first")));
    }

    #[test]
    fn prune_keeps_categories_with_items() {
        let tree = HierarchyBuilder::new().retain_empty_categories(false).build(
            &arr(json!([{"_id": "i1", "subCategories": ["s1"]}])),
            &arr(json!([{"_id": "c1", "name": "Full"}, {"_id": "c2", "name": "Empty"}])),
            &arr(json!([
                {"_id": "s1", "name": "A", "category": "c1"},
                {"_id": "s2", "name": "B", "category": "c2"}
            ])),
        );
        let ids: Vec<_> = tree.categories.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["c1"]);
    }

    #[test]
    fn section_builder_formats_items() {
        let tree = HierarchyBuilder::for_section(ContentSection::EBook).build(
            &arr(json!([{"_id": "b1", "name": "Polity", "subCategories": ["s1"]}])),
            &arr(json!([{"_id": "c1", "name": "UPSC"}])),
            &arr(json!([{"_id": "s1", "name": "Prelims", "category": "c1"}])),
        );
        let sub = &tree.categories[0].sub_categories[0];
        let book = tree.items(sub).next().unwrap();
        assert_eq!(book.get("price"), Some(&json!("Free")));
        assert_eq!(book.get("title"), Some(&json!("Polity")));
    }
}
