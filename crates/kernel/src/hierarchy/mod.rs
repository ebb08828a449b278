//! Category hierarchy module.
//!
//! This module provides:
//! - HierarchyBuilder: joins categories, subcategories, and items into a tree
//! - ItemFormatter: per-section display formatting of items
//! - Hierarchy: the tree, with items held once in an arena

pub mod builder;
pub mod format;
pub mod tree;

use serde_json::Value;

pub use builder::{HierarchyBuilder, SUB_CATEGORIES_KEY, prune_empty_categories};
pub use format::{DateStyle, ItemFormatter, Passthrough};
pub use tree::{CategoryNode, FormattedItem, Hierarchy, ItemArena, ItemId, SubCategoryNode};

/// Build a tree with unformatted items, keeping empty categories.
pub fn build_hierarchy(
    items: &[Value],
    categories: &[Value],
    sub_categories: &[Value],
) -> Hierarchy {
    HierarchyBuilder::new().build(items, categories, sub_categories)
}
