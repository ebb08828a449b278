//! Command implementations for the `syllabus` binary.

use std::fmt::Write as _;

use anyhow::{Context, Result};

use crate::hierarchy::{Hierarchy, HierarchyBuilder};
use crate::loader::TreeLoader;
use crate::models::{ContentSection, CurrentAffairKind};
use crate::variants::Variant;

/// Output format for `syllabus tree`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    Json,
    #[default]
    Outline,
}

/// Print a section's tree.
///
/// `retain_empty` overrides the section's own pruning policy when set.
pub async fn cmd_tree(
    loader: &TreeLoader,
    section: ContentSection,
    format: OutputFormat,
    retain_empty: Option<bool>,
    search: Option<&str>,
) -> Result<()> {
    let mut builder = HierarchyBuilder::for_section(section);
    if let Some(retain) = retain_empty {
        builder = builder.retain_empty_categories(retain);
    }

    let tree = loader
        .load_with(section, &builder)
        .await
        .with_context(|| format!("failed to load {} tree", section.label()))?;

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&tree).context("failed to serialize tree")?;
            println!("{json}");
        }
        OutputFormat::Outline => {
            print!("{}", render_outline(&tree, section, search.unwrap_or_default()));
        }
    }
    Ok(())
}

/// Delete one item of a section.
pub async fn cmd_delete(
    loader: &TreeLoader,
    section: ContentSection,
    id: &str,
    kind: Option<CurrentAffairKind>,
) -> Result<()> {
    loader
        .client()
        .delete_item(section, id, kind)
        .await
        .with_context(|| format!("failed to delete {section} '{id}'"))?;
    println!("Deleted {section} '{id}'.");
    Ok(())
}

/// Render a tree as an indented outline with one table per subcategory.
///
/// A non-empty `search` filters the rows of every subcategory; the count next
/// to each subcategory stays the unfiltered total.
pub fn render_outline(tree: &Hierarchy, section: ContentSection, search: &str) -> String {
    let mut out = String::new();
    if tree.is_empty() {
        let _ = writeln!(out, "No {} found.", section.label());
        return out;
    }

    let variant = section.variant();
    for category in &tree.categories {
        let _ = writeln!(out, "{}", category.name);
        if category.sub_categories.is_empty() {
            let _ = writeln!(out, "  (no subcategories)");
            continue;
        }
        for sub in &category.sub_categories {
            let _ = writeln!(out, "  {} ({})", sub.name, sub.items.len());
            let rows = tree.search(sub, search);
            if rows.is_empty() {
                continue;
            }
            let _ = writeln!(out, "    {}", header(variant));
            for item in rows {
                let cells: Vec<String> =
                    variant.columns.iter().map(|c| item.display(c.key)).collect();
                let _ = writeln!(out, "    - {}", cells.join(" | "));
            }
        }
    }
    out
}

fn header(variant: &Variant) -> String {
    variant
        .columns
        .iter()
        .map(|c| c.label)
        .collect::<Vec<_>>()
        .join(" | ")
}
