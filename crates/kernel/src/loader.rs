//! Fetch-then-build for a section's tree.
//!
//! Items, categories, and subcategories are requested concurrently. The
//! hierarchy builder runs only once all three have arrived; a single failed
//! request fails the whole load and nothing is built.

use std::future::Future;

use serde_json::Value;
use tracing::{info, warn};

use crate::client::ApiClient;
use crate::error::{ApiError, LoadError};
use crate::hierarchy::{Hierarchy, HierarchyBuilder, ItemFormatter};
use crate::models::ContentSection;

/// Loads section trees from the admin API.
#[derive(Clone)]
pub struct TreeLoader {
    client: ApiClient,
}

impl TreeLoader {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Load a section's tree with the section's own formatting and pruning.
    pub async fn load(&self, section: ContentSection) -> Result<Hierarchy, LoadError> {
        self.load_with(section, &HierarchyBuilder::for_section(section))
            .await
    }

    /// Load a section's tree with a caller-supplied builder.
    pub async fn load_with<F: ItemFormatter>(
        &self,
        section: ContentSection,
        builder: &HierarchyBuilder<F>,
    ) -> Result<Hierarchy, LoadError> {
        let (items, categories, sub_categories) = tokio::try_join!(
            fetch("items", self.client.list_items(section)),
            fetch("categories", self.client.list_categories(Some(section))),
            fetch(
                "subcategories",
                self.client.list_sub_categories(None, Some(section))
            ),
        )?;

        let tree = builder.build_from_json(&items, &categories, &sub_categories)?;

        info!(
            section = %section,
            categories = tree.categories.len(),
            items = tree.item_count(),
            "section tree loaded"
        );
        Ok(tree)
    }
}

async fn fetch<Fut>(collection: &'static str, request: Fut) -> Result<Value, LoadError>
where
    Fut: Future<Output = Result<Value, ApiError>>,
{
    request.await.map_err(|source| {
        warn!(collection, error = %source, "fetch failed");
        LoadError::Fetch { collection, source }
    })
}
