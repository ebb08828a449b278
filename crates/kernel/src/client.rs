//! Admin API client.
//!
//! Thin async wrapper over the content-management REST API. Collection
//! responses are returned as raw JSON so the hierarchy builder can validate
//! their shape itself.

use futures::future::try_join_all;
use reqwest::Method;
use serde::Serialize;
use serde_json::{Value, json};
use tracing::debug;

use crate::config::Config;
use crate::error::ApiError;
use crate::models::{CategoryInput, ContentSection, CurrentAffairKind, SubCategoryInput};

const CATEGORIES_PATH: &str = "/admin/categories";
const SUB_CATEGORIES_PATH: &str = "/admin/subcategories";

/// Client for the admin API.
#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a client from configuration.
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let base = url::Url::parse(&config.api_url)
            .map_err(|_| ApiError::InvalidBaseUrl(config.api_url.clone()))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(ApiError::InvalidBaseUrl(config.api_url.clone()));
        }

        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(ApiError::Client)?;

        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            token: config.admin_token.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // -------------------------------------------------------------------------
    // Categories
    // -------------------------------------------------------------------------

    /// List categories, optionally filtered by section.
    pub async fn list_categories(
        &self,
        section: Option<ContentSection>,
    ) -> Result<Value, ApiError> {
        let query: Vec<(&str, &str)> = section
            .map(|s| ("section", s.api_tag()))
            .into_iter()
            .collect();
        let body = self.send(Method::GET, CATEGORIES_PATH, &query, None).await?;
        Ok(unwrap_collection(body))
    }

    /// Create (`id == None`) or update a category.
    pub async fn save_category(
        &self,
        input: &CategoryInput,
        id: Option<&str>,
    ) -> Result<Value, ApiError> {
        self.save(CATEGORIES_PATH, input, id).await
    }

    pub async fn delete_category(&self, id: &str) -> Result<Value, ApiError> {
        let path = format!("{CATEGORIES_PATH}/{}", urlencoding::encode(id));
        self.send(Method::DELETE, &path, &[], None).await
    }

    pub async fn bulk_delete_categories(&self, ids: &[String]) -> Result<Value, ApiError> {
        let path = format!("{CATEGORIES_PATH}/bulk-delete");
        self.send(Method::POST, &path, &[], Some(json!({ "ids": ids })))
            .await
    }

    // -------------------------------------------------------------------------
    // Subcategories
    // -------------------------------------------------------------------------

    /// List subcategories, optionally filtered by parent category and section.
    pub async fn list_sub_categories(
        &self,
        category: Option<&str>,
        section: Option<ContentSection>,
    ) -> Result<Value, ApiError> {
        let mut query = Vec::new();
        if let Some(category) = category {
            query.push(("category", category));
        }
        if let Some(section) = section {
            query.push(("section", section.api_tag()));
        }
        let body = self.send(Method::GET, SUB_CATEGORIES_PATH, &query, None).await?;
        Ok(unwrap_collection(body))
    }

    pub async fn save_sub_category(
        &self,
        input: &SubCategoryInput,
        id: Option<&str>,
    ) -> Result<Value, ApiError> {
        self.save(SUB_CATEGORIES_PATH, input, id).await
    }

    pub async fn delete_sub_category(&self, id: &str) -> Result<Value, ApiError> {
        let path = format!("{SUB_CATEGORIES_PATH}/{}", urlencoding::encode(id));
        self.send(Method::DELETE, &path, &[], None).await
    }

    pub async fn bulk_delete_sub_categories(&self, ids: &[String]) -> Result<Value, ApiError> {
        let path = format!("{SUB_CATEGORIES_PATH}/bulk-delete");
        self.send(Method::POST, &path, &[], Some(json!({ "ids": ids })))
            .await
    }

    // -------------------------------------------------------------------------
    // Items
    // -------------------------------------------------------------------------

    /// List every item of a section.
    ///
    /// Current affairs are gathered from each kind's endpoint concurrently
    /// and tagged with their `type`. Previous papers have no item endpoint and
    /// yield an empty list.
    pub async fn list_items(&self, section: ContentSection) -> Result<Value, ApiError> {
        if section == ContentSection::CurrentAffairs {
            let batches = try_join_all(
                CurrentAffairKind::ALL
                    .into_iter()
                    .map(|kind| self.list_current_affairs(kind)),
            )
            .await?;
            return Ok(Value::Array(batches.into_iter().flatten().collect()));
        }

        let Some(path) = section.items_path() else {
            return Ok(Value::Array(Vec::new()));
        };
        let query: Vec<(&str, &str)> = section.items_query().into_iter().collect();
        let body = self.send(Method::GET, path, &query, None).await?;
        Ok(unwrap_collection(body))
    }

    /// List one kind of current affairs, tagging each item with its kind.
    pub async fn list_current_affairs(
        &self,
        kind: CurrentAffairKind,
    ) -> Result<Vec<Value>, ApiError> {
        let body = self.send(Method::GET, &kind.path(), &[], None).await?;
        let items = match unwrap_collection(body) {
            Value::Array(items) => items,
            other => {
                debug!(
                    kind = kind.tag(),
                    found = ?other,
                    "non-array current affairs response ignored"
                );
                Vec::new()
            }
        };
        Ok(items
            .into_iter()
            .map(|mut item| {
                if let Value::Object(fields) = &mut item {
                    fields.insert("type".to_string(), Value::String(kind.tag().to_string()));
                }
                item
            })
            .collect())
    }

    /// Fetch a single item.
    pub async fn get_item(
        &self,
        section: ContentSection,
        id: &str,
        kind: Option<CurrentAffairKind>,
    ) -> Result<Value, ApiError> {
        let path = item_path(section, id, kind).ok_or(ApiError::NoEndpoint { section })?;
        self.send(Method::GET, &path, &[], None).await
    }

    /// Delete a single item.
    pub async fn delete_item(
        &self,
        section: ContentSection,
        id: &str,
        kind: Option<CurrentAffairKind>,
    ) -> Result<Value, ApiError> {
        let path = item_path(section, id, kind).ok_or(ApiError::NoEndpoint { section })?;
        self.send(Method::DELETE, &path, &[], None).await
    }

    // -------------------------------------------------------------------------
    // Transport
    // -------------------------------------------------------------------------

    async fn save<T: Serialize>(
        &self,
        base: &str,
        input: &T,
        id: Option<&str>,
    ) -> Result<Value, ApiError> {
        let body = serde_json::to_value(input).map_err(|source| ApiError::Encode {
            path: base.to_string(),
            source,
        })?;
        match id {
            Some(id) => {
                let path = format!("{base}/{}", urlencoding::encode(id));
                self.send(Method::PUT, &path, &[], Some(body)).await
            }
            None => self.send(Method::POST, base, &[], Some(body)).await,
        }
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<Value>,
    ) -> Result<Value, ApiError> {
        let url = format!("{}{path}", self.base_url);
        debug!(%method, %url, "admin api request");

        let mut request = self.client.request(method, &url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await.map_err(|source| ApiError::Http {
            path: path.to_string(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                path: path.to_string(),
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        let bytes = response.bytes().await.map_err(|source| ApiError::Http {
            path: path.to_string(),
            source,
        })?;
        if bytes.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&bytes).map_err(|source| ApiError::Decode {
            path: path.to_string(),
            source,
        })
    }
}

/// Path of a single item.
///
/// Current affairs are addressed through their kind; without one there is no
/// path. Previous papers have no item endpoint.
pub fn item_path(
    section: ContentSection,
    id: &str,
    kind: Option<CurrentAffairKind>,
) -> Option<String> {
    let id = urlencoding::encode(id);
    match (section, kind) {
        (ContentSection::CurrentAffairs, Some(kind)) => Some(format!("{}/{id}", kind.path())),
        (ContentSection::CurrentAffairs, None) => None,
        _ => section.items_path().map(|base| format!("{base}/{id}")),
    }
}

/// Unwrap a collection envelope.
///
/// Returns `body.data` when it is present and truthy, otherwise the body
/// itself, otherwise an empty array. The result is not guaranteed to be an
/// array; the hierarchy builder rejects anything else.
pub fn unwrap_collection(body: Value) -> Value {
    if let Some(data) = body.get("data").filter(|data| is_truthy(data)) {
        return data.clone();
    }
    if is_truthy(&body) {
        body
    } else {
        Value::Array(Vec::new())
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
