//! Error types.

use thiserror::Error;

use crate::models::ContentSection;

/// Misuse of the hierarchy builder's loosely-typed entry point.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HierarchyError {
    #[error("{argument} must be an array, got {found}")]
    NotASequence {
        argument: &'static str,
        found: &'static str,
    },
}

/// Errors from the admin API client.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid API base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),

    #[error("request to {path} failed")]
    Http {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{path} returned HTTP {status}: {body}")]
    Status {
        path: String,
        status: u16,
        body: String,
    },

    #[error("failed to decode response from {path}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode request body for {path}")]
    Encode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("no item endpoint for {section}")]
    NoEndpoint { section: ContentSection },
}

/// Errors from loading a section tree.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to fetch {collection}")]
    Fetch {
        collection: &'static str,
        #[source]
        source: ApiError,
    },

    #[error(transparent)]
    Shape(#[from] HierarchyError),
}

/// A section or current-affair kind name that matches nothing.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown content section: {0}")]
pub struct UnknownSection(pub String);
