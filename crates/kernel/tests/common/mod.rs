#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Common test utilities for integration tests.
//!
//! [`MockApi`] is an in-process axum server on an ephemeral port that answers
//! admin API paths with canned JSON and records every request it receives.
//! Tests point a real [`ApiClient`] at it.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Json;
use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use serde_json::{Value, json};

use syllabus_kernel::client::ApiClient;
use syllabus_kernel::config::Config;
use syllabus_kernel::loader::TreeLoader;

/// A request seen by the mock server.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

#[derive(Default)]
struct MockState {
    responses: HashMap<String, (StatusCode, Value)>,
    delays: HashMap<String, Duration>,
    requests: Mutex<Vec<Recorded>>,
}

/// Builder for canned responses.
#[derive(Default)]
pub struct MockApiBuilder {
    responses: HashMap<String, (StatusCode, Value)>,
    delays: HashMap<String, Duration>,
}

impl MockApiBuilder {
    /// Answer `path` (any method) with `200` and `body`.
    pub fn ok(mut self, path: &str, body: Value) -> Self {
        self.responses
            .insert(path.to_string(), (StatusCode::OK, body));
        self
    }

    /// Answer `path` with `{"data": items}`.
    pub fn data(self, path: &str, items: Value) -> Self {
        self.ok(path, json!({ "data": items }))
    }

    /// Answer `path` with an error status.
    pub fn status(mut self, path: &str, status: StatusCode) -> Self {
        self.responses
            .insert(path.to_string(), (status, json!({ "message": "boom" })));
        self
    }

    /// Hold the response for `path` back by `delay`.
    pub fn delay(mut self, path: &str, delay: Duration) -> Self {
        self.delays.insert(path.to_string(), delay);
        self
    }

    pub async fn spawn(self) -> MockApi {
        let state = Arc::new(MockState {
            responses: self.responses,
            delays: self.delays,
            requests: Mutex::new(Vec::new()),
        });

        let app = Router::new().fallback(handle).with_state(state.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        MockApi {
            base_url: format!("http://{addr}/api"),
            state,
        }
    }
}

/// Running mock admin API.
pub struct MockApi {
    pub base_url: String,
    state: Arc<MockState>,
}

impl MockApi {
    pub fn builder() -> MockApiBuilder {
        MockApiBuilder::default()
    }

    pub fn config(&self) -> Config {
        Config {
            api_url: self.base_url.clone(),
            admin_token: None,
            request_timeout: Duration::from_secs(5),
        }
    }

    pub fn client(&self) -> ApiClient {
        ApiClient::new(&self.config()).unwrap()
    }

    pub fn loader(&self) -> TreeLoader {
        TreeLoader::new(self.client())
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.requests.lock().unwrap().clone()
    }

    /// The recorded request for `path`, if any.
    pub fn request_to(&self, path: &str) -> Option<Recorded> {
        self.requests().into_iter().find(|r| r.path == path)
    }
}

async fn handle(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, Json<Value>) {
    // Paths are registered without the `/api` prefix.
    let path = uri
        .path()
        .strip_prefix("/api")
        .unwrap_or(uri.path())
        .to_string();

    state.requests.lock().unwrap().push(Recorded {
        method,
        path: path.clone(),
        query: uri.query().map(str::to_string),
        authorization: headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: serde_json::from_slice(&body).ok(),
    });

    if let Some(delay) = state.delays.get(&path) {
        tokio::time::sleep(*delay).await;
    }

    match state.responses.get(&path) {
        Some((status, body)) => (*status, Json(body.clone())),
        None => (StatusCode::NOT_FOUND, Json(json!({ "message": "not found" }))),
    }
}
