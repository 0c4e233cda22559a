//! HTTP client for the DirectStay REST API.
//!
//! Thin wrapper around `reqwest` shared by every tool wrapper. Carries the
//! base URL and bearer token from the configuration; callers get JSON
//! values back and convert failures into their own soft-error payloads.

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

use crate::core::config::ApiConfig;

/// Errors from a DirectStay API call.
#[derive(Debug, Error)]
pub enum DsApiError {
    /// Transport-level failure: connect, timeout, or body decode.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("API responded with {status}: {detail}")]
    Status { status: StatusCode, detail: String },
}

/// Shared DirectStay API client. Cheap to clone.
#[derive(Clone)]
pub struct DsClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl DsClient {
    /// Build a client from the API section of the configuration.
    pub fn from_config(config: &ApiConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        }
    }

    /// GET a path with query parameters.
    pub async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value, DsApiError> {
        let request = self.http.get(self.url(path)).query(query);
        self.send(request).await
    }

    /// POST a JSON body.
    pub async fn post(&self, path: &str, body: &Value) -> Result<Value, DsApiError> {
        let request = self.http.post(self.url(path)).json(body);
        self.send(request).await
    }

    /// PATCH a JSON body.
    pub async fn patch(&self, path: &str, body: &Value) -> Result<Value, DsApiError> {
        let request = self.http.patch(self.url(path)).json(body);
        self.send(request).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Value, DsApiError> {
        let mut request = request.header(reqwest::header::ACCEPT, "application/json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(DsApiError::Status { status, detail });
        }

        Ok(response.json().await?)
    }
}
