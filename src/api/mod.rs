//! Remote API client.
//!
//! A typed layer over the StackIt REST backend. One core `request` method
//! owns URL building, bearer-token attachment, and error normalization; the
//! per-resource modules are thin wrappers over it.

mod questions;
mod search;
mod stats;
mod tags;
mod votes;

use std::sync::Arc;

use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::auth::IdentityProvider;
use crate::config::Config;
use crate::errors::ApiError;

/// Client for the StackIt backend.
///
/// Construct one instance and hand it to the store; there is no global
/// client. No timeouts or retries are configured, so a request that never
/// completes stalls the awaiting action.
pub struct ApiClient {
    http: Client,
    base_url: String,
    identity: Arc<dyn IdentityProvider>,
}

impl ApiClient {
    pub fn new(config: &Config, identity: Arc<dyn IdentityProvider>) -> Self {
        Self {
            http: Client::new(),
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            identity,
        }
    }

    /// Core request path shared by every endpoint wrapper.
    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<Value>,
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let mut builder = self.http.request(method.clone(), &url);

        if !query.is_empty() {
            builder = builder.query(query);
        }

        // A missing token is tolerated; the request goes out unauthenticated.
        match self.identity.bearer_token().await {
            Some(token) => builder = builder.bearer_auth(token),
            None => tracing::debug!("No bearer token available for {} {}", method, path),
        }

        if let Some(body) = &body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();

        if !status.is_success() {
            tracing::debug!("{} {} returned {}", method, path, status);
            let error_body = response.json::<Value>().await.ok();
            return Err(normalize_error(status, error_body));
        }

        Ok(response.json::<T>().await?)
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(Method::GET, path, &[], None).await
    }

    pub(crate) async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        self.request(Method::GET, path, query, None).await
    }

    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Value,
    ) -> Result<T, ApiError> {
        self.request(Method::POST, path, &[], Some(body)).await
    }

    pub(crate) async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(Method::POST, path, &[], None).await
    }
}

/// Map a non-2xx response body onto `ApiError`.
///
/// The backend reports errors as `{"detail": ...}` where `detail` is either a
/// message string or, for unprocessable input, a list of per-field records.
fn normalize_error(status: StatusCode, body: Option<Value>) -> ApiError {
    let detail = body.as_ref().and_then(|b| b.get("detail"));

    if status == StatusCode::UNPROCESSABLE_ENTITY {
        if let Some(Value::Array(entries)) = detail {
            let message = entries
                .iter()
                .map(|entry| {
                    let field = entry
                        .get("loc")
                        .and_then(Value::as_array)
                        .map(|loc| {
                            loc.iter()
                                .map(|part| match part {
                                    Value::String(s) => s.clone(),
                                    other => other.to_string(),
                                })
                                .collect::<Vec<_>>()
                                .join(".")
                        })
                        .unwrap_or_default();
                    let msg = entry.get("msg").and_then(Value::as_str).unwrap_or("invalid");
                    format!("{}: {}", field, msg)
                })
                .collect::<Vec<_>>()
                .join(", ");
            return ApiError::Validation(message);
        }
    }

    let message = detail
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| format!("request failed with status {}", status.as_u16()));

    ApiError::Api { status, message }
}
