//! HTTP client for the upstream BoltPromo REST API.
//!
//! One `reqwest::Client` is shared across all services. Every GET goes
//! through the parameter sanitizer and the request de-duplication cache;
//! POSTs (contact form, view counters) bypass the cache.

use std::time::Duration;

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

pub mod cache;
mod params;

pub use cache::RequestCache;
pub use params::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, QueryParams, store_sort_ordering};

/// Configuration for connecting to the upstream API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Backend base URL, e.g. `"http://127.0.0.1:8000"`. Trailing slashes
    /// are stripped.
    pub base_url: String,
}

/// Errors surfaced by the upstream API client.
///
/// Cloneable so a single failed request can be shared with every caller
/// joined on the de-duplication cache.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// The request never produced a response (DNS, connect, timeout, ...).
    #[error("request failed: {0}")]
    Transport(String),

    /// The backend answered with a non-2xx status.
    #[error("unexpected status {status}")]
    Status {
        /// HTTP status code returned by the backend.
        status: u16,
    },

    /// The response body was not the JSON shape we expected.
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl ApiError {
    /// HTTP status carried by this error, when there is one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status } => Some(*status),
            Self::Transport(_) | Self::Decode(_) => None,
        }
    }

    /// Whether this error is a backend 404.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        match error.status() {
            Some(status) => Self::Status {
                status: status.as_u16(),
            },
            None => Self::Transport(error.to_string()),
        }
    }
}

/// Client for the upstream `API_URL/api/v1/...` endpoints.
#[derive(Debug)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
    cache: RequestCache,
}

impl ApiClient {
    /// Create a new client from the given configuration.
    #[must_use]
    pub fn new(config: ApiConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            http: reqwest::Client::new(),
            cache: RequestCache::new(),
        }
    }

    /// Fetch `endpoint` and decode the JSON body into `T`.
    ///
    /// Concurrent calls for the same endpoint + parameters share one
    /// upstream request.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-2xx status, or a body
    /// that does not decode into `T`.
    pub async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &QueryParams,
    ) -> Result<T, ApiError> {
        let value = self.get_json(endpoint, params).await?;

        serde_json::from_value(value).map_err(|error| ApiError::Decode(error.to_string()))
    }

    /// Fetch `endpoint` as raw JSON, de-duplicated by full request URL.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-2xx status.
    pub async fn get_json(&self, endpoint: &str, params: &QueryParams) -> Result<Value, ApiError> {
        let request = self
            .http
            .get(self.endpoint_url(endpoint))
            .query(params.entries())
            .build()?;

        let key = format!("GET {}", request.url());

        debug!("{key}");

        let http = self.http.clone();

        self.cache
            .get_or_fetch(&key, async move {
                let response = http.execute(request).await?;
                let status = response.status();

                if !status.is_success() {
                    return Err(ApiError::Status {
                        status: status.as_u16(),
                    });
                }

                response
                    .json::<Value>()
                    .await
                    .map_err(|error| ApiError::Decode(error.to_string()))
            })
            .await
    }

    /// POST a JSON `body` to `endpoint` and decode the JSON response.
    ///
    /// POSTs are never cached or de-duplicated.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-2xx status, or an
    /// undecodable body.
    pub async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.endpoint_url(endpoint);

        debug!("POST {url}");

        let response = self.http.post(url).json(body).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|error| ApiError::Decode(error.to_string()))
    }

    /// POST to `endpoint` with an empty body, ignoring the response body.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-2xx status.
    pub async fn post_empty(&self, endpoint: &str) -> Result<(), ApiError> {
        let url = self.endpoint_url(endpoint);

        debug!("POST {url}");

        let response = self.http.post(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
            });
        }

        Ok(())
    }

    /// GET `endpoint` and report only the response status.
    ///
    /// Used by the health probe, which cares about 503 and nothing else.
    /// The request is bounded by `timeout` so a slow backend cannot stall
    /// callers.
    ///
    /// # Errors
    ///
    /// Returns an error when no response arrives within `timeout`.
    pub async fn get_status(&self, endpoint: &str, timeout: Duration) -> Result<u16, ApiError> {
        let response = self
            .http
            .get(self.endpoint_url(endpoint))
            .timeout(timeout)
            .send()
            .await?;

        Ok(response.status().as_u16())
    }

    fn endpoint_url(&self, endpoint: &str) -> String {
        let path = endpoint.trim_matches('/');

        format!("{}/api/v1/{path}/", self.base_url)
    }
}
