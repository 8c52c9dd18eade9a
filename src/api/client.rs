//! HTTP client for the master-data backend.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Method};
use serde_json::Value;
use url::Url;

use crate::error::{ApiError, ApiResult};
use crate::log;

use super::models::Resource;

/// Client for the master-data REST API.
///
/// Cheap to clone (uses `Arc` internally), so each spawned request task gets
/// its own handle.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    base_url: Url,
    http_client: Client,
    timeout: Option<Duration>,
}

impl ApiClient {
    /// Create a client rooted at `base_url` (e.g. `http://localhost:8080`).
    pub fn new(base_url: &str, timeout: Option<Duration>) -> ApiResult<Self> {
        let parsed =
            Url::parse(base_url).map_err(|_| ApiError::InvalidBaseUrl(base_url.to_string()))?;
        if parsed.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl(base_url.to_string()));
        }

        let http_client = Client::builder().build()?;

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                base_url: parsed,
                http_client,
                timeout,
            }),
        })
    }

    pub fn base_url(&self) -> &str {
        self.inner.base_url.as_str()
    }

    fn url(&self, path: &str, key: Option<&str>) -> ApiResult<Url> {
        let mut url = self.inner.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| ApiError::InvalidBaseUrl(self.inner.base_url.to_string()))?;
            segments.pop_if_empty();
            segments.extend(path.split('/').filter(|s| !s.is_empty()));
            if let Some(key) = key {
                segments.push(key);
            }
        }
        Ok(url)
    }

    /// Send a request and return the body of a 2xx response.
    async fn send(
        &self,
        method: Method,
        path: &str,
        key: Option<&str>,
        body: Option<&Value>,
    ) -> ApiResult<String> {
        let url = self.url(path, key)?;
        log::log_request(method.as_str(), url.as_str());

        let mut request = self.inner.http_client.request(method, url.clone());
        if let Some(body) = body {
            request = request.json(body);
        }
        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                log::log(&format!("Request to {} failed: {}", url, e));
                return Err(ApiError::from(e));
            }
        };

        let status = response.status().as_u16();
        let text = response.text().await?;
        log::log_response(status, url.as_str(), &text);

        if (200..300).contains(&status) {
            Ok(text)
        } else {
            Err(ApiError::Status { status, body: text })
        }
    }

    /// Fetch a typed collection.
    pub async fn list<R: Resource>(&self) -> ApiResult<Vec<R>> {
        let text = self.send(Method::GET, R::PATH, None, None).await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Create a record and return the server's copy of it.
    pub async fn create<R: Resource>(&self, record: &R) -> ApiResult<R> {
        let body = serde_json::to_value(record)?;
        let text = self.send(Method::POST, R::PATH, None, Some(&body)).await?;
        Ok(serde_json::from_str(&text)?)
    }

    pub async fn update<R: Resource>(&self, key: &str, record: &R) -> ApiResult<()> {
        let body = serde_json::to_value(record)?;
        self.send(Method::PUT, R::PATH, Some(key), Some(&body)).await?;
        Ok(())
    }

    pub async fn delete<R: Resource>(&self, key: &str) -> ApiResult<()> {
        self.send(Method::DELETE, R::PATH, Some(key), None).await?;
        Ok(())
    }

    /// Fetch a collection as untyped JSON rows.
    pub async fn list_values(&self, path: &str) -> ApiResult<Vec<Value>> {
        let text = self.send(Method::GET, path, None, None).await?;
        match serde_json::from_str(&text)? {
            Value::Array(rows) => Ok(rows),
            other => Err(ApiError::Decode(format!("expected a JSON array, got {}", other))),
        }
    }

    pub async fn create_value(&self, path: &str, body: &Value) -> ApiResult<()> {
        self.send(Method::POST, path, None, Some(body)).await?;
        Ok(())
    }

    pub async fn update_value(&self, path: &str, key: &str, body: &Value) -> ApiResult<()> {
        self.send(Method::PUT, path, Some(key), Some(body)).await?;
        Ok(())
    }

    pub async fn delete_value(&self, path: &str, key: &str) -> ApiResult<()> {
        self.send(Method::DELETE, path, Some(key), None).await?;
        Ok(())
    }
}
