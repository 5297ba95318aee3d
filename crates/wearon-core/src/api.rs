//! Storefront API Client
//!
//! Abstraction over the remote config/credits endpoints plus the envelope
//! normalization both endpoints share.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{ClientError, Result};

/// HTTP GET capability for the storefront API
///
/// Implement this for each transport: `reqwest`, a fetch shim, a test double.
#[async_trait]
pub trait ApiClient: Send + Sync {
    /// Issue one GET and return the decoded JSON body
    async fn get(&self, endpoint: &str) -> Result<Value>;
}

/// Unwrap the response envelope used by the storefront endpoints.
///
/// Bodies arrive either bare, wrapped once (`{"data": {...}}`), or wrapped
/// twice (`{"data": {"data": {...}}}`). Precedence: `data.data`, then
/// `data`, then the body itself. `null` counts as absent.
pub fn unwrap_envelope(body: &Value) -> &Value {
    let Some(inner) = body.get("data").filter(|v| !v.is_null()) else {
        return body;
    };

    inner.get("data").filter(|v| !v.is_null()).unwrap_or(inner)
}

/// `ApiClient` backed by `reqwest`
pub struct HttpApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpApiClient {
    /// Create a client rooted at `base_url`
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }
}

#[async_trait]
impl ApiClient for HttpApiClient {
    async fn get(&self, endpoint: &str) -> Result<Value> {
        let url = self.url(endpoint);
        tracing::debug!(url = %url, "GET");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                endpoint: endpoint.to_string(),
            });
        }

        Ok(response.json().await?)
    }
}

/// Mock API client with queued responses
///
/// For testing and demo purposes. Responses are dequeued in FIFO order and
/// every requested endpoint is recorded.
#[derive(Default)]
pub struct MockApiClient {
    responses: Mutex<VecDeque<Result<Value>>>,
    requests: Mutex<Vec<String>>,
}

impl MockApiClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful JSON body
    pub fn push_response(&self, body: Value) {
        self.responses.lock().unwrap().push_back(Ok(body));
    }

    /// Queue a failure
    pub fn push_error(&self, message: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(ClientError::Config(message.into())));
    }

    /// Endpoints requested so far, in call order
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ApiClient for MockApiClient {
    async fn get(&self, endpoint: &str) -> Result<Value> {
        self.requests.lock().unwrap().push(endpoint.to_string());

        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ClientError::Config("no queued response".into())))
    }
}
