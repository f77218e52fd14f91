//! Network capability for probing and fetching tree JSON documents.
//!
//! The resolver never talks to the network directly; it goes through the
//! [`TreeFetcher`] trait so tests can script probe outcomes and record probe
//! order. [`HttpFetcher`] is the production implementation over `reqwest`.

use crate::error::ResolveError;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

const HTTP_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const HTTP_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Network fetch capability: a lightweight existence probe plus a full GET.
#[async_trait]
pub trait TreeFetcher: Send + Sync {
    /// HEAD-equivalent existence probe.
    ///
    /// Probing is advisory and never fatal: any transport failure maps to
    /// `false` rather than an error.
    async fn exists(&self, path: &str) -> bool;

    /// Full GET returning the decoded JSON body.
    async fn fetch_json(&self, path: &str) -> Result<Value, ResolveError>;
}

/// HTTP implementation of [`TreeFetcher`].
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, ResolveError> {
        let client = Client::builder()
            .no_proxy()
            .connect_timeout(HTTP_CONNECT_TIMEOUT)
            .timeout(HTTP_REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { client })
    }

    /// Build a fetcher around an existing client, e.g. one with custom
    /// timeouts or default headers.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TreeFetcher for HttpFetcher {
    async fn exists(&self, path: &str) -> bool {
        match self
            .client
            .head(path)
            .header("Cache-Control", "no-cache")
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(err) => {
                debug!(path, error = %err, "existence probe failed");
                false
            }
        }
    }

    async fn fetch_json(&self, path: &str) -> Result<Value, ResolveError> {
        let response = self
            .client
            .get(path)
            .header("Cache-Control", "no-cache")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ResolveError::FetchFailed {
                path: path.to_string(),
                reason: format!("status {}", response.status()),
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| ResolveError::FetchFailed {
                path: path.to_string(),
                reason: format!("invalid JSON body: {}", e),
            })
    }
}

// Scripted fetcher for unit tests
#[cfg(test)]
pub struct MockFetcher {
    existing: Vec<String>,
    documents: std::collections::HashMap<String, Value>,
    probes: std::sync::Mutex<Vec<String>>,
}

#[cfg(test)]
impl MockFetcher {
    pub fn new(existing: Vec<String>) -> Self {
        Self {
            existing,
            documents: std::collections::HashMap::new(),
            probes: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn with_document(mut self, path: impl Into<String>, document: Value) -> Self {
        self.documents.insert(path.into(), document);
        self
    }

    pub fn probed_paths(&self) -> Vec<String> {
        self.probes.lock().unwrap().clone()
    }
}

#[cfg(test)]
#[async_trait]
impl TreeFetcher for MockFetcher {
    async fn exists(&self, path: &str) -> bool {
        self.probes.lock().unwrap().push(path.to_string());
        self.existing.iter().any(|p| p == path)
    }

    async fn fetch_json(&self, path: &str) -> Result<Value, ResolveError> {
        self.documents
            .get(path)
            .cloned()
            .ok_or_else(|| ResolveError::FetchFailed {
                path: path.to_string(),
                reason: "no document scripted for path".to_string(),
            })
    }
}
