use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use lazy_static::*;
use thiserror::Error;

use crate::constants::USER_AGENT;

lazy_static! {
    /// The client used for all HTTP requests.
    static ref HTTP_CLIENT: reqwest::Client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .expect("failed to build http client");
}

/// Possible errors when fetching a resource.
#[derive(Error, Debug)]
pub enum SourceError {
    /// Wrong URL, or the server is not available right now.
    #[error("request for {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Maybe the league runner has not written this file yet.
    #[error("unexpected status {status} for {url}")]
    UnexpectedStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    /// The file does not exist, or is not readable.
    #[error("failed to read {}: {}", path.display(), source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The source did not respond in time.
    #[error("fetching {resource} timed out after {}ms", after.as_millis())]
    Timeout { resource: String, after: Duration },
}

/// Somewhere to fetch the JSON files from that the league runner writes.
#[async_trait]
pub trait Source: Send + Sync {
    /// Fetch the raw text of a resource, f.e. `current_match.json`.
    async fn fetch(&self, resource: &str) -> Result<String, SourceError>;
}

/// Fetch a resource, but fail with `SourceError::Timeout` if that takes
/// longer than `after`.
pub async fn fetch_with_timeout(
    source: &dyn Source,
    resource: &str,
    after: Duration,
) -> Result<String, SourceError> {
    match tokio::time::timeout(after, source.fetch(resource)).await {
        Ok(result) => result,
        Err(_) => Err(SourceError::Timeout {
            resource: resource.to_string(),
            after,
        }),
    }
}

/// Fetch resources relative to a base URL.
pub struct HttpSource {
    base_url: String,
}

impl HttpSource {
    pub fn new(base_url: &str) -> Self {
        HttpSource {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn url_of(&self, resource: &str) -> String {
        format!("{}/{}", self.base_url, resource)
    }
}

#[async_trait]
impl Source for HttpSource {
    async fn fetch(&self, resource: &str) -> Result<String, SourceError> {
        let url = self.url_of(resource);
        let request_err = |source: reqwest::Error| SourceError::Request {
            url: url.clone(),
            source,
        };

        let response = HTTP_CLIENT.get(&url).send().await.map_err(request_err)?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::UnexpectedStatus {
                url: url.clone(),
                status,
            });
        }
        response.text().await.map_err(request_err)
    }
}

/// Read resources from a local directory.
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DirSource { root: root.into() }
    }
}

#[async_trait]
impl Source for DirSource {
    async fn fetch(&self, resource: &str) -> Result<String, SourceError> {
        let path = self.root.join(resource);
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| SourceError::Io { path, source })
    }
}
